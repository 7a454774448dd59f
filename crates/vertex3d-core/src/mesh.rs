//! Vertex-animated mesh model
//!
//! A read-only description of a mesh whose animation is stored as whole
//! frames of vertex positions. Geometry is expressed through wedges (one per
//! polygon corner) so that a single vertex can carry several texture
//! coordinates.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ResultExt};
use crate::types::{BoundingBox, MeshUv, Rotator, Vec3};

/// Where a mesh lives: package, class and object name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshIdentity {
    pub package: String,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    pub name: String,
}

fn default_class_name() -> String {
    "VertMesh".to_string()
}

impl MeshIdentity {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_name: default_class_name(),
            name: name.into(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

/// One polygon corner: a vertex reference plus its texture coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshWedge {
    pub vertex_index: u16,
    pub tex_uv: MeshUv,
}

impl MeshWedge {
    pub fn new(vertex_index: u16, u: f32, v: f32) -> Self {
        Self {
            vertex_index,
            tex_uv: MeshUv::new(u, v),
        }
    }
}

/// Triangle made of three wedges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshFace {
    pub wedge_indices: [u16; 3],
    #[serde(default)]
    pub material_index: u16,
}

impl MeshFace {
    pub fn new(wedge_indices: [u16; 3], material_index: u16) -> Self {
        Self {
            wedge_indices,
            material_index,
        }
    }
}

/// Packed vertex position.
///
/// Bit layout (LSB first): X signed 11 bits, Y signed 11 bits, Z signed
/// 10 bits. Written to disk as a little-endian `u32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "MeshVertRepr", into = "u32")]
pub struct MeshVert(pub u32);

impl MeshVert {
    /// On-disk size of one record
    pub const SIZE: usize = 4;

    /// Pack components, keeping only the low 11/11/10 bits of each
    pub fn pack(x: i32, y: i32, z: i32) -> Self {
        let raw = (x as u32 & 0x7FF) | ((y as u32 & 0x7FF) << 11) | ((z as u32 & 0x3FF) << 22);
        Self(raw)
    }

    pub fn x(&self) -> i32 {
        ((self.0 << 21) as i32) >> 21
    }

    pub fn y(&self) -> i32 {
        ((self.0 << 10) as i32) >> 21
    }

    pub fn z(&self) -> i32 {
        (self.0 as i32) >> 22
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x() as f32, self.y() as f32, self.z() as f32)
    }
}

impl From<MeshVert> for u32 {
    fn from(vert: MeshVert) -> Self {
        vert.0
    }
}

/// Accepted JSON spellings of a vertex: the packed word or its components
#[derive(Deserialize)]
#[serde(untagged)]
enum MeshVertRepr {
    Packed(u32),
    Components { x: i32, y: i32, z: i32 },
}

impl From<MeshVertRepr> for MeshVert {
    fn from(repr: MeshVertRepr) -> Self {
        match repr {
            MeshVertRepr::Packed(raw) => MeshVert(raw),
            MeshVertRepr::Components { x, y, z } => MeshVert::pack(x, y, z),
        }
    }
}

/// Timed event inside an animation sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimNotify {
    pub time: f32,
    pub function: String,
}

/// Named run of frames played as one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimSequence {
    pub name: String,
    pub start_frame: i32,
    pub num_frames: i32,
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub notifies: Vec<AnimNotify>,
}

fn default_rate() -> f32 {
    1.0
}

impl AnimSequence {
    pub fn new(name: impl Into<String>, start_frame: i32, num_frames: i32) -> Self {
        Self {
            name: name.into(),
            start_frame,
            num_frames,
            rate: default_rate(),
            groups: Vec::new(),
            notifies: Vec::new(),
        }
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_notify(mut self, time: f32, function: impl Into<String>) -> Self {
        self.notifies.push(AnimNotify {
            time,
            function: function.into(),
        });
        self
    }
}

/// Vertex-animated mesh
///
/// `verts` holds `frame_count` consecutive frames of `vertex_count` records.
/// Nothing here is validated: exporters encode whatever the model contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertMesh {
    pub identity: MeshIdentity,
    #[serde(default)]
    pub wedges: Vec<MeshWedge>,
    #[serde(default)]
    pub faces: Vec<MeshFace>,
    #[serde(default)]
    pub verts: Vec<MeshVert>,
    pub vertex_count: usize,
    pub frame_count: usize,
    #[serde(default)]
    pub sequences: Vec<AnimSequence>,
    #[serde(default)]
    pub origin: Vec3,
    #[serde(default)]
    pub rotation: Rotator,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl VertMesh {
    /// Create an empty mesh with unit scale
    pub fn new(identity: MeshIdentity) -> Self {
        Self {
            identity,
            wedges: Vec::new(),
            faces: Vec::new(),
            verts: Vec::new(),
            vertex_count: 0,
            frame_count: 0,
            sequences: Vec::new(),
            origin: Vec3::ZERO,
            rotation: Rotator::ZERO,
            scale: default_scale(),
        }
    }

    /// Load a mesh description from JSON
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a mesh description from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let file = File::open(path)
            .map_err(Error::from)
            .with_context(|| format!("opening {}", path.display()))?;
        Self::from_json_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn wedge_count(&self) -> usize {
        self.wedges.len()
    }

    /// Vertex records of one frame, if the frame is fully present
    pub fn frame(&self, index: usize) -> Option<&[MeshVert]> {
        let start = index.checked_mul(self.vertex_count)?;
        let end = start.checked_add(self.vertex_count)?;
        self.verts.get(start..end)
    }

    /// Bounds of one frame's decoded positions
    pub fn frame_bounds(&self, index: usize) -> Option<BoundingBox> {
        let frame = self.frame(index)?;
        let (first, rest) = frame.split_first()?;
        let mut bounds = BoundingBox::from_point(first.position());
        for vert in rest {
            bounds.expand(vert.position());
        }
        Some(bounds)
    }

    /// Number of notify events across all sequences
    pub fn total_notifies(&self) -> usize {
        self.sequences.iter().map(|s| s.notifies.len()).sum()
    }
}
