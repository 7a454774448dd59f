//! Common types used across vertex3d
//!
//! Small value types shared by the mesh model and the exporters.

use serde::{Deserialize, Serialize};

/// 3D vector (translation, scale, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Rotation in engine angular units (65536 units per full turn)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: i32,
    pub yaw: i32,
    pub roll: i32,
}

impl Rotator {
    pub const ZERO: Self = Self { pitch: 0, yaw: 0, roll: 0 };

    pub fn new(pitch: i32, yaw: i32, roll: i32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Coarse angle form used by the import script: each component
    /// arithmetically shifted right by 8 bits, returned as (yaw, pitch, roll).
    pub fn to_script_angles(&self) -> (i32, i32, i32) {
        (self.yaw >> 8, self.pitch >> 8, self.roll >> 8)
    }
}

/// Texture coordinate pair, nominally in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshUv {
    pub u: f32,
    pub v: f32,
}

impl MeshUv {
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Box containing a single point
    pub fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    pub fn expand(&mut self, point: Vec3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }
}
