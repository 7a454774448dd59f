//! Legacy Unreal "3D" exporter
//!
//! Writes a vertex mesh as the three artifacts consumed by the engine's
//! mesh importer:
//! - `<name>_d.3d`: geometry (triangles with wedge indices and packed UVs)
//! - `<name>_a.3d`: animation (one vertex record per wedge per frame)
//! - `<name>.uc`: optional import script with `#exec` directives
//!
//! All binary fields are little-endian.

mod anim;
mod data;
mod exporter;
mod printf;
mod script;

pub use anim::export_animation;
pub use data::export_mesh_data;

pub(crate) use anim::anim_header;
pub(crate) use data::data_header;
pub use exporter::{ExportPaths, ExportSummary, Unreal3dExporter};
pub use printf::format_g;
pub use script::export_script;

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::warn;

use crate::error::{ExportError, ExportResult};
use crate::options::LimitMode;

/// Geometry file header (48 bytes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataHeader {
    pub num_polys: u16,
    pub num_vertices: u16,
    pub bogus_rot: u16,
    pub bogus_frame: u16,
    pub bogus_norm: [u32; 3],
    pub fix_scale: u32,
    pub unused: [u32; 3],
    /// Undocumented trailing words, always zero
    pub unknown: [u32; 3],
}

impl DataHeader {
    pub const SIZE: usize = 48;

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u16::<LittleEndian>(self.num_polys)?;
        writer.write_u16::<LittleEndian>(self.num_vertices)?;
        writer.write_u16::<LittleEndian>(self.bogus_rot)?;
        writer.write_u16::<LittleEndian>(self.bogus_frame)?;
        for value in self.bogus_norm {
            writer.write_u32::<LittleEndian>(value)?;
        }
        writer.write_u32::<LittleEndian>(self.fix_scale)?;
        for value in self.unused.iter().chain(&self.unknown) {
            writer.write_u32::<LittleEndian>(*value)?;
        }
        Ok(())
    }
}

/// 8-bit texture coordinate pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedUv {
    pub u: u8,
    pub v: u8,
}

/// Geometry file triangle record (16 bytes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshTri {
    /// Wedge indices, in the face's winding order
    pub vertex: [u16; 3],
    pub kind: u8,
    pub color: u8,
    pub tex: [PackedUv; 3],
    pub texture_num: u8,
    pub flags: u8,
}

impl MeshTri {
    pub const SIZE: usize = 16;

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for index in self.vertex {
            writer.write_u16::<LittleEndian>(index)?;
        }
        writer.write_u8(self.kind)?;
        writer.write_u8(self.color)?;
        for uv in &self.tex {
            writer.write_u8(uv.u)?;
            writer.write_u8(uv.v)?;
        }
        writer.write_u8(self.texture_num)?;
        writer.write_u8(self.flags)
    }
}

/// Animation file header (4 bytes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimHeader {
    pub num_frames: u16,
    /// Bytes in one frame of wedge-expanded vertex records
    pub frame_size: u16,
}

impl AnimHeader {
    pub const SIZE: usize = 4;

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u16::<LittleEndian>(self.num_frames)?;
        writer.write_u16::<LittleEndian>(self.frame_size)
    }
}

/// Quantize a [0, 1] texture coordinate to 8-bit fixed point.
///
/// Rounds half up and keeps the low 8 bits of the result, so 0.5 becomes
/// 128 and out-of-range input wraps instead of saturating.
pub fn quantize_uv(value: f32) -> u8 {
    (value * 255.0 + 0.5).floor() as i32 as u8
}

/// Bytes in one animation frame for `wedge_count` records of `record_size`.
///
/// Saturates at `usize::MAX`, which never fits a 16-bit header field.
pub fn frame_byte_size(wedge_count: usize, record_size: usize) -> usize {
    wedge_count.saturating_mul(record_size)
}

/// Narrow a count to a 16-bit header field according to `mode`
pub(crate) fn narrow_count(field: &'static str, value: usize, mode: LimitMode) -> ExportResult<u16> {
    let stored = value as u16;
    if value > u16::MAX as usize {
        match mode {
            LimitMode::Strict => return Err(ExportError::CountOverflow { field, value }),
            LimitMode::Truncate => {
                warn!(field, value, stored, "Count truncated to 16 bits");
            }
        }
    }
    Ok(stored)
}
