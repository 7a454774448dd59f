//! Animation file (`_a.3d`) writer

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;
use vertex3d_core::{MeshVert, VertMesh};

use super::{frame_byte_size, narrow_count, AnimHeader};
use crate::error::{ExportError, ExportResult};
use crate::options::LimitMode;

/// Build the animation header, narrowing counts according to `limits`
pub(crate) fn anim_header(mesh: &VertMesh, limits: LimitMode) -> ExportResult<AnimHeader> {
    Ok(AnimHeader {
        num_frames: narrow_count("frame count", mesh.frame_count, limits)?,
        frame_size: narrow_count(
            "frame size",
            frame_byte_size(mesh.wedge_count(), MeshVert::SIZE),
            limits,
        )?,
    })
}

/// Write every frame expanded to one vertex record per wedge.
///
/// Frames are stored compactly in the mesh (one record per unique vertex);
/// the importer expects them in wedge order so that a triangle's wedge
/// indices address the animation data directly. Records are copied
/// verbatim.
pub fn export_animation<W: Write>(
    mesh: &VertMesh,
    writer: &mut W,
    limits: LimitMode,
) -> ExportResult<()> {
    anim_header(mesh, limits)?.write_to(writer)?;

    for frame in 0..mesh.frame_count {
        // Saturated indices are past any real vertex list and fail the lookup.
        let base = frame.saturating_mul(mesh.vertex_count);
        for (wedge_index, wedge) in mesh.wedges.iter().enumerate() {
            let vertex = base.saturating_add(wedge.vertex_index as usize);
            let vert = mesh.verts.get(vertex).ok_or(ExportError::VertexOutOfRange {
                frame,
                wedge: wedge_index,
                vertex,
                count: mesh.verts.len(),
            })?;
            writer.write_u32::<LittleEndian>(vert.0)?;
        }
    }

    debug!(
        mesh = mesh.name(),
        frames = mesh.frame_count,
        records = mesh.frame_count.saturating_mul(mesh.wedge_count()),
        "Wrote animation frames"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertex3d_core::{MeshIdentity, MeshWedge};

    fn read_records(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_expands_frames_per_wedge() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.vertex_count = 2;
        mesh.frame_count = 2;
        mesh.verts = vec![MeshVert(10), MeshVert(11), MeshVert(20), MeshVert(21)];
        mesh.wedges = vec![
            MeshWedge::new(1, 0.0, 0.0),
            MeshWedge::new(0, 0.0, 0.0),
            MeshWedge::new(1, 1.0, 1.0),
        ];

        let mut out = Vec::new();
        export_animation(&mesh, &mut out, LimitMode::Truncate).unwrap();

        assert_eq!(&out[..AnimHeader::SIZE], &[2, 0, 12, 0]);
        assert_eq!(read_records(&out[AnimHeader::SIZE..]), vec![11, 10, 11, 21, 20, 21]);
    }

    #[test]
    fn test_no_frames_writes_header_only() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Empty"));
        mesh.wedges = vec![MeshWedge::default(); 3];

        let mut out = Vec::new();
        export_animation(&mesh, &mut out, LimitMode::Truncate).unwrap();
        assert_eq!(out, vec![0, 0, 12, 0]);
    }

    #[test]
    fn test_missing_frame_data() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.vertex_count = 1;
        mesh.frame_count = 2;
        mesh.verts = vec![MeshVert(1)];
        mesh.wedges = vec![MeshWedge::default()];

        let err = export_animation(&mesh, &mut Vec::new(), LimitMode::Truncate).unwrap_err();
        assert!(matches!(
            err,
            ExportError::VertexOutOfRange { frame: 1, wedge: 0, vertex: 1, count: 1 }
        ));
    }

    #[test]
    fn test_frame_size_truncates() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Wide"));
        // 16384 * 4 = 65536 bytes per frame
        mesh.wedges = vec![MeshWedge::default(); 16384];

        let mut out = Vec::new();
        export_animation(&mesh, &mut out, LimitMode::Truncate).unwrap();
        assert_eq!(out, vec![0, 0, 0, 0]);

        let err = export_animation(&mesh, &mut Vec::new(), LimitMode::Strict).unwrap_err();
        assert!(matches!(err, ExportError::CountOverflow { field: "frame size", .. }));
    }

    #[test]
    fn test_huge_vertex_count_is_out_of_range() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.vertex_count = usize::MAX;
        mesh.frame_count = 2;
        mesh.verts = vec![MeshVert(7)];
        mesh.wedges = vec![MeshWedge::new(0, 0.0, 0.0)];

        let err = export_animation(&mesh, &mut Vec::new(), LimitMode::Truncate).unwrap_err();
        assert!(matches!(
            err,
            ExportError::VertexOutOfRange { frame: 1, wedge: 0, vertex: usize::MAX, count: 1 }
        ));
    }
}
