//! Geometry file (`_d.3d`) writer

use std::io::Write;

use tracing::debug;
use vertex3d_core::VertMesh;

use super::{narrow_count, quantize_uv, DataHeader, MeshTri, PackedUv};
use crate::error::{ExportError, ExportResult};
use crate::options::LimitMode;

/// Build the geometry header, narrowing counts according to `limits`
pub(crate) fn data_header(mesh: &VertMesh, limits: LimitMode) -> ExportResult<DataHeader> {
    Ok(DataHeader {
        num_polys: narrow_count("face count", mesh.face_count(), limits)?,
        num_vertices: narrow_count("wedge count", mesh.wedge_count(), limits)?,
        ..Default::default()
    })
}

/// Write the geometry header followed by one triangle record per face
pub fn export_mesh_data<W: Write>(
    mesh: &VertMesh,
    writer: &mut W,
    limits: LimitMode,
) -> ExportResult<()> {
    data_header(mesh, limits)?.write_to(writer)?;

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let mut tri = MeshTri::default();
        for (corner, &wedge_index) in face.wedge_indices.iter().enumerate() {
            let wedge = mesh.wedges.get(wedge_index as usize).ok_or(
                ExportError::WedgeOutOfRange {
                    face: face_index,
                    wedge: wedge_index as usize,
                    count: mesh.wedge_count(),
                },
            )?;
            // The importer indexes the animation file per wedge, so the
            // wedge index is stored here rather than the wedge's vertex.
            tri.vertex[corner] = wedge_index;
            tri.tex[corner] = PackedUv {
                u: quantize_uv(wedge.tex_uv.u),
                v: quantize_uv(wedge.tex_uv.v),
            };
        }
        tri.texture_num = face.material_index as u8;
        tri.write_to(writer)?;
    }

    debug!(
        mesh = mesh.name(),
        faces = mesh.face_count(),
        wedges = mesh.wedge_count(),
        "Wrote geometry"
    );

    Ok(())
}
