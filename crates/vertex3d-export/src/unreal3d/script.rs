//! Import script generation
//!
//! The script is a class stub whose `#exec` lines tell the importer how to
//! rebuild the mesh from the two binary files. Directive keywords and field
//! widths are fixed by the importer's parser.

use std::io::Write;

use tracing::debug;
use vertex3d_core::VertMesh;

use super::printf::{format_g, pad_bytes};
use crate::error::ExportResult;

/// Minimum width of the `SEQ=` field, in bytes
const SEQ_WIDTH: usize = 10;

/// Write the `#exec` import script for `mesh`.
///
/// `binary_extension` names the geometry and animation files the importer
/// loads, and must match the extension they were written with.
pub fn export_script<W: Write>(
    mesh: &VertMesh,
    writer: &mut W,
    binary_extension: &str,
) -> ExportResult<()> {
    let name = mesh.name();
    let origin = &mesh.origin;
    let (yaw, pitch, roll) = mesh.rotation.to_script_angles();

    write!(writer, "class {} extends Actor;\n\n", name)?;
    writeln!(
        writer,
        "#exec MESH IMPORT MESH={} ANIVFILE={}_a.{} DATAFILE={}_d.{}",
        name, name, binary_extension, name, binary_extension
    )?;
    write!(
        writer,
        "#exec MESH ORIGIN MESH={} X={} Y={} Z={} YAW={} PITCH={} ROLL={}\n\n",
        name,
        format_g(origin.x as f64),
        format_g(origin.y as f64),
        format_g(origin.z as f64),
        yaw,
        pitch,
        roll
    )?;

    for seq in &mesh.sequences {
        write!(
            writer,
            "#exec MESH SEQUENCE MESH={} SEQ={} STARTFRAME={:<2} NUMFRAMES={:<2}",
            name,
            pad_bytes(&seq.name, SEQ_WIDTH),
            seq.start_frame,
            seq.num_frames
        )?;
        if seq.rate != 1.0 && seq.num_frames > 1 {
            write!(writer, " RATE={}", format_g(seq.rate as f64))?;
        }
        if let Some(group) = seq.groups.first() {
            write!(writer, " GROUP={}", group)?;
        }
        writeln!(writer)?;
    }

    let scale = &mesh.scale;
    write!(
        writer,
        "\n#exec MESHMAP SCALE MESHMAP={} X={} Y={} Z={}\n\n",
        name,
        format_g(scale.x as f64),
        format_g(scale.y as f64),
        format_g(scale.z as f64)
    )?;

    // Notifies follow all sequence lines, grouped by owning sequence.
    for seq in &mesh.sequences {
        for notify in &seq.notifies {
            writeln!(
                writer,
                "#exec MESH NOTIFY MESH={} SEQ={} TIME={} FUNCTION={}",
                name,
                pad_bytes(&seq.name, SEQ_WIDTH),
                format_g(notify.time as f64),
                notify.function
            )?;
        }
    }

    debug!(
        mesh = name,
        sequences = mesh.sequences.len(),
        notifies = mesh.total_notifies(),
        "Wrote import script"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertex3d_core::{AnimSequence, MeshIdentity, Rotator, Vec3};

    fn script_for(mesh: &VertMesh) -> String {
        let mut out = Vec::new();
        export_script(mesh, &mut out, "3d").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_minimal_script() {
        let mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        let expected = "class Gun extends Actor;\n\
            \n\
            #exec MESH IMPORT MESH=Gun ANIVFILE=Gun_a.3d DATAFILE=Gun_d.3d\n\
            #exec MESH ORIGIN MESH=Gun X=0 Y=0 Z=0 YAW=0 PITCH=0 ROLL=0\n\
            \n\
            \n\
            #exec MESHMAP SCALE MESHMAP=Gun X=1 Y=1 Z=1\n\
            \n";
        assert_eq!(script_for(&mesh), expected);
    }

    #[test]
    fn test_origin_and_rotation() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.origin = Vec3::new(0.5, -12.25, 100.0);
        mesh.rotation = Rotator::new(-16384, 32768, 256);

        let script = script_for(&mesh);
        assert!(script.contains(
            "#exec MESH ORIGIN MESH=Gun X=0.5 Y=-12.25 Z=100 YAW=128 PITCH=-64 ROLL=1\n"
        ));
    }

    #[test]
    fn test_sequence_padding() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.sequences.push(AnimSequence::new("Still", 0, 1));
        mesh.sequences.push(AnimSequence::new("VeryLongSequenceName", 120, 300));

        let script = script_for(&mesh);
        assert!(script.contains(
            "#exec MESH SEQUENCE MESH=Gun SEQ=Still      STARTFRAME=0  NUMFRAMES=1 \n"
        ));
        assert!(script.contains(
            "#exec MESH SEQUENCE MESH=Gun SEQ=VeryLongSequenceName STARTFRAME=120 NUMFRAMES=300\n"
        ));
    }

    #[test]
    fn test_rate_and_group_fields() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.sequences.push(AnimSequence::new("Fire", 1, 8).with_rate(2.0).with_group("Attack"));
        mesh.sequences.push(AnimSequence::new("Pose", 9, 1).with_rate(2.0));
        mesh.sequences.push(AnimSequence::new("Idle", 10, 4).with_group("Rest").with_group("Other"));

        let script = script_for(&mesh);
        assert!(script.contains("SEQ=Fire       STARTFRAME=1  NUMFRAMES=8  RATE=2 GROUP=Attack\n"));
        assert!(script.contains("SEQ=Pose       STARTFRAME=9  NUMFRAMES=1 \n"));
        assert!(script.contains("SEQ=Idle       STARTFRAME=10 NUMFRAMES=4  GROUP=Rest\n"));
    }

    #[test]
    fn test_notifies_follow_scale() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        mesh.scale = Vec3::new(0.0625, 0.0625, 0.125);
        mesh.sequences.push(AnimSequence::new("Fire", 0, 4).with_notify(0.25, "PlayFiring"));
        mesh.sequences.push(AnimSequence::new("Reload", 4, 4).with_notify(0.5, "PlayClick"));

        let script = script_for(&mesh);
        let scale = script.find("#exec MESHMAP SCALE MESHMAP=Gun X=0.0625 Y=0.0625 Z=0.125\n\n").unwrap();
        let last_sequence = script.rfind("#exec MESH SEQUENCE").unwrap();
        let fire = script
            .find("#exec MESH NOTIFY MESH=Gun SEQ=Fire       TIME=0.25 FUNCTION=PlayFiring\n")
            .unwrap();
        let reload = script
            .find("#exec MESH NOTIFY MESH=Gun SEQ=Reload     TIME=0.5 FUNCTION=PlayClick\n")
            .unwrap();

        assert!(last_sequence < scale);
        assert!(scale < fire);
        assert!(fire < reload);
        assert!(script.ends_with("FUNCTION=PlayClick\n"));
    }

    #[test]
    fn test_binary_extension_names_artifacts() {
        let mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        let mut out = Vec::new();
        export_script(&mesh, &mut out, "bin").unwrap();

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("#exec MESH IMPORT MESH=Gun ANIVFILE=Gun_a.bin DATAFILE=Gun_d.bin\n"));
    }

    #[test]
    fn test_sequence_padding_counts_bytes() {
        let mut mesh = VertMesh::new(MeshIdentity::new("Weapons", "Gun"));
        // "Tir\u{e9}" is 4 characters but 5 bytes
        mesh.sequences.push(AnimSequence::new("Tir\u{e9}", 0, 2).with_notify(0.5, "Bang"));

        let script = script_for(&mesh);
        assert!(script.contains("SEQ=Tir\u{e9}     STARTFRAME=0  NUMFRAMES=2 \n"));
        assert!(script.contains("SEQ=Tir\u{e9}     TIME=0.5 FUNCTION=Bang\n"));
    }
}
