//! Legacy 3D exporter implementation

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, info_span};
use vertex3d_core::{MeshIdentity, VertMesh};

use super::{anim_header, data_header, export_animation, export_mesh_data, export_script};
use crate::error::{ExportError, ExportResult, ExportStage};
use crate::options::{ExportOptions, LimitMode};

/// Output locations for one mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// `<output_dir>/<package>/<class>/<name>`, without extension
    pub base: PathBuf,
    pub script: PathBuf,
    pub data: PathBuf,
    pub animation: PathBuf,
}

impl ExportPaths {
    /// Derive artifact paths from the mesh identity
    pub fn for_mesh(identity: &MeshIdentity, options: &ExportOptions) -> Self {
        let dir = options
            .output_dir
            .join(&identity.package)
            .join(&identity.class_name);
        let name = &identity.name;

        Self {
            base: dir.join(name),
            script: dir.join(format!("{}.{}", name, options.script_extension)),
            data: dir.join(format!("{}_d.{}", name, options.binary_extension)),
            animation: dir.join(format!("{}_a.{}", name, options.binary_extension)),
        }
    }

    /// Directory that holds all three artifacts
    pub fn directory(&self) -> &Path {
        self.base.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// What a successful export wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub script: Option<PathBuf>,
    pub data: PathBuf,
    pub animation: PathBuf,
    pub bytes_written: u64,
}

/// Writes a mesh as the legacy script/geometry/animation triple
pub struct Unreal3dExporter {
    options: ExportOptions,
}

impl Unreal3dExporter {
    /// Create a new exporter
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export `mesh` under the configured output directory.
    ///
    /// Stages run in order (script, geometry, animation); each file is
    /// flushed and closed before the next is opened. The first failure
    /// aborts the export, leaving earlier artifacts on disk. In strict
    /// mode a binary file's header counts are checked before the file is
    /// created, so an overflow leaves any existing file untouched.
    pub fn export(&self, mesh: &VertMesh) -> ExportResult<ExportSummary> {
        let paths = ExportPaths::for_mesh(&mesh.identity, &self.options);
        let span = info_span!("export_3d", mesh = %mesh.name());
        let _guard = span.enter();

        let directory = paths.directory();
        if !directory.as_os_str().is_empty() {
            fs::create_dir_all(directory).map_err(|source| ExportError::CreateDir {
                path: directory.to_path_buf(),
                source,
            })?;
        }

        let limits = self.options.limit_mode();
        let mut bytes_written = 0;

        let script = if self.options.export_scripts {
            bytes_written += write_artifact(ExportStage::Script, &paths.script, |w| {
                export_script(mesh, w, &self.options.binary_extension)
            })?;
            Some(paths.script.clone())
        } else {
            None
        };

        if limits == LimitMode::Strict {
            data_header(mesh, limits)
                .map_err(|e| e.in_stage(ExportStage::Geometry, &paths.data))?;
        }
        bytes_written += write_artifact(ExportStage::Geometry, &paths.data, |w| {
            export_mesh_data(mesh, w, limits)
        })?;

        if limits == LimitMode::Strict {
            anim_header(mesh, limits)
                .map_err(|e| e.in_stage(ExportStage::Animation, &paths.animation))?;
        }
        bytes_written += write_artifact(ExportStage::Animation, &paths.animation, |w| {
            export_animation(mesh, w, limits)
        })?;

        Ok(ExportSummary {
            script,
            data: paths.data,
            animation: paths.animation,
            bytes_written,
        })
    }
}

impl Default for Unreal3dExporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

/// Create `path`, run `write` against it and close it, attributing any
/// failure to `stage`. Returns the number of bytes written.
fn write_artifact<F>(stage: ExportStage, path: &Path, write: F) -> ExportResult<u64>
where
    F: FnOnce(&mut CountingWriter<BufWriter<File>>) -> ExportResult<()>,
{
    let run = || -> ExportResult<u64> {
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = CountingWriter::new(BufWriter::new(file));
        write(&mut writer)?;
        writer.flush()?;
        Ok(writer.bytes_written())
    };

    let bytes = run().map_err(|e| e.in_stage(stage, path))?;
    info!(stage = %stage, path = %path.display(), bytes, "Wrote artifact");
    Ok(bytes)
}

/// Write adapter that tallies bytes passed through
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.count
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_identity() {
        let options = ExportOptions {
            output_dir: PathBuf::new(),
            ..Default::default()
        };
        let identity = MeshIdentity::new("Weapons", "Gun");
        let paths = ExportPaths::for_mesh(&identity, &options);

        assert_eq!(paths.base, PathBuf::from("Weapons/VertMesh/Gun"));
        assert_eq!(paths.script, PathBuf::from("Weapons/VertMesh/Gun.uc"));
        assert_eq!(paths.data, PathBuf::from("Weapons/VertMesh/Gun_d.3d"));
        assert_eq!(paths.animation, PathBuf::from("Weapons/VertMesh/Gun_a.3d"));
        assert_eq!(paths.directory(), Path::new("Weapons/VertMesh"));
    }

    #[test]
    fn test_paths_keep_dotted_names() {
        let options = ExportOptions {
            output_dir: PathBuf::from("out"),
            binary_extension: "bin".to_string(),
            ..Default::default()
        };
        let identity = MeshIdentity::new("Pkg", "Mesh.v2").with_class("LodMesh");
        let paths = ExportPaths::for_mesh(&identity, &options);

        assert_eq!(paths.data, PathBuf::from("out/Pkg/LodMesh/Mesh.v2_d.bin"));
    }

    #[test]
    fn test_counting_writer() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(b"abc").unwrap();
        writer.write_all(b"de").unwrap();
        assert_eq!(writer.bytes_written(), 5);
    }
}
