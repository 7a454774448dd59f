//! Export errors

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which artifact an export failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportStage {
    Script,
    Geometry,
    Animation,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStage::Script => "script",
            ExportStage::Geometry => "geometry",
            ExportStage::Animation => "animation",
        };
        f.write_str(name)
    }
}

/// Errors raised while writing the legacy mesh artifacts
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Face {face} references wedge {wedge}, but the mesh has {count} wedges")]
    WedgeOutOfRange { face: usize, wedge: usize, count: usize },

    #[error("Wedge {wedge} in frame {frame} references vertex record {vertex}, but the mesh has {count}")]
    VertexOutOfRange {
        frame: usize,
        wedge: usize,
        vertex: usize,
        count: usize,
    },

    #[error("{field} {value} does not fit the 16-bit format field")]
    CountOverflow { field: &'static str, value: usize },

    #[error("{stage} export to {path} failed: {source}")]
    Stage {
        stage: ExportStage,
        path: PathBuf,
        #[source]
        source: Box<ExportError>,
    },
}

impl ExportError {
    /// Attribute this error to an export stage and its output file
    pub fn in_stage(self, stage: ExportStage, path: impl Into<PathBuf>) -> Self {
        ExportError::Stage {
            stage,
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Stage that failed, if the error has been attributed to one
    pub fn stage(&self) -> Option<ExportStage> {
        match self {
            ExportError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
