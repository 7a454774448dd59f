//! Export configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How 16-bit header fields treat values that do not fit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LimitMode {
    /// Keep the low 16 bits and log a warning
    #[default]
    Truncate,
    /// Fail the stage before anything is written
    Strict,
}

/// Legacy 3D export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Also write the `.uc` import script
    pub export_scripts: bool,
    /// Root directory under which `package/class/name` is created
    pub output_dir: PathBuf,
    /// Extension of the import script
    pub script_extension: String,
    /// Extension of the geometry and animation files
    pub binary_extension: String,
    /// Reject counts that exceed the 16-bit header fields
    pub strict_limits: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_scripts: false,
            output_dir: PathBuf::from("."),
            script_extension: "uc".to_string(),
            binary_extension: "3d".to_string(),
            strict_limits: false,
        }
    }
}

impl ExportOptions {
    pub fn limit_mode(&self) -> LimitMode {
        if self.strict_limits {
            LimitMode::Strict
        } else {
            LimitMode::Truncate
        }
    }
}
