//! vertex3d Export Pipeline
//!
//! Converts vertex-animated meshes to the legacy Unreal "3D" interchange
//! files:
//! - `_d.3d` geometry
//! - `_a.3d` per-frame vertex animation
//! - `.uc` import script (optional)

pub mod error;
pub mod logging;
pub mod options;
pub mod unreal3d;

pub use error::{ExportError, ExportResult, ExportStage};
pub use options::{ExportOptions, LimitMode};
pub use unreal3d::{
    export_animation, export_mesh_data, export_script, ExportPaths, ExportSummary,
    Unreal3dExporter,
};
