//! vertex3d Core Library
//!
//! This crate provides the mesh model, common types and error handling
//! shared across all vertex3d components.

pub mod error;
pub mod mesh;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use mesh::{AnimNotify, AnimSequence, MeshFace, MeshIdentity, MeshVert, MeshWedge, VertMesh};
pub use types::*;
