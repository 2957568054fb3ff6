//! # Engine Errors
//!
//! Every fallible step of start-up, world generation and GPU resource creation
//! reports through [`EngineError`]. Nothing in the meshing core retries: a
//! failure is returned to the caller, and world generation aborts on the first
//! chunk that cannot be built.

use std::path::PathBuf;

use cgmath::Point3;
use thiserror::Error;

/// Errors that can occur while configuring, generating or rendering the world.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A configuration value is outside its legal range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A vertex buffer handed to a mesh resource is not made of whole vertices.
    #[error("vertex buffer holds {len} floats, which is not a multiple of the {stride}-float stride")]
    BufferLayout {
        /// Number of floats in the rejected buffer
        len: usize,
        /// Floats per vertex
        stride: usize,
    },

    /// A GPU resource (adapter, device, surface, buffer, pipeline, texture) could not be created.
    #[error("GPU resource creation failed: {0}")]
    Resource(String),

    /// An asset file could not be read.
    #[error("failed to read asset {path:?}")]
    Asset {
        /// Path of the asset that failed to load
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The diffuse texture could not be decoded.
    #[error("failed to decode texture: {0}")]
    Image(#[from] image::ImageError),

    /// The world configuration file is malformed.
    #[error("failed to parse world configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The world has already been generated; there is no re-generation.
    #[error("world has already been generated")]
    AlreadyGenerated,

    /// A chunk's mesh is built exactly once.
    #[error("mesh for chunk {grid:?} has already been built")]
    MeshAlreadyBuilt {
        /// Grid coordinate of the offending chunk
        grid: Point3<i32>,
    },
}
