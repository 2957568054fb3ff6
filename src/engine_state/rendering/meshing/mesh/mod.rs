//! Face emission for voxel rendering.
//!
//! This module turns solid voxels into triangle-list geometry. Each visible
//! face becomes one quad of two triangles (six vertices, no index buffer),
//! with a fixed per-side corner and UV pattern.
//!
//! # Architecture
//! - [`Face`]: One visible side of one voxel, expandable into six [`Vertex`](crate::engine_state::rendering::Vertex)es
//! - [`visible_faces`]: Neighbor test that decides which sides of a voxel are exposed to air
//! - [`VertexBuffer`]: The flat, append-only buffer a chunk's faces are written into
//!
//! # Performance Considerations
//! - Fully interior voxels produce no faces, so vertex counts follow surface area, not volume
//! - Occupancy is recomputed for every neighbor test; nothing is cached between voxels

mod face;
mod mesh;

pub use face::{visible_faces, Face, VOXEL_SCALE};
pub use mesh::VertexBuffer;
