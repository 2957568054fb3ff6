//! # Voxel World
//!
//! This module holds the world-side half of the engine: where voxels are solid,
//! how the world is cut into chunks, and the lifecycle that takes those chunks
//! from grid coordinates to GPU meshes.
//!
//! ## Architecture
//!
//! * **Occupancy**: The density field that classifies every voxel as solid or air
//! * **Block**: The six face directions a voxel can expose
//! * **Chunk**: A cubic partition meshed once and rendered every frame
//! * **World**: The fixed cube of chunks around the origin
//!
//! ## Data Flow
//!
//! 1. The world creates each chunk at its grid coordinate
//! 2. The chunk asks the mesher for its vertex buffer, which samples occupancy
//! 3. The buffer is handed to the mesh backend and dropped
//! 4. Each frame the world submits every chunk mesh
//!
//! Everything runs on the thread that owns the graphics device.

pub mod block;
pub mod chunk;
pub mod occupancy;
pub mod world;
