//! # Block Module
//!
//! Blocks carry no per-voxel data: whether a block exists is decided by the
//! occupancy field, and the only block-level concept the mesher needs is which
//! of the six faces it is looking at.

pub mod block_side;
