//! # Occupancy Module
//!
//! The world has no stored terrain. Whether a voxel is solid is answered on
//! demand by a fixed density field sampled at the voxel's world coordinate:
//!
//! ```text
//! density(x, y, z) = sin(x / 3.21 + y / 2.21 + z / 5.21)
//! ```
//!
//! A voxel is air when its density is strictly negative. Coordinates outside
//! the chunk are always air, so every chunk is sealed on its own and never
//! looks at a neighboring chunk.

use cgmath::{Point3, Vector3};

/// Divisor applied to the world X coordinate.
const X_DIVISOR: f64 = 3.21;
/// Divisor applied to the world Y coordinate.
const Y_DIVISOR: f64 = 2.21;
/// Divisor applied to the world Z coordinate.
const Z_DIVISOR: f64 = 5.21;

/// Samples the density field at a world-space voxel coordinate.
pub fn density(world: Point3<i32>) -> f64 {
    (world.x as f64 / X_DIVISOR + world.y as f64 / Y_DIVISOR + world.z as f64 / Z_DIVISOR).sin()
}

/// Returns `true` if the voxel at `local` in a chunk whose first voxel sits at
/// `chunk_offset` (in voxels) is air.
///
/// Any local coordinate outside `[0, chunk_size)` is air regardless of the offset.
/// The function is total: it is defined for every integer input and never fails.
///
/// # Arguments
/// * `local` - Voxel coordinate relative to the chunk
/// * `chunk_offset` - World-space voxel coordinate of the chunk's origin
/// * `chunk_size` - Edge length of the chunk in voxels
pub fn is_air(local: Point3<i32>, chunk_offset: Vector3<i32>, chunk_size: i32) -> bool {
    let outside = |c: i32| c < 0 || c > chunk_size - 1;
    if outside(local.x) || outside(local.y) || outside(local.z) {
        return true;
    }

    density(local + chunk_offset) < 0.0
}
