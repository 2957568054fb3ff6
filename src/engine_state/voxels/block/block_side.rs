//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block and the
//! neighbor each face looks at when deciding whether it is visible.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a unique integer value. The declaration order is the
/// order in which faces are emitted for a block: +X, -X, +Y, -Y, +Z, -Z.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing along positive X
    Right = 0,

    /// The face pointing along negative X
    Left = 1,

    /// The face pointing along positive Y
    Top = 2,

    /// The face pointing along negative Y
    Bottom = 3,

    /// The face pointing along positive Z
    Front = 4,

    /// The face pointing along negative Z
    Back = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    ///
    /// The order is: [Right, Left, Top, Bottom, Front, Back]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::Right,
            BlockSide::Left,
            BlockSide::Top,
            BlockSide::Bottom,
            BlockSide::Front,
            BlockSide::Back,
        ]
    }

    /// Offset from a block to the neighbor that shares this face.
    pub fn neighbor_offset(self) -> Vector3<i32> {
        match self {
            BlockSide::Right => Vector3::new(1, 0, 0),
            BlockSide::Left => Vector3::new(-1, 0, 0),
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
            BlockSide::Front => Vector3::new(0, 0, 1),
            BlockSide::Back => Vector3::new(0, 0, -1),
        }
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.neighbor_offset().cast::<f32>().unwrap_or(Vector3::new(0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sides_follow_discriminant_order() {
        for (index, side) in BlockSide::all().into_iter().enumerate() {
            assert_eq!(side as usize, index);
        }
    }

    #[test]
    fn test_opposite_sides_cancel() {
        let all = BlockSide::all();
        for pair in all.chunks(2) {
            assert_eq!(
                pair[0].neighbor_offset() + pair[1].neighbor_offset(),
                Vector3::new(0, 0, 0)
            );
        }
    }
}
