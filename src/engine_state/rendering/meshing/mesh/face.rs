use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::Vertex,
    voxels::{block::block_side::BlockSide, occupancy},
};

/// World-space edge length of one voxel.
pub const VOXEL_SCALE: f32 = 0.25;
/// Distance from a voxel's center to each of its faces.
pub const HALF_EXTENT: f32 = VOXEL_SCALE / 2.0;

/// Number of vertices emitted per face (two triangles, no index buffer).
pub const VERTICES_PER_FACE: usize = 6;

/// One corner of a face: which side of the voxel center it sits on along each
/// axis, and the UV it carries.
#[derive(Debug, Clone, Copy)]
struct FaceCorner {
    sign: [f32; 3],
    uv: [f32; 2],
}

const fn corner(x: f32, y: f32, z: f32, u: f32, v: f32) -> FaceCorner {
    FaceCorner {
        sign: [x, y, z],
        uv: [u, v],
    }
}

// Two counter-clockwise triangles per face, seen from outside the voxel.
// UVs are the corners of the unit square; every face shows the whole texture.
const RIGHT_CORNERS: [FaceCorner; VERTICES_PER_FACE] = [
    corner(1.0, 1.0, 1.0, 1.0, 1.0),
    corner(1.0, -1.0, 1.0, 0.0, 1.0),
    corner(1.0, -1.0, -1.0, 0.0, 0.0),
    corner(1.0, 1.0, 1.0, 1.0, 1.0),
    corner(1.0, -1.0, -1.0, 0.0, 0.0),
    corner(1.0, 1.0, -1.0, 1.0, 0.0),
];

const LEFT_CORNERS: [FaceCorner; VERTICES_PER_FACE] = [
    corner(-1.0, 1.0, 1.0, 1.0, 1.0),
    corner(-1.0, -1.0, -1.0, 0.0, 0.0),
    corner(-1.0, -1.0, 1.0, 0.0, 1.0),
    corner(-1.0, 1.0, 1.0, 1.0, 1.0),
    corner(-1.0, 1.0, -1.0, 1.0, 0.0),
    corner(-1.0, -1.0, -1.0, 0.0, 0.0),
];

const TOP_CORNERS: [FaceCorner; VERTICES_PER_FACE] = [
    corner(-1.0, 1.0, -1.0, 0.0, 0.0),
    corner(-1.0, 1.0, 1.0, 0.0, 1.0),
    corner(1.0, 1.0, -1.0, 1.0, 0.0),
    corner(-1.0, 1.0, 1.0, 0.0, 1.0),
    corner(1.0, 1.0, 1.0, 1.0, 1.0),
    corner(1.0, 1.0, -1.0, 1.0, 0.0),
];

const BOTTOM_CORNERS: [FaceCorner; VERTICES_PER_FACE] = [
    corner(-1.0, -1.0, -1.0, 0.0, 0.0),
    corner(1.0, -1.0, -1.0, 1.0, 0.0),
    corner(-1.0, -1.0, 1.0, 0.0, 1.0),
    corner(-1.0, -1.0, 1.0, 0.0, 1.0),
    corner(1.0, -1.0, -1.0, 1.0, 0.0),
    corner(1.0, -1.0, 1.0, 1.0, 1.0),
];

const FRONT_CORNERS: [FaceCorner; VERTICES_PER_FACE] = [
    corner(1.0, 1.0, 1.0, 1.0, 1.0),
    corner(-1.0, 1.0, 1.0, 0.0, 1.0),
    corner(1.0, -1.0, 1.0, 1.0, 0.0),
    corner(-1.0, 1.0, 1.0, 0.0, 1.0),
    corner(-1.0, -1.0, 1.0, 0.0, 0.0),
    corner(1.0, -1.0, 1.0, 1.0, 0.0),
];

const BACK_CORNERS: [FaceCorner; VERTICES_PER_FACE] = [
    corner(1.0, 1.0, -1.0, 1.0, 1.0),
    corner(1.0, -1.0, -1.0, 1.0, 0.0),
    corner(-1.0, 1.0, -1.0, 0.0, 1.0),
    corner(-1.0, 1.0, -1.0, 0.0, 1.0),
    corner(1.0, -1.0, -1.0, 1.0, 0.0),
    corner(-1.0, -1.0, -1.0, 0.0, 0.0),
];

fn corners(side: BlockSide) -> &'static [FaceCorner; VERTICES_PER_FACE] {
    match side {
        BlockSide::Right => &RIGHT_CORNERS,
        BlockSide::Left => &LEFT_CORNERS,
        BlockSide::Top => &TOP_CORNERS,
        BlockSide::Bottom => &BOTTOM_CORNERS,
        BlockSide::Front => &FRONT_CORNERS,
        BlockSide::Back => &BACK_CORNERS,
    }
}

/// A single visible quad on one side of a solid voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Chunk-local coordinate of the voxel that owns the face
    pub voxel: Point3<i32>,
    /// Which side of the voxel this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a face on `block_side` of the voxel at `voxel`.
    pub fn new(voxel: Point3<i32>, block_side: BlockSide) -> Self {
        Face { voxel, block_side }
    }

    /// World-space center of the owning voxel, relative to the chunk origin.
    pub fn voxel_center(&self) -> Vector3<f32> {
        Vector3::new(
            self.voxel.x as f32 * VOXEL_SCALE,
            self.voxel.y as f32 * VOXEL_SCALE,
            self.voxel.z as f32 * VOXEL_SCALE,
        )
    }

    /// Expands the face into its six triangle-list vertices, in emission order.
    pub fn vertices(&self) -> [Vertex; VERTICES_PER_FACE] {
        let center = self.voxel_center();
        corners(self.block_side).map(|c| {
            Vertex::new(
                [
                    center.x + c.sign[0] * HALF_EXTENT,
                    center.y + c.sign[1] * HALF_EXTENT,
                    center.z + c.sign[2] * HALF_EXTENT,
                ],
                c.uv,
            )
        })
    }
}

/// Returns the faces of the voxel at `voxel` that border air, in side order
/// (+X, -X, +Y, -Y, +Z, -Z).
///
/// The caller is responsible for only asking about solid voxels. A voxel whose
/// six neighbors are all solid yields nothing.
///
/// # Arguments
/// * `voxel` - Chunk-local coordinate of a solid voxel
/// * `chunk_offset` - World-space voxel coordinate of the chunk's origin
/// * `chunk_size` - Edge length of the chunk in voxels
pub fn visible_faces(
    voxel: Point3<i32>,
    chunk_offset: Vector3<i32>,
    chunk_size: i32,
) -> impl Iterator<Item = Face> {
    BlockSide::all().into_iter().filter_map(move |side| {
        occupancy::is_air(voxel + side.neighbor_offset(), chunk_offset, chunk_size)
            .then(|| Face::new(voxel, side))
    })
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    fn triangle_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vector3<f32> {
        let a = Vector3::from(a);
        let b = Vector3::from(b);
        let c = Vector3::from(c);
        (b - a).cross(c - a)
    }

    #[test]
    fn test_triangles_wind_counter_clockwise_outward() {
        for side in BlockSide::all() {
            let vertices = Face::new(Point3::new(2, 3, 4), side).vertices();
            for triangle in vertices.chunks(3) {
                let normal = triangle_normal(
                    triangle[0].position,
                    triangle[1].position,
                    triangle[2].position,
                );
                assert!(
                    normal.normalize().dot(side.normal()) > 0.999,
                    "{side:?} triangle faces {normal:?}"
                );
            }
        }
    }

    #[test]
    fn test_face_lies_on_the_voxel_boundary() {
        let voxel = Point3::new(1, 2, 3);
        for side in BlockSide::all() {
            let face = Face::new(voxel, side);
            let center = face.voxel_center();
            for vertex in face.vertices() {
                let position = Vector3::from(vertex.position);
                let along_normal = (position - center).dot(side.normal());
                assert_eq!(along_normal, HALF_EXTENT);
                for axis in 0..3 {
                    assert_eq!((position[axis] - center[axis]).abs(), HALF_EXTENT);
                }
                assert_eq!(vertex.reserved, [0.0; 3]);
            }
        }
    }

    #[test]
    fn test_uvs_cover_the_unit_square() {
        for side in BlockSide::all() {
            let vertices = Face::new(Point3::new(0, 0, 0), side).vertices();
            for uv in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
                assert!(vertices.iter().any(|v| v.tex_coords == uv), "{side:?} misses {uv:?}");
            }
        }
    }

    #[test]
    fn test_right_face_matches_reference_layout() {
        let vertices = Face::new(Point3::new(0, 0, 0), BlockSide::Right).vertices();
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        #[rustfmt::skip]
        let expected = [
            0.125, 0.125, 0.125, 1.0, 1.0, 0.0, 0.0, 0.0,
            0.125, -0.125, 0.125, 0.0, 1.0, 0.0, 0.0, 0.0,
            0.125, -0.125, -0.125, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.125, 0.125, 0.125, 1.0, 1.0, 0.0, 0.0, 0.0,
            0.125, -0.125, -0.125, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.125, 0.125, -0.125, 1.0, 0.0, 0.0, 0.0, 0.0,
        ];
        assert_eq!(floats, &expected);
    }

    #[test]
    fn test_corner_voxel_exposes_its_chunk_boundary_faces() {
        // (0,0,0) is solid; its -X, -Y and -Z neighbors are outside the chunk.
        let sides: Vec<BlockSide> = visible_faces(Point3::new(0, 0, 0), Vector3::new(0, 0, 0), 8)
            .map(|face| face.block_side)
            .collect();
        assert!(sides.contains(&BlockSide::Left));
        assert!(sides.contains(&BlockSide::Bottom));
        assert!(sides.contains(&BlockSide::Back));
    }

    #[test]
    fn test_faces_only_toward_air() {
        let offset = Vector3::new(8, 0, -8);
        for x in 0..8 {
            for y in 0..8 {
                for z in 0..8 {
                    let voxel = Point3::new(x, y, z);
                    let faces: Vec<Face> = visible_faces(voxel, offset, 8).collect();
                    for side in BlockSide::all() {
                        let neighbor_air =
                            occupancy::is_air(voxel + side.neighbor_offset(), offset, 8);
                        assert_eq!(faces.iter().any(|f| f.block_side == side), neighbor_air);
                    }
                }
            }
        }
    }
}
