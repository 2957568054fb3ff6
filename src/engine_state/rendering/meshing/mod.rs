//! Mesh generation and GPU hand-off for voxel chunks.
//!
//! This module converts a chunk's occupancy into a flat triangle list and
//! defines the seam through which that list becomes a drawable GPU mesh.
//!
//! # Architecture
//! - [`ChunkMesher`]: Walks a chunk's voxel volume and collects every visible face
//! - [`MeshBackend`]: Creates, draws and releases the GPU-side mesh for a vertex buffer
//! - [`GpuMeshBackend`]: The wgpu implementation of [`MeshBackend`]
//! - `mesh/`: Face emission and the flat [`VertexBuffer`]
//!
//! # Performance Considerations
//! - One pass over `chunk_size³` voxels per chunk, six neighbor tests per solid voxel
//! - Air voxels are skipped before any neighbor test
//! - Buffers are uploaded once and never rewritten

use cgmath::{Point3, Vector3};
use log::debug;

mod mesh;
#[cfg(test)]
pub(crate) mod recording;
mod renderer;

pub use mesh::*;
pub use renderer::*;

use crate::{engine_state::voxels::occupancy, error::EngineError};

/// Creates, draws and releases GPU meshes for chunk vertex buffers.
///
/// Chunks own the meshes a backend creates but never look inside them; the
/// backend holds whatever shared state (device, shader, material) it needs.
pub trait MeshBackend {
    /// The GPU-side resource for one chunk.
    type Mesh;
    /// The per-frame target that draw calls are recorded into.
    type Pass<'p>;

    /// Uploads `vertices` and returns a mesh translated by `translation`.
    ///
    /// # Errors
    /// * [`EngineError::BufferLayout`] if the buffer is not made of whole 8-float vertices
    /// * [`EngineError::Resource`] if the GPU resource cannot be created
    fn create_mesh(
        &self,
        vertices: &VertexBuffer,
        translation: Vector3<f32>,
    ) -> Result<Self::Mesh, EngineError>;

    /// Records a triangle-list draw of every vertex in `mesh`.
    fn render_mesh(&self, mesh: &Self::Mesh, pass: &mut Self::Pass<'_>);

    /// Releases the GPU buffers held by `mesh`.
    fn destroy_mesh(&self, mesh: Self::Mesh);
}

/// Builds the vertex buffer for a single chunk.
///
/// The voxel volume is visited x outer, y middle, z inner, so two builds of the
/// same chunk always produce identical buffers.
#[derive(Debug, Clone, Copy)]
pub struct ChunkMesher {
    chunk_size: i32,
}

impl ChunkMesher {
    /// Creates a mesher for chunks of `chunk_size³` voxels.
    ///
    /// # Errors
    /// Returns [`EngineError::Configuration`] if `chunk_size` is not positive.
    pub fn new(chunk_size: i32) -> Result<Self, EngineError> {
        if chunk_size <= 0 {
            return Err(EngineError::Configuration(format!(
                "chunk_size must be positive, got {chunk_size}"
            )));
        }
        Ok(Self { chunk_size })
    }

    /// Edge length of the chunks this mesher builds.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Emits every visible face of the chunk whose first voxel sits at `chunk_offset`.
    ///
    /// # Arguments
    /// * `chunk_offset` - World-space voxel coordinate of the chunk's origin
    ///
    /// # Returns
    /// The chunk's triangle list, faces in voxel order and side order within a voxel.
    pub fn build_mesh(&self, chunk_offset: Vector3<i32>) -> VertexBuffer {
        let mut buffer = VertexBuffer::new();

        for x in 0..self.chunk_size {
            for y in 0..self.chunk_size {
                for z in 0..self.chunk_size {
                    let voxel = Point3::new(x, y, z);
                    if occupancy::is_air(voxel, chunk_offset, self.chunk_size) {
                        continue;
                    }

                    for face in visible_faces(voxel, chunk_offset, self.chunk_size) {
                        buffer.push_face(&face);
                    }
                }
            }
        }

        debug!(
            "Meshed chunk at offset {:?}: {} faces",
            chunk_offset,
            buffer.face_count()
        );

        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    const CHUNK_SIZE: i32 = 8;

    fn solid(voxel: Point3<i32>, offset: Vector3<i32>) -> bool {
        !occupancy::is_air(voxel, offset, CHUNK_SIZE)
    }

    /// Counts solid-voxel/air-neighbor adjacencies by brute force.
    fn exposed_sides(offset: Vector3<i32>) -> usize {
        let mut count = 0;
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    let voxel = Point3::new(x, y, z);
                    if !solid(voxel, offset) {
                        continue;
                    }
                    count += BlockSide::all()
                        .into_iter()
                        .filter(|side| !solid(voxel + side.neighbor_offset(), offset))
                        .count();
                }
            }
        }
        count
    }

    fn offsets() -> Vec<Vector3<i32>> {
        vec![
            Vector3::new(0, 0, 0),
            Vector3::new(8, 0, 0),
            Vector3::new(-8, 16, 8),
            Vector3::new(-24, -24, -24),
            Vector3::new(24, 24, 24),
        ]
    }

    #[test]
    fn test_rejects_non_positive_chunk_size() {
        assert!(matches!(
            ChunkMesher::new(0),
            Err(EngineError::Configuration(_))
        ));
        assert!(ChunkMesher::new(-3).is_err());
    }

    #[test]
    fn test_vertex_count_is_six_per_exposed_side() {
        let mesher = ChunkMesher::new(CHUNK_SIZE).unwrap();
        for offset in offsets() {
            let buffer = mesher.build_mesh(offset);
            assert_eq!(buffer.vertices().len(), 6 * exposed_sides(offset));
            assert!(buffer.vertices().len() <= 36 * (CHUNK_SIZE as usize).pow(3));
            assert_eq!(buffer.as_floats().len() % 8, 0);
        }
    }

    #[test]
    fn test_builds_are_byte_identical() {
        let mesher = ChunkMesher::new(CHUNK_SIZE).unwrap();
        for offset in offsets() {
            let first = mesher.build_mesh(offset);
            let second = mesher.build_mesh(offset);
            assert_eq!(first.as_bytes(), second.as_bytes());
        }
    }

    #[test]
    fn test_interior_voxels_emit_nothing() {
        let mesher = ChunkMesher::new(CHUNK_SIZE).unwrap();
        let offset = Vector3::new(0, 0, 0);
        let buffer = mesher.build_mesh(offset);

        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    let voxel = Point3::new(x, y, z);
                    let interior = solid(voxel, offset)
                        && BlockSide::all()
                            .into_iter()
                            .all(|side| solid(voxel + side.neighbor_offset(), offset));
                    if !interior {
                        continue;
                    }
                    // Every vertex of a voxel's faces lies within half an extent of its center.
                    let center = Face::new(voxel, BlockSide::Top).voxel_center();
                    let owned = buffer.vertices().chunks(6).any(|quad| {
                        quad.iter().all(|v| {
                            (0..3).all(|axis| {
                                (v.position[axis] - center[axis]).abs() == VOXEL_SCALE / 2.0
                            })
                        })
                    });
                    assert!(!owned, "interior voxel {voxel:?} produced a face");
                }
            }
        }
    }

    #[test]
    fn test_fully_air_chunk_is_empty() {
        // Every voxel of a 1³ chunk at (-1, 0, 0) samples sin(-1/3.21) < 0.
        let mesher = ChunkMesher::new(1).unwrap();
        let buffer = mesher.build_mesh(Vector3::new(-1, 0, 0));
        assert!(buffer.is_empty());
        assert_eq!(buffer.vertex_count().unwrap(), 0);
    }

    #[test]
    fn test_single_solid_voxel_exposes_all_sides() {
        let mesher = ChunkMesher::new(1).unwrap();
        let buffer = mesher.build_mesh(Vector3::new(0, 0, 0));
        assert_eq!(buffer.face_count(), 6);
        assert_eq!(buffer.vertex_count().unwrap(), 36);
    }

    #[test]
    fn test_first_solid_voxel_leads_the_buffer() {
        // (0,0,0) sits at density 0 and is solid; its +X neighbor decides the first face.
        let mesher = ChunkMesher::new(CHUNK_SIZE).unwrap();
        let offset = Vector3::new(0, 0, 0);
        let buffer = mesher.build_mesh(offset);
        let expected: Vec<_> = visible_faces(Point3::new(0, 0, 0), offset, CHUNK_SIZE).collect();
        assert!(!expected.is_empty());
        assert_eq!(&buffer.vertices()[..6], &expected[0].vertices());
    }
}
