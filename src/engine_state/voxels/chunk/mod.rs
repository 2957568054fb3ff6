//! # Chunk Module
//!
//! A chunk is a cubic partition of the world, `chunk_size` voxels on each edge.
//! It stores no voxel data: occupancy is sampled from the density field while
//! the mesh is built, and only the resulting GPU mesh is kept.
//!
//! ## Lifecycle
//!
//! 1. Constructed at a grid coordinate, which fixes its voxel offset
//! 2. Meshed exactly once; the vertex buffer is uploaded and dropped
//! 3. Rendered every frame
//! 4. Destroyed at world teardown, releasing the mesh

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::debug;

use crate::{
    engine_state::rendering::meshing::{ChunkMesher, MeshBackend, VOXEL_SCALE},
    error::EngineError,
};

/// A cubic partition of the voxel world and its GPU mesh.
///
/// `M` is the mesh type of the [`MeshBackend`] the chunk is built with.
pub struct Chunk<M> {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    pub grid_position: Point3<i32>,
    /// World-space voxel coordinate of the chunk's first voxel.
    pub offset: Vector3<i32>,
    /// Vertices in the uploaded mesh, zero until the mesh is built.
    pub vertex_count: u32,
    mesh: Option<M>,
    destroyed: bool,
}

impl<M> Chunk<M> {
    /// Creates an unmeshed chunk at `grid_position`.
    ///
    /// The voxel offset is `grid_position * chunk_size`.
    pub fn new(grid_position: Point3<i32>, chunk_size: i32) -> Self {
        Self {
            grid_position,
            offset: grid_position.to_vec() * chunk_size,
            vertex_count: 0,
            mesh: None,
            destroyed: false,
        }
    }

    /// Model translation of the chunk in world units.
    ///
    /// Vertex positions are already scaled per voxel, so the chunk is moved by
    /// its voxel offset at the same scale.
    pub fn translation(&self) -> Vector3<f32> {
        self.offset.map(|c| c as f32 * VOXEL_SCALE)
    }

    /// Returns `true` once a mesh has been uploaded and not yet destroyed.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Builds the chunk's vertex buffer and uploads it through `backend`.
    ///
    /// # Errors
    /// * [`EngineError::MeshAlreadyBuilt`] if called more than once
    /// * Any error from [`MeshBackend::create_mesh`], in which case the chunk stays unmeshed
    pub fn build_mesh<B>(&mut self, mesher: &ChunkMesher, backend: &B) -> Result<(), EngineError>
    where
        B: MeshBackend<Mesh = M>,
    {
        if self.mesh.is_some() || self.destroyed {
            return Err(EngineError::MeshAlreadyBuilt {
                grid: self.grid_position,
            });
        }

        let vertices = mesher.build_mesh(self.offset);
        let mesh = backend.create_mesh(&vertices, self.translation())?;

        self.vertex_count = vertices.vertex_count()?;
        self.mesh = Some(mesh);
        debug!(
            "Chunk {:?} meshed with {} vertices",
            self.grid_position, self.vertex_count
        );

        Ok(())
    }

    /// Records a draw of the chunk's mesh. Unmeshed chunks draw nothing.
    pub fn render<B>(&self, backend: &B, pass: &mut B::Pass<'_>)
    where
        B: MeshBackend<Mesh = M>,
    {
        if let Some(mesh) = &self.mesh {
            backend.render_mesh(mesh, pass);
        }
    }

    /// Releases the chunk's mesh. Calling it again is a no-op.
    pub fn destroy<B>(&mut self, backend: &B)
    where
        B: MeshBackend<Mesh = M>,
    {
        if let Some(mesh) = self.mesh.take() {
            backend.destroy_mesh(mesh);
        }
        self.destroyed = true;
    }
}
