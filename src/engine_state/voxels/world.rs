//! # World Module
//!
//! This module provides the `World` struct, a fixed cube of chunks centered on
//! the origin. Chunks are created and meshed in one blocking pass before the
//! first frame, rendered every frame, and released together at shutdown.
//!
//! ## Layout
//!
//! With `world_size = n` the world holds `(2n + 1)³` chunks at grid
//! coordinates `[-n, n]` on each axis, stored in x-outer, y-middle, z-inner
//! order. There is no spatial index; render order is storage order.
//!
//! ## Performance Considerations
//!
//! - Generation cost is `chunk_size³ × chunk_count` density samples, paid up front
//! - Every chunk is submitted every frame; there is no frustum culling

use cgmath::Point3;
use log::{info, warn};

use crate::{
    config,
    engine_state::{
        rendering::meshing::{ChunkMesher, MeshBackend},
        voxels::chunk::Chunk,
    },
    error::EngineError,
};

/// Lifecycle of a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    /// No chunks exist yet.
    Uninitialized,
    /// Every chunk is meshed and renderable.
    Generated,
    /// Chunk meshes have been released.
    Destroyed,
}

/// A fixed cube of chunks sharing one mesher.
pub struct World<M> {
    mesher: ChunkMesher,
    world_size: i32,
    chunk_count: usize,
    chunks: Vec<Chunk<M>>,
    state: WorldState,
}

impl<M> World<M> {
    /// Creates an empty world of `(2 * world_size + 1)³` chunks.
    ///
    /// # Errors
    /// Returns [`EngineError::Configuration`] if `world_size` is negative,
    /// `chunk_size` is not positive, or the world is too large to address.
    pub fn new(chunk_size: i32, world_size: i32) -> Result<Self, EngineError> {
        let chunk_count = config::chunk_count(chunk_size, world_size)?;
        let fits_in_memory = chunk_count
            .checked_mul(std::mem::size_of::<Chunk<M>>())
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits_in_memory {
            return Err(EngineError::Configuration(format!(
                "{chunk_count} chunks do not fit in memory"
            )));
        }

        Ok(Self {
            mesher: ChunkMesher::new(chunk_size)?,
            world_size,
            chunk_count,
            chunks: Vec::new(),
            state: WorldState::Uninitialized,
        })
    }

    /// Current lifecycle state.
    #[cfg(test)]
    pub fn state(&self) -> WorldState {
        self.state
    }

    /// Chunks in generation order.
    #[cfg(test)]
    pub fn chunks(&self) -> &[Chunk<M>] {
        &self.chunks
    }

    /// Grid coordinates of every chunk, x outer, y middle, z inner.
    pub fn grid_positions(&self) -> impl Iterator<Item = Point3<i32>> {
        let range = -self.world_size..=self.world_size;
        let (ys, zs) = (range.clone(), range.clone());
        range.flat_map(move |x| {
            let zs = zs.clone();
            ys.clone()
                .flat_map(move |y| zs.clone().map(move |z| Point3::new(x, y, z)))
        })
    }

    /// Creates and meshes every chunk.
    ///
    /// Generation is all or nothing: if any chunk fails to mesh, the meshes
    /// already uploaded are released and the world stays uninitialized.
    ///
    /// # Errors
    /// * [`EngineError::AlreadyGenerated`] if the world has left `Uninitialized`
    /// * The first error raised while meshing a chunk
    pub fn generate<B>(&mut self, backend: &B) -> Result<(), EngineError>
    where
        B: MeshBackend<Mesh = M>,
    {
        if self.state != WorldState::Uninitialized {
            return Err(EngineError::AlreadyGenerated);
        }

        info!(
            "Generating {} chunks of {}³ voxels",
            self.chunk_count,
            self.mesher.chunk_size()
        );

        let mut chunks: Vec<Chunk<M>> = Vec::with_capacity(self.chunk_count);
        for grid_position in self.grid_positions() {
            let mut chunk = Chunk::new(grid_position, self.mesher.chunk_size());
            if let Err(err) = chunk.build_mesh(&self.mesher, backend) {
                warn!(
                    "Meshing chunk {:?} failed, releasing {} built chunks",
                    grid_position,
                    chunks.len()
                );
                for built in chunks.iter_mut() {
                    built.destroy(backend);
                }
                return Err(err);
            }
            chunks.push(chunk);
        }

        let total_vertices: u64 = chunks.iter().map(|c| c.vertex_count as u64).sum();
        info!(
            "World generated: {} chunks, {} vertices",
            chunks.len(),
            total_vertices
        );

        self.chunks = chunks;
        self.state = WorldState::Generated;
        Ok(())
    }

    /// Records a draw of every chunk.
    ///
    /// Outside the `Generated` state this draws nothing and logs a warning.
    pub fn render<B>(&self, backend: &B, pass: &mut B::Pass<'_>)
    where
        B: MeshBackend<Mesh = M>,
    {
        if self.state != WorldState::Generated {
            warn!("Skipping world render in state {:?}", self.state);
            return;
        }

        for chunk in &self.chunks {
            chunk.render(backend, pass);
        }
    }

    /// Releases every chunk mesh. Further renders are no-ops.
    pub fn destroy<B>(&mut self, backend: &B)
    where
        B: MeshBackend<Mesh = M>,
    {
        if self.state == WorldState::Destroyed {
            return;
        }

        let meshed = self.chunks.iter().filter(|c| c.has_mesh()).count();
        for chunk in self.chunks.iter_mut() {
            chunk.destroy(backend);
        }
        info!("World destroyed, released {meshed} chunk meshes");
        self.state = WorldState::Destroyed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::meshing::recording::{RecordedMesh, RecordingBackend};
    use cgmath::Vector3;

    const CHUNK_SIZE: i32 = 8;

    #[test]
    fn test_zero_world_size_is_a_single_chunk() {
        let backend = RecordingBackend::new();
        let mut world = World::new(CHUNK_SIZE, 0).unwrap();
        world.generate(&backend).unwrap();

        assert_eq!(world.chunks().len(), 1);
        let chunk = &world.chunks()[0];
        assert_eq!(chunk.grid_position, Point3::new(0, 0, 0));
        assert_eq!(chunk.offset, Vector3::new(0, 0, 0));
        assert_eq!(backend.created()[0].translation, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_chunks_are_ordered_x_then_y_then_z() {
        let backend = RecordingBackend::new();
        let mut world = World::new(CHUNK_SIZE, 1).unwrap();
        world.generate(&backend).unwrap();

        let positions: Vec<Point3<i32>> =
            world.chunks().iter().map(|c| c.grid_position).collect();
        assert_eq!(positions.len(), 27);
        assert_eq!(positions[0], Point3::new(-1, -1, -1));
        assert_eq!(positions[1], Point3::new(-1, -1, 0));
        assert_eq!(positions[3], Point3::new(-1, 0, -1));
        assert_eq!(positions[9], Point3::new(0, -1, -1));
        assert_eq!(positions[26], Point3::new(1, 1, 1));

        for chunk in world.chunks() {
            let grid = chunk.grid_position;
            assert_eq!(
                chunk.offset,
                Vector3::new(grid.x, grid.y, grid.z) * CHUNK_SIZE
            );
        }
    }

    #[test]
    fn test_render_submits_every_chunk_in_order() {
        let backend = RecordingBackend::new();
        let mut world = World::new(CHUNK_SIZE, 1).unwrap();

        let mut pass = Vec::new();
        world.render(&backend, &mut pass);
        assert!(pass.is_empty());

        world.generate(&backend).unwrap();
        world.render(&backend, &mut pass);
        assert_eq!(pass, (0..27).collect::<Vec<_>>());
    }

    #[test]
    fn test_generate_twice_is_rejected() {
        let backend = RecordingBackend::new();
        let mut world = World::new(CHUNK_SIZE, 0).unwrap();
        world.generate(&backend).unwrap();

        assert!(matches!(
            world.generate(&backend),
            Err(EngineError::AlreadyGenerated)
        ));
        assert_eq!(backend.created().len(), 1);
    }

    #[test]
    fn test_failed_chunk_aborts_and_releases_built_meshes() {
        let backend = RecordingBackend::failing_at(5);
        let mut world: World<RecordedMesh> = World::new(CHUNK_SIZE, 1).unwrap();

        assert!(matches!(
            world.generate(&backend),
            Err(EngineError::Resource(_))
        ));
        assert_eq!(world.state(), WorldState::Uninitialized);
        assert!(world.chunks().is_empty());
        assert_eq!(backend.destroyed(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_destroy_releases_everything_once() {
        let backend = RecordingBackend::new();
        let mut world = World::new(CHUNK_SIZE, 1).unwrap();
        world.generate(&backend).unwrap();

        world.destroy(&backend);
        world.destroy(&backend);
        assert_eq!(world.state(), WorldState::Destroyed);
        assert_eq!(backend.destroyed(), (0..27).collect::<Vec<_>>());

        let mut pass = Vec::new();
        world.render(&backend, &mut pass);
        assert!(pass.is_empty());
        assert!(matches!(
            world.generate(&backend),
            Err(EngineError::AlreadyGenerated)
        ));
    }

    #[test]
    fn test_invalid_sizes_fail_fast() {
        assert!(matches!(
            World::<RecordedMesh>::new(CHUNK_SIZE, -1),
            Err(EngineError::Configuration(_))
        ));
        assert!(matches!(
            World::<RecordedMesh>::new(0, 1),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_unaddressable_world_is_rejected_before_generation() {
        // 30 * 100_000_000 voxels overflows an i32 coordinate.
        assert!(matches!(
            World::<RecordedMesh>::new(100_000_000, 30),
            Err(EngineError::Configuration(_))
        ));
        assert!(matches!(
            World::<RecordedMesh>::new(1, i32::MAX),
            Err(EngineError::Configuration(_))
        ));

        let world = World::<RecordedMesh>::new(CHUNK_SIZE, 2).unwrap();
        assert_eq!(world.chunk_count, 125);
        assert_eq!(world.grid_positions().count(), 125);
    }
}
