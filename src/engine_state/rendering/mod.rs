//! Rendering system for the voxel engine.
//!
//! This module contains the GPU side of the engine: the vertex layout, the
//! chunk shader and material, the mesh backend chunks upload through, and the
//! per-frame render pass.

use std::{path::Path, rc::Rc};

use log::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::error::EngineError;

use super::voxels::world::World;

pub mod bind_group_state;
pub mod material;
pub mod meshing;
mod pipeline_manager;
pub mod shader;
mod texture;
mod vertex;

pub use vertex::Vertex;

use bind_group_state::BindGroupState;
use material::Material;
use meshing::{GpuMesh, GpuMeshBackend};
use pipeline_manager::PipelineManager;
use shader::ChunkShader;

/// Manages the surface, the GPU device, and everything needed to draw chunks.
pub struct MeshRendererManager {
    /// The WebGPU surface being rendered to
    pub surface: Surface<'static>,
    /// Configuration for the surface (size, format, etc.)
    pub surface_config: SurfaceConfiguration,
    /// The WebGPU device used for creating GPU resources
    pub device: Device,
    /// The WebGPU queue for submitting command buffers
    pub queue: Queue,
    /// Layouts shared by the pipeline and every bind group
    pub bind_group_state: Rc<BindGroupState>,
    /// Creates, draws and releases chunk meshes
    pub mesh_backend: GpuMeshBackend,
    /// Records the per-frame render pass
    pub pipeline_manager: PipelineManager,
}

impl MeshRendererManager {
    /// Compiles the chunk shader, loads the material, and prepares the frame resources.
    ///
    /// # Arguments
    /// * `surface` - The configured surface to render to
    /// * `surface_config` - Configuration the surface was set up with
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue
    /// * `shader_path` - WGSL source of the chunk shader
    /// * `texture_path` - Diffuse image applied to every face
    ///
    /// # Errors
    /// Any asset, image, or shader failure from loading the shader or material.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shader_path: &Path,
        texture_path: &Path,
    ) -> Result<Self, EngineError> {
        let bind_group_state = Rc::new(BindGroupState::new(&device));

        let shader = Rc::new(ChunkShader::from_path(
            &device,
            shader_path,
            surface_config.format,
            &bind_group_state,
        )?);
        let material = Rc::new(Material::from_path(
            &device,
            &queue,
            &bind_group_state.material_layout,
            texture_path,
        )?);

        let mesh_backend = GpuMeshBackend::new(
            device.clone(),
            Rc::clone(&bind_group_state),
            shader,
            material,
        );
        let pipeline_manager = PipelineManager::new(&device, &surface_config);

        info!(
            "Renderer ready: {}x{} {:?}",
            surface_config.width, surface_config.height, surface_config.format
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            bind_group_state,
            mesh_backend,
            pipeline_manager,
        })
    }

    /// Handles window resize events.
    ///
    /// Zero-sized windows (minimized) are ignored; the surface keeps its last size.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.pipeline_manager
            .resize(&self.device, &self.surface_config);
    }

    /// Renders one frame of `world` as seen through `camera_bind_group`.
    ///
    /// # Errors
    /// Returns [`EngineError::Resource`] if the surface cannot produce a frame.
    pub fn render(
        &mut self,
        world: &World<GpuMesh>,
        camera_bind_group: &wgpu::BindGroup,
    ) -> Result<(), EngineError> {
        self.pipeline_manager.render(
            &self.surface,
            &self.surface_config,
            &self.device,
            &self.queue,
            world,
            &self.mesh_backend,
            camera_bind_group,
        )
    }
}
