//! Frame recording for the chunk pass.
//!
//! The pipeline manager owns the per-surface resources (the depth buffer) and
//! records one render pass per frame: clear color and depth, bind the camera,
//! let the world submit its chunk meshes, then present.

use log::{error, warn};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::{
    engine_state::voxels::world::World,
    error::EngineError,
};

use super::{
    bind_group_state::CAMERA_BIND_GROUP,
    meshing::{GpuMesh, GpuMeshBackend},
    texture,
};

/// Background color of every frame.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.20,
    g: 0.30,
    b: 0.25,
    a: 1.0,
};

/// Owns the depth texture and records the frame's render pass.
pub struct PipelineManager {
    /// Depth texture used for depth testing
    pub depth_texture: texture::Texture,
}

impl PipelineManager {
    /// Creates the depth texture for a surface of the configured size.
    pub fn new(device: &Device, config: &SurfaceConfiguration) -> Self {
        Self {
            depth_texture: texture::Texture::create_depth_texture(device, config, "DEPTH TEXTURE"),
        }
    }

    /// Renders a frame to the given surface.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is skipped; a
    /// timeout skips the frame.
    ///
    /// # Errors
    /// Returns [`EngineError::Resource`] if the surface is out of memory or
    /// reports any other unrecoverable error.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        surface: &Surface,
        surface_config: &SurfaceConfiguration,
        device: &Device,
        queue: &Queue,
        world: &World<GpuMesh>,
        mesh_backend: &GpuMeshBackend,
        camera_bind_group: &wgpu::BindGroup,
    ) -> Result<(), EngineError> {
        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                surface.configure(device, surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring the next frame");
                return Ok(());
            }
            Err(err) => {
                error!("Error getting current frame: {:?}", err);
                return Err(EngineError::Resource(format!(
                    "failed to acquire frame: {err}"
                )));
            }
        };

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });
        {
            let depth_stencil_attachment = Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Chunk Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment,
                ..Default::default()
            });

            rpass.set_bind_group(CAMERA_BIND_GROUP, camera_bind_group, &[]);
            world.render(mesh_backend, &mut rpass);
        }

        queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }

    /// Recreates the depth texture for the new surface size.
    pub fn resize(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.depth_texture = texture::Texture::create_depth_texture(device, config, "DEPTH TEXTURE");
    }
}
