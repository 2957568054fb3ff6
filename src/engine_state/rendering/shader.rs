//! The chunk render pipeline.
//!
//! WGSL source is read from disk and compiled into a single triangle-list
//! pipeline. Compilation and pipeline validation run inside a wgpu validation
//! error scope, so a broken shader surfaces as an [`EngineError::Resource`]
//! instead of reaching the device's uncaptured error handler.

use std::path::Path;

use log::{error, info};
use wgpu::{Device, RenderPipeline, TextureFormat};

use crate::error::EngineError;

use super::{bind_group_state::BindGroupState, texture::Texture, vertex::Vertex};

/// Compiled chunk shader and the pipeline built from it.
pub struct ChunkShader {
    /// The render pipeline every chunk mesh is drawn with
    pub pipeline: RenderPipeline,
}

impl ChunkShader {
    /// Reads WGSL from `path` and builds the chunk pipeline.
    ///
    /// # Errors
    /// * [`EngineError::Asset`] if the file cannot be read
    /// * [`EngineError::Resource`] if the shader fails to compile or validate
    pub fn from_path(
        device: &Device,
        path: &Path,
        color_format: TextureFormat,
        bind_group_state: &BindGroupState,
    ) -> Result<Self, EngineError> {
        let source = std::fs::read_to_string(path).map_err(|source| EngineError::Asset {
            path: path.to_path_buf(),
            source,
        })?;
        let shader = Self::new(device, &source, color_format, bind_group_state)?;
        info!("Compiled chunk shader {}", path.display());
        Ok(shader)
    }

    /// Builds the chunk pipeline from WGSL source.
    ///
    /// The pipeline uses depth test `Less`, counter-clockwise front faces and
    /// back-face culling. Entry points are `vs_main` and `fs_main`.
    ///
    /// # Errors
    /// Returns [`EngineError::Resource`] with the validation message if the
    /// module or pipeline is rejected.
    pub fn new(
        device: &Device,
        source: &str,
        color_format: TextureFormat,
        bind_group_state: &BindGroupState,
    ) -> Result<Self, EngineError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Chunk Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Chunk Render Pipeline Layout"),
            bind_group_layouts: &bind_group_state.ordered_layouts(),
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Chunk Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        if let Some(validation) = pollster::block_on(device.pop_error_scope()) {
            error!("Chunk shader rejected: {validation}");
            return Err(EngineError::Resource(format!(
                "failed to compile chunk shader: {validation}"
            )));
        }

        Ok(Self { pipeline })
    }
}
