//! wgpu mesh resources for chunks.
//!
//! A [`GpuMesh`] is the static, upload-once form of a chunk's [`VertexBuffer`]:
//! one vertex buffer, one model uniform with the chunk's translation, and
//! shared handles to the shader and material it is drawn with.
//!
//! # Performance Considerations
//!
//! - One draw call per chunk, no index buffer
//! - The camera bind group is set once per frame by the caller, not per mesh

use std::rc::Rc;

use cgmath::{Matrix4, Vector3};
use log::trace;
use wgpu::{util::DeviceExt, Device, RenderPass};

use crate::{
    engine_state::rendering::{
        bind_group_state::{BindGroupState, MATERIAL_BIND_GROUP, MODEL_BIND_GROUP},
        material::Material,
        shader::ChunkShader,
    },
    error::EngineError,
};

use super::{MeshBackend, VertexBuffer};

/// GPU representation of the per-mesh model transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    // cgmath matrices are not Pod, so the matrix is stored column-major as arrays
    model: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Translation-only model matrix. Chunks are never rotated or scaled.
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            model: Matrix4::from_translation(translation).into(),
        }
    }
}

/// A chunk's uploaded vertex data and the handles needed to draw it.
pub struct GpuMesh {
    /// Shader the mesh is drawn with, shared across all chunks
    shader: Rc<ChunkShader>,
    /// Material the mesh is drawn with, shared across all chunks
    material: Rc<Material>,
    vertex_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    vertex_count: u32,
}

/// Creates [`GpuMesh`]es on a wgpu device.
pub struct GpuMeshBackend {
    device: Device,
    bind_group_state: Rc<BindGroupState>,
    shader: Rc<ChunkShader>,
    material: Rc<Material>,
}

impl GpuMeshBackend {
    /// Creates a backend whose meshes all share `shader` and `material`.
    pub fn new(
        device: Device,
        bind_group_state: Rc<BindGroupState>,
        shader: Rc<ChunkShader>,
        material: Rc<Material>,
    ) -> Self {
        Self {
            device,
            bind_group_state,
            shader,
            material,
        }
    }
}

impl MeshBackend for GpuMeshBackend {
    type Mesh = GpuMesh;
    type Pass<'p> = RenderPass<'p>;

    fn create_mesh(
        &self,
        vertices: &VertexBuffer,
        translation: Vector3<f32>,
    ) -> Result<GpuMesh, EngineError> {
        let vertex_count = vertices.vertex_count()?;

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Vertex Buffer"),
                contents: vertices.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let model_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Model Buffer"),
                contents: bytemuck::cast_slice(&[ModelUniform::from_translation(translation)]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let model_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.bind_group_state.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
            label: Some("model_bind_group"),
        });

        Ok(GpuMesh {
            shader: Rc::clone(&self.shader),
            material: Rc::clone(&self.material),
            vertex_buffer,
            model_buffer,
            model_bind_group,
            vertex_count,
        })
    }

    fn render_mesh(&self, mesh: &GpuMesh, pass: &mut RenderPass<'_>) {
        if mesh.vertex_count == 0 {
            return;
        }

        pass.set_pipeline(&mesh.shader.pipeline);
        pass.set_bind_group(MATERIAL_BIND_GROUP, &mesh.material.bind_group, &[]);
        pass.set_bind_group(MODEL_BIND_GROUP, &mesh.model_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.draw(0..mesh.vertex_count, 0..1);
    }

    fn destroy_mesh(&self, mesh: GpuMesh) {
        trace!("Releasing mesh of {} vertices", mesh.vertex_count);
        mesh.vertex_buffer.destroy();
        mesh.model_buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn test_model_uniform_is_translation_only() {
        let uniform = ModelUniform::from_translation(Vector3::new(2.0, -4.0, 6.0));
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();

        assert_eq!(uniform.model[3], [2.0, -4.0, 6.0, 1.0]);
        assert_eq!(&uniform.model[..3], &identity[..3]);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }
}
