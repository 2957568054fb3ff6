//! Vertex data structures and layouts for chunk rendering.
//!
//! This module defines the vertex format emitted by the mesher and consumed by
//! the chunk pipeline, and the checks applied when a flat float buffer is turned
//! back into vertices.

use crate::error::EngineError;

/// Number of `f32` values that make up one vertex.
pub const FLOATS_PER_VERTEX: usize = 8;

/// A vertex in the chunk rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Reserved: [f32; 3] (12 bytes)
///
/// Total size: 32 bytes
///
/// The reserved attribute is always written as zeros. It keeps the stride and
/// attribute slot stable but has no meaning yet; shaders must not treat it as a normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin, in world units
    pub position: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Reserved, always zero
    pub reserved: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex with the reserved attribute zeroed.
    ///
    /// # Arguments
    /// * `position` - Position relative to the chunk origin
    /// * `tex_coords` - UV coordinates
    pub fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Vertex {
            position,
            tex_coords,
            reserved: [0.0; 3],
        }
    }

    /// Returns the vertex buffer layout description for the chunk pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>) at offset 0
    /// - `location = 1`: tex_coords (vec2<f32>) at offset 3 floats
    /// - `location = 2`: reserved (vec3<f32>) at offset 5 floats
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Computes how many vertices a flat float buffer holds.
///
/// # Errors
/// Returns [`EngineError::BufferLayout`] if the length is not a multiple of
/// [`FLOATS_PER_VERTEX`]. The buffer is never truncated or padded.
pub fn vertex_count(floats: &[f32]) -> Result<u32, EngineError> {
    if floats.len() % FLOATS_PER_VERTEX != 0 {
        return Err(EngineError::BufferLayout {
            len: floats.len(),
            stride: FLOATS_PER_VERTEX,
        });
    }

    u32::try_from(floats.len() / FLOATS_PER_VERTEX).map_err(|_| {
        EngineError::Resource(format!(
            "vertex buffer of {} floats exceeds the drawable vertex range",
            floats.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_eight_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), FLOATS_PER_VERTEX * 4);

        let vertex = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_layout_offsets_match_packing() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 32);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
        let locations: Vec<u32> = layout
            .attributes
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }

    #[test]
    fn test_vertex_count_requires_whole_vertices() {
        assert_eq!(vertex_count(&[]).unwrap(), 0);
        assert_eq!(vertex_count(&[0.0; 48]).unwrap(), 6);

        match vertex_count(&[0.0; 13]) {
            Err(EngineError::BufferLayout { len, stride }) => {
                assert_eq!(len, 13);
                assert_eq!(stride, 8);
            }
            other => panic!("expected a layout error, got {other:?}"),
        }
    }
}
