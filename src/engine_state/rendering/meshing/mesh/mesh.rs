//! Flat vertex buffers produced by the chunk mesher.
//!
//! A [`VertexBuffer`] is the hand-off point between meshing and the GPU: the
//! mesher appends whole faces to it, and the mesh resource reads it back as a
//! flat `f32` slice with an 8-float stride.

use crate::engine_state::rendering::{vertex, Vertex};
use crate::error::EngineError;

use super::face::{Face, VERTICES_PER_FACE};

/// A fully expanded triangle list for one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
}

impl VertexBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the six vertices of `face`, preserving emission order.
    pub fn push_face(&mut self, face: &Face) {
        self.vertices.extend_from_slice(&face.vertices());
    }

    /// The emitted vertices, in emission order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The buffer as packed floats, 8 per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The buffer as raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of vertices, derived from the flat float length.
    ///
    /// # Errors
    /// Returns [`EngineError::BufferLayout`] if the float length is not a multiple of 8.
    pub fn vertex_count(&self) -> Result<u32, EngineError> {
        vertex::vertex_count(self.as_floats())
    }

    /// Number of faces in the buffer.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Returns `true` if no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn test_faces_append_in_order() {
        let mut buffer = VertexBuffer::new();
        assert!(buffer.is_empty());

        let first = Face::new(Point3::new(0, 0, 0), BlockSide::Top);
        let second = Face::new(Point3::new(1, 0, 0), BlockSide::Back);
        buffer.push_face(&first);
        buffer.push_face(&second);

        assert_eq!(buffer.face_count(), 2);
        assert_eq!(buffer.vertex_count().unwrap(), 12);
        assert_eq!(buffer.as_floats().len(), 96);
        assert_eq!(buffer.as_bytes().len(), 384);
        assert_eq!(&buffer.vertices()[..6], &first.vertices());
        assert_eq!(&buffer.vertices()[6..], &second.vertices());
    }
}
