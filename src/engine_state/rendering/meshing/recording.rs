//! In-memory [`MeshBackend`] used by tests that exercise chunk and world
//! lifecycles without a GPU device.

use std::cell::{Cell, RefCell};

use cgmath::Vector3;

use crate::error::EngineError;

use super::{MeshBackend, VertexBuffer};

/// Stand-in for a GPU mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMesh {
    pub id: usize,
    pub translation: Vector3<f32>,
    pub vertex_count: u32,
}

/// Records every create, draw and destroy call it receives.
#[derive(Default)]
pub struct RecordingBackend {
    created: RefCell<Vec<RecordedMesh>>,
    destroyed: RefCell<Vec<usize>>,
    next_id: Cell<usize>,
    fail_at: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose `index`-th `create_mesh` call (zero based) fails.
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<RecordedMesh> {
        self.created.borrow().clone()
    }

    pub fn destroyed(&self) -> Vec<usize> {
        self.destroyed.borrow().clone()
    }
}

impl MeshBackend for RecordingBackend {
    type Mesh = RecordedMesh;
    type Pass<'p> = Vec<usize>;

    fn create_mesh(
        &self,
        vertices: &VertexBuffer,
        translation: Vector3<f32>,
    ) -> Result<RecordedMesh, EngineError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        if self.fail_at == Some(id) {
            return Err(EngineError::Resource(format!("mesh {id} refused")));
        }

        let mesh = RecordedMesh {
            id,
            translation,
            vertex_count: vertices.vertex_count()?,
        };
        self.created.borrow_mut().push(mesh.clone());
        Ok(mesh)
    }

    fn render_mesh(&self, mesh: &RecordedMesh, pass: &mut Vec<usize>) {
        pass.push(mesh.id);
    }

    fn destroy_mesh(&self, mesh: RecordedMesh) {
        self.destroyed.borrow_mut().push(mesh.id);
    }
}
