/// Geometry primitives for 3D rendering
use nalgebra::Point3;

use crate::error::LoadError;

/// A mesh vertex. Positions are mutated in place by the rigid transforms.
pub type Vertex = Point3<f32>;

/// A quad face referencing four vertices by zero-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self {
            indices: [a, b, c, d],
        }
    }

    /// The two triangle halves of the quad, always `(v0, v1, v2)` then `(v0, v2, v3)`.
    pub fn triangles(&self) -> [[usize; 3]; 2] {
        let [v0, v1, v2, v3] = self.indices;
        [[v0, v1, v2], [v0, v2, v3]]
    }
}

/// A 3D mesh composed of quad faces over a shared vertex list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.vertices.push(Point3::new(x, y, z));
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len() * 2
    }

    /// Check that every face index points into the vertex list.
    pub fn validate(&self) -> Result<(), LoadError> {
        let vertex_count = self.vertices.len();
        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(LoadError::DanglingReference {
                    face: face_index + 1,
                    index: index as i64 + 1,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// The sample cube shipped with the viewer: side 20, one corner on the origin.
    pub fn sample_cube() -> Self {
        let mut mesh = Self::with_capacity(8, 6);

        for &(x, y, z) in &[
            (0.0, 20.0, 20.0),
            (0.0, 0.0, 20.0),
            (20.0, 0.0, 20.0),
            (20.0, 20.0, 20.0),
            (0.0, 20.0, 0.0),
            (0.0, 0.0, 0.0),
            (20.0, 0.0, 0.0),
            (20.0, 20.0, 0.0),
        ] {
            mesh.add_vertex(x, y, z);
        }

        // Front, back, right, top, left, bottom
        mesh.add_face(Face::new(0, 1, 2, 3));
        mesh.add_face(Face::new(7, 6, 5, 4));
        mesh.add_face(Face::new(3, 2, 6, 7));
        mesh.add_face(Face::new(4, 0, 3, 7));
        mesh.add_face(Face::new(4, 5, 1, 0));
        mesh.add_face(Face::new(1, 5, 6, 2));

        mesh
    }
}
