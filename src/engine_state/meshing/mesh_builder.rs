//! Mesh data structures and the quad accumulator that fills them.
//!
//! Every quad is four vertices followed by six indices forming the triangles
//! `(0, 1, 2)` and `(0, 2, 3)` over those vertices. The builder only ever
//! appends, so the order of quads in a mesh is the order they were pushed.

use cgmath::{Point3, Vector3};

use super::vertex::Vertex;

/// UVs of the four corners of every quad, in push order.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Offsets of the two triangles of a quad from its first vertex.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Finished vertex and index buffers of one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn quad_count(&self) -> usize {
        self.indices.len() / QUAD_INDICES.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// The four vertices of quad `quad`.
    ///
    /// # Panics
    /// Panics if `quad >= quad_count()`.
    pub fn quad(&self, quad: usize) -> &[Vertex] {
        &self.vertices[quad * 4..quad * 4 + 4]
    }
}

/// Append-only accumulator of colored quads.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an opaque quad. The color is RGB; alpha is 1.
    pub fn push_quad(
        &mut self,
        a: Point3<f32>,
        b: Point3<f32>,
        c: Point3<f32>,
        d: Point3<f32>,
        color: Vector3<f32>,
    ) {
        self.push_quad_with_alpha(a, b, c, d, color, 1.0);
    }

    /// Appends a quad with an explicit alpha.
    ///
    /// `a`, `b`, `c`, `d` are taken in winding order; the renderer sees the
    /// triangles `a b c` and `a c d`.
    pub fn push_quad_with_alpha(
        &mut self,
        a: Point3<f32>,
        b: Point3<f32>,
        c: Point3<f32>,
        d: Point3<f32>,
        color: Vector3<f32>,
        alpha: f32,
    ) {
        let base = self.vertices.len() as u32;
        let color = [color.x, color.y, color.z, alpha];

        for (corner, uv) in [a, b, c, d].into_iter().zip(QUAD_UVS) {
            self.vertices.push(Vertex::new(corner, uv, color));
        }
        self.indices
            .extend(QUAD_INDICES.iter().map(|offset| base + offset));
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Drops all quads, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn build(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}
