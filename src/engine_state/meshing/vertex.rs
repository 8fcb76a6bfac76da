//! Vertex data structure for chunk meshes.
//!
//! This module defines the vertex format the mesher emits and the renderer
//! uploads as-is.

use cgmath::Point3;

/// A vertex of a chunk mesh, in render space (y up).
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Color: [f32; 4] RGBA (16 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in render space
    pub position: [f32; 3],
    /// UV coordinates of this corner of its quad
    pub uv: [f32; 2],
    /// Flat quad color, alpha last
    pub color: [f32; 4],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - Position in render space
    /// * `uv` - Texture coordinates
    /// * `color` - RGBA color
    pub fn new(pos: Point3<f32>, uv: [f32; 2], color: [f32; 4]) -> Self {
        Vertex {
            position: [pos.x, pos.y, pos.z],
            uv,
            color,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
        let vertex = Vertex::new(Point3::new(1.0, 2.0, 3.0), [0.0, 1.0], [0.5, 0.5, 0.5, 1.0]);
        let bytes = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[32..36], &1.0f32.to_ne_bytes());
    }
}
