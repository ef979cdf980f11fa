// Vertex structure for batched quads

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Corner of a batched quad, in canvas pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
    /// Linear RGBA tint
    pub color: [f32; 4],
    /// Offset from the centre of the rounded shape this quad belongs to
    pub local: [f32; 2],
    /// Half extent of the rounded shape; zero for plain quads
    pub half_size: [f32; 2],
    /// Corner radius and stroke width (zero stroke fills)
    pub shape: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec2, tex_coords: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
            color,
            local: [0.0; 2],
            half_size: [0.0; 2],
            shape: [0.0; 2],
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
            0 => Float32x2,
            1 => Float32x2,
            2 => Float32x4,
            3 => Float32x2,
            4 => Float32x2,
            5 => Float32x2
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 14 * 4);
    }

    #[test]
    fn test_plain_vertex_has_no_shape() {
        let vertex = Vertex::new(Vec2::new(3.0, 4.0), Vec2::ONE, [1.0; 4]);
        assert_eq!(vertex.position, [3.0, 4.0]);
        assert_eq!(vertex.half_size, [0.0, 0.0]);
    }
}
