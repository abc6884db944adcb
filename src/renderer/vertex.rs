//! Overlay vertex format and coordinate mapping

use bytemuck::{Pod, Zeroable};

use crate::Viewport;

/// Colored 2D vertex. Shapes emit pixel coordinates; the pipeline maps
/// them to clip space before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Same vertex with its position mapped from pixels to clip space
    pub fn to_clip(self, viewport: Viewport) -> Self {
        let (x, y) = pixel_to_ndc(self.position[0], self.position[1], viewport);
        Self::new(x, y, self.color)
    }
}

/// Map a pixel position (origin top-left, y down) to normalized device
/// coordinates (origin center, y up)
pub fn pixel_to_ndc(x: f32, y: f32, viewport: Viewport) -> (f32, f32) {
    if viewport.is_empty() {
        return (0.0, 0.0);
    }
    (
        x / viewport.width * 2.0 - 1.0,
        1.0 - y / viewport.height * 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc(0.0, 0.0, vp), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(800.0, 600.0, vp), (1.0, -1.0));
        assert_eq!(pixel_to_ndc(400.0, 300.0, vp), (0.0, 0.0));
        assert_eq!(pixel_to_ndc(10.0, 10.0, Viewport::default()), (0.0, 0.0));
    }
}
