//! Vertex types for the blaster scene

use bytemuck::{Pod, Zeroable};

/// Clip-space vertex with colour. Projection happens on the CPU so the
/// shader stays a pass-through.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 4], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colours for scene elements
pub mod colors {
    /// Card body, behind the label
    pub const CARD_FILL: [f32; 4] = [20.0 / 255.0, 30.0 / 255.0, 45.0 / 255.0, 0.9];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Debris (#ff4500)
    pub const DEBRIS: [f32; 4] = [1.0, 69.0 / 255.0, 0.0, 1.0];
    pub const FOG: [f32; 3] = [0.0, 0.0, 0.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
