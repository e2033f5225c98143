//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for scene elements
pub mod colors {
    pub const SKY: [f32; 4] = [113.0 / 255.0, 197.0 / 255.0, 207.0 / 255.0, 1.0];
    pub const PIPE: [f32; 4] = [0.33, 0.75, 0.18, 1.0];
    pub const BIRD: [f32; 4] = [0.98, 0.84, 0.2, 1.0];
}
