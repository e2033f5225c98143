//! Frame capture
//!
//! A `Frame` is a read-only snapshot of what to draw: two rectangles per
//! pipe (above and below the gap) and the bird sprite. Windows, textures and
//! GPU resources belong to whichever backend consumes it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{BIRD_RADIUS_RATIO, MAX_PIPES};
use crate::sim::FlappyEnv;

/// Sprites are drawn at twice the collision radius
const SPRITE_SCALE: f32 = 2.0;
const BIRD_SEGMENTS: u32 = 24;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Top and bottom pipe segments, two per active pipe
    pub pipes: Vec<Rect>,
    /// Bird sprite bounds (centered on the bird)
    pub bird: Rect,
    pub score: u32,
}

impl Frame {
    /// Snapshot the current environment state
    pub fn capture(env: &FlappyEnv) -> Self {
        let state = env.state();
        let height = state.height as f32;
        let pipe_width = state.pipe_width();

        let mut pipes = Vec::with_capacity(MAX_PIPES * 2);
        for pipe in state.active_pipes() {
            let (top_edge, bottom_edge) = pipe.gap_edges_px(height);
            pipes.push(Rect::new(pipe.x, 0.0, pipe_width, top_edge));
            pipes.push(Rect::new(pipe.x, bottom_edge, pipe_width, height - bottom_edge));
        }

        let radius = height * BIRD_RADIUS_RATIO * SPRITE_SCALE;
        let center = Vec2::new(state.bird_x(), state.bird_y_px());
        let bird = Rect {
            min: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        };

        Self {
            width: state.width,
            height: state.height,
            pipes,
            bird,
            score: state.score,
        }
    }

    /// Bird center in pixels
    pub fn bird_center(&self) -> Vec2 {
        self.bird.min + self.bird.size * 0.5
    }

    /// Tessellate into triangles: sky, pipes, then the bird on top
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(6 + self.pipes.len() * 6 + BIRD_SEGMENTS as usize * 3);
        shapes::rect(
            &mut out,
            Vec2::ZERO,
            Vec2::new(self.width as f32, self.height as f32),
            colors::SKY,
        );
        for pipe in &self.pipes {
            shapes::rect(&mut out, pipe.min, pipe.size, colors::PIPE);
        }
        shapes::circle(
            &mut out,
            self.bird_center(),
            self.bird.size.x * 0.5,
            colors::BIRD,
            BIRD_SEGMENTS,
        );
        out
    }

    /// Vertex data as raw bytes for a GPU upload
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }
}
