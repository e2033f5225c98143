//! Observation encoding
//!
//! Lean layout (5):
//! `[bird_y, bird_vy, dist_to_pipe, gap_center, gap_height]`
//!
//! Rich layout (9) appends:
//! `[has_target, gap_error, top_clearance, bottom_clearance]`
//!
//! The target is the pipe ahead of the bird with the smallest `x`. Slots
//! are scanned in full because recycling scrambles their order.

use serde::{Deserialize, Serialize};

use super::state::{FlappyState, Pipe};
use crate::clamp;
use crate::consts::VELOCITY_SCALE;

/// Gap heights at or below this (normalized, halved) give zero clearance
const MIN_HALF_GAP: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationLayout {
    Lean,
    #[default]
    Rich,
}

impl ObservationLayout {
    pub const LEAN_DIM: usize = 5;
    pub const RICH_DIM: usize = 9;

    pub const fn dim(self) -> usize {
        match self {
            ObservationLayout::Lean => Self::LEAN_DIM,
            ObservationLayout::Rich => Self::RICH_DIM,
        }
    }
}

/// Nearest pipe whose right edge is still ahead of the bird
pub fn target_pipe(pipes: &[Pipe], bird_x: f32, pipe_width: f32) -> Option<&Pipe> {
    pipes
        .iter()
        .filter(|p| p.right(pipe_width) > bird_x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
}

/// Normalized horizontal distance from the bird to a pipe's left edge
#[inline]
pub fn distance_to(pipe: &Pipe, bird_x: f32, width: f32) -> f32 {
    clamp((pipe.x - bird_x) / width, 0.0, 1.0)
}

/// Write the observation for `state` into `out[..layout.dim()]`
pub fn encode(state: &FlappyState, layout: ObservationLayout, out: &mut [f32]) {
    let bird_x = state.bird_x();
    let bird_y = state.bird.y;
    let target = target_pipe(state.active_pipes(), bird_x, state.pipe_width());

    let (dist, gap_center, gap_height) = match target {
        Some(pipe) => (
            distance_to(pipe, bird_x, state.width as f32),
            pipe.gap_center_y,
            pipe.gap_height,
        ),
        None => (1.0, 0.5, state.gap_height),
    };

    out[0] = clamp(bird_y, 0.0, 1.0);
    out[1] = clamp(state.bird.vy / VELOCITY_SCALE, -1.0, 1.0);
    out[2] = dist;
    out[3] = gap_center;
    out[4] = gap_height;

    if layout == ObservationLayout::Lean {
        return;
    }

    if target.is_none() {
        out[5..9].fill(0.0);
        return;
    }

    out[5] = 1.0;
    // Positive when the gap center sits below the bird
    out[6] = clamp(gap_center - bird_y, -1.0, 1.0);

    let half = gap_height * 0.5;
    if half > MIN_HALF_GAP {
        let top_edge = gap_center - half;
        let bottom_edge = gap_center + half;
        out[7] = clamp((top_edge - bird_y) / half, -1.0, 1.0);
        out[8] = clamp((bird_y - bottom_edge) / half, -1.0, 1.0);
    } else {
        out[7] = 0.0;
        out[8] = 0.0;
    }
}
