//! Environment state and core simulation types
//!
//! Everything a step reads or writes lives here, including the RNG, so one
//! `FlappyState` is a complete, independently steppable episode stream.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::Bird;
use crate::consts::*;
use crate::telemetry::EpisodeLog;

/// A vertical obstacle with a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge in pixels (negative once scrolled off the left side)
    pub x: f32,
    /// Gap center, normalized [0, 1] from the top
    pub gap_center_y: f32,
    /// Gap height, normalized (0, 1]
    pub gap_height: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Default for Pipe {
    fn default() -> Self {
        Self {
            x: 0.0,
            gap_center_y: 0.5,
            gap_height: GAP_HEIGHT_RATIO,
            scored: false,
        }
    }
}

impl Pipe {
    /// Right edge in pixels
    #[inline]
    pub fn right(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }

    /// Gap (top, bottom) edges in pixels
    #[inline]
    pub fn gap_edges_px(&self, height: f32) -> (f32, f32) {
        let center = self.gap_center_y * height;
        let half = self.gap_height * height * 0.5;
        (center - half, center + half)
    }
}

/// Complete environment state (deterministic per seed)
#[derive(Debug, Clone)]
pub struct FlappyState {
    pub width: u32,
    pub height: u32,
    /// Derived once at construction
    pub gravity: f32,
    pub flap_velocity: f32,
    /// Pixels per step
    pub pipe_speed: f32,
    /// Fraction of width between consecutive pipes
    pub pipe_spacing: f32,
    /// Normalized gap height for spawned pipes
    pub gap_height: f32,
    pub max_steps: u32,

    pub bird: Bird,
    /// Fixed-capacity arena; only the first `num_pipes` slots are active.
    /// Slot order does not follow screen order once pipes recycle.
    pub pipes: [Pipe; MAX_PIPES],
    pub num_pipes: usize,
    pub score: u32,
    pub step_count: u32,
    /// Curriculum difficulty in [0, 1], kept across auto-resets
    pub difficulty: f32,
    /// Sum of rewards in the running episode
    pub episode_return: f32,
    pub log: EpisodeLog,
    pub rng: Pcg32,
}

impl FlappyState {
    pub fn new(width: u32, height: u32, max_steps: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            pipe_speed: width as f32 * PIPE_SPEED_RATIO,
            pipe_spacing: PIPE_SPACING_RATIO,
            gap_height: GAP_HEIGHT_RATIO,
            max_steps,
            bird: Bird::default(),
            pipes: [Pipe::default(); MAX_PIPES],
            num_pipes: 0,
            score: 0,
            step_count: 0,
            difficulty: 0.0,
            episode_return: 0.0,
            log: EpisodeLog::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Active pipe slots
    #[inline]
    pub fn active_pipes(&self) -> &[Pipe] {
        &self.pipes[..self.num_pipes]
    }

    #[inline]
    pub fn active_pipes_mut(&mut self) -> &mut [Pipe] {
        &mut self.pipes[..self.num_pipes]
    }

    /// Bird x in pixels (fixed)
    #[inline]
    pub fn bird_x(&self) -> f32 {
        self.width as f32 * BIRD_X_RATIO
    }

    /// Bird y in pixels
    #[inline]
    pub fn bird_y_px(&self) -> f32 {
        self.bird.y * self.height as f32
    }

    /// Bird collision radius in pixels
    #[inline]
    pub fn bird_radius(&self) -> f32 {
        self.height as f32 * BIRD_RADIUS_RATIO
    }

    #[inline]
    pub fn pipe_width(&self) -> f32 {
        self.width as f32 * PIPE_WIDTH_RATIO
    }

    /// Horizontal distance in pixels between consecutive pipes
    #[inline]
    pub fn pipe_gap_px(&self) -> f32 {
        self.width as f32 * self.pipe_spacing
    }

    /// Start the next episode's counters (the log keeps `n`)
    pub fn clear_episode(&mut self) {
        self.episode_return = 0.0;
        self.bird = Bird::default();
        self.score = 0;
        self.step_count = 0;
    }

    /// Close the running episode into the log
    pub fn finalize_episode(&mut self, track_difficulty: bool) {
        let difficulty = track_difficulty.then_some(self.difficulty);
        self.log
            .record(self.score, self.episode_return, self.step_count, difficulty);
        log::trace!(
            "episode {} finished: score={} return={:.3} length={}",
            self.log.n,
            self.score,
            self.episode_return,
            self.step_count
        );
    }
}
