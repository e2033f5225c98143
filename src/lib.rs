//! Flappy Env - A deterministic Flappy-style environment for RL training
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, pipes, rewards)
//! - `buffers`: Caller-owned observation/action/reward/terminal buffers
//! - `settings`: Environment configuration and presets
//! - `telemetry`: Per-episode log record
//! - `renderer`: Draw-list capture for an external rendering backend

pub mod buffers;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use buffers::{EnvBuffers, OwnedBuffers};
pub use error::{EnvError, Result};
pub use settings::EnvConfig;
pub use sim::{FlappyEnv, StepOutcome};
pub use telemetry::EpisodeLog;

/// Environment constants
pub mod consts {
    /// Fixed pipe arena capacity
    pub const MAX_PIPES: usize = 5;
    /// Active pipes after every reset
    pub const INITIAL_PIPES: usize = 3;

    /// Bird horizontal position as a fraction of width
    pub const BIRD_X_RATIO: f32 = 0.2;
    /// Bird collision radius as a fraction of height
    pub const BIRD_RADIUS_RATIO: f32 = 0.025;
    /// Pipe width as a fraction of width
    pub const PIPE_WIDTH_RATIO: f32 = 0.15;
    /// Gap height as a fraction of height
    pub const GAP_HEIGHT_RATIO: f32 = 0.28;
    /// Pipe speed in pixels/step as a fraction of width
    pub const PIPE_SPEED_RATIO: f32 = 0.006;
    /// Horizontal distance between consecutive pipes as a fraction of width
    pub const PIPE_SPACING_RATIO: f32 = 0.45;
    /// First pipe's x position after reset as a fraction of width
    pub const FIRST_PIPE_X_RATIO: f32 = 0.5;

    /// Upward velocity set by a flap (normalized units/step)
    pub const FLAP_VELOCITY: f32 = 0.02;
    /// Downward acceleration (normalized units/step²)
    pub const GRAVITY: f32 = 0.0018;
    /// Velocity normalization for the observation vector
    pub const VELOCITY_SCALE: f32 = 0.1;

    /// Truncation horizon when none (or a non-positive one) is configured
    pub const DEFAULT_MAX_STEPS: u32 = 5000;

    /// Reward on death (ceiling, floor or pipe)
    pub const DEATH_REWARD: f32 = -1.0;
    /// Base reward per pipe passed
    pub const PASS_REWARD: f32 = 1.0;

    /// Dense shaping: cost per flap
    pub const FLAP_PENALTY: f32 = 0.001;
    /// Dense shaping: reward per non-terminal step
    pub const SURVIVAL_BONUS: f32 = 0.01;
    /// Dense shaping: reward inside the gap, scaled by pipe proximity
    pub const IN_GAP_BONUS: f32 = 0.02;
    /// Dense shaping: reward for lining up with the gap center
    pub const ALIGNMENT_BONUS: f32 = 0.008;
    /// Dense shaping: normalized distance over which alignment decays to zero
    pub const ALIGNMENT_TOLERANCE: f32 = 0.2;
    /// Dense shaping: extra pass reward per pipe already passed
    pub const STREAK_BONUS: f32 = 0.1;

    /// Uniform gap center range
    pub const GAP_CENTER_MIN: f32 = 0.25;
    pub const GAP_CENTER_MAX: f32 = 0.75;
    /// Width of each extreme band at the edges of the uniform range
    pub const EXTREME_BAND_WIDTH: f32 = 0.1;
}

/// Saturating clamp to `[lo, hi]`
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
