//! Deterministic simulation module
//!
//! All environment logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Per-instance seeded RNG only
//! - Fixed-capacity pipe arena, no allocation while stepping
//! - No rendering or platform dependencies

pub mod collision;
pub mod curriculum;
pub mod observe;
pub mod physics;
pub mod reward;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collides, touches_bounds};
pub use curriculum::difficulty_for_step;
pub use observe::{ObservationLayout, encode, target_pipe};
pub use physics::{Action, Bird, integrate};
pub use reward::RewardPolicy;
pub use spawn::{GapSampling, curriculum_half_range, extreme_probability, sample_gap_center};
pub use state::{FlappyState, Pipe};
pub use tick::{FlappyEnv, StepOutcome};
