//! Bird physics
//!
//! One body, vertical axis only. Position is normalized to [0, 1] (top to
//! bottom), velocity is in normalized units per step.

use serde::{Deserialize, Serialize};

use crate::clamp;

/// Discrete action for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Flap,
}

impl Action {
    /// Any nonzero raw action is a flap
    #[inline]
    pub fn from_raw(raw: i32) -> Self {
        if raw != 0 { Action::Flap } else { Action::Idle }
    }

    #[inline]
    pub fn is_flap(self) -> bool {
        self == Action::Flap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Normalized height, 0 = ceiling, 1 = floor
    pub y: f32,
    /// Signed vertical velocity, positive is downward
    pub vy: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self { y: 0.5, vy: 0.0 }
    }
}

/// Advance the bird by one step.
///
/// A flap replaces the velocity; gravity is then applied in the same step.
pub fn integrate(bird: &mut Bird, action: Action, gravity: f32, flap_velocity: f32) {
    if action.is_flap() {
        bird.vy = -flap_velocity;
    }
    bird.vy += gravity;
    bird.y = clamp(bird.y + bird.vy, 0.0, 1.0);
}
