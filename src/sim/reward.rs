//! Reward shaping
//!
//! Sparse: +1 per pipe passed, -1 on death, nothing else.
//! Dense adds a flap cost, a streak bonus on passes, and per-step survival,
//! in-gap and alignment bonuses. The constants are tuned for training runs
//! already in flight; changing them changes the reward scale.

use serde::{Deserialize, Serialize};

use super::observe::{distance_to, target_pipe};
use super::physics::Action;
use super::state::FlappyState;
use crate::clamp;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    Sparse,
    #[default]
    Dense,
}

impl RewardPolicy {
    /// Cost charged when the action is applied
    #[inline]
    pub fn action_cost(self, action: Action) -> f32 {
        match self {
            RewardPolicy::Dense if action.is_flap() => -FLAP_PENALTY,
            _ => 0.0,
        }
    }

    /// Reward for one pipe passed, given the score before this pass
    #[inline]
    pub fn pass_reward(self, score_before: u32) -> f32 {
        match self {
            RewardPolicy::Sparse => PASS_REWARD,
            RewardPolicy::Dense => PASS_REWARD + STREAK_BONUS * score_before as f32,
        }
    }

    /// Per-step bonus for a surviving bird, after pipes have moved
    pub fn shaping(self, state: &FlappyState) -> f32 {
        if self == RewardPolicy::Sparse {
            return 0.0;
        }

        let mut reward = SURVIVAL_BONUS;
        let bird_x = state.bird_x();
        let Some(pipe) = target_pipe(state.active_pipes(), bird_x, state.pipe_width()) else {
            return reward;
        };

        let bird_y = state.bird.y;
        let gap_center = pipe.gap_center_y;
        let half = pipe.gap_height * 0.5;

        // In-gap bonus ramps up as the pipe approaches
        let proximity = 1.0 - distance_to(pipe, bird_x, state.width as f32);
        if bird_y >= gap_center - half && bird_y <= gap_center + half {
            reward += proximity * IN_GAP_BONUS;
        }

        let align_err = (bird_y - gap_center).abs();
        let align = 1.0 - clamp(align_err / ALIGNMENT_TOLERANCE, 0.0, 1.0);
        reward + ALIGNMENT_BONUS * align
    }
}
