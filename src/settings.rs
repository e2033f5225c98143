//! Environment configuration
//!
//! Everything here is fixed at construction. The two training variants are
//! presets over the same engine: `dense` (hand-shaped reward, rich
//! observations) and `curriculum` (sparse reward, lean observations,
//! difficulty-driven gaps).

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_STEPS;
use crate::error::{EnvError, Result};
use crate::sim::{GapSampling, ObservationLayout, RewardPolicy};

/// Construction parameters for a `FlappyEnv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Pixel width of the playfield
    pub width: u32,
    /// Pixel height of the playfield
    pub height: u32,
    /// Truncation horizon; non-positive falls back to `DEFAULT_MAX_STEPS`
    pub max_steps: i64,
    /// Seed for the instance's gap generator
    pub seed: u64,
    pub reward: RewardPolicy,
    pub observation: ObservationLayout,
    pub gaps: GapSampling,
    /// Initial curriculum difficulty in [0, 1]
    pub difficulty: f32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 600,
            max_steps: DEFAULT_MAX_STEPS as i64,
            seed: 0,
            reward: RewardPolicy::Dense,
            observation: ObservationLayout::Rich,
            gaps: GapSampling::Uniform,
            difficulty: 0.0,
        }
    }
}

impl EnvConfig {
    /// Dense-reward variant: shaped reward, 9-dim observations, uniform gaps
    pub fn dense(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Curriculum variant: sparse reward, 5-dim observations, difficulty-driven gaps
    pub fn curriculum(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            reward: RewardPolicy::Sparse,
            observation: ObservationLayout::Lean,
            gaps: GapSampling::Curriculum,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_steps(mut self, max_steps: i64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_gaps(mut self, gaps: GapSampling) -> Self {
        self.gaps = gaps;
        self
    }

    pub fn with_difficulty(mut self, difficulty: f32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Truncation horizon actually used (non-positive values are recovered)
    pub fn effective_max_steps(&self) -> u32 {
        if self.max_steps <= 0 {
            DEFAULT_MAX_STEPS
        } else {
            self.max_steps.min(u32::MAX as i64) as u32
        }
    }

    /// Observation vector length for this configuration
    pub fn obs_dim(&self) -> usize {
        self.observation.dim()
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(EnvError::InvalidDimension {
                name: "width",
                value: self.width,
            });
        }
        if self.height == 0 {
            return Err(EnvError::InvalidDimension {
                name: "height",
                value: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.difficulty) {
            return Err(EnvError::InvalidConfig {
                param: "difficulty",
                message: format!("must be within [0, 1], got {}", self.difficulty),
            });
        }
        if let GapSampling::Fixed { center } = self.gaps {
            if !(0.0..=1.0).contains(&center) {
                return Err(EnvError::InvalidConfig {
                    param: "gaps.center",
                    message: format!("must be within [0, 1], got {center}"),
                });
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
