//! Procedural pipe generation
//!
//! A recycled pipe gets a fresh gap center; its height is always the
//! configured ratio. How the center is drawn is chosen statically by
//! `GapSampling`. The curriculum mode is a smooth function of difficulty:
//!
//! - d 0.00–0.25: range widens from the center point to [0.25, 0.75]
//! - d 0.25–0.55: full range, extreme-band bias ramps up to 45%
//! - d 0.55–0.85: full range, extreme-band bias ramps back down
//! - d 0.85–1.00: plain uniform [0.25, 0.75], identical to `Uniform`

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Pipe;
use crate::consts::{EXTREME_BAND_WIDTH, GAP_CENTER_MAX, GAP_CENTER_MIN};

/// Difficulty at which the sampling range reaches full width
const RANGE_FULL_AT: f32 = 0.25;
/// Difficulty at which the extreme bias peaks
const BIAS_PEAK_AT: f32 = 0.55;
/// Difficulty at which the extreme bias is gone again
const BIAS_END_AT: f32 = 0.85;
/// Peak probability of drawing from an extreme band
const BIAS_PEAK_PROB: f32 = 0.45;

/// How gap centers are drawn for new pipes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSampling {
    /// Uniform over [0.25, 0.75] (evaluation distribution)
    #[default]
    Uniform,
    /// Every gap at the same height (debugging)
    Fixed { center: f32 },
    /// Only the extreme bands [0.25, 0.35] and [0.65, 0.75]
    ExtremeBands,
    /// Driven by the environment's curriculum difficulty
    Curriculum,
}

impl GapSampling {
    /// Whether the difficulty scalar affects sampling (and is logged)
    pub fn uses_difficulty(&self) -> bool {
        matches!(self, GapSampling::Curriculum)
    }
}

/// Half-width of the curriculum sampling range around 0.5
pub fn curriculum_half_range(difficulty: f32) -> f32 {
    let full = (GAP_CENTER_MAX - GAP_CENTER_MIN) * 0.5;
    difficulty.clamp(0.0, RANGE_FULL_AT) / RANGE_FULL_AT * full
}

/// Probability of drawing from an extreme band: a triangular hump over
/// (0.25, 0.85) peaking at 0.55
pub fn extreme_probability(difficulty: f32) -> f32 {
    if difficulty <= RANGE_FULL_AT || difficulty >= BIAS_END_AT {
        return 0.0;
    }
    let t = if difficulty <= BIAS_PEAK_AT {
        (difficulty - RANGE_FULL_AT) / (BIAS_PEAK_AT - RANGE_FULL_AT)
    } else {
        1.0 - (difficulty - BIAS_PEAK_AT) / (BIAS_END_AT - BIAS_PEAK_AT)
    };
    t * BIAS_PEAK_PROB
}

fn sample_extreme_band<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let offset = rng.random_range(0.0..=EXTREME_BAND_WIDTH);
    if rng.random_bool(0.5) {
        GAP_CENTER_MIN + offset
    } else {
        GAP_CENTER_MAX - EXTREME_BAND_WIDTH + offset
    }
}

/// Draw one gap center
pub fn sample_gap_center<R: Rng + ?Sized>(sampling: GapSampling, difficulty: f32, rng: &mut R) -> f32 {
    match sampling {
        GapSampling::Uniform => rng.random_range(GAP_CENTER_MIN..=GAP_CENTER_MAX),
        GapSampling::Fixed { center } => center,
        GapSampling::ExtremeBands => sample_extreme_band(rng),
        GapSampling::Curriculum => {
            let extreme = extreme_probability(difficulty);
            // No draw when the bias is off, so d >= 0.85 consumes the RNG
            // exactly like `Uniform`
            if extreme > 0.0 && rng.random::<f32>() < extreme {
                return sample_extreme_band(rng);
            }
            let half = curriculum_half_range(difficulty);
            if half <= 0.0 {
                0.5
            } else {
                rng.random_range(0.5 - half..=0.5 + half)
            }
        }
    }
}

/// Give a recycled pipe slot a fresh gap; the caller places it horizontally
pub fn respawn<R: Rng + ?Sized>(
    pipe: &mut Pipe,
    sampling: GapSampling,
    difficulty: f32,
    gap_height: f32,
    rng: &mut R,
) {
    pipe.gap_center_y = sample_gap_center(sampling, difficulty, rng);
    pipe.gap_height = gap_height;
    pipe.scored = false;
}
