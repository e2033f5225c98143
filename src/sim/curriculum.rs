//! Curriculum schedule
//!
//! The trainer owns the schedule and pushes the value into each environment
//! with `FlappyEnv::set_difficulty`; auto-resets keep whatever was pushed last.

/// Fraction of training held at difficulty 0.0 before the ramp starts
pub const WARMUP_FRACTION: f64 = 0.10;

/// Difficulty for a point in training: hold at 0.0 through the warm-up,
/// then ramp linearly to 1.0 at `total_steps`.
pub fn difficulty_for_step(global_step: u64, total_steps: u64) -> f32 {
    let total = total_steps.max(1);
    let warmup = (total as f64 * WARMUP_FRACTION) as u64;
    if global_step <= warmup {
        return 0.0;
    }
    let remaining = (total - warmup).max(1);
    ((global_step - warmup) as f64 / remaining as f64).min(1.0) as f32
}
