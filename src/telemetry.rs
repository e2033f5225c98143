//! Episode log record
//!
//! Pull-based: the environment overwrites the record each time an episode
//! ends and consumers read it whenever they like. Only `n` accumulates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EpisodeLog {
    /// 1.0 if the last episode passed at least one pipe
    pub perf: f32,
    /// Pipes passed in the last episode
    pub score: f32,
    /// Sum of rewards in the last episode
    pub episode_return: f32,
    /// Steps in the last episode
    pub episode_length: f32,
    /// Curriculum difficulty the last episode ran at (curriculum runs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f32>,
    /// Episodes finished since construction, including truncations
    pub n: f32,
}

impl EpisodeLog {
    /// Record a finished episode
    pub fn record(
        &mut self,
        score: u32,
        episode_return: f32,
        episode_length: u32,
        difficulty: Option<f32>,
    ) {
        self.perf = if score > 0 { 1.0 } else { 0.0 };
        self.score = score as f32;
        self.episode_return = episode_return;
        self.episode_length = episode_length as f32;
        self.difficulty = difficulty;
        self.n += 1.0;
    }

    /// Whether any episode has finished yet
    pub fn is_empty(&self) -> bool {
        self.n == 0.0
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
