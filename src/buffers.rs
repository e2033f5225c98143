//! Step buffers
//!
//! A training harness owns flat, fixed-size arrays per environment and reuses
//! them every step: one observation vector, one action, one reward and one
//! terminal flag. `EnvBuffers` borrows them after checking sizes once, so
//! stepping itself never fails or allocates.

use crate::error::{EnvError, Result};
use crate::sim::FlappyEnv;

/// Borrowed view over caller-owned buffers
#[derive(Debug)]
pub struct EnvBuffers<'a> {
    observations: &'a mut [f32],
    actions: &'a mut [i32],
    rewards: &'a mut [f32],
    terminals: &'a mut [u8],
}

fn check_len(buffer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EnvError::BufferSizeMismatch {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}

impl<'a> EnvBuffers<'a> {
    /// Bind buffers for an environment producing `obs_dim` observations
    pub fn new(
        obs_dim: usize,
        observations: &'a mut [f32],
        actions: &'a mut [i32],
        rewards: &'a mut [f32],
        terminals: &'a mut [u8],
    ) -> Result<Self> {
        check_len("observation", obs_dim, observations.len())?;
        check_len("action", 1, actions.len())?;
        check_len("reward", 1, rewards.len())?;
        check_len("terminal", 1, terminals.len())?;
        Ok(Self {
            observations,
            actions,
            rewards,
            terminals,
        })
    }

    pub fn obs_dim(&self) -> usize {
        self.observations.len()
    }

    pub fn observations(&self) -> &[f32] {
        &*self.observations
    }

    pub fn observations_mut(&mut self) -> &mut [f32] {
        &mut *self.observations
    }

    pub fn action(&self) -> i32 {
        self.actions[0]
    }

    pub fn set_action(&mut self, action: i32) {
        self.actions[0] = action;
    }

    pub fn reward(&self) -> f32 {
        self.rewards[0]
    }

    pub fn set_reward(&mut self, reward: f32) {
        self.rewards[0] = reward;
    }

    pub fn terminal(&self) -> bool {
        self.terminals[0] != 0
    }

    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminals[0] = terminal as u8;
    }
}

/// Buffers owned in one place, for single-environment harnesses.
///
/// Sized from the environment at construction so a view always matches it.
#[derive(Debug, Clone)]
pub struct OwnedBuffers {
    observations: Vec<f32>,
    pub actions: [i32; 1],
    pub rewards: [f32; 1],
    pub terminals: [u8; 1],
}

impl OwnedBuffers {
    pub fn for_env(env: &FlappyEnv) -> Self {
        Self {
            observations: vec![0.0; env.obs_dim()],
            actions: [0],
            rewards: [0.0],
            terminals: [0],
        }
    }

    pub fn observations(&self) -> &[f32] {
        &self.observations
    }

    /// Borrow as an `EnvBuffers` view
    pub fn view(&mut self) -> EnvBuffers<'_> {
        EnvBuffers {
            observations: &mut self.observations,
            actions: &mut self.actions,
            rewards: &mut self.rewards,
            terminals: &mut self.terminals,
        }
    }
}
