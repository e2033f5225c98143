//! Fixed timestep simulation tick
//!
//! `FlappyEnv::step` advances one episode stream by one tick. Terminal ticks
//! reset the state in place before returning, so there is never an idle
//! state between episodes.

use glam::Vec2;

use super::collision::{collides, touches_bounds};
use super::observe::encode;
use super::physics::{Action, integrate};
use super::spawn::respawn;
use super::state::FlappyState;
use crate::buffers::EnvBuffers;
use crate::consts::*;
use crate::error::Result;
use crate::settings::EnvConfig;
use crate::telemetry::EpisodeLog;

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Episode continues
    Running,
    /// Hit the ceiling, the floor or a pipe
    Died,
    /// Reached `max_steps`
    Truncated,
}

impl StepOutcome {
    pub fn is_terminal(self) -> bool {
        self != StepOutcome::Running
    }
}

/// One Flappy environment instance
#[derive(Debug, Clone)]
pub struct FlappyEnv {
    config: EnvConfig,
    state: FlappyState,
}

impl FlappyEnv {
    pub fn new(config: EnvConfig) -> Result<Self> {
        config.validate()?;
        if config.max_steps <= 0 {
            log::warn!(
                "max_steps {} is not positive, using {}",
                config.max_steps,
                DEFAULT_MAX_STEPS
            );
        }

        let mut state = FlappyState::new(
            config.width,
            config.height,
            config.effective_max_steps(),
            config.seed,
        );
        state.difficulty = config.difficulty;

        log::info!(
            "Flappy env {}x{}: reward={:?} obs={:?} gaps={:?} max_steps={} seed={}",
            config.width,
            config.height,
            config.reward,
            config.observation,
            config.gaps,
            state.max_steps,
            config.seed
        );

        let mut env = Self { config, state };
        env.reset_state();
        Ok(env)
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn state(&self) -> &FlappyState {
        &self.state
    }

    /// Direct state access for staging scenarios in tests
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut FlappyState {
        &mut self.state
    }

    /// Log record of the most recently finished episode
    pub fn log(&self) -> &EpisodeLog {
        &self.state.log
    }

    pub fn obs_dim(&self) -> usize {
        self.config.observation.dim()
    }

    /// Bind caller-owned buffers sized for this environment
    pub fn bind<'a>(
        &self,
        observations: &'a mut [f32],
        actions: &'a mut [i32],
        rewards: &'a mut [f32],
        terminals: &'a mut [u8],
    ) -> Result<EnvBuffers<'a>> {
        EnvBuffers::new(self.obs_dim(), observations, actions, rewards, terminals)
    }

    pub fn difficulty(&self) -> f32 {
        self.state.difficulty
    }

    /// Set the curriculum difficulty used from the next spawned pipe on.
    /// Values are clamped to [0, 1]; NaN is treated as 0.
    pub fn set_difficulty(&mut self, difficulty: f32) {
        let difficulty = if difficulty.is_nan() {
            0.0
        } else {
            difficulty.clamp(0.0, 1.0)
        };
        if difficulty != self.state.difficulty {
            log::debug!("difficulty {} -> {}", self.state.difficulty, difficulty);
        }
        self.state.difficulty = difficulty;
    }

    /// Restart the gap generator from `seed`
    pub fn reseed(&mut self, seed: u64) {
        use rand::SeedableRng;
        log::debug!("reseeding gap generator with {seed}");
        self.state.rng = rand_pcg::Pcg32::seed_from_u64(seed);
    }

    /// Start a fresh episode and write its first observation
    pub fn reset(&mut self, bufs: &mut EnvBuffers<'_>) {
        self.reset_state();
        self.observe(bufs.observations_mut());
    }

    /// Start a fresh episode at a new curriculum difficulty
    pub fn reset_with_difficulty(&mut self, difficulty: f32, bufs: &mut EnvBuffers<'_>) {
        self.set_difficulty(difficulty);
        self.reset(bufs);
    }

    /// Encode the current state into `out`
    pub fn observe(&self, out: &mut [f32]) {
        debug_assert!(out.len() >= self.obs_dim());
        encode(&self.state, self.config.observation, out);
    }

    /// Advance one tick using the action in `bufs`, writing reward,
    /// terminal flag and observation back into it.
    ///
    /// `bufs` must be sized for this env's observation layout, as produced by
    /// [`FlappyEnv::bind`] or [`OwnedBuffers::for_env`](crate::OwnedBuffers::for_env).
    pub fn step(&mut self, bufs: &mut EnvBuffers<'_>) -> StepOutcome {
        bufs.set_reward(0.0);
        bufs.set_terminal(false);

        let policy = self.config.reward;
        let action = Action::from_raw(bufs.action());
        let state = &mut self.state;
        state.step_count += 1;

        let mut reward = policy.action_cost(action);
        integrate(&mut state.bird, action, state.gravity, state.flap_velocity);

        let height = state.height as f32;
        let radius = state.bird_radius();
        let bird = Vec2::new(state.bird_x(), state.bird_y_px());
        if touches_bounds(bird.y, radius, height)
            || collides(state.active_pipes(), state.pipe_width(), height, bird, radius)
        {
            self.end_episode(bufs, DEATH_REWARD);
            return StepOutcome::Died;
        }

        // Score pipes whose right edge is now behind the bird
        let pipe_width = state.pipe_width();
        for pipe in state.pipes[..state.num_pipes].iter_mut() {
            if !pipe.scored && pipe.right(pipe_width) < bird.x {
                pipe.scored = true;
                reward += policy.pass_reward(state.score);
                state.score += 1;
            }
        }

        self.advance_pipes();

        let state = &mut self.state;
        reward += policy.shaping(state);

        if state.step_count >= state.max_steps {
            self.end_episode(bufs, reward);
            return StepOutcome::Truncated;
        }

        state.episode_return += reward;
        bufs.set_reward(reward);
        self.observe(bufs.observations_mut());
        StepOutcome::Running
    }

    /// Scroll pipes left and recycle the leftmost one once it is off screen
    fn advance_pipes(&mut self) {
        let state = &mut self.state;
        let pipe_width = state.pipe_width();
        let spacing = state.pipe_gap_px();
        let speed = state.pipe_speed;

        for pipe in state.active_pipes_mut() {
            pipe.x -= speed;
        }

        let pipes = state.active_pipes();
        let Some(leftmost) = (0..pipes.len()).min_by(|&a, &b| pipes[a].x.total_cmp(&pipes[b].x))
        else {
            return;
        };
        if pipes[leftmost].right(pipe_width) >= 0.0 {
            return;
        }

        let rightmost = pipes
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max);
        state.pipes[leftmost].x = rightmost + spacing;
        respawn(
            &mut state.pipes[leftmost],
            self.config.gaps,
            state.difficulty,
            state.gap_height,
            &mut state.rng,
        );
    }

    /// Write the terminal reward, log the episode and start the next one
    fn end_episode(&mut self, bufs: &mut EnvBuffers<'_>, reward: f32) {
        bufs.set_reward(reward);
        bufs.set_terminal(true);
        self.state.episode_return += reward;
        self.state
            .finalize_episode(self.config.gaps.uses_difficulty());
        self.reset_state();
        self.observe(bufs.observations_mut());
    }

    /// Reinitialize bird, counters and pipes for a new episode
    fn reset_state(&mut self) {
        let state = &mut self.state;
        state.clear_episode();
        state.num_pipes = INITIAL_PIPES;

        let start_x = state.width as f32 * FIRST_PIPE_X_RATIO;
        let spacing = state.pipe_gap_px();
        for i in 0..state.num_pipes {
            let pipe = &mut state.pipes[i];
            pipe.x = start_x + i as f32 * spacing;
            respawn(
                pipe,
                self.config.gaps,
                state.difficulty,
                state.gap_height,
                &mut state.rng,
            );
        }
    }
}
