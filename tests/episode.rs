//! Episode-level scenarios through the public API with caller-owned buffers

use flappy_env::consts::INITIAL_PIPES;
use flappy_env::renderer::Frame;
use flappy_env::sim::{GapSampling, RewardPolicy};
use flappy_env::{EnvConfig, EnvError, FlappyEnv, StepOutcome};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Hover around the middle: flap whenever the bird sinks below 0.55
fn hover_action(observations: &[f32]) -> i32 {
    (observations[0] > 0.55) as i32
}

fn centered_env(config: EnvConfig) -> FlappyEnv {
    FlappyEnv::new(config.with_gaps(GapSampling::Fixed { center: 0.5 })).unwrap()
}

#[test]
fn test_free_fall_example() {
    init_logger();
    let mut env = FlappyEnv::new(EnvConfig::curriculum(512, 512).with_max_steps(5000)).unwrap();

    let mut obs = [0.0f32; 5];
    let mut act = [0i32; 1];
    let mut rew = [0.0f32; 1];
    let mut term = [0u8; 1];
    let mut bufs = env.bind(&mut obs, &mut act, &mut rew, &mut term).unwrap();
    env.reset(&mut bufs);

    let mut steps = 0;
    let outcome = loop {
        steps += 1;
        let outcome = env.step(&mut bufs);
        if outcome.is_terminal() {
            break outcome;
        }
    };

    assert_eq!(outcome, StepOutcome::Died);
    assert_eq!(steps, 23);
    assert_eq!(rew[0], -1.0);
    assert_eq!(term[0], 1);
    assert_eq!(env.log().episode_length, 23.0);
    // Observation already belongs to the next episode
    assert_eq!(obs[0], 0.5);
    assert_eq!(obs[1], 0.0);
}

#[test]
fn test_bind_rejects_wrong_observation_size() {
    let env = FlappyEnv::new(EnvConfig::dense(512, 512)).unwrap();
    let mut obs = [0.0f32; 5];
    let mut act = [0i32; 1];
    let mut rew = [0.0f32; 1];
    let mut term = [0u8; 1];
    let err = env.bind(&mut obs, &mut act, &mut rew, &mut term).unwrap_err();
    assert!(matches!(
        err,
        EnvError::BufferSizeMismatch {
            expected: 9,
            actual: 5,
            ..
        }
    ));
}

#[test]
fn test_hovering_passes_pipes() {
    init_logger();
    let mut env = centered_env(EnvConfig::curriculum(512, 512));
    let mut obs = [0.0f32; 5];
    let mut act = [0i32; 1];
    let mut rew = [0.0f32; 1];
    let mut term = [0u8; 1];
    let mut bufs = env.bind(&mut obs, &mut act, &mut rew, &mut term).unwrap();
    env.reset(&mut bufs);

    let mut total = 0.0;
    for _ in 0..2000 {
        let action = hover_action(bufs.observations());
        bufs.set_action(action);
        assert_eq!(env.step(&mut bufs), StepOutcome::Running);
        total += bufs.reward();

        let state = env.state();
        assert_eq!(state.num_pipes, INITIAL_PIPES);

        // Recycling keeps pipes evenly spaced and never stacked
        let mut xs: Vec<f32> = state.active_pipes().iter().map(|p| p.x).collect();
        xs.sort_by(f32::total_cmp);
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - state.pipe_gap_px()).abs() < 0.05);
        }
    }

    let score = env.state().score;
    assert!(score >= 25, "score {score}");
    assert_eq!(total, score as f32);
    assert!(env.log().is_empty());
}

#[test]
fn test_dense_truncation_keeps_shaping() {
    init_logger();
    let mut env = centered_env(EnvConfig::dense(512, 512).with_max_steps(300));
    let mut owned = flappy_env::OwnedBuffers::for_env(&env);
    let mut bufs = owned.view();
    env.reset(&mut bufs);

    let mut last = StepOutcome::Running;
    for _ in 0..300 {
        let action = hover_action(bufs.observations());
        bufs.set_action(action);
        last = env.step(&mut bufs);
    }

    assert_eq!(last, StepOutcome::Truncated);
    assert!(bufs.terminal());
    // Survival bonus at minimum, never the death penalty
    assert!(bufs.reward() > 0.0);

    let log = env.log();
    assert_eq!(log.n, 1.0);
    assert_eq!(log.episode_length, 300.0);
    assert_eq!(log.score, 3.0);
    assert_eq!(log.perf, 1.0);
    // Three passes with streak: 1.0 + 1.1 + 1.2, plus shaping, minus flap costs
    assert!(log.episode_return > 3.3, "return {}", log.episode_return);

    env.step(&mut bufs);
    assert_eq!(env.state().step_count, 1);
}

#[test]
fn test_episode_counter_spans_resets() {
    let mut env = FlappyEnv::new(EnvConfig::curriculum(512, 512).with_max_steps(5)).unwrap();
    let mut owned = flappy_env::OwnedBuffers::for_env(&env);
    let mut bufs = owned.view();

    for _ in 0..20 {
        env.step(&mut bufs);
    }
    assert_eq!(env.log().n, 4.0);

    // Explicit resets do not count as finished episodes
    env.reset(&mut bufs);
    assert_eq!(env.log().n, 4.0);
}

#[test]
fn test_reset_is_reproducible_per_seed() {
    let config = EnvConfig::dense(400, 600).with_seed(1234);
    let mut a = FlappyEnv::new(config.clone()).unwrap();
    let mut b = FlappyEnv::new(config).unwrap();

    let mut obs_a = flappy_env::OwnedBuffers::for_env(&a);
    let mut obs_b = flappy_env::OwnedBuffers::for_env(&b);
    a.reset(&mut obs_a.view());
    b.reset(&mut obs_b.view());
    assert_eq!(obs_a.observations(), obs_b.observations());

    a.reseed(1234);
    a.reset(&mut obs_a.view());
    b.reseed(1234);
    b.reset(&mut obs_b.view());
    assert_eq!(obs_a.observations(), obs_b.observations());

    // Reseeding restarts the sequence the constructor consumed from
    let mut fresh = FlappyEnv::new(EnvConfig::dense(400, 600).with_seed(1234)).unwrap();
    fresh.reseed(1234);
    let mut obs_c = flappy_env::OwnedBuffers::for_env(&fresh);
    fresh.reset(&mut obs_c.view());
    assert_eq!(obs_c.observations(), obs_a.observations());
}

#[test]
fn test_same_seed_same_trajectory() {
    let config = EnvConfig::curriculum(512, 512).with_seed(99).with_difficulty(0.7);
    let mut a = FlappyEnv::new(config.clone()).unwrap();
    let mut b = FlappyEnv::new(config).unwrap();
    let mut bufs_a = flappy_env::OwnedBuffers::for_env(&a);
    let mut bufs_b = flappy_env::OwnedBuffers::for_env(&b);

    for i in 0..1500 {
        let action = ((i * 7) % 5 == 0) as i32;
        bufs_a.actions[0] = action;
        bufs_b.actions[0] = action;
        a.step(&mut bufs_a.view());
        b.step(&mut bufs_b.view());
        assert_eq!(bufs_a.observations(), bufs_b.observations());
        assert_eq!(bufs_a.rewards, bufs_b.rewards);
        assert_eq!(bufs_a.terminals, bufs_b.terminals);
    }
    assert_eq!(a.log(), b.log());
}

#[test]
fn test_instances_step_in_parallel() {
    let mut envs: Vec<FlappyEnv> = (0..4)
        .map(|seed| FlappyEnv::new(EnvConfig::curriculum(512, 512).with_seed(seed)).unwrap())
        .collect();

    std::thread::scope(|scope| {
        for env in envs.iter_mut() {
            scope.spawn(move || {
                let mut bufs = flappy_env::OwnedBuffers::for_env(env);
                for _ in 0..1000 {
                    env.step(&mut bufs.view());
                }
            });
        }
    });

    // Free fall dies every 23 steps: 1000 / 23 = 43 episodes each
    assert!(envs.iter().all(|env| env.log().n == 43.0));
}

#[test]
fn test_frame_tracks_state() {
    let mut env = centered_env(EnvConfig::dense(400, 600));
    let mut bufs = flappy_env::OwnedBuffers::for_env(&env);
    for _ in 0..10 {
        env.step(&mut bufs.view());
    }
    let frame = Frame::capture(&env);
    assert_eq!(frame.pipes.len(), 2 * INITIAL_PIPES);
    assert!((frame.bird_center().y - env.state().bird_y_px()).abs() < 1e-4);
    assert!((frame.pipes[0].min.x - env.state().pipes[0].x).abs() < 1e-6);
}

#[test]
fn test_log_serializes_difficulty_for_curriculum() {
    let mut env = FlappyEnv::new(
        EnvConfig::curriculum(512, 512)
            .with_max_steps(2)
            .with_difficulty(0.3),
    )
    .unwrap();
    assert_eq!(env.config().reward, RewardPolicy::Sparse);

    let mut bufs = flappy_env::OwnedBuffers::for_env(&env);
    env.step(&mut bufs.view());
    env.step(&mut bufs.view());

    let json = env.log().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["n"], 1.0);
    assert_eq!(value["episode_length"], 2.0);
    assert!((value["difficulty"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}
