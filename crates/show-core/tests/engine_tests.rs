// Integration tests for formation switching and the per-frame update.

use show_core::{
    flicker_factor, AudioCue, EasingMode, EngineConfig, Formation, MotionState, ShowEngine,
    ShowError, ARRIVAL_EPSILON, FLICKER_MAX, FLICKER_MIN,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn make_engine(count: usize) -> ShowEngine {
    let cfg = EngineConfig::default()
        .with_particle_count(count)
        .with_seed(42)
        .without_trigger_delay();
    ShowEngine::new(cfg).expect("valid config")
}

/// Tick at 60 Hz from `start_ms` until the fleet settles. Returns the time
/// of the last tick.
fn run_until_settled(engine: &mut ShowEngine, start_ms: f64, max_frames: usize) -> f64 {
    let mut now = start_ms;
    for _ in 0..max_frames {
        engine.tick(now);
        if engine.is_settled() {
            return now;
        }
        now += FRAME_MS;
    }
    panic!("fleet did not settle within {max_frames} frames");
}

fn assert_on_target(engine: &ShowEngine) {
    let store = engine.particles();
    for (i, (p, t)) in store.positions().iter().zip(store.targets()).enumerate() {
        let d = (*t - *p).abs().max_element();
        assert!(d <= ARRIVAL_EPSILON, "particle {i} is {d} away");
    }
}

#[test]
fn landing_example_scenario() {
    let mut engine = make_engine(4);
    let start: Vec<_> = engine.positions().to_vec();
    engine.request_formation_by_name("landing", 0.0).unwrap();

    engine.tick(0.0);
    let store = engine.particles();
    for i in 0..4 {
        let expected = start[i] + (store.targets()[i] - start[i]) * store.speeds()[i];
        assert!(engine.positions()[i].abs_diff_eq(expected, 1e-4), "particle {i}");
        assert!(engine.is_flying(i));
    }

    run_until_settled(&mut engine, FRAME_MS, 10_000);
    for i in 0..4 {
        assert!(!engine.is_flying(i));
        assert!(engine.positions()[i].y.abs() < 1e-3);
        assert!(engine.is_grounded(i));
    }
}

#[test]
fn every_particle_eventually_arrives() {
    for f in [Formation::Takeoff, Formation::Dragon, Formation::Buildings] {
        let mut engine = make_engine(300);
        engine.request_formation(f, 0.0);
        run_until_settled(&mut engine, 0.0, 20_000);
        assert_on_target(&engine);
    }
}

#[test]
fn trigger_delay_holds_particles_back() {
    let cfg = EngineConfig::default().with_particle_count(200).with_seed(3);
    let mut engine = ShowEngine::new(cfg).unwrap();
    engine.request_formation(Formation::Moon, 10_000.0);
    let before = engine.positions().to_vec();
    engine.tick(10_000.0);

    let n = engine.len();
    let mut held = 0;
    for i in 0..n {
        if engine.particles().trigger_delays_ms()[i] > 0 {
            assert_eq!(engine.positions()[i], before[i], "particle {i} left early");
            assert_eq!(engine.motion_state(i, 10_000.0), MotionState::Waiting);
            held += 1;
        }
    }
    assert!(held > 150, "expected most particles to be delayed, got {held}");

    // every delay is under one second, so after it all are released
    engine.tick(11_000.0);
    let moved = (0..n)
        .filter(|&i| engine.positions()[i] != before[i])
        .count();
    assert_eq!(moved, n);
}

#[test]
fn ticks_at_rest_leave_positions_alone() {
    let mut engine = make_engine(64);
    engine.request_formation(Formation::Rocket, 0.0);
    let last = run_until_settled(&mut engine, 0.0, 20_000);
    let settled = engine.positions().to_vec();
    for k in 1..120 {
        engine.tick(last + k as f64 * FRAME_MS);
    }
    assert_eq!(engine.positions(), settled.as_slice());
    assert!((0..64).all(|i| engine.motion_state(i, last) == MotionState::Arrived));
}

#[test]
fn later_request_replaces_earlier_targets() {
    let mut engine = make_engine(500);
    engine.request_formation_by_name("heart", 1_000.0).unwrap();
    engine.request_formation_by_name("moon", 1_000.0).unwrap();
    let n = engine.len();
    for (i, t) in engine.particles().targets().iter().enumerate() {
        assert_eq!(*t, Formation::Moon.point(i, n, 1_000.0).position, "particle {i}");
    }
    assert_eq!(engine.formation(), Some(Formation::Moon));
}

#[test]
fn switch_mid_flight_restarts_from_current_position() {
    let mut engine = make_engine(50);
    engine.request_formation(Formation::Takeoff, 0.0);
    for k in 0..30 {
        engine.tick(k as f64 * FRAME_MS);
    }
    let mid = engine.positions().to_vec();
    engine.request_formation(Formation::Landing, 500.0);
    assert_eq!(engine.positions(), mid.as_slice());
    assert!((0..50).all(|i| engine.is_flying(i)));
}

#[test]
fn unknown_formation_leaves_engine_untouched() {
    let mut engine = make_engine(32);
    engine.request_formation(Formation::Flower, 0.0);
    engine.take_cues();
    let targets = engine.particles().targets().to_vec();
    let speeds = engine.particles().speeds().to_vec();

    let err = engine.request_formation_by_name("zeppelin", 5.0).unwrap_err();
    assert_eq!(err, ShowError::UnknownFormation("zeppelin".into()));
    assert_eq!(engine.particles().targets(), targets.as_slice());
    assert_eq!(engine.particles().speeds(), speeds.as_slice());
    assert_eq!(engine.formation(), Some(Formation::Flower));
    assert_eq!(engine.switch_count(), 1);
    assert!(engine.take_cues().is_empty());
}

#[test]
fn flicker_stays_within_bounds_and_can_be_disabled() {
    let mut engine = make_engine(400);
    engine.request_formation(Formation::Nezha, 0.0);
    for k in 0..200 {
        let now = 1_700_000_000_000.0 + k as f64 * FRAME_MS;
        engine.tick(now);
        let store = engine.particles();
        for (i, (c, b)) in store.display_colors().iter().zip(store.base_colors()).enumerate() {
            let lo = *b * (FLICKER_MIN - 1e-5);
            let hi = *b * (FLICKER_MAX + 1e-5);
            assert!(c.cmpge(lo).all() && c.cmple(hi).all(), "particle {i}: {c:?}");
            assert!(c.min_element() >= 0.0);
        }
    }

    assert!(!engine.toggle_flicker());
    engine.tick(1_800_000_000_000.0);
    let store = engine.particles();
    assert_eq!(store.display_colors(), store.base_colors());
}

#[test]
fn display_color_is_recomputed_from_base_each_tick() {
    let mut engine = make_engine(8);
    engine.request_formation(Formation::Heart, 0.0);
    for k in 0..50 {
        engine.tick(k as f64 * FRAME_MS);
    }
    let now = 50.0 * FRAME_MS;
    engine.tick(now);
    for i in 0..8 {
        let expected = engine.particles().base_colors()[i] * flicker_factor(now, i);
        assert!(engine.display_colors()[i].abs_diff_eq(expected, 1e-6));
    }
}

#[test]
fn global_speed_scales_every_particle() {
    let mut frozen = make_engine(40);
    frozen.set_global_speed_factor(0.0);
    frozen.request_formation(Formation::Spaceship, 0.0);
    let start = frozen.positions().to_vec();
    for k in 0..60 {
        frozen.tick(k as f64 * FRAME_MS);
    }
    assert_eq!(frozen.positions(), start.as_slice());
    assert!(!frozen.is_settled());

    let mut slow = make_engine(40);
    let mut fast = make_engine(40);
    fast.set_global_speed_factor(3.0);
    slow.request_formation(Formation::Spaceship, 0.0);
    fast.request_formation(Formation::Spaceship, 0.0);
    let slow_done = run_until_settled(&mut slow, 0.0, 40_000);
    let fast_done = run_until_settled(&mut fast, 0.0, 40_000);
    assert!(fast_done < slow_done);
}

#[test]
fn same_seed_same_show() {
    let mut a = make_engine(100);
    let mut b = make_engine(100);
    for e in [&mut a, &mut b] {
        e.request_formation(Formation::Phoenix, 0.0);
        for k in 0..90 {
            e.tick(k as f64 * FRAME_MS);
        }
    }
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.display_colors_flat(), b.display_colors_flat());
}

#[test]
fn grounded_flag_follows_formation() {
    let mut engine = make_engine(20);
    assert!((0..20).all(|i| engine.is_grounded(i)));
    engine.request_formation(Formation::Takeoff, 0.0);
    assert!((0..20).all(|i| !engine.is_grounded(i)));
    engine.request_formation(Formation::Landing, 0.0);
    assert!((0..20).all(|i| engine.is_grounded(i)));
    assert_eq!(engine.stats(0.0).grounded, 20);
}

#[test]
fn each_request_queues_one_cue() {
    let mut engine = make_engine(10);
    for f in Formation::ALL {
        engine.request_formation(f, 0.0);
        let cues = engine.take_cues();
        assert_eq!(cues.as_slice(), &[f.cue()]);
    }
    assert_eq!(AudioCue::Landing.name(), "landing");
}

#[test]
fn frame_rate_independent_easing_matches_at_sixty_hz() {
    let cfg = |easing| {
        EngineConfig::default()
            .with_particle_count(100)
            .with_seed(9)
            .without_trigger_delay()
            .with_easing(easing)
    };
    let mut per_frame = ShowEngine::new(cfg(EasingMode::PerFrame)).unwrap();
    let mut timed = ShowEngine::new(cfg(EasingMode::FrameRateIndependent)).unwrap();
    let mut timed_30 = ShowEngine::new(cfg(EasingMode::FrameRateIndependent)).unwrap();
    for e in [&mut per_frame, &mut timed, &mut timed_30] {
        e.request_formation(Formation::Flower, 0.0);
    }
    for k in 0..120 {
        per_frame.tick(k as f64 * FRAME_MS);
        timed.tick(k as f64 * FRAME_MS);
    }
    for k in 0..60 {
        timed_30.tick(k as f64 * 2.0 * FRAME_MS);
    }
    // 60 Hz per-frame and time-scaled runs agree; 30 Hz time-scaled lags by
    // exactly one 60 Hz frame at the end, so compare it loosely.
    for i in 0..100 {
        let a = per_frame.positions()[i];
        assert!(a.abs_diff_eq(timed.positions()[i], 0.05), "particle {i}");
        let gap = (per_frame.particles().targets()[i] - timed_30.positions()[i]).length();
        let ref_gap = (per_frame.particles().targets()[i] - a).length();
        assert!(gap >= ref_gap - 0.05 && gap <= ref_gap * 1.1 + 0.05, "particle {i}");
    }
}

fn timed_engine(count: usize, global: f32) -> ShowEngine {
    let cfg = EngineConfig::default()
        .with_particle_count(count)
        .with_seed(11)
        .without_trigger_delay()
        .with_global_speed(global)
        .with_easing(EasingMode::FrameRateIndependent);
    ShowEngine::new(cfg).unwrap()
}

#[test]
fn repeated_or_backward_timestamp_does_not_move_anything() {
    let mut engine = timed_engine(50, 100.0);
    engine.request_formation(Formation::Takeoff, 0.0);
    engine.tick(0.0);

    engine.request_formation(Formation::Landing, 0.0);
    let before = engine.positions().to_vec();
    engine.tick(0.0);
    assert_eq!(engine.positions(), before.as_slice());
    engine.tick(-100.0);
    assert_eq!(engine.positions(), before.as_slice());
    assert!((0..50).all(|i| engine.is_flying(i)));
}

#[test]
fn long_gap_is_capped_at_fifteen_frames() {
    let mut gap_1s = timed_engine(60, 1.0);
    let mut gap_250ms = timed_engine(60, 1.0);
    for e in [&mut gap_1s, &mut gap_250ms] {
        e.request_formation(Formation::Flower, 0.0);
        e.tick(0.0);
    }
    let before = gap_1s.positions().to_vec();
    gap_1s.tick(1_000.0);
    gap_250ms.tick(250.0);
    assert_eq!(gap_1s.positions(), gap_250ms.positions());

    let store = gap_1s.particles();
    for i in 0..60 {
        let k = store.speeds()[i];
        let fraction = 1.0 - (1.0 - k).powf(15.0);
        let expected = before[i] + (store.targets()[i] - before[i]) * fraction;
        assert!(store.positions()[i].abs_diff_eq(expected, 1e-3), "particle {i}");
    }
}

#[test]
fn first_tick_counts_as_one_reference_frame() {
    let mut per_frame = timed_engine(40, 1.0);
    per_frame.set_easing(EasingMode::PerFrame);
    let mut timed = timed_engine(40, 1.0);
    for e in [&mut per_frame, &mut timed] {
        e.request_formation(Formation::Heart, 0.0);
        // long after the request, but nothing has ticked yet
        e.tick(5_000.0);
    }
    for i in 0..40 {
        assert!(
            per_frame.positions()[i].abs_diff_eq(timed.positions()[i], 1e-3),
            "particle {i}"
        );
    }
}

#[test]
fn invalid_config_is_rejected() {
    let err = ShowEngine::new(EngineConfig::default().with_particle_count(0));
    assert!(matches!(err, Err(ShowError::InvalidConfig(_))));
}

#[test]
fn flat_buffers_cover_every_particle() {
    let engine = make_engine(123);
    assert_eq!(engine.positions_flat().len(), 123 * 3);
    assert_eq!(engine.display_colors_flat().len(), 123 * 3);
}
