// Host-side tests for frame timing and the integration scale factor.

use std::time::Duration;

use lorenz_core::{FrameClock, SimConfig};

fn clock() -> FrameClock {
    FrameClock::new(SimConfig::default().frame_budget())
}

#[test]
fn new_clock_assumes_one_budget_per_frame() {
    let clock = clock();
    assert_eq!(clock.budget(), Duration::from_millis(16));
    assert_eq!(clock.last_frame(), Duration::from_millis(16));
    assert!((clock.scale_factor() - 1.6).abs() < 1e-12);
}

#[test]
fn budget_follows_configured_rate() {
    let config = SimConfig {
        target_fps: 30.0,
        ..SimConfig::default()
    };
    let clock = FrameClock::new(config.frame_budget());
    assert_eq!(clock.budget(), Duration::from_millis(33));
    assert!((clock.scale_factor() - 3.3).abs() < 1e-12);
}

#[test]
fn scale_factor_is_milliseconds_over_ten() {
    let mut clock = clock();
    clock.record(Duration::from_millis(33));
    assert!((clock.scale_factor() - 3.3).abs() < 1e-12);
    clock.record(Duration::from_millis(999));
    assert!((clock.scale_factor() - 99.9).abs() < 1e-9);
}

#[test]
fn stalled_frames_pause_simulation() {
    let mut clock = clock();
    clock.record(Duration::from_secs(1));
    assert_eq!(clock.scale_factor(), 0.0);
    clock.record(Duration::from_secs(7));
    assert_eq!(clock.scale_factor(), 0.0);
}

#[test]
fn budget_and_deadline_need_a_started_frame() {
    let mut clock = clock();
    assert_eq!(clock.remaining_budget(), Duration::ZERO);
    assert!(clock.deadline().is_none());

    clock.begin_frame();
    assert!(clock.remaining_budget() <= clock.budget());
    assert!(clock.deadline().is_some());
}

#[test]
fn begin_frame_measures_time_between_starts() {
    let mut clock = clock();
    // first call only records the start
    assert_eq!(clock.begin_frame(), Duration::from_millis(16));
    std::thread::sleep(Duration::from_millis(5));
    let elapsed = clock.begin_frame();
    assert!(elapsed >= Duration::from_millis(5));
    assert_eq!(clock.last_frame(), elapsed);
}

#[test]
fn skips_are_consumed_one_per_frame() {
    let mut clock = clock();
    assert!(!clock.take_skip());
    clock.skip_frames(2);
    clock.skip_frames(1);
    assert_eq!(clock.pending_skips(), 2);
    assert!(clock.take_skip());
    assert!(clock.take_skip());
    assert!(!clock.take_skip());
    assert_eq!(clock.pending_skips(), 0);
}
