// Host-side tests for the scroll store and the eased scroll driver.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scene_core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use scene_core::constants::*;
use scene_core::scroll::*;

fn driver_with_limit(limit: f64) -> SmoothScroll {
    let mut d = SmoothScroll::default();
    d.set_limit(limit);
    d
}

#[test]
fn store_round_trips_the_offset() {
    let store = ScrollStore::default();
    assert_eq!(store.get(), 0.0);
    store.set(412.5);
    assert_eq!(store.get(), 412.5);
    assert_eq!(ScrollStore::new(7.0).get(), 7.0);
}

#[test]
fn first_tick_moves_three_percent_of_the_gap() {
    let mut d = driver_with_limit(5000.0);
    d.scroll_by(1000.0);
    let first = d.tick();
    assert!((first - 30.0).abs() < 1e-9);
    let second = d.tick();
    assert!((second - (30.0 + 970.0 * 0.03)).abs() < 1e-9);
}

#[test]
fn easing_is_monotone_and_never_overshoots() {
    let mut d = driver_with_limit(5000.0);
    d.scroll_by(1000.0);
    let mut prev = d.current();
    let mut ticks = 0;
    while d.is_animating() {
        let now = d.tick();
        assert!(now >= prev, "offset went backwards: {now} < {prev}");
        assert!(now <= 1000.0, "overshoot: {now}");
        prev = now;
        ticks += 1;
        assert!(ticks < 10_000, "never settled");
    }
    assert_eq!(d.current(), 1000.0);
    assert!(ticks > 100, "settled too fast: {ticks} ticks");
}

#[test]
fn tick_without_input_is_stable() {
    let mut d = driver_with_limit(5000.0);
    assert!(!d.is_animating());
    assert_eq!(d.tick(), 0.0);
    assert_eq!(d.tick(), 0.0);
}

#[test]
fn scroll_target_is_clamped_to_page() {
    let mut d = driver_with_limit(300.0);
    d.scroll_by(1000.0);
    assert_eq!(d.target(), 300.0);
    d.scroll_by(-5000.0);
    assert_eq!(d.target(), 0.0);
}

#[test]
fn non_finite_deltas_are_ignored() {
    let mut d = driver_with_limit(300.0);
    d.scroll_by(f64::NAN);
    d.scroll_by(f64::INFINITY);
    assert_eq!(d.target(), 0.0);
    assert!(!d.is_animating());
}

#[test]
fn shrinking_limit_reclamps_offsets() {
    let mut d = driver_with_limit(2000.0);
    d.scroll_by(1500.0);
    for _ in 0..400 {
        d.tick();
    }
    assert_eq!(d.current(), 1500.0);
    d.set_limit(800.0);
    assert_eq!(d.current(), 800.0);
    assert_eq!(d.target(), 800.0);
    d.set_limit(-10.0);
    assert_eq!(d.current(), 0.0);
}

#[test]
fn native_scroll_syncs_only_when_idle() {
    let mut d = driver_with_limit(5000.0);
    d.sync(640.0);
    assert_eq!(d.current(), 640.0);
    assert_eq!(d.target(), 640.0);

    d.scroll_by(100.0);
    d.sync(10.0);
    assert_eq!(d.target(), 740.0);
    assert!(d.current() > 640.0);
}

#[test]
fn hint_visibility_threshold() {
    assert!(hint_visible(0.0));
    assert!(hint_visible(SCROLL_HINT_THRESHOLD));
    assert!(!hint_visible(SCROLL_HINT_THRESHOLD + 0.5));
    assert!(!hint_visible(2500.0));
}

#[test]
fn wheel_deltas_are_normalised_to_pixels() {
    assert_eq!(normalize_wheel_delta(53.0, DELTA_PIXEL, 900.0), 53.0);
    assert_eq!(normalize_wheel_delta(3.0, DELTA_LINE, 900.0), 3.0 * WHEEL_LINE_HEIGHT_PX);
    assert_eq!(normalize_wheel_delta(-1.0, DELTA_PAGE, 900.0), -900.0);
}

#[test]
fn ctrl_wheel_is_left_to_the_browser() {
    assert_eq!(smooth_wheel_delta(120.0, DELTA_PIXEL, 900.0, true), None);
    assert_eq!(smooth_wheel_delta(-2.0, DELTA_LINE, 900.0, true), None);
    assert_eq!(smooth_wheel_delta(120.0, DELTA_PIXEL, 900.0, false), Some(120.0));
    assert_eq!(
        smooth_wheel_delta(2.0, DELTA_LINE, 900.0, false),
        Some(2.0 * WHEEL_LINE_HEIGHT_PX)
    );
}

#[test]
fn ease_steps_toward_target() {
    assert_eq!(ease(0.0, 10.0, 0.5), 5.0);
    assert_eq!(ease(10.0, 10.0, 0.5), 10.0);
    assert_eq!(ease(4.0, 0.0, 0.25), 3.0);
}
