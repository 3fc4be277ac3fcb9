// Scroll state and the eased scroll driver.

use super::constants::{
    SCROLL_HINT_THRESHOLD, SCROLL_LERP, SCROLL_SNAP_EPSILON, WHEEL_LINE_HEIGHT_PX,
};
use std::cell::Cell;

/// Current eased scroll offset, written by the smooth-scroll driver and polled
/// by the render loop.
#[derive(Debug, Default)]
pub struct ScrollStore {
    position: Cell<f64>,
}

impl ScrollStore {
    pub fn new(position: f64) -> Self {
        Self {
            position: Cell::new(position),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.position.get()
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.position.set(value);
    }
}

/// One step of exponential smoothing toward `target`.
#[inline]
pub fn ease(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Whether the scroll hint should be visible at `offset`.
#[inline]
pub fn hint_visible(offset: f64) -> bool {
    offset <= SCROLL_HINT_THRESHOLD
}

// WheelEvent.deltaMode values
pub const DELTA_PIXEL: u32 = 0;
pub const DELTA_LINE: u32 = 1;
pub const DELTA_PAGE: u32 = 2;

/// Wheel delta in CSS pixels regardless of the event's delta mode.
pub fn normalize_wheel_delta(delta: f64, mode: u32, page_height: f64) -> f64 {
    match mode {
        DELTA_LINE => delta * WHEEL_LINE_HEIGHT_PX,
        DELTA_PAGE => delta * page_height,
        _ => delta,
    }
}

/// Pixel delta the smooth scroller should take over, or `None` when the wheel
/// event belongs to the browser (ctrl+wheel zoom and trackpad pinch).
pub fn smooth_wheel_delta(delta: f64, mode: u32, page_height: f64, ctrl_key: bool) -> Option<f64> {
    if ctrl_key {
        return None;
    }
    Some(normalize_wheel_delta(delta, mode, page_height))
}

/// Converts bursty wheel input into a continuously eased offset.
///
/// `scroll_by` moves the target; `tick` is called once per animation frame and
/// moves the current offset a fixed fraction of the remaining distance.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    target: f64,
    current: f64,
    limit: f64,
    lerp: f64,
    animating: bool,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(SCROLL_LERP)
    }
}

impl SmoothScroll {
    pub fn new(lerp: f64) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            limit: f64::MAX,
            lerp: lerp.clamp(0.0, 1.0),
            animating: false,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Maximum scrollable offset; negative limits are treated as zero.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
        self.animating = self.target != self.current;
    }

    /// Adopt a scroll offset produced outside the driver (scrollbar, keys, touch).
    /// Ignored while an eased scroll is in flight, since the driver itself moves
    /// the page then.
    pub fn sync(&mut self, native: f64) {
        if self.animating || !native.is_finite() {
            return;
        }
        let v = native.clamp(0.0, self.limit);
        self.target = v;
        self.current = v;
    }

    /// Advance one animation frame and return the eased offset.
    pub fn tick(&mut self) -> f64 {
        if self.animating {
            self.current = ease(self.current, self.target, self.lerp);
            if (self.target - self.current).abs() < SCROLL_SNAP_EPSILON {
                self.current = self.target;
                self.animating = false;
            }
        }
        self.current
    }
}
