//! Touch identity, swipe classification, and clock abstraction.
//!
//! The event router tracks one state machine per touch identity: a press
//! records the target view, press point, and press time, and the matching
//! release resolves into release/cancel semantics plus an optional swipe.
//! Swipe timing compares caller-visible monotonic timestamps supplied by a
//! [`Clock`], so tests can drive gesture windows without sleeping.

use std::time::{Duration, Instant};

use geom::{Direction, Point};

/// Maximum press-to-release duration for a swipe, in milliseconds.
/// A gesture taking exactly this long still qualifies.
pub const SWIPE_MAX_MS: u64 = 300;

/// Minimum displacement along the dominant axis for a swipe, in pixels.
/// A displacement of exactly this much still qualifies.
pub const SWIPE_MIN_DIST: i32 = 50;

/// Identity of a concurrent touch, as reported by the host input source.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TouchId(pub u64);

impl TouchId {
    /// Reserved identity used to route the left mouse button through the
    /// touch press/release machinery.
    pub const MOUSE: Self = Self(u64::MAX);
}

impl From<u64> for TouchId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A monotonic time source for gesture windows.
///
/// Only differences between `now` values are ever used, so the epoch is
/// arbitrary as long as it is fixed for the life of the clock.
pub trait Clock {
    /// The current monotonic time.
    fn now(&self) -> Duration;
}

/// The default clock, anchored to a `std::time::Instant` at construction.
#[derive(Debug)]
pub struct MonotonicClock {
    /// Anchor for the monotonic epoch.
    start: Instant,
}

impl MonotonicClock {
    /// Construct a clock anchored at the current instant.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Per-identity press state held between a press and its release.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TouchState {
    /// The view resolved at press time.
    pub(crate) target: crate::ViewId,
    /// Press coordinates.
    pub(crate) start: Point,
    /// Press timestamp from the tree's clock.
    pub(crate) pressed_at: Duration,
}

/// Classify a press-to-release displacement as a swipe.
///
/// A swipe fires iff the elapsed time is at most [`SWIPE_MAX_MS`] and the
/// displacement along the dominant axis is at least [`SWIPE_MIN_DIST`].
/// Horizontal wins a dominance tie. The direction follows the displacement
/// sign.
pub(crate) fn classify_swipe(delta: Point, elapsed: Duration) -> Option<Direction> {
    if elapsed > Duration::from_millis(SWIPE_MAX_MS) {
        return None;
    }
    if delta.x.abs() >= delta.y.abs() {
        if delta.x.abs() < SWIPE_MIN_DIST {
            None
        } else if delta.x < 0 {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    } else if delta.y.abs() < SWIPE_MIN_DIST {
        None
    } else if delta.y < 0 {
        Some(Direction::Up)
    } else {
        Some(Direction::Down)
    }
}
