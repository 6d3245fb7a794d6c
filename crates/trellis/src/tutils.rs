//! Test utilities: a recording handler and a manual clock.
//!
//! [`Recorder`] implements every capability and records what it saw into a
//! shared [`Record`] cell, so tests keep a handle to the record after the
//! recorder itself moves into the tree. [`ManualClock`] is a [`Clock`]
//! whose time only moves when the test advances it, making gesture windows
//! deterministic without sleeping.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use geom::{Direction, Point, Rect};

use crate::{
    event::{Clock, TouchId},
    handler::{Capabilities, Handler},
};

/// Everything a [`Recorder`] observed since the last reset.
#[derive(Debug, Default)]
pub struct Record {
    /// `on_update` fired.
    pub updated: bool,
    /// `on_draw` fired.
    pub drawn: bool,
    /// The frame passed to the most recent `on_draw`.
    pub frame: Option<Rect>,
    /// `on_press` fired.
    pub pressed: bool,
    /// The point and identity of the most recent press.
    pub press: Option<(Point, TouchId)>,
    /// `on_release` fired.
    pub released: bool,
    /// The cancel flag of the most recent release.
    pub cancelled: bool,
    /// `on_mouse` fired.
    pub moved: bool,
    /// The point of the most recent mouse move.
    pub mouse: Option<Point>,
    /// The direction of the most recent swipe, if any fired.
    pub swiped: Option<Direction>,
    /// What `on_mouse` returns; defaults to consuming.
    pub consume_mouse: bool,
}

impl Record {
    /// Clear observations, keeping the configured `consume_mouse`.
    pub fn reset(&mut self) {
        let consume = self.consume_mouse;
        *self = Self {
            consume_mouse: consume,
            ..Self::default()
        };
    }
}

/// A handler that records every callback into a shared [`Record`].
pub struct Recorder {
    /// Shared observation state.
    record: Rc<RefCell<Record>>,
    /// Advertised capability set.
    caps: Capabilities,
}

impl Recorder {
    /// A recorder advertising every capability, plus a handle to its
    /// record.
    pub fn new() -> (Self, Rc<RefCell<Record>>) {
        Self::with_caps(Capabilities::all())
    }

    /// A recorder advertising only the given capabilities.
    pub fn with_caps(caps: Capabilities) -> (Self, Rc<RefCell<Record>>) {
        let record = Rc::new(RefCell::new(Record {
            consume_mouse: true,
            ..Record::default()
        }));
        (
            Self {
                record: Rc::clone(&record),
                caps,
            },
            record,
        )
    }
}

impl<S: ?Sized> Handler<S> for Recorder {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn on_update(&mut self) {
        self.record.borrow_mut().updated = true;
    }

    fn on_draw(&mut self, _surface: &mut S, frame: Rect) {
        let mut r = self.record.borrow_mut();
        r.drawn = true;
        r.frame = Some(frame);
    }

    fn on_press(&mut self, x: i32, y: i32, touch: TouchId) {
        let mut r = self.record.borrow_mut();
        r.pressed = true;
        r.press = Some((Point::new(x, y), touch));
    }

    fn on_release(&mut self, _x: i32, _y: i32, cancelled: bool) {
        let mut r = self.record.borrow_mut();
        r.released = true;
        r.cancelled = cancelled;
    }

    fn on_mouse(&mut self, x: i32, y: i32) -> bool {
        let mut r = self.record.borrow_mut();
        r.moved = true;
        r.mouse = Some(Point::new(x, y));
        r.consume_mouse
    }

    fn on_swipe(&mut self, dir: Direction) {
        self.record.borrow_mut().swiped = Some(dir);
    }
}

/// A [`Clock`] driven explicitly by the test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    /// Current time in milliseconds.
    millis: Rc<Cell<u64>>,
}

impl ManualClock {
    /// A clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time by `millis` milliseconds.
    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get() + millis);
    }

    /// Set the absolute time in milliseconds.
    pub fn set(&self, millis: u64) {
        self.millis.set(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.get())
    }
}
