//! Optional per-view callbacks.
//!
//! A [`Handler`] is the behavior attached to a view. Every callback is
//! optional: the handler advertises the capabilities it implements once,
//! through [`Handler::capabilities`], and the descriptor is captured when
//! the handler is attached to the tree. Dispatch consults the stored
//! descriptor, so the per-frame hot path never probes the trait object.

use geom::{Direction, Rect};

use crate::event::TouchId;

/// The set of callbacks a handler implements.
///
/// Capabilities are resolved once at attach time. A view whose handler does
/// not advertise a capability is invisible to the corresponding dispatch:
/// for example, hit testing for a press only considers press-capable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Receives a per-frame update notification.
    pub update: bool,
    /// Draws itself given the surface and its resolved frame.
    pub draw: bool,
    /// Receives press and release/cancel callbacks.
    pub press: bool,
    /// Receives mouse hover movement.
    pub mouse: bool,
    /// Receives swipe gestures.
    pub swipe: bool,
}

impl Capabilities {
    /// No capabilities.
    pub const fn none() -> Self {
        Self {
            update: false,
            draw: false,
            press: false,
            mouse: false,
            swipe: false,
        }
    }

    /// Every capability.
    pub const fn all() -> Self {
        Self {
            update: true,
            draw: true,
            press: true,
            mouse: true,
            swipe: true,
        }
    }

    /// Enable the update capability.
    pub const fn with_update(mut self) -> Self {
        self.update = true;
        self
    }

    /// Enable the draw capability.
    pub const fn with_draw(mut self) -> Self {
        self.draw = true;
        self
    }

    /// Enable the press/release capability.
    pub const fn with_press(mut self) -> Self {
        self.press = true;
        self
    }

    /// Enable the mouse hover capability.
    pub const fn with_mouse(mut self) -> Self {
        self.mouse = true;
        self
    }

    /// Enable the swipe capability.
    pub const fn with_swipe(mut self) -> Self {
        self.swipe = true;
        self
    }
}

/// Behavior attached to a view, generic over the host's draw surface `S`.
///
/// All callback defaults are empty, so implementations only override the
/// callbacks they advertise. The library guarantees that a callback is only
/// invoked when the corresponding [`Capabilities`] flag was set at attach
/// time.
pub trait Handler<S: ?Sized = ()> {
    /// The capability set this handler implements. Read once at attach time.
    fn capabilities(&self) -> Capabilities;

    /// Called once per [`crate::Trellis::update`], after layout.
    fn on_update(&mut self) {}

    /// Called once per [`crate::Trellis::draw`] with the host surface and
    /// this view's resolved frame.
    fn on_draw(&mut self, _surface: &mut S, _frame: Rect) {}

    /// A tracked press began inside this view's frame.
    fn on_press(&mut self, _x: i32, _y: i32, _touch: TouchId) {}

    /// The press tracked to this view was released. `cancelled` is true when
    /// the release coordinates fell outside this view's frame.
    fn on_release(&mut self, _x: i32, _y: i32, _cancelled: bool) {}

    /// The pointer hovered over this view. Return true to consume the event;
    /// returning false lets hit testing continue to the next candidate in
    /// deepest-first order.
    fn on_mouse(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    /// A swipe gesture completed on this view.
    fn on_swipe(&mut self, _dir: Direction) {}
}
