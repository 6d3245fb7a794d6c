//! Trellis: a flexbox-style view tree for canvas hosts.
//!
//! Trellis positions a tree of rectangular views inside a fixed-size canvas
//! owned by a host rendering loop, and routes raw pointer and touch samples
//! to the views under them. The host calls [`Trellis::update`] once per
//! frame to resolve every view's absolute pixel frame, [`Trellis::draw`] to
//! invoke per-view draw callbacks with those frames, and the input methods
//! ([`Trellis::press`], [`Trellis::release`], [`Trellis::mouse_move`]) to
//! dispatch press/release/cancel, hover, and swipe semantics against the
//! same frames.
//!
//! # Quick start
//!
//! ```
//! use trellis::{Align, FlexDirection, Justify, Trellis, View};
//!
//! let mut t: Trellis = Trellis::new(
//!     View::new()
//!         .size(300, 500)
//!         .direction(FlexDirection::Column)
//!         .justify(Justify::Center)
//!         .align_items(Align::Center),
//! );
//! let child = t.add_child(t.root(), View::new().size(100, 200)).unwrap();
//! t.update();
//! assert_eq!(t.frame(child).unwrap().tl.x, 100);
//! ```
//!
//! # Module organization
//!
//! - [`geom`] - geometry primitives (re-exported)
//! - [`view`] - the per-view configuration bag and layout enums
//! - [`handler`] - optional per-view callback capabilities
//! - [`event`] - touch identities, swipe classification, and clocks
//! - [`registry`] - caller-owned tag-to-view factories for external builders
//! - [`tutils`] - reusable test handlers and a manual clock

/// The tree arena and per-frame driver.
mod core;
/// Error types for tree operations.
pub mod error;
/// Touch identity, swipe, and clock types.
pub mod event;
/// Handler trait and capability descriptors.
pub mod handler;
/// The box layout solver.
mod layout;
/// Tag-to-factory registry for external tree builders.
pub mod registry;
/// Test utilities.
pub mod tutils;
/// View configuration.
pub mod view;

pub use crate::core::{Trellis, ViewId};
pub use error::{Error, Result};
pub use event::{Clock, MonotonicClock, TouchId};
pub use geom;
pub use geom::{Direction, Expanse, Point, Rect};
pub use handler::{Capabilities, Handler};
pub use registry::Registry;
pub use view::{Align, FlexDirection, Justify, Position, View, Wrap};
