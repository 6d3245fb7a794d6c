//! Geometry primitives used across trellis.
//!
//! Everything lives in signed integer pixel coordinates: canvas offsets and
//! gesture displacements can both be negative, so points carry `i32`
//! components throughout. Sizes are also `i32` but are clamped to zero at
//! construction, so a well-formed `Rect` or `Expanse` never has a negative
//! extent.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;

/// Cardinal directions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    /// Upward direction.
    Up,
    /// Downward direction.
    Down,
    /// Leftward direction.
    Left,
    /// Rightward direction.
    Right,
}
