use super::{Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// This is useful when we want to deal with `Rect`s abstractly, or when we
/// want to mandate that the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Expanse {
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Default for Expanse {
    /// Constructs a zero-valued size.
    fn default() -> Self {
        Self { w: 0, h: 0 }
    }
}

impl Expanse {
    /// Construct a size, clamping negative dimensions to zero.
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// The area of this expanse.
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a
    /// location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::default(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this size can completely enclose the target size in both
    /// dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(i32, i32)> for Expanse {
    fn from(v: (i32, i32)) -> Self {
        Self::new(v.0, v.1)
    }
}
