use super::{Expanse, Point};

/// A rectangle in signed pixel coordinates: a top-left corner plus a
/// non-negative size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size. Negative sizes are
    /// clamped to zero.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            tl: Point { x, y },
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// The bottom-right corner, `tl + (w, h)`.
    pub fn max(&self) -> Point {
        Point {
            x: self.tl.x + self.w,
            y: self.tl.y + self.h,
        }
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse {
            w: self.w,
            h: self.h,
        }
    }

    /// Does this rectangle contain the point? Containment is inclusive on
    /// all four edges, so both `tl` and `max()` are inside.
    pub fn contains_point(&self, p: Point) -> bool {
        let max = self.max();
        p.x >= self.tl.x && p.x <= max.x && p.y >= self.tl.y && p.y <= max.y
    }

    /// Does this rectangle completely enclose the other?
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.contains_point(other.tl) && self.contains_point(other.max())
    }

    /// Translate the rectangle by an offset.
    pub fn shift(&self, x: i32, y: i32) -> Self {
        Self {
            tl: Point {
                x: self.tl.x + x,
                y: self.tl.y + y,
            },
            w: self.w,
            h: self.h,
        }
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}
