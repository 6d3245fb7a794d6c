//! The per-view configuration bag and layout enums.
//!
//! A [`View`] holds the box-model and layout-mode inputs for one rectangular
//! region. It is a plain bag of values: construction is cheap, all fields
//! are public, and the chainable setters exist purely for ergonomic tree
//! building. Resolved geometry is written by the layout pass onto the tree
//! node, never onto the `View` itself.

/// How a view is positioned relative to its parent.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Position {
    /// Participates in the parent's main/cross-axis flow.
    #[default]
    Relative,
    /// Placed by explicit offset from the parent's content origin, ignoring
    /// sibling flow and contributing nothing to it.
    Absolute,
}

/// The main axis along which a view lays out its flow children.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum FlexDirection {
    /// Horizontal main axis.
    #[default]
    Row,
    /// Vertical main axis.
    Column,
}

/// Whether flow children may break into multiple lines.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Wrap {
    /// All children on a single line.
    #[default]
    NoWrap,
    /// Start a new line when the next child would overflow the main axis.
    Wrap,
}

/// Distribution of flow children along the main axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Justify {
    /// Pack children from the line start.
    #[default]
    Start,
    /// Center the line.
    Center,
    /// Pack children to the line end.
    End,
    /// Equal gaps between items only; no gap at the ends.
    SpaceBetween,
    /// Equal gaps around items; half-gaps at the ends.
    SpaceAround,
    /// Equal gaps between items and at both ends.
    SpaceEvenly,
}

/// Cross-axis placement, used both per-child (`align_items`) and per-line
/// (`align_content`).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Align {
    /// Pack to the cross-axis start.
    #[default]
    Start,
    /// Center on the cross axis.
    Center,
    /// Pack to the cross-axis end.
    End,
    /// Expand to fill available cross space.
    Stretch,
}

/// Box-model and layout-mode inputs for one view.
///
/// A width or height of zero (or negative, which is clamped) means "unset":
/// the view occupies zero main-axis space until grown, and stretches on the
/// cross axis under [`Align::Stretch`]. `left`/`top` only apply under
/// [`Position::Absolute`]. `grow` and `shrink` default to zero, meaning the
/// view neither takes leftover space nor gives up space on overflow.
#[derive(Debug, Clone, Default)]
pub struct View {
    /// Stable lookup ID; unique within a tree or absent.
    pub id: Option<String>,
    /// Tag name used by external builders; opaque to the core.
    pub tag: Option<String>,
    /// Horizontal offset from the parent content origin (absolute only).
    pub left: i32,
    /// Vertical offset from the parent content origin (absolute only).
    pub top: i32,
    /// Explicit width; zero or negative means unset.
    pub width: i32,
    /// Explicit height; zero or negative means unset.
    pub height: i32,
    /// Left margin.
    pub margin_left: i32,
    /// Top margin.
    pub margin_top: i32,
    /// Right margin.
    pub margin_right: i32,
    /// Bottom margin.
    pub margin_bottom: i32,
    /// Share of leftover main-axis space this view receives.
    pub grow: f64,
    /// Share of main-axis overflow this view gives up.
    pub shrink: f64,
    /// Flow or absolute positioning.
    pub position: Position,
    /// Main axis for this view's own children.
    pub direction: FlexDirection,
    /// Line-breaking behavior for this view's own children.
    pub wrap: Wrap,
    /// Main-axis distribution for this view's own children.
    pub justify: Justify,
    /// Cross-axis placement applied to each flow child.
    pub align_items: Align,
    /// Cross-axis packing of lines when wrapping produces more than one.
    pub align_content: Align,
    /// Excluded from layout and dispatch, but remains in the tree.
    pub hidden: bool,
}

impl View {
    /// Construct a view with all inputs unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stable lookup ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the builder tag name.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the explicit size.
    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the absolute offset from the parent content origin.
    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Set all four margins at once.
    pub fn margin(mut self, m: i32) -> Self {
        self.margin_left = m;
        self.margin_top = m;
        self.margin_right = m;
        self.margin_bottom = m;
        self
    }

    /// Set the margins individually: left, top, right, bottom.
    pub fn margins(mut self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        self.margin_left = left;
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self
    }

    /// Set the grow weight.
    pub fn grow(mut self, grow: f64) -> Self {
        self.grow = grow;
        self
    }

    /// Set the shrink weight.
    pub fn shrink(mut self, shrink: f64) -> Self {
        self.shrink = shrink;
        self
    }

    /// Set the position kind.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the main axis for children.
    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the wrapping behavior for children.
    pub fn wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the main-axis distribution for children.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Set the per-child cross-axis placement.
    pub fn align_items(mut self, align: Align) -> Self {
        self.align_items = align;
        self
    }

    /// Set the per-line cross-axis packing.
    pub fn align_content(mut self, align: Align) -> Self {
        self.align_content = align;
        self
    }

    /// Set the hidden flag.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Explicit width clamped to be non-negative; zero means unset.
    pub(crate) fn width_clamped(&self) -> i32 {
        self.width.max(0)
    }

    /// Explicit height clamped to be non-negative; zero means unset.
    pub(crate) fn height_clamped(&self) -> i32 {
        self.height.max(0)
    }

    /// Grow weight clamped to be non-negative.
    pub(crate) fn grow_clamped(&self) -> f64 {
        self.grow.max(0.0)
    }

    /// Shrink weight clamped to be non-negative.
    pub(crate) fn shrink_clamped(&self) -> f64 {
        self.shrink.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let v = View::new();
        assert_eq!(v.position, Position::Relative);
        assert_eq!(v.direction, FlexDirection::Row);
        assert_eq!(v.wrap, Wrap::NoWrap);
        assert_eq!(v.justify, Justify::Start);
        assert_eq!(v.align_items, Align::Start);
        assert_eq!(v.align_content, Align::Start);
        assert_eq!(v.grow, 0.0);
        assert_eq!(v.shrink, 0.0);
        assert!(!v.hidden);
    }

    #[test]
    fn clamps_malformed_inputs() {
        let v = View::new().size(-10, -20).grow(-1.0).shrink(-2.0);
        assert_eq!(v.width_clamped(), 0);
        assert_eq!(v.height_clamped(), 0);
        assert_eq!(v.grow_clamped(), 0.0);
        assert_eq!(v.shrink_clamped(), 0.0);
    }
}
