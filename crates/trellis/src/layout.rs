//! The box layout solver.
//!
//! A single recursive pass resolves every visible view's absolute pixel
//! frame from the tree's box-model inputs. The solver is pure tree state:
//! it takes the arena and a content box for the subtree root, writes frames
//! onto nodes, and returns nothing. It never fails; malformed numeric
//! inputs were clamped when read.
//!
//! Per node the pass partitions visible children into flow and absolute
//! sets, breaks flow children into lines (greedy, only under [`Wrap::Wrap`]),
//! distributes leftover or deficit main-axis space to `grow`/`shrink`
//! weights, places children along the main axis per [`Justify`] and along
//! the cross axis per [`Align`], then recurses with each child's resolved
//! frame as its content box. Absolute children are placed directly against
//! the parent content origin afterwards.
//!
//! Leftover space that does not divide evenly is distributed by largest
//! remainder: each weight takes the floor of its exact share, and surplus
//! pixels go one each to the largest fractional remainders, with the
//! earlier sibling winning ties. This keeps grown sizes summing exactly to
//! the leftover while staying deterministic.

use std::cmp::Ordering;

use geom::{Point, Rect};
use slotmap::SlotMap;

use crate::{
    core::{Node, ViewId},
    view::{Align, FlexDirection, Justify, Position, View, Wrap},
};

/// One flow child's box inputs projected onto the parent's main/cross axes.
struct Item {
    /// The child being placed.
    id: ViewId,
    /// Main-axis size; starts at the explicit size (or zero) and is
    /// adjusted by grow/shrink.
    main: i32,
    /// Leading main-axis margin.
    lead: i32,
    /// Trailing main-axis margin.
    trail: i32,
    /// Explicit cross-axis size, zero when unset.
    cross: i32,
    /// Whether the cross-axis size was explicitly set.
    cross_set: bool,
    /// Leading cross-axis margin.
    cross_lead: i32,
    /// Trailing cross-axis margin.
    cross_trail: i32,
    /// Grow weight.
    grow: f64,
    /// Shrink weight.
    shrink: f64,
}

impl Item {
    /// Project a view's box inputs onto the given main axis.
    fn new(id: ViewId, view: &View, dir: FlexDirection) -> Self {
        let (main, cross) = match dir {
            FlexDirection::Row => (view.width_clamped(), view.height_clamped()),
            FlexDirection::Column => (view.height_clamped(), view.width_clamped()),
        };
        let (lead, trail, cross_lead, cross_trail) = match dir {
            FlexDirection::Row => (
                view.margin_left,
                view.margin_right,
                view.margin_top,
                view.margin_bottom,
            ),
            FlexDirection::Column => (
                view.margin_top,
                view.margin_bottom,
                view.margin_left,
                view.margin_right,
            ),
        };
        Self {
            id,
            main,
            lead,
            trail,
            cross,
            cross_set: cross > 0,
            cross_lead,
            cross_trail,
            grow: view.grow_clamped(),
            shrink: view.shrink_clamped(),
        }
    }

    /// Main-axis extent including margins.
    fn outer_main(&self) -> i32 {
        self.main + self.lead + self.trail
    }

    /// Cross-axis extent including margins.
    fn outer_cross(&self) -> i32 {
        self.cross + self.cross_lead + self.cross_trail
    }
}

/// Resolve the subtree rooted at `id`, writing `frame` as its own frame and
/// laying out all visible descendants within it.
pub(crate) fn resolve<S: ?Sized>(nodes: &mut SlotMap<ViewId, Node<S>>, id: ViewId, frame: Rect) {
    let Some(node) = nodes.get_mut(id) else {
        return;
    };
    node.frame = frame;
    node.laid_out = true;

    let dir = node.view.direction;
    let wrap = node.view.wrap;
    let justify = node.view.justify;
    let align_items = node.view.align_items;
    let align_content = node.view.align_content;
    let children = node.children.clone();

    let (avail_main, avail_cross) = match dir {
        FlexDirection::Row => (frame.w, frame.h),
        FlexDirection::Column => (frame.h, frame.w),
    };

    // Partition visible children. Hidden subtrees are skipped entirely:
    // they accumulate into no line and receive no frame update.
    let mut flow = Vec::new();
    let mut absolute = Vec::new();
    for &child in &children {
        let Some(n) = nodes.get(child) else { continue };
        if n.view.hidden {
            continue;
        }
        match n.view.position {
            Position::Relative => flow.push(Item::new(child, &n.view, dir)),
            Position::Absolute => absolute.push(child),
        }
    }

    // Greedy line breaking. A line always takes at least one child.
    let mut lines: Vec<Vec<Item>> = Vec::new();
    let mut line: Vec<Item> = Vec::new();
    let mut used = 0;
    for item in flow {
        if wrap == Wrap::Wrap && !line.is_empty() && used + item.outer_main() > avail_main {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        used += item.outer_main();
        line.push(item);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    // Distribute leftover or deficit main-axis space within each line.
    for line in &mut lines {
        let used: i32 = line.iter().map(Item::outer_main).sum();
        let free = avail_main - used;
        if free > 0 {
            let weights: Vec<f64> = line.iter().map(|i| i.grow).collect();
            for (item, add) in line.iter_mut().zip(distribute(free, &weights)) {
                item.main += add;
            }
        } else if free < 0 {
            let weights: Vec<f64> = line.iter().map(|i| i.shrink).collect();
            for (item, cut) in line.iter_mut().zip(distribute(-free, &weights)) {
                item.main = (item.main - cut).max(0);
            }
        }
    }

    // Size lines along the cross axis. A single line spans the full cross
    // extent; multiple lines are packed per align_content.
    let single = lines.len() <= 1;
    let mut extents: Vec<i32> = if single {
        vec![avail_cross; lines.len()]
    } else {
        lines
            .iter()
            .map(|l| l.iter().map(Item::outer_cross).max().unwrap_or(0))
            .collect()
    };
    let mut cross_pos = 0;
    if !single {
        let total: i32 = extents.iter().sum();
        let cross_free = avail_cross - total;
        match align_content {
            Align::Start => {}
            Align::Center => cross_pos = cross_free / 2,
            Align::End => cross_pos = cross_free,
            Align::Stretch => {
                if cross_free > 0 {
                    let weights = vec![1.0; extents.len()];
                    for (extent, add) in extents.iter_mut().zip(distribute(cross_free, &weights)) {
                        *extent += add;
                    }
                }
            }
        }
    }

    let origin = frame.tl;
    for (line, extent) in lines.iter().zip(&extents) {
        let used: i32 = line.iter().map(Item::outer_main).sum();
        let free = avail_main - used;
        let count = line.len() as i32;
        let (mut offset, gap) = match justify {
            Justify::Start => (0, 0),
            Justify::Center => (free / 2, 0),
            Justify::End => (free, 0),
            Justify::SpaceBetween => (0, if count > 1 { free / (count - 1) } else { 0 }),
            Justify::SpaceAround => {
                let g = free / count;
                (g / 2, g)
            }
            Justify::SpaceEvenly => {
                let g = free / (count + 1);
                (g, g)
            }
        };
        for item in line {
            let main_pos = offset + item.lead;
            let (child_cross, cross_size) = cross_place(align_items, cross_pos, *extent, item);
            let child_frame = axis_rect(dir, origin, main_pos, child_cross, item.main, cross_size);
            resolve(nodes, item.id, child_frame);
            offset += item.outer_main() + gap;
        }
        cross_pos += extent;
    }

    // Absolute children are placed against the parent content origin,
    // ignoring sibling flow entirely.
    for child in absolute {
        let Some(n) = nodes.get(child) else { continue };
        let v = &n.view;
        let child_frame = Rect::new(
            origin.x + v.left + v.margin_left,
            origin.y + v.top + v.margin_top,
            v.width_clamped(),
            v.height_clamped(),
        );
        resolve(nodes, child, child_frame);
    }
}

/// Place one item on the cross axis within its line. Returns the cross
/// position and resolved cross size.
fn cross_place(align: Align, line_origin: i32, extent: i32, item: &Item) -> (i32, i32) {
    let outer = item.outer_cross();
    match align {
        Align::Start => (line_origin + item.cross_lead, item.cross),
        Align::Center => (
            line_origin + (extent - outer) / 2 + item.cross_lead,
            item.cross,
        ),
        Align::End => (line_origin + extent - outer + item.cross_lead, item.cross),
        Align::Stretch => {
            if item.cross_set {
                (line_origin + item.cross_lead, item.cross)
            } else {
                (
                    line_origin + item.cross_lead,
                    (extent - item.cross_lead - item.cross_trail).max(0),
                )
            }
        }
    }
}

/// Map main/cross coordinates back to an x/y rectangle.
fn axis_rect(
    dir: FlexDirection,
    origin: Point,
    main_pos: i32,
    cross_pos: i32,
    main_size: i32,
    cross_size: i32,
) -> Rect {
    match dir {
        FlexDirection::Row => Rect::new(
            origin.x + main_pos,
            origin.y + cross_pos,
            main_size,
            cross_size,
        ),
        FlexDirection::Column => Rect::new(
            origin.x + cross_pos,
            origin.y + main_pos,
            cross_size,
            main_size,
        ),
    }
}

/// Split `total` pixels across non-negative weights by largest remainder.
///
/// Zero-weight entries receive nothing, including surplus pixels. The
/// result always sums to `total` when any weight is positive, and to zero
/// otherwise.
fn distribute(total: i32, weights: &[f64]) -> Vec<i32> {
    debug_assert!(total >= 0);
    let mut out = vec![0i32; weights.len()];
    let sum: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if sum <= 0.0 || total == 0 {
        return out;
    }
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(weights.len());
    let mut assigned = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        let share = total as f64 * w / sum;
        let whole = share.floor() as i32;
        out[i] = whole;
        assigned += whole;
        remainders.push((i, share - whole as f64));
    }
    remainders.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    let mut surplus = total - assigned;
    for (i, _) in remainders {
        if surplus == 0 {
            break;
        }
        out[i] += 1;
        surplus -= 1;
    }
    out
}
