//! The tree arena and per-frame driver.
//!
//! [`Trellis`] owns every view in a slotmap arena, keyed by [`ViewId`].
//! Nodes hold a parent back-link and an ordered child list, so the tree is
//! acyclic by construction and a view lives under exactly one parent.
//! The host drives it once per frame: `update()` runs the layout pass and
//! per-view update callbacks, `draw()` walks the tree invoking draw
//! callbacks with resolved frames, and the input methods feed pointer and
//! touch samples through the event router.

use std::collections::HashMap;

use geom::{Expanse, Point, Rect};
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    event::{self, Clock, MonotonicClock, TouchId, TouchState},
    handler::{Capabilities, Handler},
    layout,
    view::{Position, View},
};

new_key_type! {
    /// Opaque identifier for a view stored in the tree arena.
    pub struct ViewId;
}

/// Arena storage for one view: configuration, structure, resolved
/// geometry, and the optional handler with its capability descriptor.
pub(crate) struct Node<S: ?Sized> {
    /// Box-model and layout-mode inputs.
    pub(crate) view: View,
    /// Parent in the arena tree; `None` for the root.
    pub(crate) parent: Option<ViewId>,
    /// Children in insertion order, which is sibling order.
    pub(crate) children: Vec<ViewId>,
    /// Absolute frame written by the most recent layout pass.
    pub(crate) frame: Rect,
    /// Whether `frame` was written by the most recent layout pass.
    pub(crate) laid_out: bool,
    /// Capability descriptor captured when the handler was attached.
    pub(crate) caps: Capabilities,
    /// Attached behavior, if any.
    pub(crate) handler: Option<Box<dyn Handler<S>>>,
}

impl<S: ?Sized> Node<S> {
    /// Construct a node with no handler.
    fn new(view: View, parent: Option<ViewId>) -> Self {
        Self {
            view,
            parent,
            children: Vec::new(),
            frame: Rect::default(),
            laid_out: false,
            caps: Capabilities::none(),
            handler: None,
        }
    }
}

/// The view tree: arena, layout driver, and event router in one owner.
///
/// Generic over the host's draw surface type `S`, which is handed through
/// to draw-capable handlers untouched.
pub struct Trellis<S: ?Sized = ()> {
    /// Node storage arena.
    nodes: SlotMap<ViewId, Node<S>>,
    /// Root node ID.
    root: ViewId,
    /// Canvas size override for the root; when unset the root is sized
    /// from its own width/height fields.
    canvas: Option<Expanse>,
    /// Per-identity press state.
    touches: HashMap<TouchId, TouchState>,
    /// Monotonic time source for gesture windows.
    clock: Box<dyn Clock>,
}

impl<S: ?Sized> Trellis<S> {
    /// Construct a tree from a root view, using the default monotonic
    /// clock for gesture timing.
    pub fn new(root: View) -> Self {
        Self::with_clock(root, MonotonicClock::new())
    }

    /// Construct a tree with an injected clock. Tests use this with
    /// [`crate::tutils::ManualClock`] to drive gesture windows directly.
    pub fn with_clock(root: View, clock: impl Clock + 'static) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root, None));
        Self {
            nodes,
            root,
            canvas: None,
            touches: HashMap::new(),
            clock: Box::new(clock),
        }
    }

    /// The root view's ID.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Override the canvas size used to lay out the root.
    pub fn set_canvas_size(&mut self, size: impl Into<Expanse>) {
        self.canvas = Some(size.into());
    }

    /// Remove the canvas size override; the root is sized from its own
    /// width/height fields again.
    pub fn clear_canvas_size(&mut self) {
        self.canvas = None;
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    /// Append a child under `parent`, taking ownership of the view.
    /// Call order is sibling order. Fails fast with
    /// [`Error::UnknownView`] when `parent` is not in the tree.
    pub fn add_child(&mut self, parent: ViewId, view: View) -> Result<ViewId> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::UnknownView);
        }
        let id = self.nodes.insert(Node::new(view, Some(parent)));
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Detach and destroy the subtree rooted at `id`. The root cannot be
    /// removed.
    pub fn remove(&mut self, id: ViewId) -> Result<()> {
        if id == self.root {
            return Err(Error::Invalid("the root cannot be removed".into()));
        }
        let node = self.nodes.get(id).ok_or(Error::UnknownView)?;
        if let Some(parent) = node.parent {
            self.nodes[parent].children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        // Presses tracked to a destroyed view produce no further callbacks.
        let nodes = &self.nodes;
        self.touches.retain(|_, st| nodes.contains_key(st.target));
        Ok(())
    }

    /// Attach or replace the handler on a view. The capability descriptor
    /// is captured here, once; dispatch never probes the handler again.
    pub fn set_handler(&mut self, id: ViewId, handler: impl Handler<S> + 'static) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownView)?;
        node.caps = handler.capabilities();
        node.handler = Some(Box::new(handler));
        Ok(())
    }

    /// Detach the handler from a view, if any.
    pub fn clear_handler(&mut self, id: ViewId) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownView)?;
        node.caps = Capabilities::none();
        node.handler = None;
        Ok(())
    }

    /// Shared access to a view's configuration.
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.nodes.get(id).map(|n| &n.view)
    }

    /// Mutable access to a view's configuration. Resolved frames are
    /// meaningful again after the next [`Trellis::update`].
    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.nodes.get_mut(id).map(|n| &mut n.view)
    }

    /// Hide or un-hide a view. Hidden views are excluded from layout and
    /// dispatch but remain in the tree.
    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownView)?;
        node.view.hidden = hidden;
        Ok(())
    }

    /// A view's children, in sibling order.
    pub fn children(&self, id: ViewId) -> Option<&[ViewId]> {
        self.nodes.get(id).map(|n| n.children.as_slice())
    }

    /// A view's parent; `None` for the root or an unknown ID.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// The resolved absolute frame from the most recent update, or `None`
    /// when the view is unknown, hidden, or was not laid out yet.
    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        (node.laid_out && !node.view.hidden).then_some(node.frame)
    }

    /// Find the first view with the given stable ID, in pre-order from
    /// the root. A miss is `None`, not an error.
    pub fn view_by_id(&self, view_id: &str) -> Option<ViewId> {
        self.view_by_id_under(self.root, view_id)
    }

    /// As [`Trellis::view_by_id`], scoped to the subtree under `subtree`.
    pub fn view_by_id_under(&self, subtree: ViewId, view_id: &str) -> Option<ViewId> {
        let mut stack = vec![subtree];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.view.id.as_deref() == Some(view_id) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    // ------------------------------------------------------------------
    // Per-frame driver
    // ------------------------------------------------------------------

    /// Run one layout pass over the whole tree, then notify every
    /// update-capable view in pre-order (parent before children, siblings
    /// in insertion order). Hidden subtrees are skipped.
    pub fn update(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.laid_out = false;
        }
        let root = &self.nodes[self.root].view;
        let size = self
            .canvas
            .unwrap_or_else(|| Expanse::new(root.width_clamped(), root.height_clamped()));
        let origin = match root.position {
            Position::Absolute => Point::new(
                root.left + root.margin_left,
                root.top + root.margin_top,
            ),
            Position::Relative => Point::new(root.margin_left, root.margin_top),
        };
        let frame = Rect::new(origin.x, origin.y, size.w, size.h);
        trace!(?frame, "layout pass");
        layout::resolve(&mut self.nodes, self.root, frame);

        for id in self.visible_preorder() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if node.caps.update
                && let Some(handler) = node.handler.as_mut()
            {
                handler.on_update();
            }
        }
    }

    /// Invoke the draw callback on every draw-capable view in pre-order,
    /// passing the host surface and the view's resolved frame. Views
    /// without the capability are skipped but their children are still
    /// visited; hidden subtrees are not. Before the first update, frames
    /// are zero-sized.
    pub fn draw(&mut self, surface: &mut S) {
        for id in self.visible_preorder() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if node.caps.draw
                && let Some(handler) = node.handler.as_mut()
            {
                let frame = if node.laid_out {
                    node.frame
                } else {
                    Rect::default()
                };
                handler.on_draw(surface, frame);
            }
        }
    }

    /// Visible views in pre-order: parent before children, siblings in
    /// insertion order, hidden subtrees pruned.
    fn visible_preorder(&self) -> Vec<ViewId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.view.hidden {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    // ------------------------------------------------------------------
    // Event router
    // ------------------------------------------------------------------

    /// A touch or pointer press at (x, y). The deepest press-capable view
    /// containing the point becomes the tracked target for this identity
    /// and receives the press callback. A miss is silently ignored.
    pub fn press(&mut self, touch: impl Into<TouchId>, x: i32, y: i32) {
        let touch = touch.into();
        let point = Point::new(x, y);
        let Some(target) = self.hit_test(point, |c| c.press) else {
            trace!(?touch, x, y, "press missed");
            return;
        };
        debug!(?touch, ?target, x, y, "press");
        self.touches.insert(
            touch,
            TouchState {
                target,
                start: point,
                pressed_at: self.clock.now(),
            },
        );
        if let Some(handler) = self.nodes.get_mut(target).and_then(|n| n.handler.as_mut()) {
            handler.on_press(x, y, touch);
        }
    }

    /// The release matching an earlier press for this identity. The view
    /// resolved at press time receives the release callback, with
    /// `cancelled` set when the release point is outside its frame, then a
    /// swipe evaluation against the same target. Unknown identities are
    /// silently ignored; the tracking entry is cleared regardless.
    pub fn release(&mut self, touch: impl Into<TouchId>, x: i32, y: i32) {
        let touch = touch.into();
        let Some(state) = self.touches.remove(&touch) else {
            return;
        };
        let point = Point::new(x, y);
        let elapsed = self.clock.now().saturating_sub(state.pressed_at);
        let Some(node) = self.nodes.get_mut(state.target) else {
            return;
        };
        let cancelled = !node.frame.contains_point(point);
        let swipe = if node.caps.swipe {
            event::classify_swipe(point - state.start, elapsed)
        } else {
            None
        };
        debug!(?touch, target = ?state.target, cancelled, ?swipe, "release");
        if let Some(handler) = node.handler.as_mut() {
            handler.on_release(x, y, cancelled);
            if let Some(dir) = swipe {
                handler.on_swipe(dir);
            }
        }
    }

    /// A pointer move at (x, y). Mouse-capable views under the point are
    /// offered the move in deepest-first order until one consumes it.
    pub fn mouse_move(&mut self, x: i32, y: i32) {
        let point = Point::new(x, y);
        let mut hits = Vec::new();
        self.collect_hits(self.root, point, &|c| c.mouse, &mut hits);
        for id in hits {
            if let Some(handler) = self.nodes.get_mut(id).and_then(|n| n.handler.as_mut())
                && handler.on_mouse(x, y)
            {
                break;
            }
        }
    }

    /// A left mouse button press, routed through the touch machinery
    /// under the reserved [`TouchId::MOUSE`] identity.
    pub fn mouse_press(&mut self, x: i32, y: i32) {
        self.press(TouchId::MOUSE, x, y);
    }

    /// The left mouse button release matching [`Trellis::mouse_press`].
    pub fn mouse_release(&mut self, x: i32, y: i32) {
        self.release(TouchId::MOUSE, x, y);
    }

    /// The deepest capable view whose frame contains the point, if any.
    fn hit_test(&self, point: Point, cap: fn(&Capabilities) -> bool) -> Option<ViewId> {
        let mut hits = Vec::new();
        self.collect_hits(self.root, point, &cap, &mut hits);
        hits.into_iter().next()
    }

    /// Collect capable views containing the point, deepest first: children
    /// before their parent, the most-recently-added sibling first. Hidden
    /// subtrees are never entered. A view's own frame does not clip its
    /// children, so overflowing descendants still register.
    fn collect_hits(
        &self,
        id: ViewId,
        point: Point,
        cap: &dyn Fn(&Capabilities) -> bool,
        out: &mut Vec<ViewId>,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.view.hidden {
            return;
        }
        for &child in node.children.iter().rev() {
            self.collect_hits(child, point, cap, out);
        }
        if cap(&node.caps)
            && node.handler.is_some()
            && node.laid_out
            && node.frame.contains_point(point)
        {
            out.push(id);
        }
    }
}
