//! Integration tests for touch, mouse, and swipe dispatch.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use trellis::{
        Align, Capabilities, Direction, FlexDirection, Justify, Point, Position, Rect, TouchId,
        Trellis, View, ViewId,
        tutils::{ManualClock, Record, Recorder},
    };

    /// Route dispatch traces through the test harness output.
    fn init_logs() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .compact()
            .try_init();
    }

    /// The canonical nested tree with a full-capability recorder on the
    /// 10x20 leaf, which resolves to (290,380)-(300,400).
    fn button_tree() -> (Trellis, ManualClock, Rc<RefCell<Record>>, Rect) {
        init_logs();
        let clock = ManualClock::new();
        let mut t: Trellis = Trellis::with_clock(
            View::new()
                .size(300, 500)
                .at(100, 50)
                .position(Position::Absolute)
                .direction(FlexDirection::Column)
                .justify(Justify::Center)
                .align_items(Align::Center),
            clock.clone(),
        );
        let child = t
            .add_child(
                t.root(),
                View::new()
                    .size(100, 200)
                    .direction(FlexDirection::Column)
                    .justify(Justify::End)
                    .align_items(Align::End),
            )
            .unwrap();
        let leaf = t.add_child(child, View::new().size(10, 20)).unwrap();
        let (recorder, record) = Recorder::new();
        t.set_handler(leaf, recorder).unwrap();
        t.update();
        let frame = t.frame(leaf).unwrap();
        assert_eq!(frame, Rect::new(290, 380, 10, 20));
        (t, clock, record, frame)
    }

    #[test]
    fn press_and_release_scenarios() {
        struct Case {
            name: &'static str,
            start: Point,
            end: Point,
            pressed: bool,
            released: bool,
            cancelled: bool,
        }
        let (mut t, _clock, record, frame) = button_tree();
        let min = frame.tl;
        let max = frame.max();
        let cases = [
            Case {
                name: "press inside and release inside",
                start: min,
                end: min,
                pressed: true,
                released: true,
                cancelled: false,
            },
            Case {
                name: "press inside and release outside",
                start: min,
                end: Point::new(min.x, min.y - 1),
                pressed: true,
                released: true,
                cancelled: true,
            },
            Case {
                name: "press inside and release inside (right-bottom)",
                start: max,
                end: max,
                pressed: true,
                released: true,
                cancelled: false,
            },
            Case {
                name: "press inside and release outside (right-bottom)",
                start: max,
                end: Point::new(max.x + 1, max.y),
                pressed: true,
                released: true,
                cancelled: true,
            },
            Case {
                name: "press outside and release inside",
                start: Point::new(min.x - 1, min.y),
                end: Point::new(min.x + frame.w / 2, min.y + frame.h / 2),
                pressed: false,
                released: false,
                cancelled: false,
            },
        ];
        for case in cases {
            record.borrow_mut().reset();
            t.press(TouchId(0), case.start.x, case.start.y);
            t.release(TouchId(0), case.end.x, case.end.y);
            let r = record.borrow();
            assert_eq!(r.pressed, case.pressed, "{}", case.name);
            assert_eq!(r.released, case.released, "{}", case.name);
            assert_eq!(r.cancelled, case.cancelled, "{}", case.name);
        }
    }

    #[test]
    fn mouse_click_scenarios() {
        let (mut t, _clock, record, frame) = button_tree();
        let min = frame.tl;
        t.mouse_press(min.x, min.y);
        t.mouse_release(min.x, min.y);
        {
            let r = record.borrow();
            assert!(r.pressed && r.released && !r.cancelled);
            assert_eq!(r.press.unwrap().1, TouchId::MOUSE);
        }
        record.borrow_mut().reset();
        t.mouse_press(min.x, min.y);
        t.mouse_release(min.x, min.y - 1);
        let r = record.borrow();
        assert!(r.released && r.cancelled);
    }

    #[test]
    fn swipe_scenarios() {
        struct Case {
            name: &'static str,
            delta: Point,
            millis: u64,
            want: Option<Direction>,
        }
        let (mut t, clock, record, frame) = button_tree();
        let min = frame.tl;
        let cases = [
            Case {
                name: "swipe left",
                delta: Point::new(-50, 0),
                millis: 0,
                want: Some(Direction::Left),
            },
            Case {
                name: "swipe right",
                delta: Point::new(50, 0),
                millis: 50,
                want: Some(Direction::Right),
            },
            Case {
                name: "swipe down",
                delta: Point::new(0, 50),
                millis: 50,
                want: Some(Direction::Down),
            },
            Case {
                name: "swipe slow",
                delta: Point::new(0, 50),
                millis: 301,
                want: None,
            },
            Case {
                name: "swipe short",
                delta: Point::new(0, 49),
                millis: 50,
                want: None,
            },
        ];
        for case in cases {
            record.borrow_mut().reset();
            t.press(TouchId(0), min.x, min.y);
            clock.advance(case.millis);
            t.release(TouchId(0), min.x + case.delta.x, min.y + case.delta.y);
            assert_eq!(record.borrow().swiped, case.want, "{}", case.name);
        }
    }

    #[test]
    fn swipe_targets_press_time_view() {
        // The release lands far outside the leaf's frame; the swipe still
        // fires on the view resolved at press time, alongside a cancel.
        let (mut t, _clock, record, frame) = button_tree();
        t.press(TouchId(7), frame.tl.x, frame.tl.y);
        t.release(TouchId(7), frame.tl.x - 120, frame.tl.y);
        let r = record.borrow();
        assert!(r.cancelled);
        assert_eq!(r.swiped, Some(Direction::Left));
    }

    #[test]
    fn unknown_identities_are_ignored() {
        let (mut t, _clock, record, frame) = button_tree();
        t.release(TouchId(42), frame.tl.x, frame.tl.y);
        assert!(!record.borrow().released);
        // A second release for a consumed identity is also dropped.
        t.press(TouchId(1), frame.tl.x, frame.tl.y);
        t.release(TouchId(1), frame.tl.x, frame.tl.y);
        record.borrow_mut().reset();
        t.release(TouchId(1), frame.tl.x, frame.tl.y);
        assert!(!record.borrow().released);
    }

    #[test]
    fn concurrent_touches_track_separately() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 40));
        let a = t.add_child(t.root(), View::new().size(50, 40)).unwrap();
        let b = t.add_child(t.root(), View::new().size(50, 40)).unwrap();
        let (ra, rec_a) = Recorder::new();
        let (rb, rec_b) = Recorder::new();
        t.set_handler(a, ra).unwrap();
        t.set_handler(b, rb).unwrap();
        t.update();

        t.press(TouchId(0), 10, 10);
        t.press(TouchId(1), 60, 10);
        // Cross the touches over: each release resolves against its own
        // press-time target.
        t.release(TouchId(0), 60, 10);
        t.release(TouchId(1), 60, 10);
        assert!(rec_a.borrow().released && rec_a.borrow().cancelled);
        assert!(rec_b.borrow().released && !rec_b.borrow().cancelled);
    }

    #[test]
    fn release_inside_another_view_still_cancels() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 40));
        let a = t.add_child(t.root(), View::new().size(40, 40)).unwrap();
        let b = t.add_child(t.root(), View::new().size(40, 40)).unwrap();
        let (ra, rec_a) = Recorder::new();
        let (rb, rec_b) = Recorder::new();
        t.set_handler(a, ra).unwrap();
        t.set_handler(b, rb).unwrap();
        t.update();

        t.press(TouchId(0), 10, 10);
        t.release(TouchId(0), 70, 10);
        assert!(rec_a.borrow().cancelled);
        assert!(!rec_b.borrow().released);
    }

    #[test]
    fn deepest_view_wins_the_press() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 100));
        let outer = t.add_child(t.root(), View::new().size(100, 100)).unwrap();
        let inner = t.add_child(outer, View::new().size(50, 50)).unwrap();
        let (ro, rec_outer) = Recorder::new();
        let (ri, rec_inner) = Recorder::new();
        t.set_handler(outer, ro).unwrap();
        t.set_handler(inner, ri).unwrap();
        t.update();

        t.press(TouchId(0), 10, 10);
        assert!(rec_inner.borrow().pressed);
        assert!(!rec_outer.borrow().pressed);

        // Outside the inner view, the outer one takes it.
        t.press(TouchId(1), 90, 90);
        assert!(rec_outer.borrow().pressed);
    }

    #[test]
    fn later_sibling_wins_overlap() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 100));
        let first = t
            .add_child(
                t.root(),
                View::new().position(Position::Absolute).size(60, 60),
            )
            .unwrap();
        let second = t
            .add_child(
                t.root(),
                View::new().position(Position::Absolute).size(60, 60),
            )
            .unwrap();
        let (rf, rec_first) = Recorder::new();
        let (rs, rec_second) = Recorder::new();
        t.set_handler(first, rf).unwrap();
        t.set_handler(second, rs).unwrap();
        t.update();

        t.press(TouchId(0), 30, 30);
        assert!(rec_second.borrow().pressed);
        assert!(!rec_first.borrow().pressed);
    }

    #[test]
    fn press_skips_incapable_views() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 100));
        let outer = t.add_child(t.root(), View::new().size(100, 100)).unwrap();
        let inner = t.add_child(outer, View::new().size(50, 50)).unwrap();
        let (ro, rec_outer) = Recorder::new();
        // The inner view only draws; presses fall through to the outer one.
        let (ri, _rec_inner) = Recorder::with_caps(Capabilities::none().with_draw());
        t.set_handler(outer, ro).unwrap();
        t.set_handler(inner, ri).unwrap();
        t.update();

        t.press(TouchId(0), 10, 10);
        assert!(rec_outer.borrow().pressed);
    }

    #[test]
    fn mouse_move_hits_and_misses() {
        let (mut t, _clock, record, frame) = button_tree();
        let min = frame.tl;
        let max = frame.max();
        let inside = [min, max];
        let outside = [
            Point::new(min.x - 1, min.y),
            Point::new(max.x + 1, min.y),
            Point::new(min.x, min.y - 1),
            Point::new(min.x, max.y + 1),
        ];
        for p in inside {
            record.borrow_mut().reset();
            t.mouse_move(p.x, p.y);
            assert_eq!(record.borrow().mouse, Some(p));
        }
        for p in outside {
            record.borrow_mut().reset();
            t.mouse_move(p.x, p.y);
            assert!(!record.borrow().moved, "unexpected hit at {p:?}");
        }
    }

    #[test]
    fn unconsumed_mouse_move_continues_outward() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 100));
        let outer = t.add_child(t.root(), View::new().size(100, 100)).unwrap();
        let inner = t.add_child(outer, View::new().size(50, 50)).unwrap();
        let (ro, rec_outer) = Recorder::new();
        let (ri, rec_inner) = Recorder::new();
        rec_inner.borrow_mut().consume_mouse = false;
        t.set_handler(outer, ro).unwrap();
        t.set_handler(inner, ri).unwrap();
        t.update();

        t.mouse_move(10, 10);
        // The inner view declined, so the outer view was offered the move.
        assert!(rec_inner.borrow().moved);
        assert!(rec_outer.borrow().moved);

        rec_inner.borrow_mut().reset();
        rec_outer.borrow_mut().reset();
        rec_inner.borrow_mut().consume_mouse = true;
        t.mouse_move(10, 10);
        assert!(rec_inner.borrow().moved);
        assert!(!rec_outer.borrow().moved);
    }

    #[test]
    fn hidden_subtrees_are_not_hit() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 100));
        let parent = t.add_child(t.root(), View::new().size(100, 100)).unwrap();
        let child = t.add_child(parent, View::new().size(100, 100)).unwrap();
        let (rc, rec_child) = Recorder::new();
        t.set_handler(child, rc).unwrap();
        t.update();

        t.press(TouchId(0), 10, 10);
        assert!(rec_child.borrow().pressed);
        rec_child.borrow_mut().reset();

        // Hiding the parent removes the capable child from hit testing,
        // even though the child's own hidden flag is unset.
        t.set_hidden(parent, true).unwrap();
        t.update();
        t.press(TouchId(1), 10, 10);
        t.mouse_move(10, 10);
        assert!(!rec_child.borrow().pressed);
        assert!(!rec_child.borrow().moved);
    }

    #[test]
    fn removed_target_produces_no_release() {
        let mut t: Trellis = Trellis::new(View::new().size(100, 100));
        let kid = t.add_child(t.root(), View::new().size(100, 100)).unwrap();
        let (rk, rec) = Recorder::new();
        t.set_handler(kid, rk).unwrap();
        t.update();

        t.press(TouchId(0), 10, 10);
        assert!(rec.borrow().pressed);
        t.remove(kid).unwrap();
        t.release(TouchId(0), 10, 10);
        assert!(!rec.borrow().released);
    }

    /// Capability-gated swipe: a press-only handler sees press/release but
    /// never a swipe, no matter the gesture.
    #[test]
    fn swipe_requires_the_capability() {
        let mut t: Trellis =
            Trellis::with_clock(View::new().size(100, 100), ManualClock::new());
        let kid = t.add_child(t.root(), View::new().size(100, 100)).unwrap();
        let (rk, rec) = Recorder::with_caps(Capabilities::none().with_press());
        t.set_handler(kid, rk).unwrap();
        t.update();

        t.press(TouchId(0), 0, 0);
        t.release(TouchId(0), 80, 0);
        assert!(rec.borrow().released);
        assert_eq!(rec.borrow().swiped, None);
    }

    /// Sanity check for the identity type used by hosts.
    #[test]
    fn touch_ids_convert_from_raw() {
        let id: TouchId = 3u64.into();
        assert_eq!(id, TouchId(3));
        assert_ne!(id, TouchId::MOUSE);
    }
}
