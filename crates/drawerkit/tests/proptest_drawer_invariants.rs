//! Property-based invariant tests for the drawer state machine.
//!
//! 1. `opposite()` is an involution
//! 2. The release table flips exactly when the transition heads away from
//!    the requested direction
//! 3. Scrubbing is monotone in translation and stays in `[0, 1]`
//! 4. Any pan sequence resolves to exactly one completion and a resting
//!    presentation that matches the final state
//! 5. Reversing twice is a no-op

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use drawerkit::transition::driven_properties;
use drawerkit::{
    Drawer, DrawerConfig, DrawerContainer, DrawerState, PropertyValues, TransitionController,
    TransitionSpec, should_reverse,
};
use drawerkit_core::geometry::{Point, Size};
use drawerkit_core::input::PanSample;
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn state_strategy() -> impl Strategy<Value = DrawerState> {
    prop_oneof![Just(DrawerState::Open), Just(DrawerState::Closed)]
}

#[derive(Debug, Clone)]
enum Gesture {
    Drag(f64),
    Release(f64),
    Cancel,
    Tick(u64),
}

fn gesture_strategy() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (-400.0f64..400.0).prop_map(Gesture::Drag),
        prop_oneof![Just(0.0f64), -2000.0f64..2000.0].prop_map(Gesture::Release),
        Just(Gesture::Cancel),
        (1u64..100).prop_map(Gesture::Tick),
    ]
}

// ── Helpers ─────────────────────────────────────────────────────────────

struct Phone;

impl DrawerContainer for Phone {
    fn bounds(&self) -> Size {
        Size::new(375.0, 667.0)
    }

    fn detach_drawer(&mut self) {}
}

fn config() -> DrawerConfig {
    DrawerConfig::builder()
        .closed_extent(300.0)
        .visible_extent(25.0)
        .corner_radius(10.0)
        .duration(Duration::from_millis(250))
        .build()
        .unwrap()
}

fn settle(drawer: &mut Drawer) {
    for _ in 0..1_000 {
        if !drawer.is_transitioning() {
            return;
        }
        drawer.tick(Duration::from_millis(16));
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn opposite_is_involution(state in state_strategy()) {
        prop_assert_eq!(state.opposite().opposite(), state);
        prop_assert_ne!(state.opposite(), state);
    }

    #[test]
    fn release_table_matches_direction(
        heading in state_strategy(),
        should_close in any::<bool>(),
        is_reversed in any::<bool>(),
    ) {
        // Where the transition currently settles if left alone.
        let settles = if is_reversed { heading.opposite() } else { heading };
        let wanted = if should_close { DrawerState::Closed } else { DrawerState::Open };
        prop_assert_eq!(should_reverse(heading, should_close, is_reversed), settles != wanted);
    }

    #[test]
    fn scrub_is_monotone_and_bounded(a in -600.0f64..600.0, b in -600.0f64..600.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let progress_for = |dy: f64| {
            let mut drawer = Drawer::new(Box::new(Phone), config());
            drawer.layout();
            let at = Point::new(100.0, 650.0);
            drawer.handle_pan(PanSample::began(at));
            drawer.handle_pan(PanSample::changed(at, Point::new(0.0, dy), Point::ZERO));
            drawer.transition().map(|t| t.progress()).unwrap_or_default()
        };
        let p_lo = progress_for(lo);
        let p_hi = progress_for(hi);
        prop_assert!((0.0..=1.0).contains(&p_lo));
        prop_assert!((0.0..=1.0).contains(&p_hi));
        // Dragging further up opens further.
        prop_assert!(p_lo >= p_hi);
    }

    #[test]
    fn gestures_resolve_to_resting_state(
        initial in state_strategy(),
        gestures in prop::collection::vec(gesture_strategy(), 1..30),
    ) {
        let config = DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .corner_radius(10.0)
            .duration(Duration::from_millis(250))
            .initial_state(initial)
            .build()
            .unwrap();
        let mut drawer = Drawer::new(Box::new(Phone), config.clone());
        drawer.layout();
        let completions = Rc::new(Cell::new(0usize));
        let count = Rc::clone(&completions);
        drawer.on_transition_complete(move |_| count.set(count.get() + 1));

        let at = Point::new(100.0, 650.0);
        let mut started = 0usize;
        let mut in_pan = false;
        for gesture in &gestures {
            match *gesture {
                Gesture::Drag(dy) => {
                    if !in_pan {
                        // A re-grab reuses the running transition.
                        if !drawer.is_transitioning() {
                            started += 1;
                        }
                        drawer.handle_pan(PanSample::began(at));
                        in_pan = true;
                    }
                    drawer.handle_pan(PanSample::changed(at, Point::new(0.0, dy), Point::ZERO));
                }
                Gesture::Release(vy) => {
                    drawer.handle_pan(PanSample::ended(at, Point::ZERO, Point::new(0.0, vy)));
                    in_pan = false;
                }
                Gesture::Cancel => {
                    drawer.handle_pan(PanSample::cancelled(at));
                    in_pan = false;
                }
                Gesture::Tick(ms) => {
                    if !in_pan {
                        drawer.tick(Duration::from_millis(ms));
                    }
                }
            }
        }
        if in_pan {
            drawer.handle_pan(PanSample::cancelled(at));
        }
        settle(&mut drawer);

        prop_assert!(!drawer.is_transitioning());
        prop_assert_eq!(completions.get(), started);
        let closed_offset = drawer.geometry().map(|g| g.closed_offset).unwrap();
        let resting = PropertyValues::terminal(drawer.state(), closed_offset, &config);
        prop_assert_eq!(drawer.presentation().values, resting);
    }

    #[test]
    fn double_reverse_is_noop(progress in 0.0f64..=1.0) {
        let config = config();
        let closed = PropertyValues::terminal(DrawerState::Closed, -275.0, &config);
        let open = PropertyValues::terminal(DrawerState::Open, -275.0, &config);
        let mut controller = TransitionController::new();
        controller
            .request_transition(
                TransitionSpec::from_config(DrawerState::Open, &config),
                &closed,
                &open,
                &driven_properties(&config),
            )
            .unwrap();
        controller.pause();
        controller.set_progress(progress);
        let before = controller.progress_each();
        controller.reverse();
        controller.reverse();
        prop_assert_eq!(controller.progress_each(), before);
        prop_assert!(controller.running().is_some_and(|r| !r.is_reversed()));
    }
}
