#![forbid(unsafe_code)]

//! The drawer widget.
//!
//! [`Drawer`] ties the pieces together: it owns the state, the transition
//! controller, the gesture interpreter and the layout recalculator, and
//! publishes a [`Presentation`] the host renders.
//!
//! # Host loop
//!
//! ```text
//! input ──handle_pan / handle_tap──▶ Drawer ──presentation()──▶ render
//!   frame ──tick(dt)──▶ Drawer
//!   layout pass ──layout()──▶ Drawer
//! ```
//!
//! # Invariants
//!
//! 1. `state()` only changes on transition completion (a non-animated
//!    `change` is a zero-duration transition) or a `close_on_rotation`
//!    relayout.
//! 2. `on_state_changed` fires once per actual change, after the haptic
//!    pulse.
//! 3. Completion re-applies terminal geometry before
//!    `on_transition_complete` runs.
//! 4. A layout recompute never leaves a transition in flight.
//!
//! # Failure Modes
//!
//! - Requests while a transition runs fail with
//!   [`TransitionError::Busy`]; taps and pans swallow it.
//! - Before the first layout pass, `frame()` falls back to the initial
//!   frame hint (or an empty rect).

use std::fmt;
use std::time::Duration;

use drawerkit_core::geometry::{Insets, Point, QuadCurve, Rect, Size};
use drawerkit_core::input::{PanPhase, PanSample, TapEvent, TapTarget};
use drawerkit_core::orientation::{Orientation, OrientationNotifier, OrientationSubscription};
use drawerkit_core::{debug, debug_span, info, trace};

use crate::arrow::{arrow_path, arrow_path_morph};
use crate::config::DrawerConfig;
use crate::intercept::{InterceptorSet, TouchInterceptor};
use crate::interaction::GestureInterpreter;
use crate::layout::{GeometrySnapshot, LayoutRecalculator};
use crate::state::DrawerState;
use crate::transition::{
    PropertyValues, RunningTransition, TransitionController, TransitionError, TransitionHandle,
    TransitionOutcome, TransitionSpec, driven_properties,
};

// ============================================================================
// Collaborators
// ============================================================================

/// The view the drawer lives in.
pub trait DrawerContainer {
    fn bounds(&self) -> Size;

    fn safe_area_insets(&self) -> Insets {
        Insets::ZERO
    }

    /// Orientation at construction time.
    fn orientation(&self) -> Orientation {
        Orientation::Portrait
    }

    /// Remove the drawer from the container. Called once, on teardown.
    fn detach_drawer(&mut self);
}

/// Device haptic engine.
pub trait HapticFeedback {
    fn pulse(&mut self);
}

/// Host content hosted inside the drawer.
pub trait ContentView {
    /// New content region, in drawer coordinates.
    fn set_frame(&mut self, frame: Rect);

    /// Claim a touch for the content itself.
    fn intercepts_touch(&self, _location: Point) -> bool {
        false
    }
}

/// Values the host renders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Presentation {
    pub values: PropertyValues,
    /// `None` when no arrow is configured or before the first layout.
    pub arrow_path: Option<QuadCurve>,
}

type StateCallback = Box<dyn FnMut(DrawerState)>;

#[derive(Default)]
struct Callbacks {
    on_animation_tick: Option<StateCallback>,
    on_transition_complete: Option<StateCallback>,
    on_state_changed: Option<StateCallback>,
    on_orientation_changed: Option<Box<dyn FnMut(Orientation)>>,
}

// ============================================================================
// Drawer
// ============================================================================

/// An edge drawer.
pub struct Drawer {
    config: DrawerConfig,
    container: Box<dyn DrawerContainer>,
    state: DrawerState,
    controller: TransitionController,
    gestures: GestureInterpreter,
    layout: LayoutRecalculator,
    presentation: Presentation,
    initial_frame: Option<Rect>,
    content: Option<Box<dyn ContentView>>,
    interceptors: InterceptorSet,
    haptics: Option<Box<dyn HapticFeedback>>,
    orientation: Option<OrientationSubscription>,
    pan_suppressed: bool,
    callbacks: Callbacks,
}

impl fmt::Debug for Drawer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawer")
            .field("edge", &self.config.edge())
            .field("state", &self.state)
            .field("controller", &self.controller)
            .field("layout", &self.layout)
            .field("presentation", &self.presentation)
            .field("interceptors", &self.interceptors)
            .field("pan_suppressed", &self.pan_suppressed)
            .finish_non_exhaustive()
    }
}

impl Drawer {
    /// A drawer resting in `config.initial_state()`.
    ///
    /// Geometry is computed on the first [`layout`](Self::layout) (or the
    /// first request that needs it).
    pub fn new(container: Box<dyn DrawerContainer>, config: DrawerConfig) -> Self {
        let state = config.initial_state();
        let layout = LayoutRecalculator::new(container.orientation());
        let values = PropertyValues::terminal(state, 0.0, &config);
        let gestures = GestureInterpreter::new(config.policies().snap_on_zero_velocity);
        debug!(
            edge = config.edge().as_str(),
            state = state.as_str(),
            "drawer created"
        );
        Self {
            config,
            container,
            state,
            controller: TransitionController::new(),
            gestures,
            layout,
            presentation: Presentation {
                values,
                arrow_path: None,
            },
            initial_frame: None,
            content: None,
            interceptors: InterceptorSet::new(),
            haptics: None,
            orientation: None,
            pan_suppressed: false,
            callbacks: Callbacks::default(),
        }
    }

    /// Subscribe to orientation changes. Replaces any earlier subscription.
    pub fn attach_orientation(&mut self, notifier: &mut OrientationNotifier) {
        self.orientation = Some(notifier.subscribe());
        if let Some(last) = notifier.last() {
            self.layout.orientation_changed(last);
        }
    }

    /// Unsubscribe and remove the drawer from its container.
    pub fn teardown(mut self) {
        self.orientation = None;
        self.container.detach_drawer();
        debug!(edge = self.config.edge().as_str(), "drawer torn down");
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> DrawerState {
        self.state
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        !self.controller.is_idle()
    }

    #[inline]
    pub fn transition(&self) -> Option<&RunningTransition> {
        self.controller.running()
    }

    #[inline]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    #[inline]
    pub fn geometry(&self) -> Option<&GeometrySnapshot> {
        self.layout.snapshot()
    }

    /// Drawer frame in container coordinates.
    pub fn frame(&self) -> Rect {
        match self.layout.snapshot() {
            Some(snapshot) => snapshot.frame_at(self.presentation.values.offset),
            None => self.initial_frame.unwrap_or_default(),
        }
    }

    /// Content region in drawer coordinates.
    pub fn content_frame(&self) -> Rect {
        match self.layout.snapshot() {
            Some(snapshot) => snapshot.content_rect(),
            None => Rect::from_size(self.initial_frame.unwrap_or_default().size()),
        }
    }

    // ------------------------------------------------------------------
    // Configuration hooks
    // ------------------------------------------------------------------

    pub fn set_content_view(&mut self, mut content: Box<dyn ContentView>) {
        content.set_frame(self.content_frame());
        self.content = Some(content);
    }

    /// Frame to report before the first layout pass.
    pub fn set_initial_frame(&mut self, frame: Rect) {
        self.initial_frame = Some(frame);
    }

    pub fn add_interceptor(&mut self, interceptor: Box<dyn TouchInterceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn set_haptics(&mut self, haptics: Box<dyn HapticFeedback>) {
        self.haptics = Some(haptics);
    }

    /// Every frame of a running transition, with the state it is heading to.
    pub fn on_animation_tick(&mut self, f: impl FnMut(DrawerState) + 'static) {
        self.callbacks.on_animation_tick = Some(Box::new(f));
    }

    pub fn on_transition_complete(&mut self, f: impl FnMut(DrawerState) + 'static) {
        self.callbacks.on_transition_complete = Some(Box::new(f));
    }

    pub fn on_state_changed(&mut self, f: impl FnMut(DrawerState) + 'static) {
        self.callbacks.on_state_changed = Some(Box::new(f));
    }

    pub fn on_orientation_changed(&mut self, f: impl FnMut(Orientation) + 'static) {
        self.callbacks.on_orientation_changed = Some(Box::new(f));
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Move to `target`, animated or as an immediate snap.
    ///
    /// Both forms fail with [`TransitionError::Busy`] while a transition or
    /// drag is in flight, leaving it untouched. A snap is a zero-duration
    /// transition resolved before returning, so the completion callbacks
    /// fire as for an animated change.
    pub fn change(&mut self, target: DrawerState, animated: bool) -> Result<(), TransitionError> {
        self.ensure_geometry();
        if target == self.state && self.controller.is_idle() {
            trace!(state = target.as_str(), "change to current state ignored");
            return Ok(());
        }
        if animated {
            return self.start_transition(target, self.config.duration()).map(|_| ());
        }
        self.start_transition(target, Duration::ZERO)?;
        if let Some(outcome) = self.controller.fast_forward() {
            self.complete(outcome);
        }
        Ok(())
    }

    fn start_transition(
        &mut self,
        target: DrawerState,
        duration: Duration,
    ) -> Result<TransitionHandle, TransitionError> {
        let terminal = PropertyValues::terminal(target, self.closed_offset(), &self.config);
        let properties = driven_properties(&self.config);
        self.controller.request_transition(
            TransitionSpec::new(target, duration, self.config.damping_ratio()),
            &self.presentation.values,
            &terminal,
            &properties,
        )
    }

    /// Feed one pan sample.
    pub fn handle_pan(&mut self, sample: PanSample) {
        match sample.phase {
            PanPhase::Began => {
                self.ensure_geometry();
                if self.intercepts(sample.location) {
                    trace!(x = sample.location.x, y = sample.location.y, "pan intercepted");
                    self.pan_suppressed = true;
                    return;
                }
                self.pan_suppressed = false;

                let target = self.state.opposite();
                let spec = TransitionSpec::from_config(target, &self.config);
                let terminal = PropertyValues::terminal(target, self.closed_offset(), &self.config);
                let properties = driven_properties(&self.config);
                let current = self.presentation.values;
                self.gestures.began(&mut self.controller, self.state, |controller| {
                    controller.request_transition(spec, &current, &terminal, &properties)
                });
            }
            PanPhase::Changed => {
                if self.pan_suppressed {
                    return;
                }
                let travel = self.layout.snapshot().map_or(0.0, GeometrySnapshot::travel);
                let edge = self.config.edge();
                if self
                    .gestures
                    .changed(&mut self.controller, edge, sample.translation, travel)
                    .is_some()
                {
                    self.sample_presentation();
                }
            }
            PanPhase::Ended => {
                if std::mem::take(&mut self.pan_suppressed) {
                    return;
                }
                self.gestures
                    .ended(&mut self.controller, self.config.edge(), sample.velocity);
            }
            PanPhase::Cancelled => {
                if std::mem::take(&mut self.pan_suppressed) {
                    return;
                }
                self.gestures.cancelled(&mut self.controller);
            }
        }
    }

    /// Feed one tap. Returns `true` if it started a transition.
    pub fn handle_tap(&mut self, event: TapEvent) -> bool {
        self.ensure_geometry();
        let policies = *self.config.policies();
        let target = match (event.target, self.state) {
            (TapTarget::Drawer | TapTarget::Content, _) if self.intercepts(event.location) => {
                trace!(x = event.location.x, y = event.location.y, "tap intercepted");
                None
            }
            (TapTarget::Drawer, state) if policies.close_on_drawer_taps => Some(state.opposite()),
            (TapTarget::Content, DrawerState::Closed) => Some(DrawerState::Open),
            (TapTarget::Content, DrawerState::Open) if policies.close_on_child_view_taps => {
                Some(DrawerState::Closed)
            }
            (TapTarget::Background, DrawerState::Open) if policies.close_on_blur_tapped => {
                Some(DrawerState::Closed)
            }
            _ => None,
        };
        target.is_some_and(|target| {
            self.start_transition(target, self.config.duration()).is_ok()
        })
    }

    /// Advance the running transition by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.controller.is_idle() {
            return;
        }
        match self.controller.tick(dt) {
            Some(outcome) => {
                if let Some(f) = self.callbacks.on_animation_tick.as_mut() {
                    f(outcome.final_state);
                }
                self.complete(outcome);
            }
            None => {
                self.sample_presentation();
                let heading = self.controller.running().map(RunningTransition::heading);
                if let (Some(heading), Some(f)) = (heading, self.callbacks.on_animation_tick.as_mut()) {
                    f(heading);
                }
            }
        }
    }

    /// Host layout pass: apply pending orientation and container changes.
    pub fn layout(&mut self) {
        if let Some(orientation) = self.orientation.as_ref().and_then(OrientationSubscription::poll) {
            self.layout.orientation_changed(orientation);
        }
        let container = self.container.bounds();
        let insets = self.container.safe_area_insets();
        let Some(update) = self.layout.layout_pass(&self.config, container, insets) else {
            return;
        };
        let _span = debug_span!("drawer_relayout", rotated = update.rotated).entered();

        self.gestures.cancelled(&mut self.controller);
        self.pan_suppressed = false;
        if let Some(outcome) = self.controller.fast_forward() {
            self.complete(outcome);
        }
        if update.rotated && self.config.policies().close_on_rotation && self.state.is_open() {
            info!("closing on rotation");
            self.set_state(DrawerState::Closed);
        }
        self.snap_presentation();

        let content_frame = update.snapshot.content_rect();
        if let Some(content) = self.content.as_mut() {
            content.set_frame(content_frame);
        }
        if update.rotated
            && let Some(f) = self.callbacks.on_orientation_changed.as_mut()
        {
            f(update.snapshot.orientation);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_geometry(&mut self) {
        if self.layout.snapshot().is_none() {
            self.layout();
        }
    }

    fn closed_offset(&self) -> f64 {
        self.layout.snapshot().map_or(0.0, |s| s.closed_offset)
    }

    fn intercepts(&self, location: Point) -> bool {
        self.interceptors.intercepts(location)
            || self
                .content
                .as_ref()
                .is_some_and(|content| content.intercepts_touch(location))
    }

    fn set_state(&mut self, state: DrawerState) {
        if state == self.state {
            return;
        }
        info!(from = self.state.as_str(), to = state.as_str(), "drawer state changed");
        self.state = state;
        if self.config.policies().haptic_feedback
            && let Some(haptics) = self.haptics.as_mut()
        {
            haptics.pulse();
        }
        if let Some(f) = self.callbacks.on_state_changed.as_mut() {
            f(state);
        }
    }

    fn complete(&mut self, outcome: TransitionOutcome) {
        self.set_state(outcome.final_state);
        self.snap_presentation();
        if let Some(f) = self.callbacks.on_transition_complete.as_mut() {
            f(outcome.final_state);
        }
    }

    /// Terminal values for the current state.
    fn snap_presentation(&mut self) {
        self.presentation.values =
            PropertyValues::terminal(self.state, self.closed_offset(), &self.config);
        let edge = self.config.edge();
        self.presentation.arrow_path = self
            .layout
            .snapshot()
            .and_then(|snapshot| snapshot.arrow_bounds(&self.config))
            .map(|bounds| arrow_path(edge, self.state, bounds));
    }

    /// Live values from the running transition.
    fn sample_presentation(&mut self) {
        for (property, value) in self.controller.sample() {
            self.presentation.values.set(property, value);
        }
        let edge = self.config.edge();
        let morph = self.presentation.values.arrow_morph;
        self.presentation.arrow_path = self
            .layout
            .snapshot()
            .and_then(|snapshot| snapshot.arrow_bounds(&self.config))
            .map(|bounds| arrow_path_morph(edge, bounds, morph));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArrowSpec, Rgba};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Default)]
    struct Host {
        bounds: Cell<Size>,
        insets: Cell<Insets>,
        detached: Cell<bool>,
    }

    struct Container(Rc<Host>);

    impl DrawerContainer for Container {
        fn bounds(&self) -> Size {
            self.0.bounds.get()
        }

        fn safe_area_insets(&self) -> Insets {
            self.0.insets.get()
        }

        fn detach_drawer(&mut self) {
            self.0.detached.set(true);
        }
    }

    struct Pulses(Rc<Cell<usize>>);

    impl HapticFeedback for Pulses {
        fn pulse(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct Content {
        frames: Rc<RefCell<Vec<Rect>>>,
        claims: bool,
    }

    impl ContentView for Content {
        fn set_frame(&mut self, frame: Rect) {
            self.frames.borrow_mut().push(frame);
        }

        fn intercepts_touch(&self, _location: Point) -> bool {
            self.claims
        }
    }

    fn host() -> Rc<Host> {
        let host = Rc::new(Host::default());
        host.bounds.set(Size::new(375.0, 667.0));
        host
    }

    fn config() -> DrawerConfig {
        DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .corner_radius(12.0)
            .duration(Duration::from_millis(300))
            .build()
            .unwrap()
    }

    fn drawer(host: &Rc<Host>, config: DrawerConfig) -> Drawer {
        let mut drawer = Drawer::new(Box::new(Container(Rc::clone(host))), config);
        drawer.layout();
        drawer
    }

    fn settle(drawer: &mut Drawer) {
        for _ in 0..200 {
            if !drawer.is_transitioning() {
                return;
            }
            drawer.tick(FRAME);
        }
        panic!("transition did not settle");
    }

    #[test]
    fn starts_closed_and_retracted() {
        let host = host();
        let drawer = drawer(&host, config());
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert_eq!(drawer.presentation().values.offset, -275.0);
        assert_eq!(drawer.frame(), Rect::new(0.0, 642.0, 375.0, 300.0));
    }

    #[test]
    fn initial_frame_until_first_layout() {
        let host = host();
        let mut drawer = Drawer::new(Box::new(Container(Rc::clone(&host))), config());
        assert_eq!(drawer.frame(), Rect::default());
        let hint = Rect::new(0.0, 642.0, 375.0, 300.0);
        drawer.set_initial_frame(hint);
        assert_eq!(drawer.frame(), hint);
        drawer.layout();
        assert_eq!(drawer.frame(), hint);
    }

    #[test]
    fn animated_open_completes() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        drawer.on_state_changed(move |s| sink.borrow_mut().push(s));

        drawer.change(DrawerState::Open, true).unwrap();
        assert!(drawer.is_transitioning());
        assert_eq!(drawer.state(), DrawerState::Closed);
        settle(&mut drawer);

        assert_eq!(drawer.state(), DrawerState::Open);
        assert_eq!(drawer.presentation().values.offset, 0.0);
        assert_eq!(drawer.presentation().values.corner_radius, 12.0);
        assert_eq!(*changes.borrow(), vec![DrawerState::Open]);
    }

    #[test]
    fn second_request_is_busy() {
        let host = host();
        let mut drawer = drawer(&host, config());
        drawer.change(DrawerState::Open, true).unwrap();
        assert_eq!(
            drawer.change(DrawerState::Closed, true),
            Err(TransitionError::Busy {
                in_flight: DrawerState::Open
            })
        );
    }

    #[test]
    fn snap_resolves_immediately_and_completes() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let completions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&completions);
        drawer.on_transition_complete(move |s| sink.borrow_mut().push(s));

        drawer.change(DrawerState::Open, false).unwrap();
        assert!(!drawer.is_transitioning());
        assert_eq!(drawer.state(), DrawerState::Open);
        assert_eq!(drawer.presentation().values.offset, 0.0);
        assert_eq!(*completions.borrow(), vec![DrawerState::Open]);

        // Already there: nothing runs, nothing fires.
        drawer.change(DrawerState::Open, false).unwrap();
        assert_eq!(completions.borrow().len(), 1);
    }

    #[test]
    fn snap_is_busy_while_animating() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let completions = Rc::new(Cell::new(0));
        let count = Rc::clone(&completions);
        drawer.on_transition_complete(move |_| count.set(count.get() + 1));

        drawer.change(DrawerState::Open, true).unwrap();
        drawer.tick(FRAME);
        let offset = drawer.presentation().values.offset;
        for target in [DrawerState::Closed, DrawerState::Open] {
            assert_eq!(
                drawer.change(target, false),
                Err(TransitionError::Busy {
                    in_flight: DrawerState::Open
                })
            );
        }
        assert!(drawer.is_transitioning());
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert_eq!(drawer.presentation().values.offset, offset);
        assert_eq!(completions.get(), 0);

        settle(&mut drawer);
        assert_eq!(drawer.state(), DrawerState::Open);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn snap_is_busy_while_dragging() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let loc = Point::new(180.0, 650.0);
        drawer.handle_pan(PanSample::began(loc));
        drawer.handle_pan(PanSample::changed(loc, Point::new(0.0, -100.0), Point::ZERO));

        assert_eq!(
            drawer.change(DrawerState::Closed, false),
            Err(TransitionError::Busy {
                in_flight: DrawerState::Open
            })
        );
        assert!(drawer.transition().is_some_and(RunningTransition::is_paused));
        assert!((drawer.presentation().values.offset + 175.0).abs() < 1e-6);

        // The drag carries on from where it was.
        drawer.handle_pan(PanSample::changed(loc, Point::new(0.0, -200.0), Point::ZERO));
        assert!((drawer.presentation().values.offset + 75.0).abs() < 1e-6);
        drawer.handle_pan(PanSample::ended(
            loc,
            Point::new(0.0, -200.0),
            Point::new(0.0, -500.0),
        ));
        settle(&mut drawer);
        assert_eq!(drawer.state(), DrawerState::Open);
    }

    #[test]
    fn haptic_pulse_per_change() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let pulses = Rc::new(Cell::new(0));
        drawer.set_haptics(Box::new(Pulses(Rc::clone(&pulses))));
        drawer.change(DrawerState::Open, false).unwrap();
        drawer.change(DrawerState::Open, false).unwrap();
        drawer.change(DrawerState::Closed, false).unwrap();
        assert_eq!(pulses.get(), 2);
    }

    #[test]
    fn haptics_respect_policy() {
        let host = host();
        let config = DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .haptic_feedback(false)
            .build()
            .unwrap();
        let mut drawer = drawer(&host, config);
        let pulses = Rc::new(Cell::new(0));
        drawer.set_haptics(Box::new(Pulses(Rc::clone(&pulses))));
        drawer.change(DrawerState::Open, false).unwrap();
        assert_eq!(pulses.get(), 0);
    }

    #[test]
    fn animation_tick_reports_heading() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        drawer.on_animation_tick(move |s| sink.borrow_mut().push(s));
        drawer.change(DrawerState::Open, true).unwrap();
        settle(&mut drawer);
        let seen = seen.borrow();
        assert!(seen.len() > 1);
        assert!(seen.iter().all(|&s| s == DrawerState::Open));
    }

    #[test]
    fn drag_and_release_opens() {
        let host = host();
        let mut drawer = drawer(&host, config());
        let loc = Point::new(180.0, 650.0);
        drawer.handle_pan(PanSample::began(loc));
        drawer.handle_pan(PanSample::changed(loc, Point::new(0.0, -137.5), Point::ZERO));
        assert!((drawer.presentation().values.offset + 137.5).abs() < 1e-6);
        drawer.handle_pan(PanSample::ended(
            loc,
            Point::new(0.0, -137.5),
            Point::new(0.0, -500.0),
        ));
        settle(&mut drawer);
        assert_eq!(drawer.state(), DrawerState::Open);
    }

    #[test]
    fn intercepted_pan_is_ignored() {
        let host = host();
        let mut drawer = drawer(&host, config());
        drawer.add_interceptor(Box::new(|_: Point| true));
        let loc = Point::new(180.0, 650.0);
        drawer.handle_pan(PanSample::began(loc));
        drawer.handle_pan(PanSample::changed(loc, Point::new(0.0, -100.0), Point::ZERO));
        drawer.handle_pan(PanSample::ended(loc, Point::ZERO, Point::new(0.0, -500.0)));
        assert!(!drawer.is_transitioning());
        assert_eq!(drawer.presentation().values.offset, -275.0);
    }

    fn closes_on_blur() -> DrawerConfig {
        DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .duration(Duration::from_millis(300))
            .close_on_blur_tapped(true)
            .build()
            .unwrap()
    }

    #[test]
    fn tap_policies() {
        let host = host();
        let mut drawer = drawer(&host, closes_on_blur());
        let at = Point::new(10.0, 10.0);

        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Background, at)));
        assert!(drawer.handle_tap(TapEvent::new(TapTarget::Drawer, at)));
        settle(&mut drawer);
        assert_eq!(drawer.state(), DrawerState::Open);

        // Child taps do not close by default.
        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Content, at)));
        assert!(drawer.handle_tap(TapEvent::new(TapTarget::Background, at)));
        // Busy.
        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Drawer, at)));
        settle(&mut drawer);
        assert_eq!(drawer.state(), DrawerState::Closed);
    }

    #[test]
    fn background_taps_ignored_by_default() {
        let host = host();
        let mut drawer = drawer(&host, config());
        drawer.change(DrawerState::Open, false).unwrap();
        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Background, Point::ZERO)));
        assert!(!drawer.is_transitioning());
    }

    #[test]
    fn drawer_taps_gated_in_both_states() {
        let host = host();
        let config = DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .close_on_drawer_taps(false)
            .build()
            .unwrap();
        let mut drawer = drawer(&host, config);
        let at = Point::new(10.0, 10.0);
        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Drawer, at)));
        // Content taps still open a closed drawer.
        assert!(drawer.handle_tap(TapEvent::new(TapTarget::Content, at)));
        settle(&mut drawer);
        assert_eq!(drawer.state(), DrawerState::Open);
        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Drawer, at)));
        assert!(!drawer.is_transitioning());
    }

    #[test]
    fn content_can_claim_taps() {
        let host = host();
        let mut drawer = drawer(&host, closes_on_blur());
        let frames = Rc::new(RefCell::new(Vec::new()));
        drawer.set_content_view(Box::new(Content {
            frames: Rc::clone(&frames),
            claims: true,
        }));
        assert_eq!(frames.borrow().as_slice(), &[Rect::new(0.0, 0.0, 375.0, 300.0)]);
        assert!(!drawer.handle_tap(TapEvent::new(TapTarget::Drawer, Point::ZERO)));
        // Background is outside the content.
        drawer.change(DrawerState::Open, false).unwrap();
        assert!(drawer.handle_tap(TapEvent::new(TapTarget::Background, Point::ZERO)));
    }

    #[test]
    fn arrow_follows_state() {
        let host = host();
        let config = DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .arrow(ArrowSpec::new(40.0, 8.0, Rgba::WHITE))
            .build()
            .unwrap();
        let mut drawer = drawer(&host, config);
        let closed = drawer.presentation().arrow_path.unwrap();
        assert_eq!(closed.control, Point::new(187.5, 12.5));
        drawer.change(DrawerState::Open, true).unwrap();
        drawer.tick(FRAME);
        let mid = drawer.presentation().arrow_path.unwrap();
        assert!(mid.control.y > closed.control.y);
        settle(&mut drawer);
        let open = drawer.presentation().arrow_path.unwrap();
        assert_eq!(open.control, Point::new(187.5, 8.5 + 12.0));
    }

    #[test]
    fn rotation_recomputes_and_closes_when_asked() {
        let host = host();
        let config = DrawerConfig::builder()
            .closed_extent(300.0)
            .visible_extent(25.0)
            .close_on_rotation(true)
            .build()
            .unwrap();
        let mut notifier = OrientationNotifier::new();
        let mut drawer = drawer(&host, config);
        drawer.attach_orientation(&mut notifier);
        let rotations = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&rotations);
        drawer.on_orientation_changed(move |o| sink.borrow_mut().push(o));

        drawer.change(DrawerState::Open, true).unwrap();
        drawer.tick(FRAME);
        notifier.publish(Orientation::LandscapeLeft);
        host.bounds.set(Size::new(667.0, 375.0));
        drawer.layout();

        assert!(!drawer.is_transitioning());
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert_eq!(drawer.presentation().values.offset, -275.0);
        assert_eq!(*rotations.borrow(), vec![Orientation::LandscapeLeft]);
    }

    #[test]
    fn state_survives_rotation_by_default() {
        let host = host();
        let mut notifier = OrientationNotifier::new();
        let mut drawer = drawer(&host, config());
        drawer.attach_orientation(&mut notifier);
        drawer.change(DrawerState::Open, false).unwrap();
        notifier.publish(Orientation::LandscapeRight);
        host.bounds.set(Size::new(667.0, 375.0));
        drawer.layout();
        assert_eq!(drawer.state(), DrawerState::Open);
        assert_eq!(drawer.frame().width, 667.0);
    }

    #[test]
    fn teardown_detaches_and_unsubscribes() {
        let host = host();
        let mut notifier = OrientationNotifier::new();
        let mut drawer = drawer(&host, config());
        drawer.attach_orientation(&mut notifier);
        assert_eq!(notifier.subscriber_count(), 1);
        drawer.teardown();
        assert!(host.detached.get());
        assert_eq!(notifier.publish(Orientation::LandscapeLeft), 0);
    }
}
