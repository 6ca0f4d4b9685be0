#![forbid(unsafe_code)]

//! Gesture interpreter: pan samples in, scrub and resume calls out.
//!
//! # State Machine
//!
//! ```text
//! idle ──Began──▶ tracking ──Changed*──▶ tracking ──Ended/Cancelled──▶ idle
//! ```
//!
//! - **Began** starts a transition toward the opposite state (or re-grabs
//!   the one already running), pauses it, and records each animator's
//!   progress as the session baseline.
//! - **Changed** turns translation into a fraction of the travel distance
//!   and scrubs every animator to `baseline[i] + fraction`.
//! - **Ended** picks a direction from the release velocity, reverses the
//!   transition if it is heading the wrong way, and resumes it.
//! - **Cancelled** resumes without touching direction.
//!
//! # Invariants
//!
//! 1. All driven animators receive the same fraction delta, so they stay in
//!    lockstep.
//! 2. Scrub values are clamped to `[0, 1]`.
//! 3. A `Busy` rejection on `Began` is swallowed: the running transition is
//!    paused in place instead.
//! 4. Samples outside a session (suppressed or never begun) are ignored.

use drawerkit_core::geometry::Point;
use drawerkit_core::trace;

use crate::edge::DrawerEdge;
use crate::state::DrawerState;
use crate::transition::{TransitionController, TransitionError, TransitionHandle};

/// Whether to flip the running transition on release.
///
/// `heading` is the state the running transition targets. The decision is
/// the eight-row table:
///
/// | heading | should_close | is_reversed | reverse? |
/// |---|---|---|---|
/// | Open | false | false | no |
/// | Open | false | true | yes |
/// | Open | true | true | no |
/// | Open | true | false | yes |
/// | Closed | true | false | no |
/// | Closed | true | true | yes |
/// | Closed | false | true | no |
/// | Closed | false | false | yes |
#[must_use]
pub const fn should_reverse(heading: DrawerState, should_close: bool, is_reversed: bool) -> bool {
    match heading {
        DrawerState::Open => should_close != is_reversed,
        DrawerState::Closed => should_close == is_reversed,
    }
}

/// Per-gesture bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    /// Directional progress of each animator at `Began`.
    pub start_progress: Vec<f64>,
    /// Drawer state when the gesture began.
    pub current_state: DrawerState,
}

/// What happened on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// No session was active.
    Ignored,
    /// Resumed in the direction it was heading.
    Continued,
    /// Direction flipped, then resumed.
    Reversed,
}

/// Turns pan samples into transition controller calls.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    session: Option<GestureSession>,
    snap_on_zero_velocity: bool,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(snap_on_zero_velocity: bool) -> Self {
        Self {
            session: None,
            snap_on_zero_velocity,
        }
    }

    #[inline]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session.
    ///
    /// `request` is called only when the controller is idle and should ask
    /// it for a transition toward `state.opposite()`.
    pub fn began(
        &mut self,
        controller: &mut TransitionController,
        state: DrawerState,
        request: impl FnOnce(&mut TransitionController) -> Result<TransitionHandle, TransitionError>,
    ) {
        if controller.is_idle() {
            // Busy cannot happen here; any other failure leaves nothing to track.
            if request(controller).is_err() {
                return;
            }
        }
        controller.pause();
        let start_progress = controller.progress_each();
        trace!(
            state = state.as_str(),
            baseline = start_progress.first().copied().unwrap_or_default(),
            "pan began"
        );
        self.session = Some(GestureSession {
            start_progress,
            current_state: state,
        });
    }

    /// Scrub by `translation` over a travel range of `travel` points.
    ///
    /// Returns the signed fraction applied, or `None` outside a session.
    pub fn changed(
        &mut self,
        controller: &mut TransitionController,
        edge: DrawerEdge,
        translation: Point,
        travel: f64,
    ) -> Option<f64> {
        let session = self.session.as_ref()?;
        if !(travel.is_finite() && travel > 0.0) {
            return None;
        }
        let mut fraction = edge.opening_translation(translation) / travel;
        if session.current_state.is_open() {
            fraction = -fraction;
        }
        if controller.running().is_some_and(|r| r.is_reversed()) {
            fraction = -fraction;
        }
        let progress: Vec<f64> = session
            .start_progress
            .iter()
            .map(|baseline| (baseline + fraction).clamp(0.0, 1.0))
            .collect();
        controller.set_progress_each(&progress);
        trace!(fraction, "pan changed");
        Some(fraction)
    }

    /// Finish the session with a release `velocity`.
    pub fn ended(
        &mut self,
        controller: &mut TransitionController,
        edge: DrawerEdge,
        velocity: Point,
    ) -> ReleaseDecision {
        if self.session.take().is_none() {
            return ReleaseDecision::Ignored;
        }
        let Some(running) = controller.running() else {
            return ReleaseDecision::Ignored;
        };
        let heading = running.target();
        let is_reversed = running.is_reversed();
        let progress = running.progress();

        let flip = match edge.should_close(velocity) {
            Some(should_close) => should_reverse(heading, should_close, is_reversed),
            // Ambiguous release: keep going unless asked to settle at the
            // nearer end.
            None => self.snap_on_zero_velocity && progress < 0.5,
        };

        if flip {
            controller.reverse();
        }
        controller.resume(0.0);
        trace!(
            heading = heading.as_str(),
            reversed = flip,
            progress,
            "pan ended"
        );
        if flip {
            ReleaseDecision::Reversed
        } else {
            ReleaseDecision::Continued
        }
    }

    /// The host cancelled the gesture: resume unchanged.
    pub fn cancelled(&mut self, controller: &mut TransitionController) -> ReleaseDecision {
        if self.session.take().is_none() {
            return ReleaseDecision::Ignored;
        }
        controller.resume(0.0);
        trace!("pan cancelled");
        ReleaseDecision::Continued
    }
}
