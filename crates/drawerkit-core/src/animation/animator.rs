#![forbid(unsafe_code)]

//! Interruptible, scrubbable property animator.
//!
//! A [`PropertyAnimator`] moves one scalar from `from` to `to` over a
//! duration. Unlike a fire-and-forget tween it can be paused, scrubbed to an
//! arbitrary fraction, reversed in flight, and resumed with a fresh timing
//! segment that starts wherever the value currently is.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start──▶ Running ──tick(..)──▶ Finished(End | Start)
//!   │               ▲   │
//!   └──pause──▶ Paused ◀┘ pause
//!                 │  continue_animation
//!                 └──────────▶ Running
//! ```
//!
//! # Invariants
//!
//! 1. `fraction_complete()` stays in `[0.0, 1.0]` while scrubbing; spring
//!    overshoot can push it briefly outside while running.
//! 2. A started animator resolves exactly once: the first `tick` that
//!    reaches the end of its segment returns `Some(position)`; every later
//!    call returns `None`.
//! 3. Reversing twice restores the original direction.
//! 4. Resolution is `End` when running forward, `Start` when reversed.
//!
//! # Failure Modes
//!
//! - Zero duration or zero duration factor: the next `tick`, even with a
//!   zero `dt`, resolves immediately.
//! - Scrubbing a finished animator is ignored.

use std::time::Duration;

use super::{EasingFn, SpringTiming};

/// Where an animator came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatingPosition {
    /// Back at the `from` value (ran reversed).
    Start,
    /// At the `to` value.
    End,
    /// Stopped somewhere in between via [`PropertyAnimator::finish_at`].
    Current,
}

/// How fraction advances over normalized segment time.
#[derive(Debug, Clone, Copy)]
pub enum Timing {
    /// A fixed easing curve.
    Curve(EasingFn),
    /// A damped spring; initial velocity is replaced on each continue.
    Spring(SpringTiming),
}

impl Timing {
    fn value_at(&self, t: f64, initial_velocity: f64) -> f64 {
        match self {
            Self::Curve(easing) => easing(t.clamp(0.0, 1.0)),
            Self::Spring(spring) => spring
                .with_initial_velocity(initial_velocity)
                .value_at(t),
        }
    }
}

/// Playback phase of a [`PropertyAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    /// Never started.
    Idle,
    /// Advancing on `tick`.
    Running,
    /// Active but frozen; scrubbing happens here.
    Paused,
    /// Resolved at the recorded position.
    Finished(AnimatingPosition),
}

/// One timing segment: from `origin` toward the current target end.
#[derive(Debug, Clone, Copy)]
struct Segment {
    origin: f64,
    elapsed: Duration,
    length: Duration,
    initial_velocity: f64,
}

impl Segment {
    const fn at(origin: f64) -> Self {
        Self {
            origin,
            elapsed: Duration::ZERO,
            length: Duration::ZERO,
            initial_velocity: 0.0,
        }
    }
}

/// A pausable, reversible, scrubbable scalar animation.
#[derive(Debug, Clone)]
pub struct PropertyAnimator {
    from: f64,
    to: f64,
    duration: Duration,
    timing: Timing,
    phase: AnimatorPhase,
    fraction: f64,
    reversed: bool,
    segment: Segment,
}

impl PropertyAnimator {
    /// Create an idle animator from `from` to `to`.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, timing: Timing) -> Self {
        Self {
            from,
            to,
            duration,
            timing,
            phase: AnimatorPhase::Idle,
            fraction: 0.0,
            reversed: false,
            segment: Segment::at(0.0),
        }
    }

    /// Create an idle animator driven by a spring with `damping_ratio`.
    #[must_use]
    pub fn spring(from: f64, to: f64, duration: Duration, damping_ratio: f64) -> Self {
        Self::new(
            from,
            to,
            duration,
            Timing::Spring(SpringTiming::new(damping_ratio)),
        )
    }

    #[inline]
    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    #[inline]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> f64 {
        self.to
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, AnimatorPhase::Running)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, AnimatorPhase::Paused)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, AnimatorPhase::Finished(_))
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Linear progress from `from` (0.0) to `to` (1.0).
    #[inline]
    pub fn fraction_complete(&self) -> f64 {
        self.fraction
    }

    /// Current interpolated value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * self.fraction
    }

    /// The fraction this animator is heading toward.
    #[inline]
    fn target_fraction(&self) -> f64 {
        if self.reversed { 0.0 } else { 1.0 }
    }

    /// Begin (or restart) a timing segment from the current fraction.
    fn begin_segment(&mut self, initial_velocity: f64, duration_factor: f64) {
        let remaining = (self.target_fraction() - self.fraction).abs().min(1.0);
        let factor = if duration_factor.is_finite() {
            duration_factor.max(0.0)
        } else {
            1.0
        };
        self.segment = Segment {
            origin: self.fraction,
            elapsed: Duration::ZERO,
            length: self.duration.mul_f64(remaining * factor),
            initial_velocity,
        };
    }

    /// Start running from the current fraction.
    ///
    /// No-op unless idle.
    pub fn start(&mut self) {
        if self.phase == AnimatorPhase::Idle {
            self.begin_segment(0.0, 1.0);
            self.phase = AnimatorPhase::Running;
        }
    }

    /// Freeze in place. Pausing an idle animator activates it paused.
    pub fn pause(&mut self) {
        if matches!(self.phase, AnimatorPhase::Idle | AnimatorPhase::Running) {
            self.phase = AnimatorPhase::Paused;
        }
    }

    /// Scrub to `fraction`, clamped to `[0.0, 1.0]`.
    ///
    /// A running animator restarts its segment from the new fraction.
    pub fn set_fraction_complete(&mut self, fraction: f64) {
        if self.is_finished() || !fraction.is_finite() {
            return;
        }
        self.fraction = fraction.clamp(0.0, 1.0);
        if self.is_running() {
            self.begin_segment(0.0, 1.0);
        }
    }

    /// Set the direction. A running animator turns around in place.
    pub fn set_reversed(&mut self, reversed: bool) {
        if self.is_finished() || self.reversed == reversed {
            return;
        }
        self.reversed = reversed;
        if self.is_running() {
            let velocity = self.segment.initial_velocity;
            self.begin_segment(velocity, 1.0);
        }
    }

    /// Resume with a spring kick of `initial_velocity` and a remaining
    /// duration scaled by `duration_factor` (`0.0` resolves on next tick).
    pub fn continue_animation(&mut self, initial_velocity: f64, duration_factor: f64) {
        if matches!(self.phase, AnimatorPhase::Idle | AnimatorPhase::Paused | AnimatorPhase::Running) {
            self.begin_segment(initial_velocity, duration_factor);
            self.phase = AnimatorPhase::Running;
        }
    }

    /// Stop immediately at `position` without running the remaining time.
    pub fn finish_at(&mut self, position: AnimatingPosition) -> AnimatingPosition {
        match position {
            AnimatingPosition::Start => self.fraction = 0.0,
            AnimatingPosition::End => self.fraction = 1.0,
            AnimatingPosition::Current => {}
        }
        self.phase = AnimatorPhase::Finished(position);
        position
    }

    /// Advance by `dt`. Returns the resolved position exactly once.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimatingPosition> {
        if !self.is_running() {
            return None;
        }

        self.segment.elapsed = self.segment.elapsed.saturating_add(dt);
        let target = self.target_fraction();

        let t = if self.segment.length.is_zero() {
            1.0
        } else {
            self.segment.elapsed.as_secs_f64() / self.segment.length.as_secs_f64()
        };

        if t >= 1.0 {
            self.fraction = target;
            let position = if self.reversed {
                AnimatingPosition::Start
            } else {
                AnimatingPosition::End
            };
            self.phase = AnimatorPhase::Finished(position);
            return Some(position);
        }

        let eased = self.timing.value_at(t, self.segment.initial_velocity);
        self.fraction = self.segment.origin + (target - self.segment.origin) * eased;
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
