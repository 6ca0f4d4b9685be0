#![forbid(unsafe_code)]

//! Animation primitives: linear easing, spring timing, and the scrubbable
//! [`PropertyAnimator`].
//!
//! Everything here is driven by explicit `tick(dt)` calls. Nothing reads a
//! clock, so tests can step animations frame by frame and get identical
//! results on every run.

pub mod animator;
pub mod spring;

pub use animator::{AnimatingPosition, AnimatorPhase, PropertyAnimator, Timing};
pub use spring::SpringTiming;

/// An easing function over normalized time.
pub type EasingFn = fn(f64) -> f64;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}
