#![forbid(unsafe_code)]

//! Core: geometry, timing curves, scrubbable animators, and input types.
//!
//! # Role in drawerkit
//! `drawerkit-core` holds everything the drawer widget needs that is not
//! specific to drawers: plain geometry values, spring timing, the
//! pausable/reversible [`PropertyAnimator`](animation::PropertyAnimator),
//! normalized pan/tap input, and device orientation delivery.
//!
//! # Primary responsibilities
//! - **Geometry**: `f64` points, sizes, rects, insets, and quadratic curves.
//! - **Animation**: easing, spring timing, and the tick-driven animator the
//!   host advances once per frame.
//! - **Input**: pan samples and tap events as delivered by a host gesture
//!   recognizer.
//! - **Orientation**: an explicit subscribe/publish notifier.
//!
//! # How it fits in the system
//! The widget crate (`drawerkit`) consumes these types and never talks to a
//! rendering toolkit directly. The host feeds input and ticks; the widget
//! publishes values to render.

pub mod animation;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod orientation;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace};
