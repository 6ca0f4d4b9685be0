#![forbid(unsafe_code)]

//! Normalized pointer input as delivered by a host gesture recognizer.
//!
//! Pan and tap *recognition* belongs to the host; these types carry the
//! already-recognized samples into the widget. Translation is cumulative
//! from the gesture's start, velocity is in points per second.

use crate::geometry::{Point, Size};

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

/// Screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component of a point/vector along this axis.
    #[inline]
    pub fn of_point(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Extent of a size along this axis.
    #[inline]
    pub fn of_size(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Phase of a continuous pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSample {
    pub phase: PanPhase,
    /// Touch location in container coordinates.
    pub location: Point,
    /// Cumulative translation since `Began`.
    pub translation: Point,
    /// Instantaneous velocity (points/second).
    pub velocity: Point,
}

impl PanSample {
    /// Gesture start at `location`.
    #[must_use]
    pub fn began(location: Point) -> Self {
        Self {
            phase: PanPhase::Began,
            location,
            translation: Point::ZERO,
            velocity: Point::ZERO,
        }
    }

    /// Movement update.
    #[must_use]
    pub fn changed(location: Point, translation: Point, velocity: Point) -> Self {
        Self {
            phase: PanPhase::Changed,
            location,
            translation,
            velocity,
        }
    }

    /// Finger lifted with `velocity`.
    #[must_use]
    pub fn ended(location: Point, translation: Point, velocity: Point) -> Self {
        Self {
            phase: PanPhase::Ended,
            location,
            translation,
            velocity,
        }
    }

    /// Gesture cancelled by the host (e.g. interrupted by the system).
    #[must_use]
    pub fn cancelled(location: Point) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            location,
            translation: Point::ZERO,
            velocity: Point::ZERO,
        }
    }
}

/// What a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// The drawer surface itself (handle or chrome).
    Drawer,
    /// A child of the drawer's content view.
    Content,
    /// The dimming/blur layer behind an open drawer.
    Background,
}

/// A recognized single tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub target: TapTarget,
    pub location: Point,
}

impl TapEvent {
    #[must_use]
    pub fn new(target: TapTarget, location: Point) -> Self {
        Self { target, location }
    }
}
