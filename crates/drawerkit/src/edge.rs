#![forbid(unsafe_code)]

//! Which container edge the drawer slides in from.
//!
//! Every direction-dependent rule lives here so the transition, gesture, and
//! layout code stay edge-agnostic:
//!
//! | | `Bottom` | `Side` |
//! |---|---|---|
//! | drag axis | vertical | horizontal |
//! | opening drag | up (−y) | right (+x) |
//! | closing fling | `vy > 0` | `vx < 0` |
//! | handle strip | top of drawer | right of drawer |
//! | safe-area inset | bottom, always | left, `LandscapeLeft` only |
//!
//! Offsets are measured along the drag axis relative to the fully open
//! position: `0.0` is open, negative values retract the drawer.

use drawerkit_core::geometry::{Insets, Point, Rect, Size};
use drawerkit_core::input::Axis;
use drawerkit_core::orientation::Orientation;

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

/// The container edge a drawer is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub enum DrawerEdge {
    /// Slides up from the bottom edge.
    #[default]
    Bottom,
    /// Slides right from the leading (left) edge.
    Side,
}

impl DrawerEdge {
    /// The drag axis.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Bottom => Axis::Vertical,
            Self::Side => Axis::Horizontal,
        }
    }

    /// `+1.0` if a positive axis translation opens the drawer, `-1.0` if it
    /// closes it.
    #[inline]
    pub const fn opening_sign(self) -> f64 {
        match self {
            Self::Bottom => -1.0,
            Self::Side => 1.0,
        }
    }

    /// Translation along the axis, positive when moving toward open.
    #[inline]
    pub fn opening_translation(self, translation: Point) -> f64 {
        self.opening_sign() * self.axis().of_point(translation)
    }

    /// Direction implied by a release velocity, `None` when it is exactly
    /// zero along the axis.
    pub fn should_close(self, velocity: Point) -> Option<bool> {
        let v = self.axis().of_point(velocity);
        if v == 0.0 || !v.is_finite() {
            return None;
        }
        Some(match self {
            Self::Bottom => v > 0.0,
            Self::Side => v < 0.0,
        })
    }

    /// Drawer size for a given extent along the axis and across it.
    #[inline]
    pub const fn drawer_size(self, extent: f64, cross: f64) -> Size {
        match self {
            Self::Bottom => Size::new(cross, extent),
            Self::Side => Size::new(extent, cross),
        }
    }

    /// Extent of `size` along the drag axis.
    #[inline]
    pub fn extent_of(self, size: Size) -> f64 {
        self.axis().of_size(size)
    }

    /// Extent of `size` across the drag axis.
    #[inline]
    pub fn cross_of(self, size: Size) -> f64 {
        self.axis().cross().of_size(size)
    }

    /// The safe-area inset the closed drawer must clear.
    ///
    /// The side drawer only needs it in `LandscapeLeft`, where the notched
    /// edge is on the leading side.
    pub fn safe_area_inset(self, orientation: Orientation, insets: Insets) -> f64 {
        let inset = match self {
            Self::Bottom => insets.bottom,
            Self::Side => match orientation {
                Orientation::LandscapeLeft => insets.left,
                _ => 0.0,
            },
        };
        inset.max(0.0)
    }

    /// `inset` placed on the container edge the drawer is anchored to.
    pub const fn anchored_insets(self, inset: f64) -> Insets {
        match self {
            Self::Bottom => Insets::new(0.0, 0.0, inset, 0.0),
            Self::Side => Insets::new(0.0, inset, 0.0, 0.0),
        }
    }

    /// Drawer frame inside `container` at `offset`.
    pub fn frame(self, container: Size, size: Size, offset: f64) -> Rect {
        match self {
            Self::Bottom => Rect::new(
                (container.width - size.width) / 2.0,
                container.height - size.height - offset,
                size.width,
                size.height,
            ),
            Self::Side => Rect::new(
                offset,
                (container.height - size.height) / 2.0,
                size.width,
                size.height,
            ),
        }
    }

    /// The handle strip, in drawer coordinates.
    pub fn handle_rect(self, size: Size, visible_extent: f64) -> Rect {
        match self {
            Self::Bottom => Rect::new(0.0, 0.0, size.width, visible_extent),
            Self::Side => Rect::new(
                size.width - visible_extent,
                0.0,
                visible_extent,
                size.height,
            ),
        }
    }

    /// The region content views are anchored to, in drawer coordinates.
    ///
    /// The side drawer keeps its handle strip clear of content.
    pub fn content_rect(self, size: Size, visible_extent: f64) -> Rect {
        match self {
            Self::Bottom => Rect::from_size(size),
            Self::Side => Rect::new(
                0.0,
                0.0,
                (size.width - visible_extent).max(0.0),
                size.height,
            ),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Side => "side",
        }
    }
}
