#![forbid(unsafe_code)]

//! Layout recalculator: geometry that follows container bounds and device
//! orientation.
//!
//! Orientation changes only mark the recalculator dirty; the next layout
//! pass consumes the flag and recomputes once. This keeps the recompute out
//! of the middle of the host's own layout churn.
//!
//! # Geometry
//!
//! - The drawer's portrait size is `edge.drawer_size(closed_extent, cross)`
//!   where `cross` is the configured cross extent or the portrait
//!   container's cross dimension.
//! - In landscape with `flip_extents_on_rotate`, width and height of that
//!   portrait size swap roles.
//! - `closed_offset = −(closed_extent − visible_extent − safe_area_inset)`,
//!   where `safe_area_inset` is zero unless `use_safe_area` is set.
//! - With `content_in_safe_area`, the content rect stops short of the
//!   safe-area inset on the drawer's anchored edge.
//!
//! # Invariants
//!
//! 1. Flat orientations (face up/down, unknown) never dirty the layout.
//! 2. `travel() >= 0` and `visible_extent > 0` for every snapshot.
//! 3. At most one recompute per dirty mark.

use drawerkit_core::geometry::{Insets, Rect, Size};
use drawerkit_core::orientation::Orientation;
use drawerkit_core::{debug, info};

use crate::arrow::arrow_bounds;
use crate::config::DrawerConfig;
use crate::edge::DrawerEdge;

/// Geometry derived from the container at one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub edge: DrawerEdge,
    /// Offset of the closed drawer (≤ 0).
    pub closed_offset: f64,
    pub visible_extent: f64,
    pub orientation: Orientation,
    pub flip_extents_on_rotate: bool,
    /// Inset the closed drawer clears; zero when `use_safe_area` is off.
    pub safe_area_inset: f64,
    /// Inset kept clear of content; zero when `content_in_safe_area` is off.
    pub content_inset: f64,
    pub container: Size,
    pub drawer_size: Size,
}

impl GeometrySnapshot {
    /// Derive geometry for `container` in `orientation`.
    pub fn compute(
        config: &DrawerConfig,
        container: Size,
        insets: Insets,
        orientation: Orientation,
    ) -> Self {
        let edge = config.edge();
        let policies = config.policies();
        let flip = policies.flip_extents_on_rotate;
        let landscape = orientation.is_landscape();

        let drawer_size = if landscape && flip {
            let portrait_container = container.transposed();
            let cross = config
                .cross_extent()
                .unwrap_or_else(|| edge.cross_of(portrait_container));
            edge.drawer_size(config.closed_extent(), cross).transposed()
        } else {
            let cross = config
                .cross_extent()
                .unwrap_or_else(|| edge.cross_of(container));
            edge.drawer_size(config.closed_extent(), cross)
        };

        let inset = edge.safe_area_inset(orientation, insets);
        let safe_area_inset = if policies.use_safe_area { inset } else { 0.0 };
        let content_inset = if policies.content_in_safe_area { inset } else { 0.0 };
        let closed_extent = edge.extent_of(drawer_size);
        let travel = (closed_extent - config.visible_extent() - safe_area_inset).max(0.0);

        Self {
            edge,
            closed_offset: -travel,
            visible_extent: config.visible_extent(),
            orientation,
            flip_extents_on_rotate: flip,
            safe_area_inset,
            content_inset,
            container,
            drawer_size,
        }
    }

    /// Drawer extent along the drag axis.
    #[inline]
    pub fn closed_extent(&self) -> f64 {
        self.edge.extent_of(self.drawer_size)
    }

    /// Distance between the open and closed offsets.
    #[inline]
    pub fn travel(&self) -> f64 {
        -self.closed_offset
    }

    /// Drawer frame in container coordinates at `offset`.
    pub fn frame_at(&self, offset: f64) -> Rect {
        self.edge.frame(self.container, self.drawer_size, offset)
    }

    /// Content region in drawer coordinates.
    pub fn content_rect(&self) -> Rect {
        self.edge
            .content_rect(self.drawer_size, self.visible_extent)
            .inset(self.edge.anchored_insets(self.content_inset))
    }

    /// Arrow bounds in drawer coordinates, when an arrow is configured.
    pub fn arrow_bounds(&self, config: &DrawerConfig) -> Option<Rect> {
        config
            .arrow()
            .map(|arrow| arrow_bounds(self.edge, self.drawer_size, self.visible_extent, arrow))
    }
}

/// Result of a layout pass that recomputed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutUpdate {
    pub snapshot: GeometrySnapshot,
    /// The orientation differs from the previous snapshot's.
    pub rotated: bool,
}

/// Tracks pending orientation changes and the last computed geometry.
#[derive(Debug, Clone)]
pub struct LayoutRecalculator {
    orientation: Orientation,
    dirty: bool,
    insets: Insets,
    snapshot: Option<GeometrySnapshot>,
}

impl LayoutRecalculator {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation: if orientation.is_flat() {
                Orientation::Portrait
            } else {
                orientation
            },
            dirty: true,
            insets: Insets::ZERO,
            snapshot: None,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.snapshot.as_ref()
    }

    /// A layout pass would recompute.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.snapshot.is_none()
    }

    /// Record an orientation signal. Returns `true` if it dirtied the layout.
    pub fn orientation_changed(&mut self, orientation: Orientation) -> bool {
        if orientation.is_flat() {
            debug!(orientation = orientation.as_str(), "flat orientation ignored");
            return false;
        }
        if orientation == self.orientation && !self.dirty {
            return false;
        }
        info!(
            from = self.orientation.as_str(),
            to = orientation.as_str(),
            "orientation changed"
        );
        self.orientation = orientation;
        self.dirty = true;
        true
    }

    /// Recompute if dirty or if the container changed size.
    pub fn layout_pass(
        &mut self,
        config: &DrawerConfig,
        container: Size,
        insets: Insets,
    ) -> Option<LayoutUpdate> {
        let resized = self
            .snapshot
            .is_some_and(|s| s.container != container || self.insets != insets);
        if !self.is_dirty() && !resized {
            return None;
        }
        self.dirty = false;
        self.insets = insets;

        let snapshot = GeometrySnapshot::compute(config, container, insets, self.orientation);
        let rotated = self
            .snapshot
            .is_some_and(|previous| previous.orientation != snapshot.orientation);
        debug!(
            orientation = snapshot.orientation.as_str(),
            width = snapshot.drawer_size.width,
            height = snapshot.drawer_size.height,
            closed_offset = snapshot.closed_offset,
            rotated,
            "layout recomputed"
        );
        self.snapshot = Some(snapshot);
        Some(LayoutUpdate { snapshot, rotated })
    }
}
