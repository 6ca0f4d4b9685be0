#![forbid(unsafe_code)]

//! Drawer configuration.
//!
//! A [`DrawerConfig`] is built once through [`DrawerConfigBuilder`] and never
//! changes afterwards. `build()` validates the geometry up front so the rest
//! of the widget can rely on it without re-checking.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use drawerkit::config::{BlurStyle, DrawerConfig};
//!
//! let config = DrawerConfig::builder()
//!     .closed_extent(300.0)
//!     .visible_extent(25.0)
//!     .corner_radius(12.0)
//!     .blur(BlurStyle::Dark)
//!     .duration(Duration::from_millis(400))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.corner_radius(), 12.0);
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::edge::DrawerEdge;
use crate::state::DrawerState;

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

/// Default transition duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// Default spring damping ratio.
pub const DEFAULT_DAMPING_RATIO: f64 = 0.8;

// ============================================================================
// Styling
// ============================================================================

/// Background blur behind an open drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub enum BlurStyle {
    #[default]
    None,
    Light,
    ExtraLight,
    Dark,
}

impl BlurStyle {
    #[inline]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Decorative chevron drawn in the handle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub struct ArrowSpec {
    pub width: f64,
    pub height: f64,
    pub color: Rgba,
}

impl ArrowSpec {
    pub const fn new(width: f64, height: f64, color: Rgba) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

// ============================================================================
// Policies
// ============================================================================

/// Behavioural switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub struct DrawerPolicies {
    /// Snap closed whenever the device rotates.
    pub close_on_rotation: bool,
    /// Close an open drawer when a content child is tapped.
    pub close_on_child_view_taps: bool,
    /// Close an open drawer when the drawer surface is tapped.
    pub close_on_drawer_taps: bool,
    /// Close an open drawer when the blur/background is tapped.
    pub close_on_blur_tapped: bool,
    /// Swap width and height in landscape.
    pub flip_extents_on_rotate: bool,
    /// The closed drawer clears the safe-area inset on its anchored edge.
    pub use_safe_area: bool,
    /// Content views stay out of the safe-area inset.
    pub content_in_safe_area: bool,
    /// Pulse the haptic engine on every state change.
    pub haptic_feedback: bool,
    /// On a release with zero velocity, settle at the nearest state instead
    /// of continuing the transition as it was heading.
    pub snap_on_zero_velocity: bool,
}

impl Default for DrawerPolicies {
    fn default() -> Self {
        Self {
            close_on_rotation: false,
            close_on_child_view_taps: false,
            close_on_drawer_taps: true,
            close_on_blur_tapped: false,
            flip_extents_on_rotate: false,
            use_safe_area: true,
            content_in_safe_area: true,
            haptic_feedback: true,
            snap_on_zero_velocity: false,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("closed extent is required")]
    MissingClosedExtent,
    #[error("visible extent is required")]
    MissingVisibleExtent,
    #[error("closed extent must be > 0 (got {0})")]
    InvalidClosedExtent(f64),
    #[error("visible extent must be > 0 (got {0})")]
    InvalidVisibleExtent(f64),
    #[error("visible extent {visible} must be smaller than closed extent {closed}")]
    HandleExceedsDrawer { visible: f64, closed: f64 },
    #[error("cross extent must be > 0 (got {0})")]
    InvalidCrossExtent(f64),
    #[error("corner radius must be >= 0 (got {0})")]
    InvalidCornerRadius(f64),
    #[error("damping ratio must be in (0, 1] (got {0})")]
    InvalidDampingRatio(f64),
    #[error("arrow size must be positive (got {width}x{height})")]
    InvalidArrow { width: f64, height: f64 },
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// ============================================================================
// Config
// ============================================================================

/// Immutable, validated drawer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerConfig {
    edge: DrawerEdge,
    closed_extent: f64,
    visible_extent: f64,
    cross_extent: Option<f64>,
    blur: BlurStyle,
    arrow: Option<ArrowSpec>,
    title: Option<String>,
    corner_radius: f64,
    duration: Duration,
    damping_ratio: f64,
    initial_state: DrawerState,
    policies: DrawerPolicies,
}

impl DrawerConfig {
    #[must_use]
    pub fn builder() -> DrawerConfigBuilder {
        DrawerConfigBuilder::default()
    }

    #[inline]
    pub fn edge(&self) -> DrawerEdge {
        self.edge
    }

    /// Full drawer extent along the drag axis (portrait).
    #[inline]
    pub fn closed_extent(&self) -> f64 {
        self.closed_extent
    }

    /// Handle extent that stays visible when closed.
    #[inline]
    pub fn visible_extent(&self) -> f64 {
        self.visible_extent
    }

    /// Extent across the drag axis; `None` fills the container.
    #[inline]
    pub fn cross_extent(&self) -> Option<f64> {
        self.cross_extent
    }

    #[inline]
    pub fn blur(&self) -> BlurStyle {
        self.blur
    }

    #[inline]
    pub fn arrow(&self) -> Option<&ArrowSpec> {
        self.arrow.as_ref()
    }

    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[inline]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    #[inline]
    pub fn initial_state(&self) -> DrawerState {
        self.initial_state
    }

    #[inline]
    pub fn policies(&self) -> &DrawerPolicies {
        &self.policies
    }
}

/// Builder for [`DrawerConfig`].
#[derive(Debug, Clone, Default)]
pub struct DrawerConfigBuilder {
    edge: DrawerEdge,
    closed_extent: Option<f64>,
    visible_extent: Option<f64>,
    cross_extent: Option<f64>,
    blur: BlurStyle,
    arrow: Option<ArrowSpec>,
    title: Option<String>,
    corner_radius: f64,
    duration: Option<Duration>,
    damping_ratio: Option<f64>,
    initial_state: DrawerState,
    policies: DrawerPolicies,
}

impl DrawerConfigBuilder {
    #[must_use]
    pub fn edge(mut self, edge: DrawerEdge) -> Self {
        self.edge = edge;
        self
    }

    #[must_use]
    pub fn closed_extent(mut self, extent: f64) -> Self {
        self.closed_extent = Some(extent);
        self
    }

    #[must_use]
    pub fn visible_extent(mut self, extent: f64) -> Self {
        self.visible_extent = Some(extent);
        self
    }

    #[must_use]
    pub fn cross_extent(mut self, extent: f64) -> Self {
        self.cross_extent = Some(extent);
        self
    }

    #[must_use]
    pub fn blur(mut self, blur: BlurStyle) -> Self {
        self.blur = blur;
        self
    }

    #[must_use]
    pub fn arrow(mut self, arrow: ArrowSpec) -> Self {
        self.arrow = Some(arrow);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn damping_ratio(mut self, ratio: f64) -> Self {
        self.damping_ratio = Some(ratio);
        self
    }

    #[must_use]
    pub fn initial_state(mut self, state: DrawerState) -> Self {
        self.initial_state = state;
        self
    }

    /// Replace all policies at once.
    #[must_use]
    pub fn policies(mut self, policies: DrawerPolicies) -> Self {
        self.policies = policies;
        self
    }

    #[must_use]
    pub fn close_on_rotation(mut self, enabled: bool) -> Self {
        self.policies.close_on_rotation = enabled;
        self
    }

    #[must_use]
    pub fn close_on_child_view_taps(mut self, enabled: bool) -> Self {
        self.policies.close_on_child_view_taps = enabled;
        self
    }

    #[must_use]
    pub fn close_on_drawer_taps(mut self, enabled: bool) -> Self {
        self.policies.close_on_drawer_taps = enabled;
        self
    }

    #[must_use]
    pub fn close_on_blur_tapped(mut self, enabled: bool) -> Self {
        self.policies.close_on_blur_tapped = enabled;
        self
    }

    #[must_use]
    pub fn flip_extents_on_rotate(mut self, enabled: bool) -> Self {
        self.policies.flip_extents_on_rotate = enabled;
        self
    }

    #[must_use]
    pub fn use_safe_area(mut self, enabled: bool) -> Self {
        self.policies.use_safe_area = enabled;
        self
    }

    #[must_use]
    pub fn content_in_safe_area(mut self, enabled: bool) -> Self {
        self.policies.content_in_safe_area = enabled;
        self
    }

    #[must_use]
    pub fn haptic_feedback(mut self, enabled: bool) -> Self {
        self.policies.haptic_feedback = enabled;
        self
    }

    #[must_use]
    pub fn snap_on_zero_velocity(mut self, enabled: bool) -> Self {
        self.policies.snap_on_zero_velocity = enabled;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<DrawerConfig, ConfigError> {
        let closed_extent = self
            .closed_extent
            .ok_or(ConfigError::MissingClosedExtent)?;
        let visible_extent = self
            .visible_extent
            .ok_or(ConfigError::MissingVisibleExtent)?;

        if !positive(closed_extent) {
            return Err(ConfigError::InvalidClosedExtent(closed_extent));
        }
        if !positive(visible_extent) {
            return Err(ConfigError::InvalidVisibleExtent(visible_extent));
        }
        if visible_extent >= closed_extent {
            return Err(ConfigError::HandleExceedsDrawer {
                visible: visible_extent,
                closed: closed_extent,
            });
        }
        if let Some(cross) = self.cross_extent
            && !positive(cross)
        {
            return Err(ConfigError::InvalidCrossExtent(cross));
        }
        if !(self.corner_radius.is_finite() && self.corner_radius >= 0.0) {
            return Err(ConfigError::InvalidCornerRadius(self.corner_radius));
        }
        let damping_ratio = self.damping_ratio.unwrap_or(DEFAULT_DAMPING_RATIO);
        if !(damping_ratio.is_finite() && damping_ratio > 0.0 && damping_ratio <= 1.0) {
            return Err(ConfigError::InvalidDampingRatio(damping_ratio));
        }
        if let Some(arrow) = &self.arrow
            && !(positive(arrow.width) && positive(arrow.height))
        {
            return Err(ConfigError::InvalidArrow {
                width: arrow.width,
                height: arrow.height,
            });
        }

        Ok(DrawerConfig {
            edge: self.edge,
            closed_extent,
            visible_extent,
            cross_extent: self.cross_extent,
            blur: self.blur,
            arrow: self.arrow,
            title: self.title,
            corner_radius: self.corner_radius,
            duration: self.duration.unwrap_or(DEFAULT_DURATION),
            damping_ratio,
            initial_state: self.initial_state,
            policies: self.policies,
        })
    }
}
