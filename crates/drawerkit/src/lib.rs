#![forbid(unsafe_code)]

//! Interactive edge drawer.
//!
//! # Role in drawerkit
//! `drawerkit` is the widget crate. It decides *when* and *how far* a
//! drawer animates and computes its geometry; a host toolkit renders what
//! [`Drawer::presentation`] publishes.
//!
//! # Primary responsibilities
//! - **State**: [`DrawerState`] and the [`DrawerEdge`] that parameterizes
//!   bottom and side drawers.
//! - **Transitions**: [`TransitionController`], a single-slot, scrubbable,
//!   reversible transition over every driven property.
//! - **Gestures**: [`GestureInterpreter`], which maps pan samples onto the
//!   controller and picks a direction on release.
//! - **Layout**: [`LayoutRecalculator`], rotation- and safe-area-aware
//!   geometry.
//! - **Arrow**: the handle chevron as a quadratic curve.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use drawerkit::{Drawer, DrawerConfig, DrawerContainer, DrawerState};
//! use drawerkit_core::geometry::Size;
//!
//! struct Screen;
//!
//! impl DrawerContainer for Screen {
//!     fn bounds(&self) -> Size {
//!         Size::new(375.0, 667.0)
//!     }
//!
//!     fn detach_drawer(&mut self) {}
//! }
//!
//! let config = DrawerConfig::builder()
//!     .closed_extent(300.0)
//!     .visible_extent(25.0)
//!     .build()
//!     .unwrap();
//! let mut drawer = Drawer::new(Box::new(Screen), config);
//! drawer.layout();
//! drawer.change(DrawerState::Open, true).unwrap();
//! while drawer.is_transitioning() {
//!     drawer.tick(Duration::from_millis(16));
//! }
//! assert_eq!(drawer.state(), DrawerState::Open);
//! assert_eq!(drawer.presentation().values.offset, 0.0);
//! ```

pub mod arrow;
pub mod config;
pub mod drawer;
pub mod edge;
pub mod intercept;
pub mod interaction;
pub mod layout;
pub mod state;
pub mod transition;

pub use config::{ArrowSpec, BlurStyle, ConfigError, DrawerConfig, DrawerPolicies, Rgba};
pub use drawer::{ContentView, Drawer, DrawerContainer, HapticFeedback, Presentation};
pub use edge::DrawerEdge;
pub use intercept::{InterceptorSet, TouchInterceptor};
pub use interaction::{GestureInterpreter, GestureSession, ReleaseDecision, should_reverse};
pub use layout::{GeometrySnapshot, LayoutRecalculator, LayoutUpdate};
pub use state::DrawerState;
pub use transition::{
    DrivenProperty, PropertyValues, RunningTransition, TransitionController, TransitionError,
    TransitionHandle, TransitionOutcome, TransitionSpec,
};
