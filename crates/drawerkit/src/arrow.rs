#![forbid(unsafe_code)]

//! Handle chevron geometry.
//!
//! The arrow is a single quadratic curve with fixed endpoints on its
//! bounding box. Closed, the control point sits at the box center and the
//! curve is a straight bar. Open, the control point is pulled out so the bar
//! bends into a chevron pointing the way the drawer will close:
//!
//! - side edge: control at 40% of the width (points left),
//! - bottom edge: control at 150% of the height (points down).

use drawerkit_core::geometry::{Point, QuadCurve, Rect, Size};

use crate::config::ArrowSpec;
use crate::edge::DrawerEdge;
use crate::state::DrawerState;

/// Horizontal control position of an open side-drawer arrow.
pub const SIDE_OPEN_CONTROL_RATIO: f64 = 0.4;

/// Vertical control position of an open bottom-drawer arrow.
pub const BOTTOM_OPEN_CONTROL_RATIO: f64 = 1.5;

/// Arrow curve for `state` inside `bounds`.
pub fn arrow_path(edge: DrawerEdge, state: DrawerState, bounds: Rect) -> QuadCurve {
    let (start, end) = endpoints(edge, bounds);
    let control = match state {
        DrawerState::Closed => bounds.center(),
        DrawerState::Open => open_control(edge, bounds),
    };
    QuadCurve::new(start, control, end)
}

/// Arrow curve part-way between closed (`0.0`) and open (`1.0`).
///
/// Values outside `[0, 1]` extrapolate, so a bouncing spring bends the
/// arrow past its resting shapes.
pub fn arrow_path_morph(edge: DrawerEdge, bounds: Rect, t: f64) -> QuadCurve {
    let closed = arrow_path(edge, DrawerState::Closed, bounds);
    let open = arrow_path(edge, DrawerState::Open, bounds);
    closed.lerp(&open, t)
}

/// Where the arrow sits: centered in the handle strip.
pub fn arrow_bounds(edge: DrawerEdge, drawer: Size, visible_extent: f64, arrow: &ArrowSpec) -> Rect {
    let handle = edge.handle_rect(drawer, visible_extent);
    Rect::new(
        handle.mid_x() - arrow.width / 2.0,
        handle.mid_y() - arrow.height / 2.0,
        arrow.width,
        arrow.height,
    )
}

fn endpoints(edge: DrawerEdge, bounds: Rect) -> (Point, Point) {
    match edge {
        DrawerEdge::Bottom => (
            Point::new(bounds.min_x(), bounds.mid_y()),
            Point::new(bounds.max_x(), bounds.mid_y()),
        ),
        DrawerEdge::Side => (
            Point::new(bounds.mid_x(), bounds.min_y()),
            Point::new(bounds.mid_x(), bounds.max_y()),
        ),
    }
}

fn open_control(edge: DrawerEdge, bounds: Rect) -> Point {
    match edge {
        DrawerEdge::Bottom => Point::new(
            bounds.mid_x(),
            bounds.min_y() + bounds.height * BOTTOM_OPEN_CONTROL_RATIO,
        ),
        DrawerEdge::Side => Point::new(
            bounds.min_x() + bounds.width * SIDE_OPEN_CONTROL_RATIO,
            bounds.mid_y(),
        ),
    }
}
