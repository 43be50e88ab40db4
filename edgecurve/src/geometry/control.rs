//! Baseline control points for a connector leaving and entering node shapes.
//!
//! Each control point is its anchor pushed outward, along the normal of the
//! shape side the anchor sits on, by the theme offset. Curves therefore leave
//! and enter shapes perpendicular to the side they attach to.

use super::tolerance::{near_zero, EPS_LEN};
use crate::model::{NodeShape, Point};

#[derive(Clone, Copy, Debug)]
pub struct BezierControlParams {
    pub start: Point,
    pub end: Point,
    pub source_node: NodeShape,
    pub target_node: NodeShape,
    pub offset: f32,
}

/// Interior points of a cubic: `control_a` near the source, `control_b` near the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierControls {
    pub control_a: Point,
    pub control_b: Point,
}

pub fn bezier_control_points(params: &BezierControlParams) -> BezierControls {
    BezierControls {
        control_a: push_out(params.start, &params.source_node, params.offset),
        control_b: push_out(params.end, &params.target_node, params.offset),
    }
}

fn push_out(anchor: Point, shape: &NodeShape, offset: f32) -> Point {
    let (nx, ny) = outward_normal(anchor, shape);
    Point::new(anchor.x + nx * offset, anchor.y + ny * offset)
}

// Unit normal of the side `anchor` lies on. Distances are normalized by the
// half extents so anchors on wide shapes are not biased toward left/right.
fn outward_normal(anchor: Point, shape: &NodeShape) -> (f32, f32) {
    let dx = anchor.x - shape.x;
    let dy = anchor.y - shape.y;
    let vertical = (0.0, if dy < 0.0 { -1.0 } else { 1.0 });
    let hw = shape.width * 0.5;
    let hh = shape.height * 0.5;
    if near_zero(hw, EPS_LEN) || near_zero(hh, EPS_LEN) {
        return vertical;
    }
    if dx.abs() / hw > dy.abs() / hh {
        (if dx < 0.0 { -1.0 } else { 1.0 }, 0.0)
    } else {
        vertical
    }
}
