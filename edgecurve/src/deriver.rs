//! Control-point derivation with sibling fan-out.
//!
//! When several bezier connectors run between the same ordered node pair,
//! their baseline controls coincide. Each control point is pushed just past
//! the most extreme sibling on the side opposite the sibling majority, so
//! repeated edges fan outward. The decision depends only on sibling
//! geometry and is re-evaluated on every derivation.
//!
//! Sibling lookup scans the whole container snapshot: O(edges) per call.

use crate::geometry::control::{bezier_control_points, BezierControlParams, BezierControls};
use crate::model::{EdgeRecord, EdgeType, Point};

/// Vertical gap kept between a displaced control and the sibling it lands on.
pub const SIBLING_SPREAD: f32 = 40.0;

/// Control points of sibling edges, split by curve end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiblingControls {
    pub near_source: Vec<Point>,
    pub near_target: Vec<Point>,
}

impl SiblingControls {
    /// Bezier edges sharing the exact ordered `(source, target)` pair, other
    /// than `edge_id` itself. Edges with no derived points are skipped.
    pub fn collect(records: &[EdgeRecord], edge_id: u32, source: u32, target: u32) -> Self {
        let mut out = SiblingControls::default();
        for r in records {
            if r.id == edge_id
                || r.kind != EdgeType::Bezier
                || r.source_node_id != source
                || r.target_node_id != target
            {
                continue;
            }
            if let (Some(a), Some(b)) = (r.points_list.get(1), r.points_list.get(2)) {
                out.near_source.push(*a);
                out.near_target.push(*b);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.near_source.is_empty() && self.near_target.is_empty()
    }
}

pub fn derive_controls(params: &BezierControlParams, siblings: &SiblingControls) -> BezierControls {
    let base = bezier_control_points(params);
    if siblings.is_empty() {
        return base;
    }
    let control_a = displace(base.control_a, &siblings.near_source);
    let control_b = displace(base.control_b, &siblings.near_target);
    log::trace!(
        "sibling displacement: a ({}, {}) -> ({}, {}), b ({}, {}) -> ({}, {})",
        base.control_a.x,
        base.control_a.y,
        control_a.x,
        control_a.y,
        base.control_b.x,
        base.control_b.y,
        control_b.x,
        control_b.y
    );
    BezierControls {
        control_a,
        control_b,
    }
}

/// Displace one control point against the matching controls of its siblings.
///
/// More siblings below `p` than above: jump onto the highest-y sibling above
/// and add [`SIBLING_SPREAD`]. Otherwise jump onto the lowest-y sibling below
/// and subtract it. With nobody on the chosen side `p` is returned untouched.
pub fn displace(p: Point, siblings: &[Point]) -> Point {
    let below = siblings.iter().filter(|s| s.y < p.y).count();
    let above = siblings.iter().filter(|s| s.y > p.y).count();
    if below > above {
        let mut best: Option<Point> = None;
        for s in siblings.iter().filter(|s| s.y > p.y) {
            if best.map_or(true, |b| s.y > b.y) {
                best = Some(*s);
            }
        }
        best.map_or(p, |b| Point::new(b.x, b.y + SIBLING_SPREAD))
    } else {
        let mut best: Option<Point> = None;
        for s in siblings.iter().filter(|s| s.y < p.y) {
            if best.map_or(true, |b| s.y < b.y) {
                best = Some(*s);
            }
        }
        best.map_or(p, |b| Point::new(b.x, b.y - SIBLING_SPREAD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u32, s: u32, t: u32, kind: EdgeType, a: Point, b: Point) -> EdgeRecord {
        EdgeRecord {
            id,
            source_node_id: s,
            target_node_id: t,
            kind,
            points_list: vec![Point::new(0.0, 0.0), a, b, Point::new(100.0, 0.0)],
        }
    }

    #[test]
    fn no_siblings_is_noop() {
        let p = Point::new(5.0, 7.0);
        assert_eq!(displace(p, &[]), p);
    }

    #[test]
    fn tie_vote_moves_past_lowest_sibling() {
        let sibs = [Point::new(10.0, 100.0), Point::new(20.0, 120.0)];
        assert_eq!(displace(Point::new(0.0, 110.0), &sibs), Point::new(10.0, 60.0));
    }

    #[test]
    fn majority_below_moves_past_highest_sibling_above() {
        let sibs = [
            Point::new(1.0, 10.0),
            Point::new(2.0, 20.0),
            Point::new(3.0, 90.0),
        ];
        assert_eq!(displace(Point::new(0.0, 50.0), &sibs), Point::new(3.0, 130.0));
    }

    #[test]
    fn majority_below_with_nothing_above_keeps_point() {
        let sibs = [Point::new(1.0, 10.0), Point::new(2.0, 20.0)];
        let p = Point::new(0.0, 50.0);
        assert_eq!(displace(p, &sibs), p);
    }

    #[test]
    fn level_siblings_keep_point() {
        let sibs = [Point::new(1.0, 50.0), Point::new(9.0, 50.0)];
        let p = Point::new(0.0, 50.0);
        assert_eq!(displace(p, &sibs), p);
    }

    #[test]
    fn extreme_tie_takes_first_sibling() {
        let sibs = [
            Point::new(7.0, 10.0),
            Point::new(8.0, 10.0),
            Point::new(9.0, 60.0),
            Point::new(10.0, 70.0),
        ];
        assert_eq!(displace(Point::new(0.0, 50.0), &sibs), Point::new(7.0, -30.0));
    }

    #[test]
    fn collect_filters_pair_kind_and_self() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 2.0);
        let records = vec![
            rec(0, 1, 2, EdgeType::Bezier, a, b),
            rec(1, 2, 1, EdgeType::Bezier, a, b),
            rec(2, 1, 2, EdgeType::Line, a, b),
            rec(3, 1, 2, EdgeType::Bezier, Point::new(3.0, 3.0), Point::new(4.0, 4.0)),
            EdgeRecord {
                id: 4,
                source_node_id: 1,
                target_node_id: 2,
                kind: EdgeType::Bezier,
                points_list: Vec::new(),
            },
        ];
        let sibs = SiblingControls::collect(&records, 3, 1, 2);
        assert_eq!(sibs.near_source, vec![a]);
        assert_eq!(sibs.near_target, vec![b]);
    }
}
