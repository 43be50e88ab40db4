use edgecurve::bezier::{BezierEdge, ControlSlot, CurveState};
use edgecurve::edge::EdgeCore;
use edgecurve::error::EdgeError;
use edgecurve::geometry::control::{bezier_control_points, BezierControlParams};
use edgecurve::geometry::path::cubic_path;
use edgecurve::model::{EdgeRecord, EdgeType, NodeShape, Point};

const SRC: NodeShape = NodeShape::new(0.0, 0.0, 100.0, 80.0);
const DST: NodeShape = NodeShape::new(400.0, 0.0, 100.0, 80.0);

fn fresh(id: u32, start: Point, end: Point) -> BezierEdge {
    BezierEdge::new(EdgeCore::new(id, 1, 2, start, end), SRC, DST, 100.0)
}

fn no_edges() -> Vec<EdgeRecord> {
    Vec::new()
}

fn path_of(points: &[Point]) -> String {
    cubic_path(&[points[0], points[1], points[2], points[3]])
}

#[test]
fn initialize_builds_four_points_and_matching_path() {
    let start = Point::new(50.0, 12.5);
    let end = Point::new(350.0, -7.25);
    let mut e = fresh(0, start, end);
    e.initialize(&no_edges());
    let pts = e.points_list();
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[0], start);
    assert_eq!(pts[3], end);
    assert_eq!(e.path(), path_of(pts));
    assert_eq!(e.state(), CurveState::Initialized);
}

#[test]
fn initialize_twice_only_rerenders() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    let first = e.initialize(&no_edges());
    // Siblings that would displace both controls if the edge re-derived.
    let crowd: Vec<EdgeRecord> = [(1, -30.0), (2, 30.0)]
        .into_iter()
        .map(|(id, y)| EdgeRecord {
            id,
            source_node_id: 1,
            target_node_id: 2,
            kind: EdgeType::Bezier,
            points_list: vec![
                Point::new(50.0, 0.0),
                Point::new(150.0, y),
                Point::new(250.0, y),
                Point::new(350.0, 0.0),
            ],
        })
        .collect();
    let second = e.initialize(&crowd);
    assert_eq!(first.path, second.path);
    assert_eq!(first.points_list, second.points_list);
    assert_ne!(e.recompute(&crowd).path, first.path);
}

#[test]
fn recompute_picks_up_siblings() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    let sibling = |id: u32, a: Point, b: Point| EdgeRecord {
        id,
        source_node_id: 1,
        target_node_id: 2,
        kind: EdgeType::Bezier,
        points_list: vec![Point::new(50.0, 0.0), a, b, Point::new(350.0, 0.0)],
    };
    // One sibling on each side: the tie sends the control past the lower one.
    let crowd = vec![
        sibling(1, Point::new(140.0, -30.0), Point::new(260.0, -30.0)),
        sibling(2, Point::new(160.0, 30.0), Point::new(240.0, 30.0)),
    ];
    let snap = e.recompute(&crowd);
    assert_eq!(snap.points_list[1], Point::new(140.0, -70.0));
    assert_eq!(snap.points_list[2], Point::new(260.0, -70.0));
    assert_eq!(snap.path, "M 50 0 C 140 -70, 260 -70, 350 0");
    assert_eq!(e.state(), CurveState::Updated);
}

#[test]
fn reflow_keeps_manual_control() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    let p = Point::new(123.0, -45.5);
    e.adjust_control(p, ControlSlot::NearSource).unwrap();
    let new_end = Point::new(360.0, 30.0);
    e.set_end_point(new_end);
    let pts = e.points_list();
    assert_eq!(pts[1], p);
    assert_eq!(pts[3], new_end);
    assert_eq!(e.end_point(), new_end);
    assert_eq!(e.path(), path_of(pts));
}

#[test]
fn set_start_point_moves_only_start() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    let before = e.points_list().to_vec();
    e.set_start_point(Point::new(0.0, 40.0));
    let after = e.points_list();
    assert_eq!(after[0], Point::new(0.0, 40.0));
    assert_eq!(&after[1..], &before[1..]);
}

#[test]
fn adjust_near_target_rewrites_slot_two() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    let snap = e.adjust_control(Point::new(300.0, 80.0), ControlSlot::NearTarget).unwrap();
    assert_eq!(snap.path, "M 50 0 C 150 0, 300 80, 350 0");
    assert_eq!(e.start_point(), Point::new(50.0, 0.0));
    assert_eq!(e.end_point(), Point::new(350.0, 0.0));
}

#[test]
fn single_edge_gets_baseline_controls() {
    let start = Point::new(0.0, 40.0);
    let end = Point::new(350.0, 0.0);
    let mut e = fresh(0, start, end);
    e.initialize(&no_edges());
    let base = bezier_control_points(&BezierControlParams {
        start,
        end,
        source_node: SRC,
        target_node: DST,
        offset: 100.0,
    });
    assert_eq!(e.points_list()[1], base.control_a);
    assert_eq!(e.points_list()[2], base.control_b);
}

#[test]
fn text_anchor_is_mean_of_points() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 3.0),
        Point::new(3.0, 1.0),
        Point::new(4.0, 4.0),
    ];
    let mut e = BezierEdge::with_points(
        EdgeCore::new(0, 1, 2, pts[0], pts[3]),
        SRC,
        DST,
        100.0,
        pts,
    );
    e.initialize(&no_edges());
    assert_eq!(e.text_anchor(), Point::new(2.0, 2.0));
}

#[test]
fn text_anchor_before_initialize_is_anchor_midpoint() {
    let e = fresh(0, Point::new(0.0, 0.0), Point::new(4.0, 4.0));
    assert_eq!(e.text_anchor(), Point::new(2.0, 2.0));
}

#[test]
fn invalid_selector_changes_nothing() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    let points = e.points_list().to_vec();
    let path = e.path().to_string();
    let err = e.adjust_control_named(Point::new(1.0, 1.0), "middle").unwrap_err();
    assert_eq!(err, EdgeError::InvalidSelector("middle".into()));
    assert_eq!(e.points_list(), &points[..]);
    assert_eq!(e.path(), path);
}

#[test]
fn named_selectors_accept_both_spellings() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    e.adjust_control_named(Point::new(1.0, 2.0), "sNext").unwrap();
    e.adjust_control_named(Point::new(3.0, 4.0), "near-target").unwrap();
    assert_eq!(e.points_list()[1], Point::new(1.0, 2.0));
    assert_eq!(e.points_list()[2], Point::new(3.0, 4.0));
}

#[test]
fn data_snapshot_does_not_follow_later_edits() {
    let mut e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    e.initialize(&no_edges());
    let taken = e.data();
    e.adjust_control(Point::new(0.0, 999.0), ControlSlot::NearSource).unwrap();
    assert_eq!(taken.points_list[1], Point::new(150.0, 0.0));
    assert_eq!(taken.kind, EdgeType::Bezier);
    assert_eq!(e.data().points_list[1], Point::new(0.0, 999.0));
}

#[test]
fn uninitialized_data_has_no_points() {
    let e = fresh(0, Point::new(50.0, 0.0), Point::new(350.0, 0.0));
    let v = serde_json::to_value(e.data()).unwrap();
    assert!(v.get("pointsList").is_none());
    assert_eq!(v["type"], "bezier");
}
