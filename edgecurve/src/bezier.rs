//! Cubic bezier connector state.
//!
//! A [`BezierEdge`] owns the four-point list `[start, control_a, control_b,
//! end]` and the path string derived from it. Every mutator rebuilds the path
//! before returning and hands back a [`CurveSnapshot`], so callers never see
//! points and path out of step.

use crate::deriver::{derive_controls, SiblingControls};
use crate::edge::{EdgeCore, EdgeData};
use crate::error::EdgeError;
use crate::geometry::control::BezierControlParams;
use crate::geometry::path::cubic_path;
use crate::model::{EdgeType, GraphSnapshot, NodeShape, Point};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveState {
    Empty,
    Initialized,
    Updated,
}

/// Which interior control point a manual adjustment targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlSlot {
    NearSource,
    NearTarget,
}

impl ControlSlot {
    fn index(self) -> usize {
        match self {
            ControlSlot::NearSource => 1,
            ControlSlot::NearTarget => 2,
        }
    }
}

impl FromStr for ControlSlot {
    type Err = EdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "near-source" | "sNext" => Ok(ControlSlot::NearSource),
            "near-target" | "ePre" => Ok(ControlSlot::NearTarget),
            other => Err(EdgeError::InvalidSelector(other.to_string())),
        }
    }
}

/// Owned copy of the curve after a mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSnapshot {
    pub points_list: Vec<Point>,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct BezierEdge {
    core: EdgeCore,
    source_node: NodeShape,
    target_node: NodeShape,
    offset: f32,
    points: Option<[Point; 4]>,
    path: String,
    state: CurveState,
}

impl BezierEdge {
    pub const MODEL_TYPE: EdgeType = EdgeType::Bezier;

    pub fn new(core: EdgeCore, source_node: NodeShape, target_node: NodeShape, offset: f32) -> Self {
        Self {
            core,
            source_node,
            target_node,
            offset,
            points: None,
            path: String::new(),
            state: CurveState::Empty,
        }
    }

    /// Edge restored with previously stored points. [`initialize`](Self::initialize)
    /// will only re-render them.
    pub fn with_points(
        core: EdgeCore,
        source_node: NodeShape,
        target_node: NodeShape,
        offset: f32,
        points: [Point; 4],
    ) -> Self {
        Self {
            points: Some(points),
            ..Self::new(core, source_node, target_node, offset)
        }
    }

    pub fn core(&self) -> &EdgeCore {
        &self.core
    }
    pub(crate) fn core_mut(&mut self) -> &mut EdgeCore {
        &mut self.core
    }
    pub fn id(&self) -> u32 {
        self.core.id()
    }
    pub fn start_point(&self) -> Point {
        self.core.start_point()
    }
    pub fn end_point(&self) -> Point {
        self.core.end_point()
    }
    pub fn source_node(&self) -> NodeShape {
        self.source_node
    }
    pub fn target_node(&self) -> NodeShape {
        self.target_node
    }
    pub fn offset(&self) -> f32 {
        self.offset
    }
    pub fn state(&self) -> CurveState {
        self.state
    }
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Either empty or exactly four points.
    pub fn points_list(&self) -> &[Point] {
        match &self.points {
            Some(p) => p,
            None => &[],
        }
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn set_source_node(&mut self, shape: NodeShape) {
        self.source_node = shape;
    }

    pub fn set_target_node(&mut self, shape: NodeShape) {
        self.target_node = shape;
    }

    pub fn snapshot(&self) -> CurveSnapshot {
        CurveSnapshot {
            points_list: self.points_list().to_vec(),
            path: self.path.clone(),
        }
    }

    /// Render stored points, or derive them when there are none yet.
    pub fn initialize<G: GraphSnapshot + ?Sized>(&mut self, graph: &G) -> CurveSnapshot {
        match self.points {
            Some(points) => self.commit(points, CurveState::Initialized),
            None => {
                let points = self.derive_points(graph);
                self.commit(points, CurveState::Initialized)
            }
        }
    }

    /// Re-derive both controls against the current siblings in `graph`.
    pub fn recompute<G: GraphSnapshot + ?Sized>(&mut self, graph: &G) -> CurveSnapshot {
        let points = self.derive_points(graph);
        log::debug!("edge {} recomputed", self.id());
        self.commit(points, CurveState::Updated)
    }

    /// Re-snapshot the anchors while keeping both controls as they are.
    ///
    /// Does nothing to points or path on an edge that has none yet.
    pub fn reflow(&mut self) -> CurveSnapshot {
        let Some([_, a, b, _]) = self.points else {
            return self.snapshot();
        };
        let points = [self.start_point(), a, b, self.end_point()];
        self.commit(points, CurveState::Updated)
    }

    pub fn set_start_point(&mut self, anchor: Point) -> CurveSnapshot {
        self.core.set_start_point(anchor);
        self.reflow()
    }

    pub fn set_end_point(&mut self, anchor: Point) -> CurveSnapshot {
        self.core.set_end_point(anchor);
        self.reflow()
    }

    /// Overwrite one control point, as when its handle is dragged.
    pub fn adjust_control(&mut self, point: Point, which: ControlSlot) -> Result<CurveSnapshot, EdgeError> {
        let Some(mut points) = self.points else {
            return Err(EdgeError::NotInitialized);
        };
        points[which.index()] = point;
        Ok(self.commit(points, CurveState::Updated))
    }

    /// [`adjust_control`](Self::adjust_control) with a string selector.
    pub fn adjust_control_named(&mut self, point: Point, which: &str) -> Result<CurveSnapshot, EdgeError> {
        let slot = which.parse::<ControlSlot>().map_err(|e| {
            log::warn!("edge {}: rejected control selector '{}'", self.id(), which);
            e
        })?;
        self.adjust_control(point, slot)
    }

    /// Label position: mean of the curve points, or the anchor midpoint before
    /// any points exist.
    pub fn text_anchor(&self) -> Point {
        match &self.points {
            Some(points) => {
                let n = points.len() as f32;
                let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
                Point::new(sx / n, sy / n)
            }
            None => self.start_point().midpoint(self.end_point()),
        }
    }

    pub fn data(&self) -> EdgeData {
        EdgeData {
            points_list: self.points_list().to_vec(),
            ..self.core.data(Self::MODEL_TYPE)
        }
    }

    fn derive_points<G: GraphSnapshot + ?Sized>(&self, graph: &G) -> [Point; 4] {
        let start = self.start_point();
        let end = self.end_point();
        let records = graph.edge_records();
        let siblings = SiblingControls::collect(
            &records,
            self.id(),
            self.core.source_node_id(),
            self.core.target_node_id(),
        );
        let controls = derive_controls(
            &BezierControlParams {
                start,
                end,
                source_node: self.source_node,
                target_node: self.target_node,
                offset: self.offset,
            },
            &siblings,
        );
        [start, controls.control_a, controls.control_b, end]
    }

    fn commit(&mut self, points: [Point; 4], state: CurveState) -> CurveSnapshot {
        self.path = cubic_path(&points);
        self.points = Some(points);
        self.state = state;
        self.snapshot()
    }
}
