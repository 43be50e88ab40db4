//! Generic edge state shared by every connector kind.

use crate::bezier::BezierEdge;
use crate::geometry::limits;
use crate::geometry::path::line_path;
use crate::model::{EdgeRecord, EdgeType, Point};
use serde::{Deserialize, Serialize};

/// Identity, endpoints and label of an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeCore {
    id: u32,
    source_node_id: u32,
    target_node_id: u32,
    start_point: Point,
    end_point: Point,
    text: Option<String>,
}

impl EdgeCore {
    pub fn new(id: u32, source_node_id: u32, target_node_id: u32, start_point: Point, end_point: Point) -> Self {
        Self {
            id,
            source_node_id,
            target_node_id,
            start_point,
            end_point,
            text: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn source_node_id(&self) -> u32 {
        self.source_node_id
    }
    pub fn target_node_id(&self) -> u32 {
        self.target_node_id
    }
    pub fn start_point(&self) -> Point {
        self.start_point
    }
    pub fn end_point(&self) -> Point {
        self.end_point
    }
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub(crate) fn set_start_point(&mut self, p: Point) {
        self.start_point = p;
    }

    pub(crate) fn set_end_point(&mut self, p: Point) {
        self.end_point = p;
    }

    pub(crate) fn set_nodes(&mut self, source_node_id: u32, target_node_id: u32) {
        self.source_node_id = source_node_id;
        self.target_node_id = target_node_id;
    }

    /// Base record without curve points.
    pub fn data(&self, kind: EdgeType) -> EdgeData {
        EdgeData {
            id: self.id,
            kind,
            source_node_id: self.source_node_id,
            target_node_id: self.target_node_id,
            start_point: self.start_point,
            end_point: self.end_point,
            text: self.text.clone(),
            points_list: Vec::new(),
        }
    }
}

/// Serialized edge record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: EdgeType,
    pub source_node_id: u32,
    pub target_node_id: u32,
    pub start_point: Point,
    pub end_point: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points_list: Vec<Point>,
}

#[derive(Clone, Debug)]
pub enum Edge {
    Line(EdgeCore),
    Bezier(BezierEdge),
}

impl Edge {
    pub fn kind(&self) -> EdgeType {
        match self {
            Edge::Line(_) => EdgeType::Line,
            Edge::Bezier(_) => EdgeType::Bezier,
        }
    }

    pub fn core(&self) -> &EdgeCore {
        match self {
            Edge::Line(core) => core,
            Edge::Bezier(b) => b.core(),
        }
    }

    pub(crate) fn core_mut(&mut self) -> &mut EdgeCore {
        match self {
            Edge::Line(core) => core,
            Edge::Bezier(b) => b.core_mut(),
        }
    }

    /// Anchors and curve points all within the coordinate limits.
    pub fn in_bounds(&self) -> bool {
        let core = self.core();
        let points_ok = match self {
            Edge::Line(_) => true,
            Edge::Bezier(b) => b.points_list().iter().all(|p| limits::in_point_bounds(*p)),
        };
        points_ok && limits::in_point_bounds(core.start_point) && limits::in_point_bounds(core.end_point)
    }

    pub fn as_bezier(&self) -> Option<&BezierEdge> {
        match self {
            Edge::Bezier(b) => Some(b),
            Edge::Line(_) => None,
        }
    }

    pub fn record(&self) -> EdgeRecord {
        let core = self.core();
        let points_list = match self {
            Edge::Line(core) => vec![core.start_point, core.end_point],
            Edge::Bezier(b) => b.points_list().to_vec(),
        };
        EdgeRecord {
            id: core.id,
            source_node_id: core.source_node_id,
            target_node_id: core.target_node_id,
            kind: self.kind(),
            points_list,
        }
    }

    pub fn data(&self) -> EdgeData {
        match self {
            Edge::Line(core) => core.data(EdgeType::Line),
            Edge::Bezier(b) => b.data(),
        }
    }

    pub fn text_anchor(&self) -> Point {
        match self {
            Edge::Line(core) => core.start_point.midpoint(core.end_point),
            Edge::Bezier(b) => b.text_anchor(),
        }
    }

    /// SVG `d` attribute, or `None` for a bezier edge that was never initialized.
    pub fn path_d(&self) -> Option<String> {
        match self {
            Edge::Line(core) => Some(line_path(core.start_point, core.end_point)),
            Edge::Bezier(b) if b.path().is_empty() => None,
            Edge::Bezier(b) => Some(b.path().to_string()),
        }
    }
}
