pub mod bezier;
pub mod deriver;
pub mod edge;
pub mod error;
pub mod model;
pub mod theme;
pub mod geometry {
    pub mod control;
    pub mod limits;
    pub mod path;
    pub mod tolerance;
}
mod json;
mod svg;

use bezier::{BezierEdge, ControlSlot, CurveSnapshot};
use edge::{Edge, EdgeCore, EdgeData};
use error::{DocError, EdgeError, ThemeError};
use geometry::limits;
use geometry::tolerance::EPS_POS;
use model::{EdgeRecord, EdgeType, GraphSnapshot, NodeShape, Point};
use std::collections::BTreeSet;
use theme::Theme;

/// Owning container for nodes and connectors.
///
/// Ids are slot indices and are never reused. Every geometry change bumps
/// [`geom_version`](Diagram::geom_version) and records the touched edges so a
/// renderer can poll instead of observing fields.
pub struct Diagram {
    pub(crate) nodes: Vec<Option<NodeShape>>, // id is index
    pub(crate) edges: Vec<Option<Edge>>,      // id is index
    pub(crate) theme: Theme,
    pub(crate) geom_ver: u64,
    pub(crate) dirty_edges: BTreeSet<u32>,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphSnapshot for Diagram {
    fn edge_records(&self) -> Vec<EdgeRecord> {
        self.graph_data()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    pub fn with_theme(theme: Theme) -> Self {
        Diagram {
            nodes: Vec::new(),
            edges: Vec::new(),
            theme,
            geom_ver: 1,
            dirty_edges: BTreeSet::new(),
        }
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    /// Edge ids touched since the previous call, ascending.
    pub fn take_dirty_edges(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.dirty_edges).into_iter().collect()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme. Existing curves keep their points; the new offset
    /// applies from the next derivation on.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ThemeError> {
        theme.validate()?;
        let offset = theme.bezier.offset;
        for e in self.edges.iter_mut().flatten() {
            if let Edge::Bezier(b) = e {
                b.set_offset(offset);
            }
        }
        self.theme = theme;
        Ok(())
    }

    // Nodes
    pub fn add_node(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<u32, EdgeError> {
        let shape = NodeShape::new(x, y, width, height);
        if !shape.is_finite() {
            return Err(EdgeError::NonFinite("node"));
        }
        if !limits::in_point_bounds(shape.center()) || !limits::in_size_bounds(width) || !limits::in_size_bounds(height) {
            return Err(EdgeError::OutOfBounds("node"));
        }
        if self.nodes.len() >= limits::MAX_NODES {
            return Err(EdgeError::CapacityExceeded { kind: "nodes", limit: limits::MAX_NODES });
        }
        let id = self.nodes.len() as u32;
        self.nodes.push(Some(shape));
        self.bump();
        Ok(id)
    }

    pub fn get_node(&self, id: u32) -> Option<NodeShape> {
        self.nodes.get(id as usize).and_then(|n| *n)
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.iter().filter(|n| n.is_some()).count() as u32
    }

    /// Move a node's center. Connected anchors move with it and their curves
    /// reflow, so manually placed control points survive the drag.
    ///
    /// A move shorter than `EPS_POS` is ignored: it returns `Ok` without
    /// touching the node or bumping the version.
    pub fn move_node(&mut self, id: u32, x: f32, y: f32) -> Result<(), EdgeError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(EdgeError::NonFinite("position"));
        }
        if !limits::in_point_bounds(Point::new(x, y)) {
            return Err(EdgeError::OutOfBounds("position"));
        }
        let shape = self.get_node(id).ok_or(EdgeError::UnknownNode(id))?;
        let dx = x - shape.x;
        let dy = y - shape.y;
        if dx * dx + dy * dy <= EPS_POS * EPS_POS {
            return Ok(());
        }
        // Controls stay put on reflow, so only the translated anchors can leave the range.
        for e in self.edges.iter().flatten() {
            let core = e.core();
            let start_out = core.source_node_id() == id && !limits::in_point_bounds(core.start_point().translated(dx, dy));
            let end_out = core.target_node_id() == id && !limits::in_point_bounds(core.end_point().translated(dx, dy));
            if start_out || end_out {
                return Err(EdgeError::OutOfBounds("anchor"));
            }
        }
        let moved = NodeShape { x, y, ..shape };
        if let Some(slot) = self.nodes.get_mut(id as usize) {
            *slot = Some(moved);
        }
        let mut touched = Vec::new();
        for e in self.edges.iter_mut().flatten() {
            let core = e.core();
            let (from, to) = (core.source_node_id() == id, core.target_node_id() == id);
            if !from && !to {
                continue;
            }
            let start = core.start_point().translated(dx, dy);
            let end = core.end_point().translated(dx, dy);
            match e {
                Edge::Line(core) => {
                    if from {
                        core.set_start_point(start);
                    }
                    if to {
                        core.set_end_point(end);
                    }
                }
                Edge::Bezier(b) => {
                    if from {
                        b.set_source_node(moved);
                        b.set_start_point(start);
                    }
                    if to {
                        b.set_target_node(moved);
                        b.set_end_point(end);
                    }
                }
            }
            touched.push(e.core().id());
        }
        log::debug!("node {} moved by ({}, {}), {} edges reflowed", id, dx, dy, touched.len());
        self.dirty_edges.extend(touched);
        self.bump();
        Ok(())
    }

    /// Remove a node together with every edge attached to it.
    pub fn remove_node(&mut self, id: u32) -> Result<(), EdgeError> {
        if self.get_node(id).is_none() {
            return Err(EdgeError::UnknownNode(id));
        }
        if let Some(slot) = self.nodes.get_mut(id as usize) {
            *slot = None;
        }
        for slot in self.edges.iter_mut() {
            let incident = slot
                .as_ref()
                .is_some_and(|e| e.core().source_node_id() == id || e.core().target_node_id() == id);
            if incident {
                if let Some(e) = slot.take() {
                    self.dirty_edges.insert(e.core().id());
                }
            }
        }
        self.bump();
        Ok(())
    }

    // Edges
    /// Connect two nodes, anchoring on the facing sides of both shapes.
    pub fn add_edge(&mut self, source: u32, target: u32, kind: EdgeType) -> Result<u32, EdgeError> {
        let (s, t) = self.endpoint_shapes(source, target)?;
        let start = s.nearest_anchor(t.center());
        let end = t.nearest_anchor(s.center());
        self.insert_edge(source, target, kind, start, end, s, t)
    }

    /// Connect two nodes at explicit anchor points.
    pub fn add_edge_with_anchors(
        &mut self,
        source: u32,
        target: u32,
        kind: EdgeType,
        start: Point,
        end: Point,
    ) -> Result<u32, EdgeError> {
        if !start.is_finite() {
            return Err(EdgeError::NonFinite("start"));
        }
        if !end.is_finite() {
            return Err(EdgeError::NonFinite("end"));
        }
        if !limits::in_point_bounds(start) || !limits::in_point_bounds(end) {
            return Err(EdgeError::OutOfBounds("anchor"));
        }
        let (s, t) = self.endpoint_shapes(source, target)?;
        self.insert_edge(source, target, kind, start, end, s, t)
    }

    pub fn remove_edge(&mut self, id: u32) -> Result<(), EdgeError> {
        let removed = self.edges.get_mut(id as usize).and_then(|slot| slot.take());
        if removed.is_none() {
            return Err(EdgeError::UnknownEdge(id));
        }
        self.touch(id);
        Ok(())
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.iter().filter(|e| e.is_some()).count() as u32
    }

    pub fn edge(&self, id: u32) -> Option<&Edge> {
        self.edges.get(id as usize).and_then(|e| e.as_ref())
    }

    pub fn edge_ids(&self) -> Vec<u32> {
        self.edges.iter().flatten().map(|e| e.core().id()).collect()
    }

    pub fn bezier_edge(&self, id: u32) -> Result<&BezierEdge, EdgeError> {
        self.edge(id)
            .ok_or(EdgeError::UnknownEdge(id))?
            .as_bezier()
            .ok_or(EdgeError::NotBezier(id))
    }

    /// Re-derive an edge's controls against its current siblings.
    pub fn recompute_edge(&mut self, id: u32) -> Result<CurveSnapshot, EdgeError> {
        let mut b = self.bezier_edge(id)?.clone();
        let snap = b.recompute(&*self);
        self.replace_edge(id, Edge::Bezier(b))?;
        Ok(snap)
    }

    pub fn set_edge_start_point(&mut self, id: u32, anchor: Point) -> Result<(), EdgeError> {
        self.set_edge_anchor(id, anchor, true)
    }

    pub fn set_edge_end_point(&mut self, id: u32, anchor: Point) -> Result<(), EdgeError> {
        self.set_edge_anchor(id, anchor, false)
    }

    pub fn adjust_control(&mut self, id: u32, point: Point, which: ControlSlot) -> Result<CurveSnapshot, EdgeError> {
        if !point.is_finite() {
            return Err(EdgeError::NonFinite("point"));
        }
        if !limits::in_point_bounds(point) {
            return Err(EdgeError::OutOfBounds("point"));
        }
        let snap = self.bezier_edge_mut(id)?.adjust_control(point, which)?;
        self.touch(id);
        Ok(snap)
    }

    /// Attach an edge to a different node pair. Anchors are re-picked on the
    /// facing sides and a bezier edge re-derives its controls.
    pub fn reconnect_edge(&mut self, id: u32, source: u32, target: u32) -> Result<(), EdgeError> {
        let mut e = self.edge(id).ok_or(EdgeError::UnknownEdge(id))?.clone();
        let (s, t) = self.endpoint_shapes(source, target)?;
        let start = s.nearest_anchor(t.center());
        let end = t.nearest_anchor(s.center());
        let core = e.core_mut();
        core.set_nodes(source, target);
        core.set_start_point(start);
        core.set_end_point(end);
        if let Edge::Bezier(b) = &mut e {
            b.set_source_node(s);
            b.set_target_node(t);
            b.recompute(&*self);
        }
        self.replace_edge(id, e)
    }

    pub fn set_edge_text(&mut self, id: u32, text: Option<String>) -> Result<(), EdgeError> {
        if let Some(len) = text.as_ref().map(String::len).filter(|len| *len > limits::MAX_TEXT_LEN) {
            return Err(EdgeError::TextTooLong(len));
        }
        match self.edges.get_mut(id as usize) {
            Some(Some(e)) => {
                e.core_mut().set_text(text);
                Ok(())
            }
            _ => Err(EdgeError::UnknownEdge(id)),
        }
    }

    pub fn text_anchor(&self, id: u32) -> Option<Point> {
        self.edge(id).map(|e| e.text_anchor())
    }

    /// Snapshot of every edge, in id order.
    pub fn graph_data(&self) -> Vec<EdgeRecord> {
        self.edges.iter().flatten().map(|e| e.record()).collect()
    }

    pub fn edge_data(&self) -> Vec<EdgeData> {
        self.edges.iter().flatten().map(|e| e.data()).collect()
    }

    // Documents
    pub fn to_json_value(&self) -> Result<serde_json::Value, DocError> {
        json::to_json_impl(self)
    }
    /// Replace the diagram with a stored document. On error nothing changes.
    pub fn from_json_value(&mut self, v: serde_json::Value) -> Result<(), DocError> {
        json::from_json_impl(self, v)
    }
    pub fn from_json_str(&mut self, s: &str) -> Result<(), DocError> {
        let v: serde_json::Value = serde_json::from_str(s)?;
        self.from_json_value(v)
    }

    // SVG
    pub fn to_svg_paths(&self) -> Vec<String> {
        svg::to_svg_paths_impl(self)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.dirty_edges.clear();
        self.bump();
    }

    fn endpoint_shapes(&self, source: u32, target: u32) -> Result<(NodeShape, NodeShape), EdgeError> {
        if source == target {
            return Err(EdgeError::SameNode);
        }
        let s = self.get_node(source).ok_or(EdgeError::UnknownNode(source))?;
        let t = self.get_node(target).ok_or(EdgeError::UnknownNode(target))?;
        Ok((s, t))
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_edge(
        &mut self,
        source: u32,
        target: u32,
        kind: EdgeType,
        start: Point,
        end: Point,
        s: NodeShape,
        t: NodeShape,
    ) -> Result<u32, EdgeError> {
        if self.edges.len() >= limits::MAX_EDGES {
            return Err(EdgeError::CapacityExceeded { kind: "edges", limit: limits::MAX_EDGES });
        }
        let id = self.edges.len() as u32;
        let core = EdgeCore::new(id, source, target, start, end);
        let edge = match kind {
            EdgeType::Line => Edge::Line(core),
            EdgeType::Bezier => {
                let mut b = BezierEdge::new(core, s, t, self.theme.bezier.offset);
                b.initialize(&*self);
                Edge::Bezier(b)
            }
        };
        if !edge.in_bounds() {
            return Err(EdgeError::OutOfBounds("edge"));
        }
        self.edges.push(Some(edge));
        self.touch(id);
        Ok(id)
    }

    fn set_edge_anchor(&mut self, id: u32, anchor: Point, start: bool) -> Result<(), EdgeError> {
        if !anchor.is_finite() {
            return Err(EdgeError::NonFinite("anchor"));
        }
        if !limits::in_point_bounds(anchor) {
            return Err(EdgeError::OutOfBounds("anchor"));
        }
        match self.edges.get_mut(id as usize) {
            Some(Some(Edge::Bezier(b))) => {
                if start {
                    b.set_start_point(anchor);
                } else {
                    b.set_end_point(anchor);
                }
            }
            Some(Some(Edge::Line(core))) => {
                if start {
                    core.set_start_point(anchor);
                } else {
                    core.set_end_point(anchor);
                }
            }
            _ => return Err(EdgeError::UnknownEdge(id)),
        }
        self.touch(id);
        Ok(())
    }

    fn bezier_edge_mut(&mut self, id: u32) -> Result<&mut BezierEdge, EdgeError> {
        match self.edges.get_mut(id as usize) {
            Some(Some(Edge::Bezier(b))) => Ok(b),
            Some(Some(_)) => Err(EdgeError::NotBezier(id)),
            _ => Err(EdgeError::UnknownEdge(id)),
        }
    }

    /// Store a rebuilt edge, refusing geometry outside the coordinate limits.
    fn replace_edge(&mut self, id: u32, edge: Edge) -> Result<(), EdgeError> {
        if !edge.in_bounds() {
            return Err(EdgeError::OutOfBounds("edge"));
        }
        let Some(slot) = self.edges.get_mut(id as usize).filter(|slot| slot.is_some()) else {
            return Err(EdgeError::UnknownEdge(id));
        };
        *slot = Some(edge);
        self.touch(id);
        Ok(())
    }

    fn touch(&mut self, id: u32) {
        self.dirty_edges.insert(id);
        self.bump();
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }
}
