use crate::bezier::BezierEdge;
use crate::edge::{Edge, EdgeCore, EdgeData};
use crate::error::DocError;
use crate::geometry::limits;
use crate::model::{EdgeRecord, EdgeType, NodeShape, Point};
use crate::theme::Theme;
use crate::Diagram;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

const DOC_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct NodeSer {
    id: u32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Serialize, Deserialize)]
struct Doc {
    version: u32,
    #[serde(default)]
    theme: Option<Theme>,
    nodes: Vec<NodeSer>,
    edges: Vec<EdgeData>,
}

pub fn to_json_impl(d: &Diagram) -> Result<Value, DocError> {
    let nodes = d
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| {
            n.map(|n| NodeSer {
                id: i as u32,
                x: n.x,
                y: n.y,
                width: n.width,
                height: n.height,
            })
        })
        .collect();
    let doc = Doc {
        version: DOC_VERSION,
        theme: Some(d.theme.clone()),
        nodes,
        edges: d.edge_data(),
    };
    serde_json::to_value(doc).map_err(|e| {
        log::warn!("diagram serialization failed: {}", e);
        DocError::Json(e)
    })
}

fn point_ok(p: &Point) -> bool {
    limits::in_point_bounds(*p)
}

fn validate(doc: &Doc) -> Result<(), DocError> {
    if doc.version != DOC_VERSION {
        return Err(DocError::UnsupportedVersion(doc.version));
    }
    if doc.nodes.len() > limits::MAX_NODES {
        return Err(DocError::TooLarge { kind: "nodes", count: doc.nodes.len() });
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(DocError::TooLarge { kind: "edges", count: doc.edges.len() });
    }
    if let Some(theme) = &doc.theme {
        theme.validate()?;
    }
    let mut node_ids = BTreeSet::new();
    for n in &doc.nodes {
        if n.id as usize >= limits::MAX_NODES {
            return Err(DocError::OutOfBounds { kind: "node", id: n.id });
        }
        if !node_ids.insert(n.id) {
            return Err(DocError::DuplicateId { kind: "node", id: n.id });
        }
        if !limits::in_coord_bounds(n.x)
            || !limits::in_coord_bounds(n.y)
            || !limits::in_size_bounds(n.width)
            || !limits::in_size_bounds(n.height)
        {
            return Err(DocError::OutOfBounds { kind: "node", id: n.id });
        }
    }
    let mut edge_ids = BTreeSet::new();
    for e in &doc.edges {
        if e.id as usize >= limits::MAX_EDGES {
            return Err(DocError::OutOfBounds { kind: "edge", id: e.id });
        }
        if !edge_ids.insert(e.id) {
            return Err(DocError::DuplicateId { kind: "edge", id: e.id });
        }
        if e.source_node_id == e.target_node_id {
            return Err(DocError::SelfLoop(e.id));
        }
        for node in [e.source_node_id, e.target_node_id] {
            if !node_ids.contains(&node) {
                return Err(DocError::DanglingEdge { edge: e.id, node });
            }
        }
        if !point_ok(&e.start_point) || !point_ok(&e.end_point) || !e.points_list.iter().all(point_ok) {
            return Err(DocError::OutOfBounds { kind: "edge", id: e.id });
        }
        if e.text.as_ref().is_some_and(|t| t.len() > limits::MAX_TEXT_LEN) {
            return Err(DocError::TooLarge { kind: "text bytes", count: e.text.as_ref().map_or(0, |t| t.len()) });
        }
        let len = e.points_list.len();
        if e.kind == EdgeType::Bezier && len != 0 && len != 4 {
            return Err(DocError::BadPoints { edge: e.id, len });
        }
    }
    Ok(())
}

pub fn from_json_impl(d: &mut Diagram, v: Value) -> Result<(), DocError> {
    let doc: Doc = serde_json::from_value(v)?;
    if let Err(e) = validate(&doc) {
        log::warn!("rejected diagram document: {}", e);
        return Err(e);
    }
    let theme = doc.theme.unwrap_or_else(|| d.theme.clone());
    let offset = theme.bezier.offset;
    let max_node = doc.nodes.iter().map(|n| n.id as usize + 1).max().unwrap_or(0);
    let max_edge = doc.edges.iter().map(|e| e.id as usize + 1).max().unwrap_or(0);
    let mut nodes: Vec<Option<NodeShape>> = vec![None; max_node];
    for n in &doc.nodes {
        nodes[n.id as usize] = Some(NodeShape::new(n.x, n.y, n.width, n.height));
    }
    let mut out = Diagram::with_theme(theme);
    out.nodes = nodes;
    out.edges = vec![None; max_edge];
    let mut fresh = BTreeSet::new();
    for e in doc.edges {
        let (Some(s), Some(t)) = (out.get_node(e.source_node_id), out.get_node(e.target_node_id)) else {
            return Err(DocError::DanglingEdge { edge: e.id, node: e.source_node_id });
        };
        let mut core = EdgeCore::new(e.id, e.source_node_id, e.target_node_id, e.start_point, e.end_point);
        core.set_text(e.text);
        let edge = match e.kind {
            EdgeType::Line => Edge::Line(core),
            EdgeType::Bezier => match <[Point; 4]>::try_from(e.points_list.as_slice()) {
                Ok(points) => Edge::Bezier(BezierEdge::with_points(core, s, t, offset, points)),
                Err(_) => {
                    fresh.insert(e.id);
                    Edge::Bezier(BezierEdge::new(core, s, t, offset))
                }
            },
        };
        out.edges[e.id as usize] = Some(edge);
    }
    // Stored curves only re-render and never read siblings.
    let no_siblings: &[EdgeRecord] = &[];
    for edge in out.edges.iter_mut().flatten() {
        if let Edge::Bezier(b) = edge {
            if !fresh.contains(&b.id()) {
                b.initialize(no_siblings);
            }
        }
    }
    // Curves without points derive in id order against whatever siblings
    // already have geometry; the shared snapshot is patched after each one.
    let mut records = out.graph_data();
    for &id in &fresh {
        let Some(Some(edge)) = out.edges.get_mut(id as usize) else {
            continue;
        };
        if let Edge::Bezier(b) = edge {
            b.recompute(&records);
        }
        if !edge.in_bounds() {
            return Err(DocError::OutOfBounds { kind: "edge", id });
        }
        if let Ok(i) = records.binary_search_by_key(&id, |r| r.id) {
            records[i] = edge.record();
        }
    }
    out.geom_ver = d.geom_ver.wrapping_add(1);
    out.dirty_edges = out.edge_ids().into_iter().chain(d.edge_ids()).collect();
    *d = out;
    log::debug!("loaded diagram: {} nodes, {} edges", d.node_count(), d.edge_count());
    Ok(())
}
