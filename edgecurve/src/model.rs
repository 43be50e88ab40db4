use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn translated(self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn dist_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Rectangular node geometry. `x`/`y` is the center, as in the diagram model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeShape {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// (minx, miny, maxx, maxy)
    pub fn bbox(&self) -> (f32, f32, f32, f32) {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }

    /// Side midpoints in top, right, bottom, left order.
    pub fn anchors(&self) -> [Point; 4] {
        let (minx, miny, maxx, maxy) = self.bbox();
        [
            Point::new(self.x, miny),
            Point::new(maxx, self.y),
            Point::new(self.x, maxy),
            Point::new(minx, self.y),
        ]
    }

    /// Anchor closest to `to`; the first one wins on ties.
    pub fn nearest_anchor(&self, to: Point) -> Point {
        let anchors = self.anchors();
        let mut best = anchors[0];
        let mut best_d2 = best.dist_sq(to);
        for a in anchors.iter().skip(1) {
            let d2 = a.dist_sq(to);
            if d2 < best_d2 {
                best = *a;
                best_d2 = d2;
            }
        }
        best
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Line,
    Bezier,
}

impl std::str::FromStr for EdgeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(EdgeType::Line),
            "bezier" => Ok(EdgeType::Bezier),
            _ => Err(()),
        }
    }
}

/// One edge as seen through a container snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub id: u32,
    pub source_node_id: u32,
    pub target_node_id: u32,
    pub kind: EdgeType,
    pub points_list: Vec<Point>,
}

/// Read-only view of every edge an owning container holds.
///
/// Implementations must build the list at call time; sibling geometry can
/// change between any two derivations.
pub trait GraphSnapshot {
    fn edge_records(&self) -> Vec<EdgeRecord>;
}

impl GraphSnapshot for [EdgeRecord] {
    fn edge_records(&self) -> Vec<EdgeRecord> {
        self.to_vec()
    }
}

impl GraphSnapshot for Vec<EdgeRecord> {
    fn edge_records(&self) -> Vec<EdgeRecord> {
        self.clone()
    }
}
