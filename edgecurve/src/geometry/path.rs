use crate::model::Point;

/// `M x0 y0 C x1 y1, x2 y2, x3 y3` with coordinates printed verbatim.
pub fn cubic_path(points: &[Point; 4]) -> String {
    let [s, c1, c2, e] = points;
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        s.x, s.y, c1.x, c1.y, c2.x, c2.y, e.x, e.y
    )
}

pub fn line_path(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x, start.y, end.x, end.y)
}
