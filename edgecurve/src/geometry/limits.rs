// Limits shared by runtime edits and document loading

use crate::model::Point;

// Document size caps
pub const MAX_NODES: usize = 200_000;
pub const MAX_EDGES: usize = 300_000;
pub const MAX_TEXT_LEN: usize = 16 * 1024;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 = 10_000_000.0;
pub const SIZE_MAX: f32 = 1_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool {
    x.is_finite() && x >= COORD_MIN && x <= COORD_MAX
}

#[inline]
pub fn in_size_bounds(w: f32) -> bool {
    w.is_finite() && w >= 0.0 && w <= SIZE_MAX
}

#[inline]
pub fn in_point_bounds(p: Point) -> bool {
    in_coord_bounds(p.x) && in_coord_bounds(p.y)
}
