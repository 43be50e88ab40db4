// Centralized tolerances for edge geometry

pub const EPS_POS: f32 = 1e-4; // point coincidence threshold (px)
pub const EPS_LEN: f32 = 1e-6; // zero-length threshold for shape extents

#[inline]
pub fn near_zero(x: f32, eps: f32) -> bool {
    x.abs() <= eps
}
