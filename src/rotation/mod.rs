//! Rotation representation conversions
//!
//! Exponential map (axis * angle) <-> 3x3 rotation matrix <-> Euler angles.
//! All conversions are total: degenerate angles are resolved here and never
//! reported to the caller.

pub mod euler;
pub mod expmap;

pub use euler::{euler_to_matrix, expmap_to_euler, matrix_to_euler};
pub use expmap::{expmap_to_matrix, matrix_to_expmap, SMALL_ANGLE};

use glam::DMat3;

/// Row-major element access on glam's column-major matrices.
#[inline]
pub(crate) fn at(m: &DMat3, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}
