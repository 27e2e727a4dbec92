//! Math utilities module
//!
//! Provides convenient re-exports from glam and the rigid transform used by
//! the solver and the drift reverter.

mod transform;

pub use transform::RigidTransform;

// Re-export commonly used glam types
pub use glam::{DMat3, DVec3};
