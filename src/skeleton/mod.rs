//! Skeleton definition module
//!
//! The kinematic tree consumed by the solver: joints, a validating builder,
//! and the built-in Human3.6M table.

pub mod h36m;
pub mod joint;
pub mod tree;

pub use h36m::{Side, DISPLAY_BONES, JOINT_COUNT};
pub use joint::Joint;
pub use tree::{Skeleton, SkeletonBuilder};
