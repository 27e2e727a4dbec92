//! Forward kinematics module
//!
//! Maps a pose vector onto world-space joint positions with a single pass
//! over the skeleton's parent-first joint order.

pub mod solver;

pub use solver::FkSolver;
