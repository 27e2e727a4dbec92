//! # motion-kinematics
//!
//! Forward kinematics and rotation conversions for 32-joint motion capture
//! skeletons driven by exponential-map pose vectors.
//!
//! ## Features
//! - Exponential map, rotation matrix and Euler angle conversions
//! - Validated kinematic tree with the built-in Human3.6M skeleton
//! - Single-pass forward kinematics from 99-channel pose vectors to joint positions
//! - Root drift reversion for stitching ground-truth and predicted windows
//! - Euler-angle error curves for evaluating predicted motion
//!
//! ## Example
//! ```rust
//! use motion_kinematics::{CoordinateSpaceReverter, FkSolver, PoseVector, Skeleton};
//!
//! let skeleton = Skeleton::h36m();
//! let ground_truth = vec![PoseVector::zeros(); 50];
//! let prediction = vec![PoseVector::zeros(); 10];
//!
//! // Put both windows in one world frame, then solve every frame.
//! let reverted = CoordinateSpaceReverter::revert_concatenated(&ground_truth, &prediction);
//! let positions = FkSolver::solve_sequence(&skeleton, &reverted.frames);
//! assert_eq!(positions[0].as_flat().len(), 96);
//! ```

pub mod error;
pub mod eval;
pub mod fk;
pub mod io;
pub mod math;
pub mod pose;
pub mod revert;
pub mod rotation;
pub mod skeleton;

pub use error::{KinematicsError, Result};
pub use fk::FkSolver;
pub use math::RigidTransform;
pub use pose::{JointPositions, PoseVector, POSE_DIM, POSITION_DIM};
pub use revert::{CoordinateSpaceReverter, Reversion};
pub use rotation::{
    euler_to_matrix, expmap_to_euler, expmap_to_matrix, matrix_to_euler, matrix_to_expmap,
};
pub use skeleton::{Joint, Skeleton, SkeletonBuilder};
