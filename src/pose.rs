//! Pose vectors and joint position frames.
//!
//! Channel layout of a pose vector:
//!
//! | channels  | meaning                                   |
//! |-----------|-------------------------------------------|
//! | `0..3`    | root translation (mm)                     |
//! | `3..6`    | root global rotation (exponential map)    |
//! | `6..99`   | per-joint local rotations (exponential map) |
//!
//! Euler frames produced for evaluation reuse the same layout with every
//! rotation group holding Euler angles instead.

use crate::error::{KinematicsError, Result};
use crate::skeleton::JOINT_COUNT;
use glam::DVec3;
use std::ops::Range;

pub const POSE_DIM: usize = 99;
pub const POSITION_DIM: usize = JOINT_COUNT * 3;
pub const ROOT_TRANSLATION: Range<usize> = 0..3;
pub const ROOT_ROTATION: Range<usize> = 3..6;
/// Number of three-channel groups in a pose vector, translation included.
pub const GROUP_COUNT: usize = POSE_DIM / 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PoseVector([f64; POSE_DIM]);

impl Default for PoseVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl PoseVector {
    pub fn zeros() -> Self {
        Self([0.0; POSE_DIM])
    }

    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let channels: [f64; POSE_DIM] = values
            .try_into()
            .map_err(|_| KinematicsError::dimension("pose vector", POSE_DIM, values.len()))?;
        Ok(Self(channels))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Channels `3k .. 3k + 3` as a vector.
    ///
    /// # Panics
    /// If `k >= GROUP_COUNT`.
    pub fn group(&self, k: usize) -> DVec3 {
        DVec3::from_slice(&self.0[3 * k..3 * k + 3])
    }

    pub fn set_group(&mut self, k: usize, value: DVec3) {
        value.write_to_slice(&mut self.0[3 * k..3 * k + 3]);
    }

    pub fn root_translation(&self) -> DVec3 {
        DVec3::from_slice(&self.0[ROOT_TRANSLATION])
    }

    pub fn root_rotation(&self) -> DVec3 {
        DVec3::from_slice(&self.0[ROOT_ROTATION])
    }

    pub fn set_root(&mut self, translation: DVec3, rotation: DVec3) {
        translation.write_to_slice(&mut self.0[ROOT_TRANSLATION]);
        rotation.write_to_slice(&mut self.0[ROOT_ROTATION]);
    }
}

impl TryFrom<&[f64]> for PoseVector {
    type Error = KinematicsError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::from_slice(values)
    }
}

/// World-space joint positions for one frame, in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPositions(Vec<DVec3>);

impl JointPositions {
    pub fn new(positions: Vec<DVec3>) -> Self {
        Self(positions)
    }

    /// Rebuilds a frame from its flat `x0 y0 z0 x1 ...` form.
    pub fn from_flat(values: &[f64], joint_count: usize) -> Result<Self> {
        if values.len() != joint_count * 3 {
            return Err(KinematicsError::dimension(
                "joint position frame",
                joint_count * 3,
                values.len(),
            ));
        }
        Ok(Self(values.chunks_exact(3).map(DVec3::from_slice).collect()))
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.0
    }

    pub fn joint(&self, id: usize) -> Option<DVec3> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_flat(&self) -> &[f64] {
        bytemuck::cast_slice(&self.0)
    }

    /// Same positions with y and z exchanged, for y-up viewers of z-up data.
    pub fn swap_yz(&self) -> Self {
        Self(self.0.iter().map(|p| DVec3::new(p.x, p.z, p.y)).collect())
    }
}
