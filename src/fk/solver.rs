use crate::error::{KinematicsError, Result};
use crate::math::RigidTransform;
use crate::pose::{JointPositions, PoseVector, POSE_DIM, ROOT_TRANSLATION};
use crate::rotation::expmap_to_matrix;
use crate::skeleton::Skeleton;
use glam::DVec3;

pub struct FkSolver;

impl FkSolver {
    /// Joint positions for one raw pose vector.
    ///
    /// Fails with `DimensionMismatch` unless `pose` has exactly 99 channels.
    pub fn solve(skeleton: &Skeleton, pose: &[f64]) -> Result<JointPositions> {
        if pose.len() != POSE_DIM {
            return Err(KinematicsError::dimension("pose vector", POSE_DIM, pose.len()));
        }
        Ok(Self::positions_from_channels(skeleton, pose))
    }

    pub fn solve_pose(skeleton: &Skeleton, pose: &PoseVector) -> JointPositions {
        Self::positions_from_channels(skeleton, pose.as_slice())
    }

    /// Each frame is solved on its own; no state carries across frames.
    pub fn solve_sequence(skeleton: &Skeleton, frames: &[PoseVector]) -> Vec<JointPositions> {
        log::debug!("forward kinematics over {} frames", frames.len());
        frames
            .iter()
            .map(|pose| Self::solve_pose(skeleton, pose))
            .collect()
    }

    /// World rotation and position of every joint, indexed by joint id.
    pub fn world_transforms(skeleton: &Skeleton, pose: &PoseVector) -> Vec<RigidTransform> {
        Self::transforms_from_channels(skeleton, pose.as_slice())
    }

    fn positions_from_channels(skeleton: &Skeleton, channels: &[f64]) -> JointPositions {
        let positions = Self::transforms_from_channels(skeleton, channels)
            .into_iter()
            .map(|t| t.translation)
            .collect();
        JointPositions::new(positions)
    }

    fn transforms_from_channels(skeleton: &Skeleton, channels: &[f64]) -> Vec<RigidTransform> {
        let root_translation = DVec3::from_slice(&channels[ROOT_TRANSLATION]);
        let pose_frame = RigidTransform::from_translation(root_translation);
        let mut world = vec![RigidTransform::IDENTITY; skeleton.joint_count()];

        for &id in skeleton.order() {
            let joint = &skeleton.joints[id];
            let local = RigidTransform::new(
                expmap_to_matrix(joint.local_expmap(channels)),
                joint.offset,
            );
            let parent = match joint.parent {
                Some(parent) => world[parent],
                None => pose_frame,
            };
            world[id] = parent * local;
        }

        world
    }
}
