//! Coordinate space reversion
//!
//! A predicted window starts with its root at a local origin and each frame's
//! root channels hold the motion since the previous frame. Stacking it under a
//! ground-truth window therefore needs the root motions re-accumulated into
//! world coordinates, which is what this module does.

use crate::math::RigidTransform;
use crate::pose::PoseVector;
use crate::rotation::{expmap_to_matrix, matrix_to_expmap};

#[derive(Debug, Clone)]
pub struct Reversion {
    /// Input frames with root channels rewritten in world coordinates.
    pub frames: Vec<PoseVector>,
    /// Accumulated root transform after the last frame. Passing it as the
    /// initial transform for a following window continues the trajectory.
    pub final_transform: RigidTransform,
}

pub struct CoordinateSpaceReverter;

impl CoordinateSpaceReverter {
    /// Root motion a single frame contributes: its rotation and its
    /// displacement in the previous accumulated frame.
    pub fn root_motion(frame: &PoseVector) -> RigidTransform {
        RigidTransform::new(
            expmap_to_matrix(frame.root_rotation()),
            frame.root_translation(),
        )
    }

    /// Running composition `initial * m_0 * m_1 * ... * m_i` for every frame.
    ///
    /// Each step is `R <- R * R_i`, `t <- t + R_prev * d_i`; composition is
    /// associative so this scan may also be evaluated as a parallel prefix.
    pub fn accumulate<'a>(
        frames: &'a [PoseVector],
        initial: RigidTransform,
    ) -> impl Iterator<Item = RigidTransform> + 'a {
        frames.iter().scan(initial, |acc, frame| {
            *acc = *acc * Self::root_motion(frame);
            Some(*acc)
        })
    }

    pub fn revert(frames: &[PoseVector], initial: RigidTransform) -> Reversion {
        let mut final_transform = initial;
        let frames = frames
            .iter()
            .zip(Self::accumulate(frames, initial))
            .map(|(frame, world)| {
                final_transform = world;
                let mut out = frame.clone();
                out.set_root(world.translation, matrix_to_expmap(world.rotation));
                out
            })
            .collect::<Vec<_>>();

        log::debug!("reverted {} frames", frames.len());
        Reversion {
            frames,
            final_transform,
        }
    }

    /// Reverts a ground-truth window followed by a prediction window as one
    /// trajectory starting at the world origin.
    pub fn revert_concatenated(
        ground_truth: &[PoseVector],
        prediction: &[PoseVector],
    ) -> Reversion {
        let head = Self::revert(ground_truth, RigidTransform::IDENTITY);
        let tail = Self::revert(prediction, head.final_transform);

        let mut frames = head.frames;
        frames.extend(tail.frames);
        Reversion {
            frames,
            final_transform: tail.final_transform,
        }
    }
}
