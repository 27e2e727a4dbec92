//! The 32-joint Human3.6M skeleton.
//!
//! Offsets are rest-pose bone vectors in millimetres. Joint `j` (when it
//! rotates at all) is driven by pose channels `3 + 3j .. 6 + 3j`; the root's
//! group `3..6` is its global rotation and channels `0..3` its translation.

use super::tree::{Skeleton, SkeletonBuilder};
use glam::DVec3;

pub const JOINT_COUNT: usize = 32;

pub const NAMES: [&str; JOINT_COUNT] = [
    "Hips",
    "RightUpLeg",
    "RightLeg",
    "RightFoot",
    "RightToeBase",
    "RightToeSite",
    "LeftUpLeg",
    "LeftLeg",
    "LeftFoot",
    "LeftToeBase",
    "LeftToeSite",
    "Spine",
    "Spine1",
    "Neck",
    "Head",
    "HeadSite",
    "LeftShoulder",
    "LeftArm",
    "LeftForeArm",
    "LeftHand",
    "LeftHandThumb",
    "LeftThumbSite",
    "LeftWristEnd",
    "LeftWristSite",
    "RightShoulder",
    "RightArm",
    "RightForeArm",
    "RightHand",
    "RightHandThumb",
    "RightThumbSite",
    "RightWristEnd",
    "RightWristSite",
];

pub const PARENTS: [Option<usize>; JOINT_COUNT] = [
    None,
    Some(0),
    Some(1),
    Some(2),
    Some(3),
    Some(4),
    Some(0),
    Some(6),
    Some(7),
    Some(8),
    Some(9),
    Some(0),
    Some(11),
    Some(12),
    Some(13),
    Some(14),
    Some(12),
    Some(16),
    Some(17),
    Some(18),
    Some(19),
    Some(20),
    Some(19),
    Some(22),
    Some(12),
    Some(24),
    Some(25),
    Some(26),
    Some(27),
    Some(28),
    Some(27),
    Some(30),
];

#[rustfmt::skip]
pub const OFFSETS: [[f64; 3]; JOINT_COUNT] = [
    [0.0, 0.0, 0.0],
    [-132.948591, 0.0, 0.0],
    [0.0, -442.894612, 0.0],
    [0.0, -454.206447, 0.0],
    [0.0, 0.0, 162.767078],
    [0.0, 0.0, 74.999437],
    [132.948826, 0.0, 0.0],
    [0.0, -442.894413, 0.0],
    [0.0, -454.206590, 0.0],
    [0.0, 0.0, 162.767426],
    [0.0, 0.0, 74.999948],
    [0.0, 0.1, 0.0],
    [0.0, 233.383263, 0.0],
    [0.0, 257.077681, 0.0],
    [0.0, 121.134938, 0.0],
    [0.0, 115.002227, 0.0],
    [0.0, 257.077681, 0.0],
    [0.0, 151.034226, 0.0],
    [0.0, 278.882773, 0.0],
    [0.0, 251.733451, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 99.999627],
    [0.0, 100.000188, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 257.077681, 0.0],
    [0.0, 151.031437, 0.0],
    [0.0, 278.892924, 0.0],
    [0.0, 251.728680, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 99.999888],
    [0.0, 137.499922, 0.0],
    [0.0, 0.0, 0.0],
];

/// Site and end-effector joints carry no rotation of their own.
pub const FIXED_JOINTS: [usize; 7] = [5, 10, 15, 21, 23, 29, 31];

/// Colour group of a display bone. Spine, neck and head segments belong to
/// neither limb and get their own group instead of being folded into one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    /// Segments on the body's midline.
    Center,
}

/// Bone segments worth drawing, as `(from, to, side)`.
pub const DISPLAY_BONES: [(usize, usize, Side); 16] = [
    (0, 1, Side::Right),
    (1, 2, Side::Right),
    (2, 3, Side::Right),
    (0, 6, Side::Left),
    (6, 7, Side::Left),
    (7, 8, Side::Left),
    (0, 12, Side::Center),
    (12, 13, Side::Center),
    (13, 14, Side::Center),
    (14, 15, Side::Center),
    (13, 17, Side::Left),
    (17, 18, Side::Left),
    (18, 19, Side::Left),
    (13, 25, Side::Right),
    (25, 26, Side::Right),
    (26, 27, Side::Right),
];

pub fn expmap_channels(joint: usize) -> [usize; 3] {
    let base = 3 + 3 * joint;
    [base, base + 1, base + 2]
}

pub(super) fn builder() -> SkeletonBuilder {
    (0..JOINT_COUNT).fold(Skeleton::builder(), |builder, id| {
        let offset = DVec3::from_array(OFFSETS[id]);
        match PARENTS[id] {
            None => builder.add_root(NAMES[id], offset, expmap_channels(id)),
            Some(parent) if FIXED_JOINTS.contains(&id) => {
                builder.add_joint(NAMES[id], parent, offset)
            }
            Some(parent) => {
                builder.add_joint_with_channels(NAMES[id], parent, offset, expmap_channels(id))
            }
        }
    })
}

impl Skeleton {
    /// The built-in Human3.6M skeleton.
    ///
    /// # Panics
    /// Never in practice: the tables above form a valid tree, which the
    /// `h36m_table_is_valid` test pins down.
    pub fn h36m() -> Self {
        builder()
            .build()
            .expect("built-in Human3.6M table is a valid tree")
    }
}
