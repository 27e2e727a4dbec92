use super::joint::Joint;
use crate::error::{KinematicsError, Result};
use crate::pose::{POSE_DIM, ROOT_ROTATION};
use glam::DVec3;
use std::collections::VecDeque;

/// An immutable kinematic tree rooted at joint 0.
///
/// Only [`SkeletonBuilder::build`] creates one, so every `Skeleton` in
/// existence has passed topology validation and carries a traversal order in
/// which parents precede their children.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub(crate) joints: Vec<Joint>,
    pub(crate) order: Vec<usize>,
}

impl Skeleton {
    pub fn builder() -> SkeletonBuilder {
        SkeletonBuilder::new()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, id: usize) -> Option<&Joint> {
        self.joints.get(id)
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Joint indices with every parent listed before its children.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }

    /// Rest-pose positions of all joints with the root at the origin.
    pub fn rest_positions(&self) -> Vec<DVec3> {
        let mut positions = vec![DVec3::ZERO; self.joints.len()];
        for &id in &self.order {
            let joint = &self.joints[id];
            positions[id] = match joint.parent {
                Some(parent) => positions[parent] + joint.offset,
                None => joint.offset,
            };
        }
        positions
    }
}

#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    joints: Vec<Joint>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn add(mut self, joint: Joint) -> Self {
        self.joints.push(joint);
        self
    }

    pub fn add_root(self, name: impl Into<String>, offset: DVec3, channels: [usize; 3]) -> Self {
        self.add(Joint::new(name, None, offset).with_channels(channels))
    }

    pub fn add_joint(self, name: impl Into<String>, parent: usize, offset: DVec3) -> Self {
        self.add(Joint::new(name, Some(parent), offset))
    }

    pub fn add_joint_with_channels(
        self,
        name: impl Into<String>,
        parent: usize,
        offset: DVec3,
        channels: [usize; 3],
    ) -> Self {
        self.add(Joint::new(name, Some(parent), offset).with_channels(channels))
    }

    pub fn build(self) -> Result<Skeleton> {
        self.validate()?;
        let order = self.topological_order()?;
        log::debug!("built skeleton with {} joints", self.joints.len());
        Ok(Skeleton {
            joints: self.joints,
            order,
        })
    }

    fn validate(&self) -> Result<()> {
        let n = self.joints.len();
        match self.joints.first() {
            None => return Err(invalid("skeleton has no joints")),
            Some(root) if !root.is_root() => {
                return Err(invalid("joint 0 must be the root"));
            }
            Some(root) => {
                let drives_root = root
                    .rotation_channels
                    .is_some_and(|channels| channels.into_iter().eq(ROOT_ROTATION));
                if !drives_root {
                    return Err(invalid(format!(
                        "root must read its rotation from channels {ROOT_ROTATION:?}"
                    )));
                }
            }
        }

        for (id, joint) in self.joints.iter().enumerate().skip(1) {
            match joint.parent {
                None => return Err(invalid(format!("joint {id} is a second root"))),
                Some(parent) if parent >= n => {
                    return Err(invalid(format!(
                        "joint {id} has parent {parent}, out of range for {n} joints"
                    )));
                }
                Some(parent) if parent == id => {
                    return Err(invalid(format!("joint {id} is its own parent")));
                }
                Some(_) => {}
            }
        }

        for (id, joint) in self.joints.iter().enumerate() {
            let Some(channels) = joint.rotation_channels else {
                continue;
            };
            if let Some(bad) = channels.iter().find(|&&c| c >= POSE_DIM) {
                return Err(invalid(format!(
                    "joint {id} reads channel {bad}, pose vectors have {POSE_DIM}"
                )));
            }
            if id != 0 {
                if let Some(bad) = channels.iter().find(|&&c| c < ROOT_ROTATION.end) {
                    return Err(invalid(format!(
                        "joint {id} reads channel {bad}, reserved for the root"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Breadth-first walk from the root. Joints on a cycle are never reached
    /// from the root, so a short walk means the parent relation is not a tree.
    fn topological_order(&self) -> Result<Vec<usize>> {
        let n = self.joints.len();
        let mut children = vec![Vec::new(); n];
        for (id, joint) in self.joints.iter().enumerate() {
            if let Some(parent) = joint.parent {
                children[parent].push(id);
            }
        }

        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::from([0]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(children[id].iter().copied());
        }

        if order.len() != n {
            let mut reached = vec![false; n];
            for &id in &order {
                reached[id] = true;
            }
            let stray = reached.iter().position(|r| !r).unwrap_or(0);
            return Err(invalid(format!(
                "joint {stray} is not reachable from the root (cycle in parent links)"
            )));
        }

        Ok(order)
    }
}

fn invalid(message: impl Into<String>) -> KinematicsError {
    KinematicsError::InvalidTopology(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> SkeletonBuilder {
        Skeleton::builder()
            .add_root("base", DVec3::ZERO, [3, 4, 5])
            .add_joint_with_channels("shoulder", 0, DVec3::new(0.0, 100.0, 0.0), [6, 7, 8])
            .add_joint_with_channels("elbow", 1, DVec3::new(0.0, 250.0, 0.0), [9, 10, 11])
            .add_joint("hand", 2, DVec3::new(0.0, 200.0, 0.0))
    }

    #[test]
    fn builds_simple_chain() {
        let skeleton = arm().build().unwrap();
        assert_eq!(skeleton.joint_count(), 4);
        assert_eq!(skeleton.order(), &[0, 1, 2, 3]);
        assert_eq!(skeleton.find("elbow"), Some(2));
        assert!(skeleton.joint(3).unwrap().rotation_channels.is_none());
    }

    #[test]
    fn rest_positions_accumulate_offsets() {
        let skeleton = arm().build().unwrap();
        let rest = skeleton.rest_positions();
        assert_eq!(rest[3], DVec3::new(0.0, 550.0, 0.0));
    }

    #[test]
    fn order_puts_parents_first_even_when_listed_late() {
        let skeleton = Skeleton::builder()
            .add_root("root", DVec3::ZERO, [3, 4, 5])
            .add_joint("leaf", 2, DVec3::X)
            .add_joint("mid", 0, DVec3::Y)
            .build()
            .unwrap();
        assert_eq!(skeleton.order(), &[0, 2, 1]);
    }

    #[test]
    fn rejects_empty() {
        let err = Skeleton::builder().build().unwrap_err();
        assert!(matches!(err, KinematicsError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_non_root_first_joint() {
        let err = Skeleton::builder()
            .add_joint("orphan", 0, DVec3::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, KinematicsError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_out_of_range_parent() {
        let err = arm().add_joint("ghost", 17, DVec3::ZERO).build().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_cycle() {
        let err = Skeleton::builder()
            .add_root("root", DVec3::ZERO, [3, 4, 5])
            .add_joint("a", 2, DVec3::X)
            .add_joint("b", 1, DVec3::Y)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn rejects_second_root() {
        let err = arm().add(Joint::new("extra", None, DVec3::ZERO)).build().unwrap_err();
        assert!(err.to_string().contains("second root"));
    }

    #[test]
    fn rejects_root_without_rotation_channels() {
        let err = Skeleton::builder()
            .add(Joint::new("root", None, DVec3::ZERO))
            .add_joint("tip", 0, DVec3::new(0.0, 100.0, 0.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, KinematicsError::InvalidTopology(_)));
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn rejects_root_driven_by_joint_channels() {
        let err = Skeleton::builder()
            .add_root("root", DVec3::ZERO, [6, 7, 8])
            .add_joint("tip", 0, DVec3::Y)
            .build()
            .unwrap_err();
        assert!(matches!(err, KinematicsError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_joint_reading_root_channels() {
        let err = arm()
            .add_joint_with_channels("finger", 3, DVec3::X, [3, 4, 5])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("reserved for the root"));

        let err = arm()
            .add_joint_with_channels("finger", 3, DVec3::X, [0, 1, 2])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("channel 0"));
    }

    #[test]
    fn rejects_channel_outside_pose() {
        let err = arm()
            .add_joint_with_channels("finger", 3, DVec3::X, [97, 98, 99])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("channel 99"));
    }
}
