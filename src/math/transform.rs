use glam::{DMat3, DVec3};
use std::ops::Mul;

/// A rotation followed by a translation, `x -> rotation * x + translation`.
///
/// Composition is associative, which is what lets drift reversion run as a
/// fold (or a prefix scan) over per-frame root motions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub rotation: DMat3,
    pub translation: DVec3,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };

    pub fn new(rotation: DMat3, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: DMat3) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Places `local`, given relative to this transform, into this
    /// transform's parent frame.
    pub fn compose(&self, local: &Self) -> Self {
        Self {
            rotation: self.rotation * local.rotation,
            translation: self.translation + self.rotation * local.translation,
        }
    }

    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }
}

impl Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}
