use glam::DVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub parent: Option<usize>,
    /// Rest-pose position relative to the parent, in millimetres.
    pub offset: DVec3,
    /// Pose-vector indices of the exponential map driving this joint, or
    /// `None` for joints without a rotational degree of freedom.
    pub rotation_channels: Option<[usize; 3]>,
}

impl Joint {
    pub fn new(name: impl Into<String>, parent: Option<usize>, offset: DVec3) -> Self {
        Self {
            name: name.into(),
            parent,
            offset,
            rotation_channels: None,
        }
    }

    pub fn with_channels(mut self, channels: [usize; 3]) -> Self {
        self.rotation_channels = Some(channels);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Local rotation of this joint read from `pose`, as an exponential map.
    /// Joints without channels rotate by nothing.
    pub fn local_expmap(&self, pose: &[f64]) -> DVec3 {
        match self.rotation_channels {
            Some([x, y, z]) => DVec3::new(pose[x], pose[y], pose[z]),
            None => DVec3::ZERO,
        }
    }
}
