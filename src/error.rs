//! Error types for the kinematics library.

/// Result type alias for kinematics operations.
pub type Result<T> = std::result::Result<T, KinematicsError>;

/// Errors surfaced to callers.
///
/// Numerical edge cases (zero angles, angles near pi, gimbal lock) never show
/// up here; the rotation converters resolve them locally.
#[derive(Debug, thiserror::Error)]
pub enum KinematicsError {
    /// A frame or sequence does not have the expected length.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The skeleton table does not describe a tree rooted at joint 0.
    #[error("invalid skeleton topology: {0}")]
    InvalidTopology(String),

    /// A line of a frame text file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error while reading or writing frames.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KinematicsError {
    pub(crate) fn dimension(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = KinematicsError::dimension("pose vector", 99, 98);
        assert_eq!(e.to_string(), "pose vector has length 98, expected 99");

        let e = KinematicsError::InvalidTopology("cycle at joint 3".into());
        assert_eq!(e.to_string(), "invalid skeleton topology: cycle at joint 3");

        let e = KinematicsError::Parse {
            line: 7,
            message: "bad float".into(),
        };
        assert_eq!(e.to_string(), "parse error on line 7: bad float");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let e: KinematicsError = io.into();
        assert!(e.to_string().contains("missing.txt"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<KinematicsError>();
    }
}
