use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Failure kinds surfaced by every fallible stage of the encoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QRError {
    /// A caller-supplied parameter violates a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The content cannot be legally encoded under the requested constraints.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A computed invariant failed. Points at a defect in tables or algorithm.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QRError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        let err = QRError::invalid_format("Character count 300 exceeds 8 bits");
        assert_eq!(err.to_string(), "Invalid format: Character count 300 exceeds 8 bits");
        let err = QRError::invalid_argument("Block id 4 out of range");
        assert_eq!(err.to_string(), "Invalid argument: Block id 4 out of range");
        let err = QRError::internal("2 bits left after placement");
        assert_eq!(err.to_string(), "Internal error: 2 bits left after placement");
    }
}
