//! Error handling for the hashing crate

use msgpipe_common::{ErrorKind, HasErrorKind};
use thiserror::Error;

/// Hashing and framing errors
#[derive(Debug, Clone, Error)]
pub enum HashError {
    /// The algorithm name is unknown or not compiled into this build
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The MAC could not be keyed
    #[error("MAC initialization error: {0}")]
    MacInitialization(String),

    /// No signature marker, or a marker with nothing in front of it
    #[error("HMAC marker not found in {frame_len}-byte message")]
    MarkerNotFound {
        /// Length of the rejected frame
        frame_len: usize,
    },

    /// The recomputed digest does not match the one carried by the message
    #[error("HMAC verification failed ({algorithm})")]
    VerificationFailed {
        /// Algorithm the digest was recomputed with
        algorithm: &'static str,
    },
}

impl HasErrorKind for HashError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedAlgorithm(_) => ErrorKind::Configuration,
            Self::MacInitialization(_) => ErrorKind::Crypto,
            Self::MarkerNotFound { .. } => ErrorKind::Framing,
            Self::VerificationFailed { .. } => ErrorKind::Authentication,
        }
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
