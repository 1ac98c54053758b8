//! Error handling for the cipher crate

use msgpipe_common::{ErrorKind, HasErrorKind};
use thiserror::Error;

/// Cipher-specific errors
#[derive(Debug, Clone, Error)]
pub enum CipherError {
    /// The cipher name is unknown or not compiled into this build
    #[error("Unsupported cipher: {0}")]
    UnsupportedAlgorithm(String),

    /// The IV does not have the length the cipher requires
    #[error("Invalid IV length for {cipher}: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Canonical cipher name
        cipher: &'static str,
        /// Required IV length in bytes
        expected: usize,
        /// Supplied IV length in bytes
        actual: usize,
    },

    /// The cipher refused to encrypt
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Bad padding, failed authentication tag, or malformed ciphertext
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
}

impl HasErrorKind for CipherError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedAlgorithm(_) => ErrorKind::Configuration,
            // an IV problem seen while processing a message is a cipher
            // rejection; build-time IV checks report their own error
            Self::InvalidIvLength { .. } | Self::EncryptionFailed(_) | Self::DecryptionFailed(_) => {
                ErrorKind::Crypto
            }
        }
    }
}

/// Result type for cipher operations
pub type Result<T> = std::result::Result<T, CipherError>;
