//! Error types for pipeline construction and message processing

use msgpipe_cipher::CipherError;
use msgpipe_codec::CodecError;
use msgpipe_common::{ErrorKind, HasErrorKind};
use msgpipe_hashing::HashError;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Invalid step configuration, detected while a pipeline is built
///
/// Never carries key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required config entry is absent
    #[error("config is missing key '{key}'")]
    MissingConfigKey {
        /// Name of the missing entry
        key: String,
    },

    /// A config entry has the wrong shape or cannot be decoded
    #[error("config key '{key}' is invalid: {reason}")]
    InvalidConfigValue {
        /// Name of the offending entry
        key: String,
        /// What was wrong with it
        reason: String,
    },

    /// The named cipher is unknown or not compiled in
    #[error("config key '{field}': unsupported cipher '{value}'")]
    UnsupportedCipher {
        /// Config entry that named the cipher
        field: String,
        /// The rejected cipher name
        value: String,
    },

    /// The IV does not have the cipher's IV length
    #[error("config key '{field}': {cipher} needs a {expected}-byte IV, got {actual} bytes ({value})")]
    InvalidIv {
        /// Config entry that held the IV
        field: String,
        /// The rejected IV, hex encoded
        value: String,
        /// Canonical cipher name
        cipher: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// The named HMAC algorithm is unknown or not compiled in
    #[error("config key '{field}': unsupported hash algorithm '{value}'")]
    UnsupportedHashAlgorithm {
        /// Config entry that named the algorithm
        field: String,
        /// The rejected algorithm name
        value: String,
    },

    /// A pipeline definition could not be parsed
    #[error("invalid pipeline definition: {reason}")]
    InvalidDefinition {
        /// Parser message
        reason: String,
    },

    /// A pipeline definition file could not be read
    #[error("cannot read pipeline definition {path}: {reason}")]
    DefinitionIo {
        /// File that was being read
        path: String,
        /// I/O error message
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid_value(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl HasErrorKind for ConfigError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

/// Any failure while building a pipeline or processing a message
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON or base64 failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Encryption or decryption failure
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// Signature framing or verification failure
    #[error(transparent)]
    Hash(#[from] HashError),

    /// A step received the wrong kind of payload
    #[error("step '{step}' expected a {expected} payload, got {found}")]
    UnexpectedPayload {
        /// Step that rejected the payload
        step: &'static str,
        /// Variant the step accepts
        expected: &'static str,
        /// Variant it was given
        found: &'static str,
    },

    /// The transmit chain did not end in an ASCII wire string
    #[error("transmit chain produced {found}, not an ASCII string")]
    NonAsciiOutput {
        /// What the chain produced instead
        found: &'static str,
    },
}

impl PipelineError {
    /// Error classification
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(e) => e.kind(),
            Self::Codec(e) => e.kind(),
            Self::Cipher(e) => e.kind(),
            Self::Hash(e) => e.kind(),
            Self::UnexpectedPayload { .. } | Self::NonAsciiOutput { .. } => ErrorKind::Encoding,
        }
    }
}

impl HasErrorKind for PipelineError {
    fn kind(&self) -> ErrorKind {
        PipelineError::kind(self)
    }
}
