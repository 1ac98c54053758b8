//! Core error kinds

use std::fmt;

/// The kinds of failure a message pipeline can report
///
/// Configuration errors only occur while a pipeline is being built. The
/// remaining kinds only occur while a message is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing config key, unsupported cipher or hash algorithm, wrong IV length
    Configuration,

    /// JSON or ASCII-safe encoding/decoding failed on the given input
    Encoding,

    /// The signature marker was not found in a message expected to be signed
    Framing,

    /// The recomputed HMAC does not match the embedded digest
    Authentication,

    /// The underlying cipher rejected its input
    Crypto,
}

impl ErrorKind {
    /// Stable lowercase label, suitable for structured log fields
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Encoding => "encoding",
            Self::Framing => "framing",
            Self::Authentication => "authentication",
            Self::Crypto => "crypto",
        }
    }

    /// Whether this kind can only be raised while building a pipeline
    #[must_use]
    pub fn is_build_time(self) -> bool {
        matches!(self, Self::Configuration)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every error type in the workspace
pub trait HasErrorKind {
    /// Classify this error
    fn kind(&self) -> ErrorKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_is_build_time() {
        assert!(ErrorKind::Configuration.is_build_time());
        for kind in [
            ErrorKind::Encoding,
            ErrorKind::Framing,
            ErrorKind::Authentication,
            ErrorKind::Crypto,
        ] {
            assert!(!kind.is_build_time(), "{kind} should be a message-time error");
        }
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(ErrorKind::Authentication.to_string(), "authentication");
    }
}
