//! Error types for the codec crate

use msgpipe_common::{ErrorKind, HasErrorKind};
use thiserror::Error;

/// Longest input excerpt rendered by `Display`
const PREVIEW_LEN: usize = 64;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec failures, each carrying the offending input
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// The value could not be serialized to JSON
    #[error("cannot encode {type_name} as JSON: {reason}")]
    JsonEncode {
        /// Rust type of the rejected value
        type_name: &'static str,
        /// Serializer message
        reason: String,
    },

    /// The input is not a single well-formed JSON document of the expected shape
    #[error("cannot decode JSON from {:?}: {reason}", preview(.input))]
    JsonDecode {
        /// Rejected input (lossy UTF-8)
        input: String,
        /// Parser message
        reason: String,
    },

    /// The input is not valid padded standard base64
    #[error("cannot decode ASCII-safe payload {:?}: {reason}", preview(.input))]
    Base64Decode {
        /// Rejected input (lossy UTF-8)
        input: String,
        /// Decoder message
        reason: String,
    },
}

impl CodecError {
    /// The offending input, when the failure was a decode
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::JsonEncode { .. } => None,
            Self::JsonDecode { input, .. } | Self::Base64Decode { input, .. } => Some(input),
        }
    }
}

impl HasErrorKind for CodecError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Encoding
    }
}

fn preview(input: &str) -> &str {
    match input.char_indices().nth(PREVIEW_LEN) {
        Some((end, _)) => &input[..end],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_truncates_long_input() {
        let err = CodecError::Base64Decode {
            input: "x".repeat(500),
            reason: "Invalid padding".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.len() < 200, "{rendered}");
        assert_eq!(err.input().map(str::len), Some(500));
    }

    #[test]
    fn every_codec_error_is_an_encoding_error() {
        let err = CodecError::JsonEncode {
            type_name: "f64",
            reason: "oops".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert!(err.input().is_none());
    }
}
