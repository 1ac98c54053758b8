//! Values flowing through a chain

use crate::error::{PipelineError, Result};
use serde_json::Value;

/// A message in one of its two forms
///
/// Before JSON encoding (and after JSON decoding) a message is a structured
/// value; every other step works on bytes.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Structured message
    Value(Value),
    /// Encoded bytes
    Bytes(Vec<u8>),
}

impl Payload {
    /// Short label for the variant, used in errors and logs
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Value(_) => "message",
            Self::Bytes(_) => "bytes",
        }
    }

    /// Take the bytes out, or fail on behalf of `step`
    ///
    /// # Errors
    ///
    /// `PipelineError::UnexpectedPayload` if this is a structured message.
    pub fn into_bytes(self, step: &'static str) -> Result<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            other => Err(other.unexpected(step, "bytes")),
        }
    }

    /// Take the structured message out, or fail on behalf of `step`
    ///
    /// # Errors
    ///
    /// `PipelineError::UnexpectedPayload` if this is raw bytes.
    pub fn into_value(self, step: &'static str) -> Result<Value> {
        match self {
            Self::Value(value) => Ok(value),
            other => Err(other.unexpected(step, "message")),
        }
    }

    /// Borrow the bytes, if any
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Value(_) => None,
        }
    }

    fn unexpected(&self, step: &'static str, expected: &'static str) -> PipelineError {
        PipelineError::UnexpectedPayload {
            step,
            expected,
            found: self.variant_name(),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_variant_names_the_step() {
        let err = Payload::from(json!({"a": 1})).into_bytes("encrypt").expect_err("message");
        assert!(matches!(
            err,
            PipelineError::UnexpectedPayload { step: "encrypt", expected: "bytes", found: "message" }
        ));

        let err = Payload::from(b"abc".as_slice()).into_value("encode_json").expect_err("bytes");
        assert!(matches!(
            err,
            PipelineError::UnexpectedPayload { step: "encode_json", expected: "message", found: "bytes" }
        ));
    }

    #[test]
    fn accessors() {
        let bytes = Payload::from(vec![1, 2, 3]);
        assert_eq!(bytes.as_bytes(), Some(&[1u8, 2, 3][..]));
        assert_eq!(bytes.into_bytes("test").expect("bytes"), vec![1, 2, 3]);
        assert_eq!(Payload::Value(Value::Null).as_bytes(), None);
    }
}
