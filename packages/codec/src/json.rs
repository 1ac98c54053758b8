//! JSON codec
//!
//! `serde_json` already reports failures through `Result`; these wrappers
//! attach the offending input so a rejected message can be traced back.

use crate::error::{CodecError, Result};
use crate::finite::ensure_finite;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize `value` to compact JSON bytes
///
/// # Errors
///
/// Returns `CodecError::JsonEncode` if the value cannot be represented as
/// JSON (for example a map with non-string keys, or a NaN or infinite
/// float, which `serde_json` alone would write as `null`).
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    ensure_finite(value)?;
    serde_json::to_vec(value).map_err(|e| CodecError::JsonEncode {
        type_name: std::any::type_name::<T>(),
        reason: e.to_string(),
    })
}

/// Parse exactly one JSON document from `input`
///
/// Leading and trailing whitespace is allowed; any other trailing data is
/// rejected.
///
/// # Errors
///
/// Returns `CodecError::JsonDecode` if `input` is not valid UTF-8, is not
/// well-formed JSON, or does not match the shape of `T`.
pub fn decode_json<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    serde_json::from_slice(input).map_err(|e| CodecError::JsonDecode {
        input: String::from_utf8_lossy(input).into_owned(),
        reason: e.to_string(),
    })
}
