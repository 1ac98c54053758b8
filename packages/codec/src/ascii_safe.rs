//! ASCII-safe transport encoding
//!
//! Standard base64 alphabet (`A-Z a-z 0-9 + /`) with `=` padding. Decoding is
//! strict: whitespace, URL-safe characters, missing or non-canonical padding
//! and truncated groups are all rejected instead of being skipped.

use crate::error::{CodecError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encode arbitrary bytes into the ASCII-safe alphabet
#[must_use]
pub fn encode_ascii_safe(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Decode ASCII-safe text back into bytes
///
/// # Errors
///
/// Returns `CodecError::Base64Decode` if `input` contains any byte outside
/// the alphabet or is not correctly padded.
pub fn decode_ascii_safe<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>> {
    let input = input.as_ref();
    STANDARD
        .decode(input)
        .map_err(|e| CodecError::Base64Decode {
            input: String::from_utf8_lossy(input).into_owned(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_vector() {
        assert_eq!(encode_ascii_safe(b"this is a string"), "dGhpcyBpcyBhIHN0cmluZw==");
    }

    #[test]
    fn decodes_known_vector() {
        let decoded = decode_ascii_safe("dGhpcyBpcyBhIHN0cmluZw==").expect("valid base64");
        assert_eq!(decoded, b"this is a string");
    }

    #[test]
    fn empty_round_trips() {
        assert_eq!(encode_ascii_safe(b""), "");
        assert_eq!(decode_ascii_safe("").expect("empty is valid"), Vec::<u8>::new());
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        for bad in ["dGhp!cyBp", "dGhp cyBp", "dGhp\ncyBp", "dGhp-_Bp"] {
            let err = decode_ascii_safe(bad).expect_err(bad);
            assert_eq!(err.input(), Some(bad));
        }
    }

    #[test]
    fn rejects_missing_padding() {
        assert!(decode_ascii_safe("dGhpcyBpcyBhIHN0cmluZw").is_err());
    }

    #[test]
    fn rejects_truncated_group() {
        assert!(decode_ascii_safe("dGhpc").is_err());
    }
}
