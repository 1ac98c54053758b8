//! Signature framing
//!
//! A signed frame is the lowercase hex HMAC of a message, the [`MARKER`]
//! byte, then the message itself. Hex digits never include the marker, so
//! the first marker in an untampered frame always ends the digest.

use crate::{HashError, HmacAlgorithm, Result, hmac_hex, verify};

/// Delimiter between digest and message
///
/// Must stay outside `[0-9a-f]`. Peers must agree on it.
pub const MARKER: u8 = b':';

/// Prefix `message` with its hex HMAC and the marker
///
/// # Errors
///
/// See [`crate::hmac`].
pub fn sign(message: &[u8], algorithm: HmacAlgorithm, key: &[u8]) -> Result<Vec<u8>> {
    let digest = hmac_hex(message, algorithm, key)?;
    let mut framed = Vec::with_capacity(digest.len() + 1 + message.len());
    framed.extend_from_slice(digest.as_bytes());
    framed.push(MARKER);
    framed.extend_from_slice(message);
    Ok(framed)
}

/// Position of the first marker in a frame
///
/// # Errors
///
/// Returns `HashError::MarkerNotFound` when there is no marker, or when the
/// first one is at position 0 and so has no digest in front of it.
pub fn find_marker(framed: &[u8]) -> Result<usize> {
    match framed.iter().position(|&b| b == MARKER) {
        Some(pos) if pos > 0 => Ok(pos),
        _ => Err(HashError::MarkerNotFound {
            frame_len: framed.len(),
        }),
    }
}

/// Split a frame into `(digest, message)` at the first marker
///
/// # Errors
///
/// See [`find_marker`].
pub fn split_signed(framed: &[u8]) -> Result<(&[u8], &[u8])> {
    let pos = find_marker(framed)?;
    Ok((&framed[..pos], &framed[pos + 1..]))
}

/// Verify a frame and return the message it carries
///
/// # Errors
///
/// `HashError::MarkerNotFound` for a malformed frame,
/// `HashError::VerificationFailed` when the digest does not match.
pub fn open_signed<'a>(framed: &'a [u8], algorithm: HmacAlgorithm, key: &[u8]) -> Result<&'a [u8]> {
    let (digest, message) = split_signed(framed)?;
    verify(message, digest, algorithm, key)?;
    Ok(message)
}
