//! HMAC output type

use std::fmt;
use subtle::ConstantTimeEq;

/// Raw HMAC output with the algorithm that produced it
#[derive(Clone, PartialEq, Eq)]
pub struct MacDigest {
    algorithm: crate::HmacAlgorithm,
    bytes: Vec<u8>,
}

impl MacDigest {
    pub(crate) fn new(algorithm: crate::HmacAlgorithm, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }

    /// Algorithm that produced this digest
    #[must_use]
    pub fn algorithm(&self) -> crate::HmacAlgorithm {
        self.algorithm
    }

    /// Raw digest bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex form, the representation carried on the wire
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Compare against a hex digest taken from a message
    ///
    /// Runs in time independent of where the inputs first differ. Only the
    /// lowercase hex spelling matches.
    #[must_use]
    pub fn matches_hex(&self, candidate: &[u8]) -> bool {
        self.to_hex().as_bytes().ct_eq(candidate).into()
    }
}

impl fmt::Debug for MacDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacDigest")
            .field("algorithm", &self.algorithm)
            .field("hex", &self.to_hex())
            .finish()
    }
}

impl fmt::Display for MacDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for MacDigest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HmacAlgorithm;

    #[test]
    fn hex_is_lowercase() {
        let digest = MacDigest::new(HmacAlgorithm::Sha256, vec![0xAB, 0xCD, 0x01]);
        assert_eq!(digest.to_hex(), "abcd01");
        assert_eq!(digest.to_string(), "abcd01");
    }

    #[test]
    fn matches_only_exact_lowercase_hex() {
        let digest = MacDigest::new(HmacAlgorithm::Sha256, vec![0xAB, 0xCD]);
        assert!(digest.matches_hex(b"abcd"));
        assert!(!digest.matches_hex(b"ABCD"));
        assert!(!digest.matches_hex(b"abc"));
        assert!(!digest.matches_hex(b"abcd00"));
        assert!(!digest.matches_hex(b""));
    }
}
