//! Capability queries
//!
//! The supported set is derived from the compiled-in cipher families the
//! first time it is asked for and then reused.

use super::CipherAlgorithm;
use crate::{CipherError, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

static SUPPORTED_CIPHERS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    CipherAlgorithm::ALL
        .into_iter()
        .filter(|alg| alg.is_available())
        .map(CipherAlgorithm::name)
        .collect()
});

/// Canonical names of every cipher this build can use
#[must_use]
pub fn supported_ciphers() -> &'static BTreeSet<&'static str> {
    &SUPPORTED_CIPHERS
}

/// Required IV length for the named cipher
///
/// # Errors
///
/// Returns `CipherError::UnsupportedAlgorithm` if the cipher is unknown or
/// not compiled in.
pub fn iv_length(name: &str) -> Result<usize> {
    CipherAlgorithm::lookup(name)
        .map(CipherAlgorithm::iv_size)
        .ok_or_else(|| CipherError::UnsupportedAlgorithm(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_set_matches_features() {
        let supported = supported_ciphers();
        assert_eq!(supported.contains("aes-256-cbc"), cfg!(feature = "aes"));
        assert_eq!(supported.contains("chacha20-poly1305"), cfg!(feature = "chacha20"));
        assert!(!supported.contains("not-a-real-cipher"));
    }

    #[cfg(feature = "aes")]
    #[test]
    fn reports_iv_lengths() {
        assert_eq!(iv_length("AES-256-CBC").expect("supported"), 16);
        assert_eq!(iv_length("aes-128-gcm").expect("supported"), 12);
    }

    #[test]
    fn unknown_cipher_has_no_iv_length() {
        assert!(matches!(
            iv_length("des-ede3"),
            Err(CipherError::UnsupportedAlgorithm(name)) if name == "des-ede3"
        ));
    }
}
