//! HMAC hash algorithm names and capability set

use crate::{HashError, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Hash functions usable as the HMAC digest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HmacAlgorithm {
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA-512 truncated to 256 bits
    Sha512_256,
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// BLAKE2b with a 512-bit output
    Blake2b512,
}

impl HmacAlgorithm {
    /// Every algorithm this crate knows how to drive, compiled in or not
    pub const ALL: [Self; 10] = [
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_256,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b512,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_256 => "sha512/256",
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
            Self::Blake2b512 => "blake2b512",
        }
    }

    /// Raw digest length in bytes; the hex form is twice this
    #[must_use]
    pub fn output_size(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha3_224 => 28,
            Self::Sha256 | Self::Sha512_256 | Self::Sha3_256 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b512 => 64,
        }
    }

    /// Whether this algorithm is compiled into the current build
    #[must_use]
    pub fn is_available(self) -> bool {
        match self {
            Self::Sha224 | Self::Sha256 | Self::Sha384 | Self::Sha512 | Self::Sha512_256 => {
                cfg!(feature = "sha2")
            }
            Self::Sha3_224 | Self::Sha3_256 | Self::Sha3_384 | Self::Sha3_512 => {
                cfg!(feature = "sha3")
            }
            Self::Blake2b512 => cfg!(feature = "blake2"),
        }
    }

    /// Resolve a name case-insensitively, ignoring algorithms not compiled in
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name) && alg.is_available())
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HmacAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| HashError::UnsupportedAlgorithm(s.to_string()))
    }
}

static SUPPORTED_ALGORITHMS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    HmacAlgorithm::ALL
        .into_iter()
        .filter(|alg| alg.is_available())
        .map(HmacAlgorithm::name)
        .collect()
});

/// Canonical names of every HMAC algorithm this build can use
#[must_use]
pub fn supported_algorithms() -> &'static BTreeSet<&'static str> {
    &SUPPORTED_ALGORITHMS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        for alg in HmacAlgorithm::ALL.into_iter().filter(|a| a.is_available()) {
            let upper = alg.name().to_ascii_uppercase();
            assert_eq!(upper.parse::<HmacAlgorithm>().expect("known name"), alg);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        for bad in ["md5", "sha256 ", "", "sha-256"] {
            assert!(matches!(
                bad.parse::<HmacAlgorithm>(),
                Err(HashError::UnsupportedAlgorithm(name)) if name == bad
            ));
        }
    }

    #[test]
    fn supported_set_matches_features() {
        let supported = supported_algorithms();
        assert_eq!(supported.contains("sha256"), cfg!(feature = "sha2"));
        assert_eq!(supported.contains("sha3-256"), cfg!(feature = "sha3"));
        assert_eq!(supported.contains("blake2b512"), cfg!(feature = "blake2"));
        assert!(supported.iter().all(|name| *name == name.to_ascii_lowercase()));
    }
}
