//! Cipher algorithm definitions and metadata

use std::fmt;
use std::str::FromStr;

/// Symmetric ciphers understood by msgpipe
///
/// Names follow OpenSSL's lowercase spelling so that configurations written
/// for OpenSSL-based peers (`"AES-256-CBC"`) resolve to the same cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CipherAlgorithm {
    /// AES-128 in CBC mode with PKCS#7 padding
    Aes128Cbc,
    /// AES-192 in CBC mode with PKCS#7 padding
    Aes192Cbc,
    /// AES-256 in CBC mode with PKCS#7 padding
    Aes256Cbc,
    /// AES-128 in CTR mode, 128-bit big-endian counter
    Aes128Ctr,
    /// AES-192 in CTR mode, 128-bit big-endian counter
    Aes192Ctr,
    /// AES-256 in CTR mode, 128-bit big-endian counter
    Aes256Ctr,
    /// AES-128-GCM, 16-byte tag appended to the ciphertext
    Aes128Gcm,
    /// AES-256-GCM, 16-byte tag appended to the ciphertext
    Aes256Gcm,
    /// ChaCha20-Poly1305, 16-byte tag appended to the ciphertext
    ChaCha20Poly1305,
}

/// Cargo-feature family a cipher belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherFamily {
    /// Enabled by the `aes` feature
    Aes,
    /// Enabled by the `chacha20` feature
    ChaCha20,
}

impl CipherAlgorithm {
    /// Every cipher this crate knows how to drive, compiled in or not
    pub const ALL: [Self; 9] = [
        Self::Aes128Cbc,
        Self::Aes192Cbc,
        Self::Aes256Cbc,
        Self::Aes128Ctr,
        Self::Aes192Ctr,
        Self::Aes256Ctr,
        Self::Aes128Gcm,
        Self::Aes256Gcm,
        Self::ChaCha20Poly1305,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128Cbc => "aes-128-cbc",
            Self::Aes192Cbc => "aes-192-cbc",
            Self::Aes256Cbc => "aes-256-cbc",
            Self::Aes128Ctr => "aes-128-ctr",
            Self::Aes192Ctr => "aes-192-ctr",
            Self::Aes256Ctr => "aes-256-ctr",
            Self::Aes128Gcm => "aes-128-gcm",
            Self::Aes256Gcm => "aes-256-gcm",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }

    /// Key size in bytes
    #[must_use]
    pub fn key_size(self) -> usize {
        match self {
            Self::Aes128Cbc | Self::Aes128Ctr | Self::Aes128Gcm => 16,
            Self::Aes192Cbc | Self::Aes192Ctr => 24,
            Self::Aes256Cbc | Self::Aes256Ctr | Self::Aes256Gcm | Self::ChaCha20Poly1305 => 32,
        }
    }

    /// IV size in bytes
    #[must_use]
    pub fn iv_size(self) -> usize {
        match self {
            Self::Aes128Cbc
            | Self::Aes192Cbc
            | Self::Aes256Cbc
            | Self::Aes128Ctr
            | Self::Aes192Ctr
            | Self::Aes256Ctr => 16,
            Self::Aes128Gcm | Self::Aes256Gcm | Self::ChaCha20Poly1305 => 12,
        }
    }

    /// Whether ciphertext carries an authentication tag
    #[must_use]
    pub fn is_aead(self) -> bool {
        matches!(self, Self::Aes128Gcm | Self::Aes256Gcm | Self::ChaCha20Poly1305)
    }

    /// Feature family
    #[must_use]
    pub fn family(self) -> CipherFamily {
        match self {
            Self::ChaCha20Poly1305 => CipherFamily::ChaCha20,
            _ => CipherFamily::Aes,
        }
    }

    /// Whether this cipher is compiled into the current build
    #[must_use]
    pub fn is_available(self) -> bool {
        match self.family() {
            CipherFamily::Aes => cfg!(feature = "aes"),
            CipherFamily::ChaCha20 => cfg!(feature = "chacha20"),
        }
    }

    /// Resolve a name case-insensitively, ignoring ciphers not compiled in
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name) && alg.is_available())
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = crate::CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| crate::CipherError::UnsupportedAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "aes")]
    #[test]
    fn parses_openssl_spelling() {
        let alg: CipherAlgorithm = "AES-256-CBC".parse().expect("upper-case name");
        assert_eq!(alg, CipherAlgorithm::Aes256Cbc);
        assert_eq!(alg.to_string(), "aes-256-cbc");
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "not-a-real-cipher"
            .parse::<CipherAlgorithm>()
            .expect_err("unknown cipher");
        assert!(err.to_string().contains("not-a-real-cipher"));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = CipherAlgorithm::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CipherAlgorithm::ALL.len());
    }

    #[test]
    fn aead_ciphers_use_96_bit_nonces() {
        for alg in CipherAlgorithm::ALL.into_iter().filter(|a| a.is_aead()) {
            assert_eq!(alg.iv_size(), 12, "{alg}");
        }
    }
}
