//! Symmetric encryption with a configured key and IV

use super::{Step, StepPair};
use crate::config::{CipherConfig, ConfigMap};
use crate::error::{ConfigError, Result};
use crate::payload::Payload;
use crate::validators::require_valid_iv;
use msgpipe_cipher::{CipherAlgorithm, decrypt, encrypt};
use msgpipe_common::logging::key_fingerprint;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Validated cipher settings shared by an encrypt/decrypt pair
pub struct CipherSettings {
    cipher: CipherAlgorithm,
    key: Zeroizing<Vec<u8>>,
    iv: Zeroizing<Vec<u8>>,
}

impl CipherSettings {
    /// Validate a cipher configuration
    ///
    /// # Errors
    ///
    /// `ConfigError::UnsupportedCipher` or `ConfigError::InvalidIv`.
    pub fn from_config(config: CipherConfig) -> std::result::Result<Self, ConfigError> {
        let cipher = require_valid_iv("secret", &config.cipher, &config.secret)?;

        tracing::debug!(
            cipher = cipher.name(),
            key = %key_fingerprint(&config.key),
            "encryption step configured"
        );
        if config.key.len() != cipher.key_size() {
            tracing::debug!(
                cipher = cipher.name(),
                supplied = config.key.len(),
                used = cipher.key_size(),
                "key will be zero-padded or truncated to the cipher key size"
            );
        }

        Ok(Self {
            cipher,
            key: config.key,
            iv: config.secret,
        })
    }

    /// Resolved cipher
    #[must_use]
    pub fn cipher(&self) -> CipherAlgorithm {
        self.cipher
    }
}

impl fmt::Debug for CipherSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSettings")
            .field("cipher", &self.cipher)
            .field("key", &key_fingerprint(&self.key))
            .finish_non_exhaustive()
    }
}

/// Encrypt bytes
#[derive(Debug, Clone)]
pub struct Encrypt {
    settings: Arc<CipherSettings>,
}

/// Decrypt bytes produced by [`Encrypt`] with the same settings
#[derive(Debug, Clone)]
pub struct Decrypt {
    settings: Arc<CipherSettings>,
}

impl Step for Encrypt {
    fn name(&self) -> &'static str {
        "encrypt"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let plaintext = payload.into_bytes(self.name())?;
        let s = &self.settings;
        Ok(Payload::Bytes(encrypt(&plaintext, s.cipher, &s.key, &s.iv)?))
    }
}

impl Step for Decrypt {
    fn name(&self) -> &'static str {
        "decrypt"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let ciphertext = payload.into_bytes(self.name())?;
        let s = &self.settings;
        Ok(Payload::Bytes(decrypt(&ciphertext, s.cipher, &s.key, &s.iv)?))
    }
}

/// Build an encrypt/decrypt pair from raw config
///
/// # Errors
///
/// The first problem with the `type`, `key` or `secret` entries.
pub fn pair(config: &ConfigMap) -> std::result::Result<StepPair, ConfigError> {
    let settings = Arc::new(CipherSettings::from_config(CipherConfig::from_map(config)?)?);
    Ok((
        Box::new(Encrypt {
            settings: Arc::clone(&settings),
        }),
        Box::new(Decrypt { settings }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgpipe_common::ErrorKind;

    fn build(cipher: &str, iv: &str) -> std::result::Result<StepPair, ConfigError> {
        pair(&ConfigMap::from(CipherConfig::new(cipher, "1234567890ABCDEF", iv)))
    }

    #[test]
    fn pair_round_trips() {
        let (encrypt, decrypt) = build("AES-256-CBC", "FEDCBA0987654321").expect("valid config");
        let ciphertext = encrypt.apply(b"{\"hello\":\"world\"}".as_slice().into()).expect("encrypt");
        assert_ne!(ciphertext.as_bytes(), Some(&b"{\"hello\":\"world\"}"[..]));
        let plaintext = decrypt.apply(ciphertext).expect("decrypt");
        assert_eq!(plaintext.as_bytes(), Some(&b"{\"hello\":\"world\"}"[..]));
    }

    #[test]
    fn rejects_bad_config_at_build_time() {
        assert!(matches!(
            build("not-a-real-cipher", "FEDCBA0987654321"),
            Err(ConfigError::UnsupportedCipher { .. })
        ));
        assert!(matches!(
            build("aes-256-cbc", "FEDCBA098765432"),
            Err(ConfigError::InvalidIv { expected: 16, actual: 15, .. })
        ));
    }

    #[test]
    fn truncated_ciphertext_is_crypto_error() {
        let (encrypt, decrypt) = build("aes-256-cbc", "FEDCBA0987654321").expect("valid config");
        let mut ciphertext = encrypt
            .apply(b"sixteen byte msg".as_slice().into())
            .expect("encrypt")
            .into_bytes("test")
            .expect("bytes");
        ciphertext.pop();
        let err = decrypt.apply(ciphertext.into()).expect_err("not a whole block");
        assert_eq!(err.kind(), ErrorKind::Crypto);
    }

    #[test]
    fn debug_shows_fingerprint_only() {
        let (encrypt, _) = build("aes-256-cbc", "FEDCBA0987654321").expect("valid config");
        let shown = format!("{encrypt:?}");
        assert!(shown.contains("Aes256Cbc"));
        assert!(!shown.contains("1234567890ABCDEF"));
    }
}
