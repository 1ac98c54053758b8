//! Configuration validators
//!
//! Each check comes in two forms: a predicate returning `bool`, and a
//! `require_*` variant that returns the parsed value on success or a
//! [`ConfigError`] naming the offending field and value. Step constructors
//! call the `require_*` variants for every field they consume.

use crate::config::ConfigMap;
use crate::error::ConfigError;
use msgpipe_cipher::{CipherAlgorithm, iv_length, supported_ciphers};
use msgpipe_hashing::{HmacAlgorithm, supported_algorithms};
use serde_json::Value;

/// Whether the named cipher can be used by this build
#[must_use]
pub fn cipher_supported(name: &str) -> bool {
    supported_ciphers().contains(name.to_ascii_lowercase().as_str())
}

/// Whether `iv` has the length the named cipher requires
///
/// False for unsupported ciphers.
#[must_use]
pub fn iv_valid(cipher: &str, iv: &[u8]) -> bool {
    iv_length(cipher).is_ok_and(|expected| expected == iv.len())
}

/// Whether the named HMAC algorithm can be used by this build
#[must_use]
pub fn hash_algorithm_supported(name: &str) -> bool {
    supported_algorithms().contains(name.to_ascii_lowercase().as_str())
}

/// Whether the config has an entry named `key`
#[must_use]
pub fn config_has_key(config: &ConfigMap, key: &str) -> bool {
    config.contains_key(key)
}

/// Resolve a supported cipher
///
/// # Errors
///
/// `ConfigError::UnsupportedCipher` naming `field` and `name`.
pub fn require_cipher_supported(field: &str, name: &str) -> Result<CipherAlgorithm, ConfigError> {
    CipherAlgorithm::lookup(name).ok_or_else(|| ConfigError::UnsupportedCipher {
        field: field.to_string(),
        value: name.to_string(),
    })
}

/// Resolve the cipher and check the IV length against it
///
/// The cipher name is always read from the `type` entry; `field` names the
/// entry holding the IV. IVs are not secret, so a rejected one is reported
/// in hex.
///
/// # Errors
///
/// `ConfigError::UnsupportedCipher` if the cipher is not supported, then
/// `ConfigError::InvalidIv` if the IV has the wrong length.
pub fn require_valid_iv(field: &str, cipher: &str, iv: &[u8]) -> Result<CipherAlgorithm, ConfigError> {
    let algorithm = require_cipher_supported("type", cipher)?;
    if iv.len() == algorithm.iv_size() {
        Ok(algorithm)
    } else {
        Err(ConfigError::InvalidIv {
            field: field.to_string(),
            value: hex::encode(iv),
            cipher: algorithm.name(),
            expected: algorithm.iv_size(),
            actual: iv.len(),
        })
    }
}

/// Resolve a supported HMAC algorithm
///
/// # Errors
///
/// `ConfigError::UnsupportedHashAlgorithm` naming `field` and `name`.
pub fn require_hash_algorithm_supported(
    field: &str,
    name: &str,
) -> Result<HmacAlgorithm, ConfigError> {
    HmacAlgorithm::lookup(name).ok_or_else(|| ConfigError::UnsupportedHashAlgorithm {
        field: field.to_string(),
        value: name.to_string(),
    })
}

/// Fetch a required config entry
///
/// # Errors
///
/// `ConfigError::MissingConfigKey` if there is no entry named `key`.
pub fn require_config_has_key<'a>(config: &'a ConfigMap, key: &str) -> Result<&'a Value, ConfigError> {
    config.get(key).ok_or_else(|| ConfigError::MissingConfigKey {
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cipher_names_are_case_insensitive() {
        assert!(cipher_supported("AES-256-CBC"));
        assert!(cipher_supported("aes-256-cbc"));
        assert!(!cipher_supported("not-a-real-cipher"));
        assert_eq!(
            require_cipher_supported("type", "Aes-256-Cbc").expect("supported"),
            CipherAlgorithm::Aes256Cbc
        );
    }

    #[test]
    fn unsupported_cipher_names_field_and_value() {
        assert_eq!(
            require_cipher_supported("type", "not-a-real-cipher").expect_err("unsupported"),
            ConfigError::UnsupportedCipher {
                field: "type".into(),
                value: "not-a-real-cipher".into(),
            }
        );
    }

    #[test]
    fn iv_length_must_match_exactly() {
        assert!(iv_valid("aes-256-cbc", b"FEDCBA0987654321"));
        assert!(!iv_valid("aes-256-cbc", b"FEDCBA098765432"));
        assert!(!iv_valid("aes-256-cbc", b"FEDCBA09876543210"));
        assert!(!iv_valid("not-a-real-cipher", b"FEDCBA0987654321"));

        assert_eq!(
            require_valid_iv("secret", "aes-256-cbc", b"FEDCBA09876543210").expect_err("too long"),
            ConfigError::InvalidIv {
                field: "secret".into(),
                value: hex::encode(b"FEDCBA09876543210"),
                cipher: "aes-256-cbc",
                expected: 16,
                actual: 17,
            }
        );
    }

    #[test]
    fn iv_check_reports_bad_cipher_first() {
        assert!(matches!(
            require_valid_iv("secret", "rot13", b""),
            Err(ConfigError::UnsupportedCipher { value, .. }) if value == "rot13"
        ));
    }

    #[test]
    fn hash_algorithms() {
        assert!(hash_algorithm_supported("SHA256"));
        assert!(!hash_algorithm_supported("md5"));
        assert_eq!(
            require_hash_algorithm_supported("type", "sha256").expect("supported"),
            HmacAlgorithm::Sha256
        );
        assert!(matches!(
            require_hash_algorithm_supported("type", "md5"),
            Err(ConfigError::UnsupportedHashAlgorithm { field, value }) if field == "type" && value == "md5"
        ));
    }

    #[test]
    fn config_keys() {
        let config = match json!({"type": "sha256", "key": null}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert!(config_has_key(&config, "type"));
        assert!(config_has_key(&config, "key"));
        assert!(!config_has_key(&config, "secret"));
        assert_eq!(require_config_has_key(&config, "type").expect("present"), "sha256");
        assert_eq!(
            require_config_has_key(&config, "secret").expect_err("absent"),
            ConfigError::MissingConfigKey { key: "secret".into() }
        );
    }
}
