//! HMAC signing and verification

use super::{Step, StepPair};
use crate::config::{ConfigMap, HmacConfig};
use crate::error::{ConfigError, Result};
use crate::payload::Payload;
use crate::validators::require_hash_algorithm_supported;
use msgpipe_common::logging::key_fingerprint;
use msgpipe_hashing::{HmacAlgorithm, open_signed, sign};
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Validated HMAC settings shared by a sign/verify pair
pub struct HmacSettings {
    algorithm: HmacAlgorithm,
    key: Zeroizing<Vec<u8>>,
}

impl HmacSettings {
    /// Validate an HMAC configuration
    ///
    /// # Errors
    ///
    /// `ConfigError::UnsupportedHashAlgorithm`.
    pub fn from_config(config: HmacConfig) -> std::result::Result<Self, ConfigError> {
        let algorithm = require_hash_algorithm_supported("type", &config.algorithm)?;
        tracing::debug!(
            algorithm = algorithm.name(),
            key = %key_fingerprint(&config.key),
            "signing step configured"
        );
        Ok(Self {
            algorithm,
            key: config.key,
        })
    }

    /// Resolved algorithm
    #[must_use]
    pub fn algorithm(&self) -> HmacAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for HmacSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSettings")
            .field("algorithm", &self.algorithm)
            .field("key", &key_fingerprint(&self.key))
            .finish()
    }
}

/// Prefix bytes with their hex HMAC and the signature marker
#[derive(Debug, Clone)]
pub struct Sign {
    settings: Arc<HmacSettings>,
}

/// Check and strip the signature added by [`Sign`]
#[derive(Debug, Clone)]
pub struct VerifySignature {
    settings: Arc<HmacSettings>,
}

impl Step for Sign {
    fn name(&self) -> &'static str {
        "sign"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let message = payload.into_bytes(self.name())?;
        let s = &self.settings;
        Ok(Payload::Bytes(sign(&message, s.algorithm, &s.key)?))
    }
}

impl Step for VerifySignature {
    fn name(&self) -> &'static str {
        "verify_signature"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let framed = payload.into_bytes(self.name())?;
        let s = &self.settings;
        let message = open_signed(&framed, s.algorithm, &s.key)?;
        Ok(Payload::Bytes(message.to_vec()))
    }
}

/// Build a sign/verify pair from raw config
///
/// # Errors
///
/// The first problem with the `type` or `key` entries.
pub fn pair(config: &ConfigMap) -> std::result::Result<StepPair, ConfigError> {
    let settings = Arc::new(HmacSettings::from_config(HmacConfig::from_map(config)?)?);
    Ok((
        Box::new(Sign {
            settings: Arc::clone(&settings),
        }),
        Box::new(VerifySignature { settings }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgpipe_common::ErrorKind;

    fn build() -> StepPair {
        pair(&ConfigMap::from(HmacConfig::new("sha256", "shared secret"))).expect("valid config")
    }

    #[test]
    fn sign_then_verify() {
        let (sign, verify) = build();
        let framed = sign.apply(b"ciphertext".as_slice().into()).expect("sign");
        let bytes = framed.as_bytes().expect("bytes");
        assert_eq!(bytes[64], b':');
        assert!(bytes.ends_with(b"ciphertext"));
        let message = verify.apply(framed).expect("verify");
        assert_eq!(message.as_bytes(), Some(&b"ciphertext"[..]));
    }

    #[test]
    fn unsigned_message_is_framing_error() {
        let (_, verify) = build();
        let err = verify.apply(b"no marker here".as_slice().into()).expect_err("unsigned");
        assert_eq!(err.kind(), ErrorKind::Framing);
    }

    #[test]
    fn forged_digest_is_authentication_error() {
        let (_, verify) = build();
        let forged = format!("{}:ciphertext", "0".repeat(64));
        let err = verify.apply(forged.into_bytes().into()).expect_err("forged");
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn unsupported_algorithm_rejected_at_build_time() {
        assert!(matches!(
            pair(&ConfigMap::from(HmacConfig::new("md5", "k"))),
            Err(ConfigError::UnsupportedHashAlgorithm { .. })
        ));
    }
}
