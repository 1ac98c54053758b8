//! HMAC computation and verification

use crate::{HashError, HmacAlgorithm, MacDigest, Result};
use hmac::Mac;
#[cfg(any(feature = "sha2", feature = "sha3"))]
use hmac::Hmac;
#[cfg(feature = "blake2")]
use hmac::SimpleHmac;

#[cfg(any(feature = "sha2", feature = "sha3", feature = "blake2"))]
fn keyed_mac<M>(key: &[u8], message: &[u8]) -> Result<Vec<u8>>
where
    M: Mac + hmac::digest::KeyInit,
{
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| HashError::MacInitialization(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Compute the HMAC of `message` under `key`
///
/// Deterministic: the same inputs always give the same digest. Keys of any
/// length are accepted.
///
/// # Errors
///
/// Returns `HashError::MacInitialization` if the MAC cannot be keyed.
pub fn hmac(message: &[u8], algorithm: HmacAlgorithm, key: &[u8]) -> Result<MacDigest> {
    let bytes = match algorithm {
        #[cfg(feature = "sha2")]
        HmacAlgorithm::Sha224 => keyed_mac::<Hmac<sha2::Sha224>>(key, message),
        #[cfg(feature = "sha2")]
        HmacAlgorithm::Sha256 => keyed_mac::<Hmac<sha2::Sha256>>(key, message),
        #[cfg(feature = "sha2")]
        HmacAlgorithm::Sha384 => keyed_mac::<Hmac<sha2::Sha384>>(key, message),
        #[cfg(feature = "sha2")]
        HmacAlgorithm::Sha512 => keyed_mac::<Hmac<sha2::Sha512>>(key, message),
        #[cfg(feature = "sha2")]
        HmacAlgorithm::Sha512_256 => keyed_mac::<Hmac<sha2::Sha512_256>>(key, message),
        #[cfg(feature = "sha3")]
        HmacAlgorithm::Sha3_224 => keyed_mac::<Hmac<sha3::Sha3_224>>(key, message),
        #[cfg(feature = "sha3")]
        HmacAlgorithm::Sha3_256 => keyed_mac::<Hmac<sha3::Sha3_256>>(key, message),
        #[cfg(feature = "sha3")]
        HmacAlgorithm::Sha3_384 => keyed_mac::<Hmac<sha3::Sha3_384>>(key, message),
        #[cfg(feature = "sha3")]
        HmacAlgorithm::Sha3_512 => keyed_mac::<Hmac<sha3::Sha3_512>>(key, message),
        // BLAKE2b's lazy block buffer rules out the eager `Hmac` wrapper
        #[cfg(feature = "blake2")]
        HmacAlgorithm::Blake2b512 => keyed_mac::<SimpleHmac<blake2::Blake2b512>>(key, message),
        #[allow(unreachable_patterns)]
        _ => Err(HashError::UnsupportedAlgorithm(algorithm.name().to_string())),
    }?;
    Ok(MacDigest::new(algorithm, bytes))
}

/// Lowercase hex HMAC of `message` under `key`
///
/// # Errors
///
/// See [`hmac`].
pub fn hmac_hex(message: &[u8], algorithm: HmacAlgorithm, key: &[u8]) -> Result<String> {
    hmac(message, algorithm, key).map(|digest| digest.to_hex())
}

/// Check a hex digest against the HMAC of `message`
///
/// # Errors
///
/// Returns `HashError::VerificationFailed` when the digests differ in any
/// byte or in length.
pub fn verify(
    message: &[u8],
    expected_digest: &[u8],
    algorithm: HmacAlgorithm,
    key: &[u8],
) -> Result<()> {
    let computed = hmac(message, algorithm, key)?;
    if computed.matches_hex(expected_digest) {
        Ok(())
    } else {
        tracing::trace!(
            algorithm = algorithm.name(),
            message_len = message.len(),
            digest_len = expected_digest.len(),
            "HMAC mismatch"
        );
        Err(HashError::VerificationFailed {
            algorithm: algorithm.name(),
        })
    }
}

#[cfg(all(test, feature = "sha2"))]
mod tests {
    use super::*;

    #[test]
    fn digest_lengths_match_algorithm() {
        for alg in HmacAlgorithm::ALL.into_iter().filter(|a| a.is_available()) {
            let digest = hmac(b"payload", alg, b"key").expect("hmac");
            assert_eq!(digest.as_bytes().len(), alg.output_size(), "{alg}");
            assert_eq!(digest.to_hex().len(), alg.output_size() * 2, "{alg}");
        }
    }

    #[test]
    fn hmac_is_deterministic() {
        let a = hmac_hex(b"message", HmacAlgorithm::Sha256, b"k").expect("hmac");
        let b = hmac_hex(b"message", HmacAlgorithm::Sha256, b"k").expect("hmac");
        assert_eq!(a, b);
    }

    #[test]
    fn key_changes_digest() {
        let a = hmac_hex(b"message", HmacAlgorithm::Sha256, b"k1").expect("hmac");
        let b = hmac_hex(b"message", HmacAlgorithm::Sha256, b"k2").expect("hmac");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_accepts_own_digest() {
        let digest = hmac_hex(b"message", HmacAlgorithm::Sha512, b"key").expect("hmac");
        verify(b"message", digest.as_bytes(), HmacAlgorithm::Sha512, b"key").expect("valid");
    }

    #[test]
    fn verify_rejects_truncated_digest() {
        let digest = hmac_hex(b"message", HmacAlgorithm::Sha256, b"key").expect("hmac");
        let short = &digest.as_bytes()[..digest.len() - 1];
        assert!(matches!(
            verify(b"message", short, HmacAlgorithm::Sha256, b"key"),
            Err(HashError::VerificationFailed { algorithm: "sha256" })
        ));
    }

    #[cfg(not(feature = "blake2"))]
    #[test]
    fn blake2_requires_its_feature() {
        assert!(matches!(
            hmac(b"m", HmacAlgorithm::Blake2b512, b"k"),
            Err(HashError::UnsupportedAlgorithm(_))
        ));
    }
}
