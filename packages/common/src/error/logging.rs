//! Structured logging setup
//!
//! The msgpipe crates emit their events through `tracing`, which forwards to
//! the `log` facade when no `tracing` subscriber is installed. Binaries that
//! do not bring their own subscriber call [`init`] once to get an
//! `env_logger` backend configured from `RUST_LOG`:
//! - `RUST_LOG=debug` - step construction and key-length adjustments
//! - `RUST_LOG=trace` - per-message chain progress
//! - `RUST_LOG=msgpipe=warn` - only rejected messages

use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize the `env_logger` backend (idempotent)
pub fn init() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::from_default_env()
            .format_timestamp_micros()
            .init();

        log::info!("msgpipe logging initialized");
    });
}

/// Initialize logging for test environments
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// Fingerprint of secret key material for log output
///
/// SHA-256 of the key, first 12 hex characters, prefixed with `#`.
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let hash = Sha256::digest(key);
    let hex_hash = hex::encode(hash);
    format!("#{}", &hex_hash[..12])
}

/// Log a rejected message without exposing payload or key material
pub fn log_rejected_message(direction: &str, step: &str, error: &dyn std::error::Error) {
    tracing::warn!(
        direction,
        step,
        error = %error,
        "message rejected"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_fingerprint() {
        init_test();

        let first = key_fingerprint(b"sensitive_key_123");
        let second = key_fingerprint(b"different_key_456");

        assert_ne!(first, second);
        assert_eq!(first, key_fingerprint(b"sensitive_key_123"));
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn init_is_repeatable() {
        init_test();
        init_test();
    }
}
