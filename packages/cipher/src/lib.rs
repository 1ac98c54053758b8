//! # msgpipe cipher
//!
//! Symmetric encryption with caller-supplied IVs. Every operation is
//! deterministic: the same plaintext, cipher, key and IV always produce the
//! same ciphertext, and nothing here generates randomness.
//!
//! Which ciphers exist is a property of the build. The `aes` and `chacha20`
//! features decide which families are compiled in, and
//! [`supported_ciphers`] reports the result so validators never need a
//! hardcoded list.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Cipher algorithms, capability queries and operations
pub mod cipher;
pub mod error;

pub use cipher::{CipherAlgorithm, decrypt, encrypt, fit_key, iv_length, supported_ciphers};
pub use error::{CipherError, Result};
