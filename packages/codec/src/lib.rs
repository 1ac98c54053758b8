//! # msgpipe codecs
//!
//! Serialization and transport-safe encoding primitives. Every function
//! reports failure through [`CodecError`]; none of them return an empty or
//! null value in place of an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ascii_safe;
pub mod error;
pub mod finite;
pub mod json;

pub use ascii_safe::{decode_ascii_safe, encode_ascii_safe};
pub use error::{CodecError, Result};
pub use finite::ensure_finite;
pub use json::{decode_json, encode_json};
