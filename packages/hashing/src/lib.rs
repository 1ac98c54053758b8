//! # msgpipe hashing
//!
//! HMAC computation and verification, plus the framing that attaches a
//! hex digest to the message it authenticates:
//!
//! ```text
//! hex(hmac(message)) ':' message
//! ```
//!
//! The digest is always lowercase hex, which can never contain the `:`
//! marker, so the first marker in a frame is always the one that ends the
//! digest. The message after it may contain any bytes, markers included.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algorithm;
pub mod digest;
pub mod error;
pub mod framing;
pub mod mac;

pub use algorithm::{HmacAlgorithm, supported_algorithms};
pub use digest::MacDigest;
pub use error::{HashError, Result};
pub use framing::{MARKER, find_marker, open_signed, sign, split_signed};
pub use mac::{hmac, hmac_hex, verify};
