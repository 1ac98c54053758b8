//! # msgpipe - reversible messaging pipelines
//!
//! A pipeline is built once from an ordered list of step specifications and
//! then used for any number of messages. The same list yields two chains:
//! the transmit chain runs the steps in order, the receive chain runs their
//! inverses in the opposite order, so whatever one side sends the other side
//! can read back.
//!
//! The usual shape is JSON, then encryption, then an HMAC signature, then
//! base64 for transport:
//!
//! ```text
//! wire = base64( hex(hmac) ":" encrypt(json(message)) )
//! ```
//!
//! ## Example
//!
//! ```rust
//! use msgpipe::{CipherConfig, HmacConfig, Pipeline};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), msgpipe::PipelineError> {
//! let pipeline = Pipeline::builder()
//!     .json()
//!     .encrypted(CipherConfig::new("AES-256-CBC", "1234567890ABCDEF", "FEDCBA0987654321"))
//!     .signed(HmacConfig::new("sha256", "shared secret"))
//!     .ascii_safe()
//!     .build()?;
//!
//! let wire = pipeline.send(&json!({"hello": "world"}))?;
//! assert_eq!(pipeline.recv(&wire)?, json!({"hello": "world"}));
//! # Ok(())
//! # }
//! ```
//!
//! Pipelines can also be described in JSON, see [`PipelineDefinition`].
//!
//! ## Errors
//!
//! Configuration problems are reported when the pipeline is built, never
//! while a message is processed. Message failures are reported with an
//! [`ErrorKind`] so callers can tell a tampered message
//! ([`ErrorKind::Authentication`]) from a malformed one.

#![forbid(unsafe_code)]

pub mod builder;
pub mod chain;
pub mod config;
pub mod error;
pub mod payload;
pub mod steps;
pub mod validators;

pub use builder::{Pipeline, PipelineBuilder, build_pipelines};
pub use chain::{Chain, Direction};
pub use config::{CipherConfig, ConfigMap, HmacConfig, PipelineDefinition, StepKind, StepSpec};
pub use error::{ConfigError, PipelineError, Result};
pub use payload::Payload;
pub use steps::Step;

pub use msgpipe_common::logging;
pub use msgpipe_common::{ErrorKind, HasErrorKind};

/// Lower-level building blocks
pub mod primitives {
    pub use msgpipe_cipher::{CipherAlgorithm, decrypt, encrypt, iv_length, supported_ciphers};
    pub use msgpipe_codec::{decode_ascii_safe, decode_json, encode_ascii_safe, encode_json};
    pub use msgpipe_hashing::{
        HmacAlgorithm, MARKER, find_marker, hmac, hmac_hex, open_signed, sign, split_signed,
        supported_algorithms, verify,
    };
}
