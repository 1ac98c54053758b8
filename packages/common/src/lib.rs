//! Common infrastructure shared by the msgpipe crates
//!
//! This crate provides:
//! - The error-kind taxonomy every msgpipe error reports
//! - Logging setup for binaries and tests
//! - Key fingerprints for logging key identity without key material

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;

pub use error::logging;
pub use error::{ErrorKind, HasErrorKind};
