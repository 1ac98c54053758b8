//! Error classification and logging support
//!
//! Every crate in the workspace owns its concrete error enum. They all map
//! onto the [`ErrorKind`] taxonomy defined here so callers can route a failed
//! message without matching on crate-specific variants.

pub mod logging;
pub mod types;

pub use types::{ErrorKind, HasErrorKind};
