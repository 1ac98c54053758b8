//! Reversible transform steps
//!
//! Every step kind comes as a forward step, used when transmitting, and a
//! reverse step that undoes it when receiving. Both are built from one
//! parsed configuration by [`build_step_pair`].

use crate::config::{StepKind, StepSpec};
use crate::error::{ConfigError, Result};
use crate::payload::Payload;
use std::fmt;

pub mod ascii_safe;
pub mod encryption;
pub mod json;
pub mod signing;

/// A single transformation of a payload
///
/// Steps are immutable once built and may be shared between threads.
pub trait Step: Send + Sync + fmt::Debug {
    /// Stable step name, used in errors and logs
    fn name(&self) -> &'static str;

    /// Transform the payload, or fail without producing one
    ///
    /// # Errors
    ///
    /// Any [`crate::PipelineError`]; the chain stops at the first failure.
    fn apply(&self, payload: Payload) -> Result<Payload>;
}

/// Forward step and the reverse step that undoes it
pub type StepPair = (Box<dyn Step>, Box<dyn Step>);

/// Build both directions of a step from its spec
///
/// The config is parsed and validated once; the two steps share the result.
///
/// # Errors
///
/// The first `ConfigError` found in the spec's config.
pub fn build_step_pair(spec: &StepSpec) -> std::result::Result<StepPair, ConfigError> {
    match spec.kind {
        StepKind::Json => Ok(json::pair()),
        StepKind::Encrypted => encryption::pair(&spec.config),
        StepKind::Signed => signing::pair(&spec.config),
        StepKind::AsciiSafe => Ok(ascii_safe::pair()),
    }
}
