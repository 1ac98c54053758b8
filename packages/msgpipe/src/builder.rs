//! Pipeline construction and use
//!
//! Both chains come from one ordered list of [`StepSpec`]s: the transmit
//! chain runs the forward steps in list order, the receive chain runs the
//! reverse steps in the opposite order.

use crate::chain::{Chain, Direction};
use crate::config::{CipherConfig, HmacConfig, PipelineDefinition, StepSpec};
use crate::error::{PipelineError, Result};
use crate::payload::Payload;
use crate::steps::build_step_pair;
use msgpipe_codec::{CodecError, ensure_finite};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A transmit chain and the receive chain that undoes it
///
/// Immutable once built, holds no per-message state, and can be shared
/// between threads.
#[derive(Debug)]
pub struct Pipeline {
    transmit: Chain,
    receive: Chain,
}

/// Build a pipeline from an ordered list of step specs
///
/// Every spec's config is validated here; the first invalid one aborts the
/// build. An empty list gives a pipeline that passes payloads through.
///
/// # Errors
///
/// `PipelineError::Config` for the first invalid spec.
pub fn build_pipelines(specs: &[StepSpec]) -> Result<Pipeline> {
    let mut forward = Vec::with_capacity(specs.len());
    let mut reverse = Vec::with_capacity(specs.len());
    for spec in specs {
        let (step, inverse) = build_step_pair(spec)?;
        forward.push(step);
        reverse.push(inverse);
    }
    reverse.reverse();

    let pipeline = Pipeline {
        transmit: Chain::new(Direction::Transmit, forward),
        receive: Chain::new(Direction::Receive, reverse),
    };
    tracing::debug!(
        steps = specs.len(),
        transmit = ?pipeline.transmit.step_names(),
        receive = ?pipeline.receive.step_names(),
        "pipeline built"
    );
    Ok(pipeline)
}

impl Pipeline {
    /// Start a fluent builder
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Build from a loaded definition
    ///
    /// # Errors
    ///
    /// See [`build_pipelines`].
    pub fn from_definition(definition: &PipelineDefinition) -> Result<Self> {
        build_pipelines(&definition.steps)
    }

    /// Chain used by [`Pipeline::transmit`]
    #[must_use]
    pub fn transmit_chain(&self) -> &Chain {
        &self.transmit
    }

    /// Chain used by [`Pipeline::receive`]
    #[must_use]
    pub fn receive_chain(&self) -> &Chain {
        &self.receive
    }

    /// Run a payload through the transmit chain
    ///
    /// # Errors
    ///
    /// The first step failure.
    pub fn transmit(&self, payload: Payload) -> Result<Payload> {
        self.transmit.process(payload)
    }

    /// Run a payload through the receive chain
    ///
    /// # Errors
    ///
    /// The first step failure. A tampered message fails with
    /// [`crate::ErrorKind::Authentication`] or [`crate::ErrorKind::Framing`].
    pub fn receive(&self, payload: Payload) -> Result<Payload> {
        self.receive.process(payload)
    }

    /// Transmit any serializable message and return the wire string
    ///
    /// # Errors
    ///
    /// `PipelineError::Codec` if the message holds a NaN or infinite float,
    /// `PipelineError::NonAsciiOutput` unless the transmit chain ends in
    /// ASCII bytes, plus any step failure.
    pub fn send<T: Serialize + ?Sized>(&self, message: &T) -> Result<String> {
        // to_value would turn NaN and infinity into null
        ensure_finite(message)?;
        let value = serde_json::to_value(message).map_err(|e| CodecError::JsonEncode {
            type_name: std::any::type_name::<T>(),
            reason: e.to_string(),
        })?;
        match self.transmit(Payload::Value(value))? {
            Payload::Bytes(bytes) if bytes.is_ascii() => {
                String::from_utf8(bytes).map_err(|_| PipelineError::NonAsciiOutput { found: "bytes" })
            }
            other => Err(PipelineError::NonAsciiOutput {
                found: other.variant_name(),
            }),
        }
    }

    /// Receive a wire string and return the structured message
    ///
    /// # Errors
    ///
    /// `PipelineError::UnexpectedPayload` unless the receive chain ends in
    /// a structured message, plus any step failure.
    pub fn recv(&self, wire: &str) -> Result<Value> {
        self.receive(Payload::Bytes(wire.as_bytes().to_vec()))?
            .into_value("recv")
    }

    /// Receive a wire string into a typed message
    ///
    /// # Errors
    ///
    /// As [`Pipeline::recv`], plus `CodecError::JsonDecode` when the message
    /// does not have the shape of `T`.
    pub fn recv_as<T: DeserializeOwned>(&self, wire: &str) -> Result<T> {
        let value = self.recv(wire)?;
        let input = value.to_string();
        serde_json::from_value(value)
            .map_err(|e| CodecError::JsonDecode {
                input,
                reason: e.to_string(),
            })
            .map_err(PipelineError::from)
    }
}

/// Fluent construction of a [`Pipeline`]
///
/// Steps are added in transmit order.
#[derive(Debug, Default, Clone)]
#[must_use]
pub struct PipelineBuilder {
    specs: Vec<StepSpec>,
}

impl PipelineBuilder {
    /// Add a JSON encoding step
    pub fn json(self) -> Self {
        self.step(StepSpec::json())
    }

    /// Add an encryption step
    pub fn encrypted(self, config: CipherConfig) -> Self {
        self.step(StepSpec::encrypted(config))
    }

    /// Add a signing step
    pub fn signed(self, config: HmacConfig) -> Self {
        self.step(StepSpec::signed(config))
    }

    /// Add a base64 transport encoding step
    pub fn ascii_safe(self) -> Self {
        self.step(StepSpec::ascii_safe())
    }

    /// Add any step spec
    pub fn step(mut self, spec: StepSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Specs added so far
    #[must_use]
    pub fn specs(&self) -> &[StepSpec] {
        &self.specs
    }

    /// Validate every step and build the pipeline
    ///
    /// # Errors
    ///
    /// See [`build_pipelines`].
    pub fn build(self) -> Result<Pipeline> {
        build_pipelines(&self.specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[test]
    fn reverse_chain_mirrors_forward_chain() {
        let pipeline = Pipeline::builder()
            .json()
            .signed(HmacConfig::new("sha256", "k"))
            .ascii_safe()
            .build()
            .expect("valid");
        assert_eq!(
            pipeline.transmit_chain().step_names(),
            ["encode_json", "sign", "encode_ascii_safe"]
        );
        assert_eq!(
            pipeline.receive_chain().step_names(),
            ["decode_ascii_safe", "verify_signature", "decode_json"]
        );
    }

    #[test]
    fn send_requires_ascii_output() {
        let json_only = Pipeline::builder().json().build().expect("valid");
        let wire = json_only.send(&json!({"a": 1})).expect("json is ascii");
        assert_eq!(wire, r#"{"a":1}"#);

        let unicode = json_only.send(&json!({"a": "\u{e9}"})).expect_err("not ascii");
        assert!(matches!(unicode, PipelineError::NonAsciiOutput { found: "bytes" }));

        let identity = Pipeline::builder().build().expect("empty");
        let err = identity.send(&json!(1)).expect_err("no encoding");
        assert!(matches!(err, PipelineError::NonAsciiOutput { found: "message" }));
    }

    #[test]
    fn recv_requires_a_message() {
        let base64_only = Pipeline::builder().ascii_safe().build().expect("valid");
        let err = base64_only.recv("aGk=").expect_err("bytes, not a message");
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn first_invalid_step_wins() {
        let err = Pipeline::builder()
            .json()
            .encrypted(CipherConfig::new("not-a-real-cipher", "k", "iv"))
            .signed(HmacConfig::new("md5", "k"))
            .build()
            .expect_err("invalid");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("not-a-real-cipher"));
    }
}
