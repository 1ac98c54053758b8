//! JSON encoding of structured messages

use super::{Step, StepPair};
use crate::error::Result;
use crate::payload::Payload;
use msgpipe_codec::{decode_json, encode_json};
use serde_json::Value;

/// Serialize a structured message to JSON bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct EncodeJson;

/// Parse JSON bytes back into a structured message
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeJson;

impl Step for EncodeJson {
    fn name(&self) -> &'static str {
        "encode_json"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let value = payload.into_value(self.name())?;
        Ok(Payload::Bytes(encode_json(&value)?))
    }
}

impl Step for DecodeJson {
    fn name(&self) -> &'static str {
        "decode_json"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let bytes = payload.into_bytes(self.name())?;
        Ok(Payload::Value(decode_json::<Value>(&bytes)?))
    }
}

pub(crate) fn pair() -> StepPair {
    (Box::new(EncodeJson), Box::new(DecodeJson))
}
