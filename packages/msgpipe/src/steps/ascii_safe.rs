//! Base64 transport encoding

use super::{Step, StepPair};
use crate::error::Result;
use crate::payload::Payload;
use msgpipe_codec::{decode_ascii_safe, encode_ascii_safe};

/// Encode bytes as padded standard base64
#[derive(Debug, Default, Clone, Copy)]
pub struct EncodeAsciiSafe;

/// Strictly decode padded standard base64
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeAsciiSafe;

impl Step for EncodeAsciiSafe {
    fn name(&self) -> &'static str {
        "encode_ascii_safe"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let bytes = payload.into_bytes(self.name())?;
        Ok(Payload::Bytes(encode_ascii_safe(&bytes).into_bytes()))
    }
}

impl Step for DecodeAsciiSafe {
    fn name(&self) -> &'static str {
        "decode_ascii_safe"
    }

    fn apply(&self, payload: Payload) -> Result<Payload> {
        let bytes = payload.into_bytes(self.name())?;
        Ok(Payload::Bytes(decode_ascii_safe(&bytes)?))
    }
}

pub(crate) fn pair() -> StepPair {
    (Box::new(EncodeAsciiSafe), Box::new(DecodeAsciiSafe))
}
