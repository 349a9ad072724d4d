//! JSON codec, registered for `application/json` by default.

use super::{Decoder, Encoder};
use crate::error::BoxError;
use serde_json::Value;

/// Encodes and decodes JSON bodies with `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Encoder for JsonCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_vec(value)?)
    }
}

impl Decoder for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Value, BoxError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
