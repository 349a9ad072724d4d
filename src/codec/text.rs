//! Plain-text codec, registered for `text/plain` by default.
//!
//! Request bodies must serialize to a JSON string; anything else is rejected
//! rather than silently stringified. Response bodies must be valid UTF-8 and
//! decode into a string value.

use super::{Decoder, Encoder};
use crate::error::BoxError;
use serde_json::Value;

/// Encodes strings as UTF-8 bytes and decodes UTF-8 bytes into strings
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl Encoder for TextCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, BoxError> {
        match value {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(format!("text/plain body must be a string, got {}", kind(other)).into()),
        }
    }
}

impl Decoder for TextCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Value, BoxError> {
        Ok(Value::String(String::from_utf8(bytes.to_vec())?))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
