//! Content-type keyed body codecs.
//!
//! A [`CodecRegistry`] holds two independent tables: encoders for request
//! bodies and decoders for response bodies. Both are keyed by the lower-cased
//! content type and guarded by a read/write lock, so codecs can be registered
//! while requests are in flight.
//!
//! # Matching
//!
//! [`CodecTable::resolve`] lower-cases the requested type and looks for an
//! exact entry first. If there is none, everything from the first `;` on is
//! dropped and the bare MIME type is tried. A codec registered as
//! `application/json` therefore also serves `application/json; charset=utf-8`,
//! while a codec registered for a parameterized type only serves that exact
//! spelling.
//!
//! # Value Model
//!
//! Codecs convert between bytes and [`serde_json::Value`]. Typed request
//! bodies go through `serde_json::to_value`, typed outputs through
//! `serde_json::from_value`, so any `Serialize`/`DeserializeOwned` type works
//! with any registered format.
//!
//! # Examples
//!
//! ```
//! use http_codec_client::codec::{CodecRegistry, JsonCodec};
//!
//! let registry = CodecRegistry::empty();
//! registry.register_codec("application/vnd.api+json", JsonCodec);
//!
//! let decoder = registry.decoders().resolve("application/vnd.api+json; charset=utf-8");
//! assert!(decoder.is_ok());
//! assert!(registry.encoders().resolve("application/xml").is_err());
//! ```

mod json;
mod text;

pub use json::JsonCodec;
pub use text::TextCodec;

use crate::error::{BoxError, ClientError, Direction, Result};
use crate::protocol::constants::mime;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Turns a value into request body bytes.
pub trait Encoder: Send + Sync {
    /// Encode `value`
    fn encode(&self, value: &Value) -> std::result::Result<Vec<u8>, BoxError>;
}

/// Turns response body bytes into a value.
pub trait Decoder: Send + Sync {
    /// Decode `bytes`
    fn decode(&self, bytes: &[u8]) -> std::result::Result<Value, BoxError>;
}

/// One direction's content type → codec table.
pub struct CodecTable<C: ?Sized> {
    direction: Direction,
    codecs: RwLock<HashMap<String, Arc<C>>>,
}

impl<C: ?Sized> CodecTable<C> {
    fn new(direction: Direction) -> Self {
        CodecTable {
            direction,
            codecs: RwLock::new(HashMap::new()),
        }
    }

    /// Register `codec` for `content_type`, returning the codec it replaced.
    pub fn register(&self, content_type: &str, codec: Arc<C>) -> Option<Arc<C>> {
        self.codecs
            .write()
            .insert(content_type.to_lowercase(), codec)
    }

    /// Find the codec for `content_type`.
    ///
    /// # Errors
    ///
    /// `NoCodecFound` naming the lower-cased requested type when neither the
    /// full type nor its bare MIME type is registered.
    pub fn resolve(&self, content_type: &str) -> Result<Arc<C>> {
        let content_type = content_type.to_lowercase();
        let codecs = self.codecs.read();

        if let Some(codec) = codecs.get(&content_type) {
            return Ok(codec.clone());
        }

        let bare = essence(&content_type);
        codecs
            .get(bare)
            .cloned()
            .ok_or_else(|| ClientError::no_codec(content_type.as_str(), self.direction))
    }

    /// Whether `content_type` resolves to a codec
    pub fn contains(&self, content_type: &str) -> bool {
        self.resolve(content_type).is_ok()
    }

    /// Registered keys, sorted
    pub fn content_types(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.codecs.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// The MIME type without parameters: everything before the first `;`, trimmed.
pub fn essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}

/// Encoder and decoder tables.
///
/// Cheap to share behind an `Arc`; every [`Client`](crate::Client) holds one.
pub struct CodecRegistry {
    encoders: CodecTable<dyn Encoder>,
    decoders: CodecTable<dyn Decoder>,
}

impl CodecRegistry {
    /// A registry with the built-in JSON and plain-text codecs
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_codec(mime::APPLICATION_JSON, JsonCodec);
        registry.register_codec(mime::TEXT_PLAIN, TextCodec);
        registry
    }

    /// A registry with no codecs at all
    pub fn empty() -> Self {
        CodecRegistry {
            encoders: CodecTable::new(Direction::Encode),
            decoders: CodecTable::new(Direction::Decode),
        }
    }

    /// Register a request body encoder
    pub fn register_encoder(&self, content_type: &str, encoder: impl Encoder + 'static) {
        self.encoders.register(content_type, Arc::new(encoder));
    }

    /// Register a response body decoder
    pub fn register_decoder(&self, content_type: &str, decoder: impl Decoder + 'static) {
        self.decoders.register(content_type, Arc::new(decoder));
    }

    /// Register one codec in both tables
    pub fn register_codec<C>(&self, content_type: &str, codec: C)
    where
        C: Encoder + Decoder + 'static,
    {
        let codec = Arc::new(codec);
        self.encoders.register(content_type, codec.clone());
        self.decoders.register(content_type, codec);
    }

    /// The encoder table
    pub fn encoders(&self) -> &CodecTable<dyn Encoder> {
        &self.encoders
    }

    /// The decoder table
    pub fn decoders(&self) -> &CodecTable<dyn Decoder> {
        &self.decoders
    }

    /// Resolve an encoder and encode `value` with it.
    pub fn encode<B>(&self, content_type: &str, value: &B) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let encoder = self.encoders.resolve(content_type)?;
        encode_with(encoder.as_ref(), content_type, value)
    }

    /// Resolve a decoder and decode `bytes` with it.
    pub fn decode<T>(&self, content_type: &str, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let decoder = self.decoders.resolve(content_type)?;
        decode_with(decoder.as_ref(), content_type, bytes)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("encoders", &self.encoders.content_types())
            .field("decoders", &self.decoders.content_types())
            .finish()
    }
}

/// Encode a typed value with an already resolved encoder
pub fn encode_with<B>(encoder: &dyn Encoder, content_type: &str, value: &B) -> Result<Vec<u8>>
where
    B: Serialize + ?Sized,
{
    let encode_err = |source: BoxError| ClientError::Encode {
        content_type: content_type.to_string(),
        source,
    };

    let value = serde_json::to_value(value).map_err(|e| encode_err(Box::new(e)))?;
    encoder.encode(&value).map_err(encode_err)
}

/// Decode bytes into a typed value with an already resolved decoder
pub fn decode_with<T>(decoder: &dyn Decoder, content_type: &str, bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let decode_err = |source: BoxError| ClientError::Decode {
        content_type: content_type.to_string(),
        source,
    };

    let value = decoder.decode(bytes).map_err(decode_err)?;
    serde_json::from_value(value).map_err(|e| decode_err(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    struct Fixed(&'static [u8]);

    impl Encoder for Fixed {
        fn encode(&self, _value: &Value) -> std::result::Result<Vec<u8>, BoxError> {
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn test_resolve_exact_and_with_parameters() {
        let registry = CodecRegistry::empty();
        registry.register_encoder("application/x-thing", Fixed(b"thing"));

        let exact = registry.encoders().resolve("application/x-thing").unwrap();
        let param = registry
            .encoders()
            .resolve("application/x-thing; charset=utf-8")
            .unwrap();
        assert!(Arc::ptr_eq(&exact, &param));
    }

    #[test]
    fn test_register_and_resolve_ignore_case() {
        let registry = CodecRegistry::empty();
        registry.register_decoder("Application/JSON", JsonCodec);
        assert!(registry.decoders().contains("APPLICATION/json;Charset=UTF-8"));
        assert_eq!(registry.decoders().content_types(), ["application/json"]);
    }

    #[test]
    fn test_parameterized_registration_is_exact_only() {
        let registry = CodecRegistry::empty();
        registry.register_decoder("application/json; charset=utf-8", JsonCodec);
        assert!(registry.decoders().contains("application/json; charset=utf-8"));
        assert!(!registry.decoders().contains("application/json"));
    }

    #[test]
    fn test_unregistered_type_names_request() {
        let registry = CodecRegistry::new();
        let err = registry
            .decoders()
            .resolve("Application/XML; charset=utf-8")
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::NoCodecFound);
        match err {
            ClientError::NoCodecFound {
                content_type,
                direction,
            } => {
                assert_eq!(content_type, "application/xml; charset=utf-8");
                assert_eq!(direction, Direction::Decode);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_register_overwrites() {
        let registry = CodecRegistry::empty();
        registry.register_encoder("text/x-a", Fixed(b"first"));
        registry.register_encoder("TEXT/X-A", Fixed(b"second"));

        assert_eq!(registry.encoders().content_types().len(), 1);
        assert_eq!(registry.encode("text/x-a", &()).unwrap(), b"second");
    }

    #[test]
    fn test_tables_are_independent() {
        let registry = CodecRegistry::empty();
        registry.register_encoder("application/json", JsonCodec);
        assert!(registry.encoders().contains("application/json"));
        assert!(!registry.decoders().contains("application/json"));
    }

    #[test]
    fn test_json_round_trip_through_registry() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Item {
            id: u32,
            tags: Vec<String>,
            parent: Option<Box<Item>>,
        }

        let registry = CodecRegistry::new();
        let item = Item {
            id: 7,
            tags: vec!["a".into(), "b".into()],
            parent: Some(Box::new(Item {
                id: 1,
                tags: vec![],
                parent: None,
            })),
        };

        let bytes = registry.encode("application/json", &item).unwrap();
        let back: Item = registry
            .decode("application/json; charset=utf-8", &bytes)
            .unwrap();
        assert_eq!(back, item);

        let value = json!({"nested": [1, 2.5, null, {"k": "v"}], "flag": true});
        let bytes = registry.encode("application/json", &value).unwrap();
        let back: Value = registry.decode("application/json", &bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_decode_into_wrong_shape_is_decode_error() {
        let registry = CodecRegistry::new();
        let err = registry
            .decode::<Vec<u32>>("application/json", br#"{"id": 1}"#)
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_essence() {
        assert_eq!(essence("application/json; charset=utf-8"), "application/json");
        assert_eq!(essence("text/plain"), "text/plain");
        assert_eq!(essence(" text/html ;q=1"), "text/html");
    }

    #[test]
    fn test_concurrent_register_and_resolve() {
        let registry = Arc::new(CodecRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.register_codec(&format!("application/x-{i}"), JsonCodec);
                    for _ in 0..100 {
                        assert!(registry.decoders().contains("application/json"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.decoders().content_types().len(), 10);
    }
}
