#![warn(missing_docs)]

//! # http_codec_client: content-type driven HTTP calls
//!
//! A thin layer over an HTTP transport that turns typed values into request
//! bodies and response bodies back into typed values, choosing the codec from
//! the content type.
//!
//! ## Overview
//!
//! A call goes through one pipeline:
//!
//! 1. **URL** - parse the target and append query parameters to its query
//! 2. **Encode** - pick the encoder registered for the request `Content-Type`
//! 3. **Send** - hand the request to the bound [`Transport`]
//! 4. **Resolve** - take the response `Content-Type`, or sniff the body
//! 5. **Decode** - pick the decoder for that type and decode into `T`
//!
//! ## Key Features
//!
//! - **Open codec registry**: register encoders and decoders for any content
//!   type; `application/json` and `text/plain` are built in
//! - **Parameter-tolerant matching**: `application/json; charset=utf-8` falls
//!   back to the codec registered for `application/json`
//! - **Content sniffing**: undeclared response bodies are classified from their
//!   first 512 bytes without losing any of them
//! - **Pluggable transport**: `reqwest` by default, anything implementing
//!   [`Transport`] otherwise
//!
//! ## Client Usage
//!
//! ```ignore
//! use http_codec_client::{Client, RequestOptions};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct NewItem { name: String }
//!
//! #[derive(Deserialize)]
//! struct Item { id: u64, name: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new();
//!     let options = RequestOptions::default_json();
//!
//!     let created: Item = client
//!         .post("http://localhost:3000/items", &options, &NewItem { name: "x".into() })
//!         .await?;
//!
//!     let all: Vec<Item> = client.get("http://localhost:3000/items", &options).await?;
//!     println!("{} items, newest {}", all.len(), created.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Registering a Format
//!
//! ```
//! use http_codec_client::codec::Decoder;
//! use http_codec_client::error::BoxError;
//! use http_codec_client::CodecRegistry;
//! use serde_json::Value;
//!
//! struct Lines;
//!
//! impl Decoder for Lines {
//!     fn decode(&self, bytes: &[u8]) -> Result<Value, BoxError> {
//!         let text = std::str::from_utf8(bytes)?;
//!         Ok(Value::Array(text.lines().map(|l| Value::String(l.into())).collect()))
//!     }
//! }
//!
//! let registry = CodecRegistry::new();
//! registry.register_decoder("text/x-lines", Lines);
//!
//! let lines: Vec<String> = registry.decode("text/x-lines; charset=utf-8", b"a\nb").unwrap();
//! assert_eq!(lines, ["a", "b"]);
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - Client facade, pipeline steps, options and configuration
//! - **[codec]** - Codec traits, registry and built-in codecs
//! - **[protocol]** - Header/query containers, constants and content sniffing
//! - **[transport]** - Transport trait and the `reqwest` implementation
//! - **[error]** - Error types and result handling

pub mod client;
pub mod codec;
pub mod error;
pub mod protocol;
pub mod transport;

pub use client::{
    default_client, default_options, delete, get, post, put, Client, ClientBuilder, ClientConfig,
    RequestOptions, Response,
};
pub use codec::{CodecRegistry, Decoder, Encoder};
pub use error::{ClientError, ErrorKind, Result};
pub use protocol::{Header, QueryParam};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
