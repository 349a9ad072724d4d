//! HTTP client with content-type driven codecs.
//!
//! This module ties the pieces of the crate into a request pipeline:
//!
//! - **Query merging** onto the URL's existing query string
//! - **Body encoding** through the encoder registered for the request's
//!   `Content-Type`
//! - **Content-type resolution** for responses, sniffing the body when the
//!   server declares nothing
//! - **Body decoding** into any `DeserializeOwned` type
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch    - Client, ClientBuilder and the verb helpers
//! ├── pipeline - URL, header and body construction steps
//! ├── options  - RequestOptions
//! ├── response - Response<T>
//! ├── config   - ClientConfig
//! └── defaults - Process-wide default client
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Transport + codec registry, stateless per call |
//! | [`ClientBuilder`] | Inject transport, registry or configuration |
//! | [`RequestOptions`] | Headers and query parameters for one call |
//! | [`Response`] | Status, headers and decoded body |
//! | [`ClientConfig`] | Transport and logging configuration |
//!
//! # Examples
//!
//! ```
//! use http_codec_client::client::{Client, ClientConfig};
//!
//! // Default configuration
//! let client = Client::new();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     request_timeout_ms: 2_000,
//!     ..Default::default()
//! };
//! let client = Client::with_config(config);
//! assert_eq!(client.config().request_timeout_ms, 2_000);
//! ```

mod config;
mod defaults;
mod fetch;
mod options;
pub mod pipeline;
mod response;

pub use config::ClientConfig;
pub use defaults::{default_client, default_options, delete, get, post, put};
pub use fetch::{Client, ClientBuilder};
pub use options::RequestOptions;
pub use response::Response;
