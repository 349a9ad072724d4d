//! The client facade.
//!
//! A [`Client`] binds the request pipeline to one transport and one codec
//! registry. It holds no per-call state, so a single instance (or clones of
//! it) can serve any number of concurrent tasks.
//!
//! # Examples
//!
//! ## Typed GET
//!
//! ```ignore
//! use http_codec_client::{Client, RequestOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Item { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new();
//!     let items: Vec<Item> = client
//!         .get("http://example.com/items", &RequestOptions::new().with_query("page", "1"))
//!         .await?;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## POST with a JSON body
//!
//! ```ignore
//! use http_codec_client::{Client, RequestOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new();
//!     client
//!         .post_discard("http://example.com/items", &RequestOptions::default_json(), &json!({"name": "x"}))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom registry
//!
//! ```
//! use http_codec_client::{Client, CodecRegistry};
//! use http_codec_client::codec::JsonCodec;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(CodecRegistry::new());
//! registry.register_codec("application/problem+json", JsonCodec);
//!
//! let client = Client::builder().registry(registry.clone()).build();
//! assert!(client.registry().decoders().contains("application/problem+json"));
//! ```

use crate::client::config::ClientConfig;
use crate::client::pipeline;
use crate::client::{RequestOptions, Response};
use crate::codec::{self, CodecRegistry};
use crate::error::{ClientError, Result};
use crate::transport::{self, ReqwestTransport, Transport, TransportRequest, TransportResponse};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// HTTP client with content-type driven body encoding and decoding.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    registry: Arc<CodecRegistry>,
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a client with default configuration, the `reqwest` transport and
    /// the built-in codecs
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a client bound to an explicit transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::builder().transport(transport).build()
    }

    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The codec registry used by this client
    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `url` and decode the response body into `T`
    pub async fn get<T>(&self, url: &str, options: &RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.dispatch::<(), T>(Method::GET, url, options, None)
            .await
            .map(Response::into_body)
    }

    /// GET `url`, draining and discarding the response body
    pub async fn get_discard(&self, url: &str, options: &RequestOptions) -> Result<()> {
        self.dispatch_discard::<()>(Method::GET, url, options, None)
            .await
            .map(Response::into_body)
    }

    /// POST `body` to `url` and decode the response body into `T`
    pub async fn post<B, T>(&self, url: &str, options: &RequestOptions, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(Method::POST, url, options, Some(body))
            .await
            .map(Response::into_body)
    }

    /// POST `body` to `url`, discarding the response body
    pub async fn post_discard<B>(&self, url: &str, options: &RequestOptions, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch_discard(Method::POST, url, options, Some(body))
            .await
            .map(Response::into_body)
    }

    /// PUT `body` to `url` and decode the response body into `T`
    pub async fn put<B, T>(&self, url: &str, options: &RequestOptions, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(Method::PUT, url, options, Some(body))
            .await
            .map(Response::into_body)
    }

    /// PUT `body` to `url`, discarding the response body
    pub async fn put_discard<B>(&self, url: &str, options: &RequestOptions, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch_discard(Method::PUT, url, options, Some(body))
            .await
            .map(Response::into_body)
    }

    /// DELETE `url` and decode the response body into `T`
    pub async fn delete<T>(&self, url: &str, options: &RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.dispatch::<(), T>(Method::DELETE, url, options, None)
            .await
            .map(Response::into_body)
    }

    /// DELETE `url`, discarding the response body
    pub async fn delete_discard(&self, url: &str, options: &RequestOptions) -> Result<()> {
        self.dispatch_discard::<()>(Method::DELETE, url, options, None)
            .await
            .map(Response::into_body)
    }

    /// Run the full pipeline and decode the response body into `T`.
    ///
    /// The response content type comes from its `Content-Type` header, or from
    /// sniffing the body when the header is missing. The body stream is closed
    /// before this returns, whether decoding succeeded or not.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if `url` does not parse
    /// - `NoCodecFound` if no encoder or decoder matches
    /// - `Encode` / `Decode` if a codec fails
    /// - `Transport` / `Body` if the transport fails
    pub async fn dispatch<B, T>(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
        body: Option<&B>,
    ) -> Result<Response<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let TransportResponse {
            status,
            headers,
            body,
        } = self.send(method, url, options, body).await?;

        let (content_type, body) = pipeline::response_content_type(&headers, body).await?;
        let decoder = self.registry.decoders().resolve(&content_type)?;
        let bytes = transport::collect_body(body).await?;

        if self.config.enable_logging {
            tracing::debug!(
                status = status.as_u16(),
                content_type = %content_type,
                len = bytes.len(),
                "decoding response body"
            );
        }

        let body = codec::decode_with(decoder.as_ref(), &content_type, &bytes)?;
        Ok(Response {
            status,
            headers,
            body,
        })
    }

    /// Run the full pipeline, then drain and drop the response body.
    pub async fn dispatch_discard<B>(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
        body: Option<&B>,
    ) -> Result<Response<()>>
    where
        B: Serialize + ?Sized,
    {
        let TransportResponse {
            status,
            headers,
            body,
        } = self.send(method, url, options, body).await?;

        transport::drain_body(body).await?;
        Ok(Response {
            status,
            headers,
            body: (),
        })
    }

    /// Build the request and hand it to the transport
    async fn send<B>(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
        body: Option<&B>,
    ) -> Result<TransportResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = pipeline::build_url(url, &options.query_params)?;

        let mut headers = options.headers.clone();
        let body = match body {
            Some(body) => Some(pipeline::encode_body(&self.registry, &mut headers, body)?),
            None => None,
        };

        let request = TransportRequest {
            method,
            url,
            headers: pipeline::header_map(&headers)?,
            body,
        };

        if self.config.enable_logging {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                body_len = request.body.as_ref().map_or(0, |b| b.len()),
                "sending request"
            );
        }

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ClientError::Transport)?;

        if self.config.enable_logging {
            tracing::debug!(status = response.status.as_u16(), "received response");
        }

        Ok(response)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
///
/// Anything left unset falls back to the defaults used by [`Client::new`].
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    registry: Option<Arc<CodecRegistry>>,
}

impl ClientBuilder {
    /// Use this configuration; it also configures the default transport
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this transport instead of the `reqwest` one
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use this codec registry instead of a fresh one
    pub fn registry(mut self, registry: Arc<CodecRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the client
    pub fn build(self) -> Client {
        let config = self.config.unwrap_or_default();
        let transport = self.transport.unwrap_or_else(|| {
            Arc::new(ReqwestTransport::with_config(&config)) as Arc<dyn Transport>
        });
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(CodecRegistry::new()));

        Client {
            transport,
            registry,
            config: Arc::new(config),
        }
    }
}
