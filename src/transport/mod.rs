//! The transport boundary.
//!
//! The pipeline never talks to the network itself. It hands a fully built
//! [`TransportRequest`] to a [`Transport`] and gets back a [`TransportResponse`]
//! whose body is a stream of byte chunks. Connection reuse, TLS, redirects and
//! timeouts all live behind this trait.
//!
//! [`ReqwestTransport`] is the default implementation. Tests and embedders can
//! supply their own.
//!
//! # Body Lifecycle
//!
//! A response body is a boxed [`Stream`](futures::Stream). Dropping it closes
//! the underlying connection or returns it to the pool, depending on how much
//! of it was read; [`drain_body`] reads it to the end first.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use crate::error::{BoxError, ClientError, Result};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::StreamExt;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// Response body as a stream of chunks
pub type BodyStream = BoxStream<'static, std::result::Result<Bytes, BoxError>>;

/// An outgoing request, ready for the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, query included
    pub url: Url,
    /// Headers to send
    pub headers: HeaderMap,
    /// Encoded body, absent for body-less requests
    pub body: Option<Bytes>,
}

/// A response as produced by the transport.
pub struct TransportResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body stream, closed on drop
    pub body: BodyStream,
}

impl TransportResponse {
    /// Build a response with an in-memory body
    pub fn from_bytes(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        TransportResponse {
            status,
            headers,
            body: futures::stream::once(async move { Ok(body) }).boxed(),
        }
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Something that can put a request on the wire.
///
/// Implementations must be safe to share between tasks; the client calls
/// `send` concurrently from every task that uses it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response head plus body stream
    async fn send(&self, request: TransportRequest)
        -> std::result::Result<TransportResponse, BoxError>;
}

/// Read a body stream to the end
pub async fn collect_body(mut body: BodyStream) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk.map_err(ClientError::Body)?);
    }
    Ok(buf.freeze())
}

/// Read a body stream to the end, discarding the data
pub async fn drain_body(mut body: BodyStream) -> Result<()> {
    while let Some(chunk) = body.next().await {
        chunk.map_err(ClientError::Body)?;
    }
    Ok(())
}
