//! [`Transport`] backed by `reqwest`.

use super::{BodyStream, Transport, TransportRequest, TransportResponse};
use crate::client::ClientConfig;
use crate::error::BoxError;
use async_trait::async_trait;
use futures::StreamExt;

/// Default transport, a thin wrapper around [`reqwest::Client`].
///
/// Pooling, TLS, redirects and timeouts are whatever the wrapped client is
/// configured to do.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from a client configuration
    pub fn with_config(config: &ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host as usize);

        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent.as_str());
        }

        if !config.proxy_url.is_empty() {
            match reqwest::Proxy::all(&config.proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("Ignoring invalid proxy url {}: {}", config.proxy_url, e),
            }
        }

        let client = builder.build().unwrap_or_default();
        ReqwestTransport { client }
    }

    /// Wrap an existing `reqwest` client, e.g. one with a cookie store
    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, BoxError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body: BodyStream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| Box::new(e) as BoxError))
            .boxed();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
