//! Client configuration.
//!
//! [`ClientConfig`] carries the knobs handed to the default transport and the
//! logging switch used by the request pipeline. It derives `serde` traits so it
//! can be loaded from whatever configuration source the embedding application
//! already uses.
//!
//! # Examples
//!
//! ```
//! use http_codec_client::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     request_timeout_ms: 5_000,
//!     enable_logging: true,
//!     ..Default::default()
//! };
//! assert_eq!(config.pool_max_idle_per_host, 32);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`Client`](crate::Client) and its default transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Total request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: u32,
    /// Proxy for all traffic, empty for none
    pub proxy_url: String,
    /// `User-Agent` sent by the default transport
    pub user_agent: String,
    /// Emit per-request `tracing` events
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            pool_max_idle_per_host: 32,
            proxy_url: String::new(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            enable_logging: false,
        }
    }
}

impl ClientConfig {
    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Connect timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.proxy_url.is_empty());
        assert!(!config.enable_logging);
        assert!(config.user_agent.starts_with("http_codec_client/"));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"request_timeout_ms": 1500, "enable_logging": true}"#)
                .unwrap();
        assert_eq!(config.request_timeout_ms, 1500);
        assert!(config.enable_logging);
        assert_eq!(config.pool_max_idle_per_host, 32);
    }
}
