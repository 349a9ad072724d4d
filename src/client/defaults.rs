//! Process-wide default client and top-level verb functions.
//!
//! The default client is created on first use with [`Client::new`] and lives
//! for the rest of the process. Code that needs a custom transport, registry
//! or configuration should build its own [`Client`] instead.
//!
//! # Examples
//!
//! ```ignore
//! use http_codec_client::{default_options, get};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ids: Vec<u64> = get("http://example.com/ids", &default_options()).await?;
//!     Ok(())
//! }
//! ```

use super::{Client, RequestOptions};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::OnceLock;

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();

/// The shared default client
pub fn default_client() -> &'static Client {
    DEFAULT_CLIENT.get_or_init(Client::new)
}

/// Default options: `Content-Type: application/json`
pub fn default_options() -> RequestOptions {
    RequestOptions::default_json()
}

/// GET with the default client
pub async fn get<T>(url: &str, options: &RequestOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    default_client().get(url, options).await
}

/// POST with the default client
pub async fn post<B, T>(url: &str, options: &RequestOptions, body: &B) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    default_client().post(url, options, body).await
}

/// PUT with the default client
pub async fn put<B, T>(url: &str, options: &RequestOptions, body: &B) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    default_client().put(url, options, body).await
}

/// DELETE with the default client
pub async fn delete<T>(url: &str, options: &RequestOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    default_client().delete(url, options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client_is_shared() {
        assert!(std::ptr::eq(default_client(), default_client()));
    }

    #[test]
    fn test_default_options_are_json() {
        assert_eq!(default_options().content_type(), "application/json");
    }
}
