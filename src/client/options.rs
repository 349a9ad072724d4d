//! Per-request options.

use crate::protocol::constants::{mime, CONTENT_TYPE};
use crate::protocol::{Header, QueryParam};

/// Headers and query parameters for one request.
///
/// Everything is optional. The options are only read during dispatch; the
/// pipeline works on its own copy of the headers.
///
/// # Examples
///
/// ```
/// use http_codec_client::RequestOptions;
///
/// let options = RequestOptions::default_json()
///     .with_header("Accept", "application/json")
///     .with_query("page", "2");
///
/// assert_eq!(options.headers.get("content-type"), "application/json");
/// assert_eq!(options.query_params.get("page"), "2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Headers to attach to the request
    pub headers: Header,
    /// Query parameters appended to the URL's own query
    pub query_params: QueryParam,
}

impl RequestOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with `Content-Type: application/json` preset
    pub fn default_json() -> Self {
        Self::new().with_content_type(mime::APPLICATION_JSON)
    }

    /// Set the `Content-Type` header
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.headers.set(CONTENT_TYPE, content_type);
        self
    }

    /// Add a header value
    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.add(key, value);
        self
    }

    /// Add a query parameter value
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.add(key, value);
        self
    }

    /// The declared `Content-Type`, or `""`
    pub fn content_type(&self) -> &str {
        self.headers.get(CONTENT_TYPE)
    }
}
