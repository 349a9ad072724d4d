//! Decoded response wrapper.

use http::{HeaderMap, StatusCode};

/// Status, headers and decoded body of a dispatched request.
///
/// Non-2xx statuses are not errors at this layer; check [`Response::status`]
/// when it matters.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded body, `()` when the body was discarded
    pub body: T,
}

impl<T> Response<T> {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Take the decoded body
    pub fn into_body(self) -> T {
        self.body
    }
}
