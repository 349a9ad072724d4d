//! Error types for the client pipeline.
//!
//! Every failure that can happen between parsing the target URL and decoding the
//! response body is reported as a [`ClientError`]. Nothing is retried or swallowed;
//! errors propagate to the caller of [`Client::dispatch`](crate::Client::dispatch)
//! or one of the verb helpers.
//!
//! # Error Kinds
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `InvalidUrl` | The target URL cannot be parsed |
//! | `NoCodecFound` | No encoder/decoder is registered for a content type |
//! | `Encode` | A codec failed to encode the request body |
//! | `Decode` | A codec failed to decode the response body |
//! | `Transport` | The transport failed (DNS, connect, TLS, ...) |
//! | `InvalidHeader` | A header name or value cannot be sent on the wire |
//! | `Body` | Reading the response body stream failed |

use std::fmt;
use thiserror::Error;

/// Boxed error used at the transport and codec seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Direction a codec works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Request body: value to bytes
    Encode,
    /// Response body: bytes to value
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("request"),
            Direction::Decode => f.write_str("response"),
        }
    }
}

/// Errors produced by the client pipeline.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The target URL is malformed
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        /// URL as given by the caller
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// No codec registered for the content type
    #[error("no {direction} codec found for content type '{content_type}'")]
    NoCodecFound {
        /// Content type as requested (lower-cased)
        content_type: String,
        /// Which table was searched
        direction: Direction,
    },

    /// The request body could not be encoded
    #[error("failed to encode request body as '{content_type}': {source}")]
    Encode {
        /// Content type of the encoder
        content_type: String,
        /// Codec error
        #[source]
        source: BoxError,
    },

    /// The response body could not be decoded
    #[error("failed to decode response body as '{content_type}': {source}")]
    Decode {
        /// Content type of the decoder
        content_type: String,
        /// Codec error
        #[source]
        source: BoxError,
    },

    /// Transport-level failure, passed through unmodified
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A header could not be converted for the wire
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Reading the response body failed
    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed target URL
    InvalidUrl,
    /// Missing codec
    NoCodecFound,
    /// Request body encoding failed
    Encode,
    /// Response body decoding failed
    Decode,
    /// Transport failure, including body read failures
    Transport,
    /// Invalid outgoing header
    InvalidHeader,
}

impl ClientError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ClientError::NoCodecFound { .. } => ErrorKind::NoCodecFound,
            ClientError::Encode { .. } => ErrorKind::Encode,
            ClientError::Decode { .. } => ErrorKind::Decode,
            ClientError::Transport(_) | ClientError::Body(_) => ErrorKind::Transport,
            ClientError::InvalidHeader { .. } => ErrorKind::InvalidHeader,
        }
    }

    pub(crate) fn no_codec(content_type: impl Into<String>, direction: Direction) -> Self {
        ClientError::NoCodecFound {
            content_type: content_type.into(),
            direction,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
