//! Wire-level building blocks: header and query containers, well-known
//! constants and content-type sniffing.
//!
//! # Module Structure
//!
//! - **constants** - Header names and MIME types used by the pipeline
//! - **header** - Case-insensitive multi-value [`Header`] map
//! - **query** - Case-sensitive multi-value [`QueryParam`] map
//! - **sniff** - Byte-signature content-type detection for undeclared bodies

pub mod header;
pub mod query;
pub mod sniff;

pub use header::{canonical_header_key, Header};
pub use query::QueryParam;
pub use sniff::{detect_content_type, sniff, SNIFF_LEN};

/// Well-known names and values.
pub mod constants {
    /// `Content-Type` header name, in canonical form
    pub const CONTENT_TYPE: &str = "Content-Type";

    /// MIME types with built-in codecs or sniffer results.
    pub mod mime {
        /// JSON
        pub const APPLICATION_JSON: &str = "application/json";
        /// Plain text
        pub const TEXT_PLAIN: &str = "text/plain";
        /// Plain UTF-8 text, as produced by the sniffer
        pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
        /// Unknown binary data
        pub const OCTET_STREAM: &str = "application/octet-stream";
    }
}
