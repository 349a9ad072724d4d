//! Content-type sniffing for responses without a declared `Content-Type`.
//!
//! Detection looks at no more than [`SNIFF_LEN`] bytes and follows the
//! byte-signature approach of the WHATWG MIME sniffing standard, with one
//! addition: a body that opens an object or array and parses as JSON is
//! reported as `application/json`. A prefix cut off at [`SNIFF_LEN`] only has
//! to be valid up to the cut.
//!
//! # Stream Reconstruction
//!
//! [`sniff`] has to consume the beginning of the body to inspect it. It hands
//! back a new stream that first replays every consumed chunk and then continues
//! with the rest of the original stream, so the reader still sees each byte of
//! the body exactly once.
//!
//! # Examples
//!
//! ```
//! use http_codec_client::protocol::detect_content_type;
//!
//! assert_eq!(detect_content_type(br#"  {"a": 1}"#), "application/json");
//! assert_eq!(detect_content_type(b"\x89PNG\r\n\x1a\n...."), "image/png");
//! assert_eq!(detect_content_type(b"hello"), "text/plain; charset=utf-8");
//! assert_eq!(detect_content_type(b"[INFO] ready"), "text/plain; charset=utf-8");
//! ```

use crate::error::{ClientError, Result};
use crate::protocol::constants::mime;
use crate::transport::BodyStream;
use bytes::{Bytes, BytesMut};
use futures::{stream, StreamExt};
use serde::de::IgnoredAny;
use serde_json::error::Category;

/// Maximum number of bytes inspected by the detector
pub const SNIFF_LEN: usize = 512;

enum Signature {
    /// Case-insensitive HTML tag, must be followed by a space or `>`
    Html(&'static [u8]),
    /// Exact prefix after leading whitespace
    Text(&'static [u8], &'static str),
    /// Exact prefix at offset 0
    Exact(&'static [u8], &'static str),
    /// Pattern where `0xFF` in the mask matches the byte exactly and `0x00` skips it
    Masked(&'static [u8], &'static [u8], &'static str),
}

const HTML: &str = "text/html; charset=utf-8";

static SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::Text(b"<?xml", "text/xml; charset=utf-8"),
    Signature::Exact(b"%PDF-", "application/pdf"),
    Signature::Exact(b"%!PS-Adobe-", "application/postscript"),
    Signature::Exact(b"\xFE\xFF", "text/plain; charset=utf-16be"),
    Signature::Exact(b"\xFF\xFE", "text/plain; charset=utf-16le"),
    Signature::Exact(b"\xEF\xBB\xBF", mime::TEXT_PLAIN_UTF8),
    Signature::Exact(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Exact(b"\x00\x00\x02\x00", "image/x-icon"),
    Signature::Exact(b"BM", "image/bmp"),
    Signature::Exact(b"GIF87a", "image/gif"),
    Signature::Exact(b"GIF89a", "image/gif"),
    Signature::Masked(
        b"RIFF\x00\x00\x00\x00WEBPVP",
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        "image/webp",
    ),
    Signature::Exact(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    Signature::Exact(b"\xFF\xD8\xFF", "image/jpeg"),
    Signature::Masked(
        b"RIFF\x00\x00\x00\x00WAVE",
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        "audio/wave",
    ),
    Signature::Masked(
        b"RIFF\x00\x00\x00\x00AVI ",
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        "video/avi",
    ),
    Signature::Exact(b"ID3", "audio/mpeg"),
    Signature::Exact(b"OggS\x00", "application/ogg"),
    Signature::Exact(b"wOFF", "font/woff"),
    Signature::Exact(b"wOF2", "font/woff2"),
    Signature::Exact(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Exact(b"PK\x03\x04", "application/zip"),
    Signature::Exact(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    Signature::Exact(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    Signature::Exact(b"\x00\x61\x73\x6D", "application/wasm"),
];

fn is_ws(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn is_binary(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

/// `text` opens a JSON object or array and parses, or runs out of input
/// before any syntax error when `truncated`.
fn looks_like_json(text: &[u8], truncated: bool) -> bool {
    if !matches!(text.first(), Some(b'{') | Some(b'[')) {
        return false;
    }
    match serde_json::from_slice::<IgnoredAny>(text) {
        Ok(_) => true,
        Err(e) => truncated && e.classify() == Category::Eof,
    }
}

impl Signature {
    fn matches(&self, data: &[u8], text: &[u8]) -> Option<&'static str> {
        match self {
            Signature::Html(tag) => {
                if text.len() <= tag.len() || !text[..tag.len()].eq_ignore_ascii_case(tag) {
                    return None;
                }
                matches!(text[tag.len()], b' ' | b'>').then_some(HTML)
            }
            Signature::Text(prefix, ct) => text.starts_with(prefix).then_some(*ct),
            Signature::Exact(prefix, ct) => data.starts_with(prefix).then_some(*ct),
            Signature::Masked(pattern, mask, ct) => {
                if data.len() < pattern.len() {
                    return None;
                }
                pattern
                    .iter()
                    .zip(mask.iter())
                    .zip(data)
                    .all(|((p, m), d)| d & m == p & m)
                    .then_some(*ct)
            }
        }
    }
}

/// Detect the content type of a body prefix.
///
/// Only the first [`SNIFF_LEN`] bytes are considered. Always returns a valid
/// MIME type, falling back to `application/octet-stream`.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let truncated = data.len() >= SNIFF_LEN;
    let data = &data[..data.len().min(SNIFF_LEN)];
    let start = data.iter().position(|&b| !is_ws(b)).unwrap_or(data.len());
    let text = &data[start..];

    if let Some(ct) = SIGNATURES.iter().find_map(|sig| sig.matches(data, text)) {
        return ct;
    }

    if looks_like_json(text, truncated) {
        return mime::APPLICATION_JSON;
    }

    if data.iter().any(|&b| is_binary(b)) {
        mime::OCTET_STREAM
    } else {
        mime::TEXT_PLAIN_UTF8
    }
}

/// Sniff the content type of a body stream.
///
/// Reads whole chunks until at least [`SNIFF_LEN`] bytes are buffered or the
/// stream ends; an early end is not an error. Returns the detected type and a
/// stream yielding the buffered chunks followed by the unread remainder.
pub async fn sniff(mut body: BodyStream) -> Result<(String, BodyStream)> {
    let mut chunks: Vec<Bytes> = Vec::new();
    let mut prefix = BytesMut::with_capacity(SNIFF_LEN);
    let mut ended = false;

    while prefix.len() < SNIFF_LEN {
        match body.next().await {
            Some(Ok(chunk)) => {
                let take = chunk.len().min(SNIFF_LEN - prefix.len());
                prefix.extend_from_slice(&chunk[..take]);
                chunks.push(chunk);
            }
            Some(Err(e)) => return Err(ClientError::Body(e)),
            None => {
                ended = true;
                break;
            }
        }
    }

    let content_type = detect_content_type(&prefix).to_string();
    tracing::trace!(
        content_type = %content_type,
        sniffed = prefix.len(),
        "sniffed response content type"
    );

    let replay = stream::iter(chunks.into_iter().map(Ok));
    let rebuilt: BodyStream = if ended {
        replay.boxed()
    } else {
        replay.chain(body).boxed()
    };

    Ok((content_type, rebuilt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::transport::collect_body;

    fn chunked(data: &[u8], chunk_size: usize) -> BodyStream {
        let chunks: Vec<_> = data
            .chunks(chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        stream::iter(chunks).boxed()
    }

    #[test]
    fn test_detect_json() {
        assert_eq!(detect_content_type(br#"{"a":1}"#), "application/json");
        assert_eq!(detect_content_type(b"\n  [1, 2]"), "application/json");
    }

    #[test]
    fn test_detect_bracketed_text_is_not_json() {
        assert_eq!(detect_content_type(b"[INFO] service ready"), mime::TEXT_PLAIN_UTF8);
        assert_eq!(detect_content_type(b"{{ template }}"), mime::TEXT_PLAIN_UTF8);
        assert_eq!(detect_content_type(b"[1, 2"), mime::TEXT_PLAIN_UTF8);
    }

    #[test]
    fn test_detect_json_cut_at_limit() {
        let mut data = b"[".to_vec();
        while data.len() < SNIFF_LEN + 10 {
            data.extend_from_slice(br#"{"k":"value"},"#);
        }
        assert_eq!(detect_content_type(&data), "application/json");

        let mut broken = b"[INFO ".to_vec();
        broken.resize(SNIFF_LEN + 10, b'x');
        assert_eq!(detect_content_type(&broken), mime::TEXT_PLAIN_UTF8);
    }

    #[test]
    fn test_detect_html_needs_terminator() {
        assert_eq!(detect_content_type(b"<html><body>"), HTML);
        assert_eq!(detect_content_type(b"  <!DOCTYPE html >"), HTML);
        assert_eq!(detect_content_type(b"<htmlx"), mime::TEXT_PLAIN_UTF8);
    }

    #[test]
    fn test_detect_binary_signatures() {
        assert_eq!(detect_content_type(b"GIF89a\x01\x00"), "image/gif");
        assert_eq!(detect_content_type(b"%PDF-1.7"), "application/pdf");
        assert_eq!(detect_content_type(b"\x1F\x8B\x08\x00"), "application/x-gzip");
        assert_eq!(
            detect_content_type(b"RIFF\x10\x20\x30\x40WEBPVP8 "),
            "image/webp"
        );
    }

    #[test]
    fn test_detect_fallbacks() {
        assert_eq!(detect_content_type(b""), mime::TEXT_PLAIN_UTF8);
        assert_eq!(detect_content_type(b"plain words"), mime::TEXT_PLAIN_UTF8);
        assert_eq!(detect_content_type(b"\x00\x01\x02\x03"), mime::OCTET_STREAM);
    }

    #[test]
    fn test_detect_ignores_bytes_past_limit() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.push(0x00);
        assert_eq!(detect_content_type(&data), mime::TEXT_PLAIN_UTF8);
    }

    #[tokio::test]
    async fn test_sniff_short_body_is_replayed() {
        let original = br#"{"a":1}"#;
        let (ct, body) = sniff(chunked(original, 3)).await.unwrap();
        assert_eq!(ct, "application/json");
        assert_eq!(collect_body(body).await.unwrap(), Bytes::from_static(original));
    }

    #[tokio::test]
    async fn test_sniff_long_body_is_replayed_once() {
        let mut original = br#"{"items":["#.to_vec();
        for i in 0..400 {
            original.extend_from_slice(format!("{},", i).as_bytes());
        }
        original.extend_from_slice(b"0]}");
        assert!(original.len() > SNIFF_LEN);

        let (ct, body) = sniff(chunked(&original, 100)).await.unwrap();
        assert_eq!(ct, "application/json");
        assert_eq!(collect_body(body).await.unwrap(), Bytes::from(original));
    }

    #[tokio::test]
    async fn test_sniff_single_large_chunk() {
        let original = vec![b'x'; 2048];
        let (ct, body) = sniff(chunked(&original, 2048)).await.unwrap();
        assert_eq!(ct, mime::TEXT_PLAIN_UTF8);
        assert_eq!(collect_body(body).await.unwrap().len(), 2048);
    }

    #[tokio::test]
    async fn test_sniff_read_error() {
        let body: BodyStream = stream::iter(vec![Err::<Bytes, BoxError>("reset".into())]).boxed();
        let err = sniff(body).await.err().unwrap();
        assert!(matches!(err, ClientError::Body(_)));
    }
}
