//! Request construction and response content-type resolution.
//!
//! These are the building blocks [`Client::dispatch`](crate::Client::dispatch)
//! strings together:
//!
//! 1. [`build_url`] parses the target and appends query parameters
//! 2. [`encode_body`] picks an encoder from the declared `Content-Type`
//! 3. [`header_map`] turns the option headers into wire headers
//! 4. [`response_content_type`] trusts a declared type or sniffs the body

use crate::codec::{self, CodecRegistry};
use crate::error::{ClientError, Result};
use crate::protocol::constants::CONTENT_TYPE;
use crate::protocol::{self, Header, QueryParam};
use crate::transport::BodyStream;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

/// Parse `raw` and append `query` to its existing query string.
pub fn build_url(raw: &str, query: &QueryParam) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|source| ClientError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    query.append_to(&mut url);
    Ok(url)
}

/// Encode `body` with the encoder registered for the `Content-Type` in
/// `headers`, then write that content type back onto `headers`.
///
/// A missing `Content-Type` is not defaulted; it resolves as the empty type
/// and fails with `NoCodecFound` unless someone registered an encoder for `""`.
pub fn encode_body<B>(registry: &CodecRegistry, headers: &mut Header, body: &B) -> Result<Bytes>
where
    B: Serialize + ?Sized,
{
    let content_type = headers.get(CONTENT_TYPE).to_string();
    let encoder = registry.encoders().resolve(&content_type)?;
    let data = codec::encode_with(encoder.as_ref(), &content_type, body)?;
    headers.set(CONTENT_TYPE, content_type);
    Ok(Bytes::from(data))
}

/// Convert option headers into an [`HeaderMap`], keeping every value.
pub fn header_map(headers: &Header) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, values) in headers.iter() {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| ClientError::InvalidHeader {
            name: key.to_string(),
            reason: e.to_string(),
        })?;
        for value in values {
            let value = HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
                name: key.to_string(),
                reason: e.to_string(),
            })?;
            map.append(name.clone(), value);
        }
    }
    Ok(map)
}

/// The response content type, declared or sniffed.
///
/// A non-empty `Content-Type` header is returned verbatim together with the
/// untouched body, with bytes outside UTF-8 replaced rather than dropped.
/// Otherwise the body is sniffed and the rebuilt stream must be used in place
/// of the original.
pub async fn response_content_type(
    headers: &HeaderMap,
    body: BodyStream,
) -> Result<(String, BodyStream)> {
    let declared = headers
        .get(http::header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .filter(|v| !v.is_empty());

    match declared {
        Some(content_type) => Ok((content_type, body)),
        None => protocol::sniff(body).await,
    }
}
