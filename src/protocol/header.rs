//! Case-insensitive, multi-value header container.
//!
//! Keys are stored in canonical MIME form: the first letter and every letter
//! following a hyphen are upper-cased, the rest lower-cased
//! (`content-type` becomes `Content-Type`). Lookups canonicalize the same way,
//! so `get("CONTENT-TYPE")` and `get("content-type")` see the same entry.
//!
//! # Examples
//!
//! ```
//! use http_codec_client::protocol::Header;
//!
//! let mut headers = Header::new();
//! headers.set("x-trace", "v");
//! headers.add("X-TRACE", "w");
//!
//! assert_eq!(headers.get("X-Trace"), "v");
//! assert_eq!(headers.values("x-trace"), ["v", "w"]);
//! ```

use std::collections::BTreeMap;

/// Canonicalize a header key.
///
/// Keys containing bytes that are not valid in a header token (spaces, control
/// characters, non-ASCII) are returned unchanged.
pub fn canonical_header_key(key: &str) -> String {
    if !key.bytes().all(is_token_byte) {
        return key.to_string();
    }

    let mut upper = true;
    key.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.'
        | b'^' | b'_' | b'`' | b'|' | b'~')
        || b.is_ascii_alphanumeric()
}

/// Headers to attach to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: BTreeMap<String, Vec<String>>,
}

impl Header {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build headers from `(key, value)` pairs, adding each pair in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Append a value, keeping the values already present
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .entry(canonical_header_key(key))
            .or_default()
            .push(value.into());
    }

    /// Replace all values of `key` with a single value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .insert(canonical_header_key(key), vec![value.into()]);
    }

    /// Remove `key` and all of its values
    pub fn del(&mut self, key: &str) {
        self.entries.remove(&canonical_header_key(key));
    }

    /// First value of `key`, or `""` when absent
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .get(&canonical_header_key(key))
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All values of `key` in insertion order
    pub fn values(&self, key: &str) -> &[String] {
        self.entries
            .get(&canonical_header_key(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `key` has at least one entry
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&canonical_header_key(key))
    }

    /// Iterate over `(canonical key, values)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no header is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Header
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        for (key, value) in iter {
            header.add(key.as_ref(), value);
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_header_key("content-type"), "Content-Type");
        assert_eq!(canonical_header_key("X-REQUEST-ID"), "X-Request-Id");
        assert_eq!(canonical_header_key("accept"), "Accept");
    }

    #[test]
    fn test_canonical_key_invalid_token_untouched() {
        assert_eq!(canonical_header_key("bad key"), "bad key");
    }

    #[test]
    fn test_set_then_add_keeps_order() {
        let mut headers = Header::new();
        headers.set("X", "v");
        headers.add("X", "w");
        assert_eq!(headers.get("X"), "v");
        assert_eq!(headers.values("X"), ["v", "w"]);
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut headers = Header::new();
        headers.add("accept", "text/html");
        headers.add("Accept", "application/json");
        headers.set("ACCEPT", "*/*");
        assert_eq!(headers.values("accept"), ["*/*"]);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Header::new();
        headers.add("content-type", "application/json");
        assert_eq!(headers.get("Content-Type"), "application/json");
        assert!(headers.contains("CONTENT-TYPE"));
    }

    #[test]
    fn test_del_and_missing_keys() {
        let mut headers = Header::new();
        headers.add("X-A", "1");
        headers.del("x-a");
        headers.del("never-set");
        assert_eq!(headers.get("X-A"), "");
        assert!(headers.values("X-A").is_empty());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_from_pairs() {
        let headers = Header::from_pairs([("content-type", "application/json"), ("x-a", "1")]);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Type"), "application/json");
    }
}
