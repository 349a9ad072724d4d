//! Multi-value query parameters.
//!
//! Keys are matched exactly. At dispatch time every value is appended to the
//! query string already present on the URL; nothing in the URL is replaced.

use std::collections::BTreeMap;
use url::Url;

/// Query parameters to send along with a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParam {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryParam {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from `(key, value)` pairs, adding each pair in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Append a value to `key`
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Replace all values of `key`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), vec![value.into()]);
    }

    /// Remove `key`
    pub fn del(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// First value of `key`, or `""`
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All values of `key` in insertion order
    pub fn values(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over `(key, values)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every value to the query string of `url`.
    pub fn append_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, values) in &self.entries {
            for value in values {
                pairs.append_pair(key, value);
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParam
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParam::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}
