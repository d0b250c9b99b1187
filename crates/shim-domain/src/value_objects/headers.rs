//! Header collection
//!
//! Thin wrapper over [`http::HeaderMap`]. Names and values are validated
//! when inserted, so a bad header is rejected where it is built rather than
//! at dispatch.

use http::header::{AsHeaderName, HeaderMap, HeaderName, HeaderValue, Iter};

use crate::error::{Error, Result};

/// Case-insensitive HTTP header collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HeaderMap,
}

fn header_name<K>(name: K) -> Result<HeaderName>
where
    HeaderName: TryFrom<K>,
    <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
{
    HeaderName::try_from(name).map_err(|e| {
        let e: http::Error = e.into();
        Error::invalid_argument(format!("Invalid header name: {e}"))
    })
}

fn header_value<V>(value: V) -> Result<HeaderValue>
where
    HeaderValue: TryFrom<V>,
    <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
{
    HeaderValue::try_from(value).map_err(|e| {
        let e: http::Error = e.into();
        Error::invalid_argument(format!("Invalid header value: {e}"))
    })
}

impl Headers {
    /// Create an empty header collection
    pub fn new() -> Self {
        Self::default()
    }

    /// First value stored for `name`, if it is valid UTF-8
    pub fn get<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.map.get(name).and_then(|value| value.to_str().ok())
    }

    /// Every value stored for `name`
    pub fn get_all<K: AsHeaderName>(&self, name: K) -> Vec<&str> {
        self.map
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Whether a header named `name` exists
    pub fn contains<K: AsHeaderName>(&self, name: K) -> bool {
        self.map.contains_key(name)
    }

    /// Replace all values of `name` with a single value
    pub fn set<K, V>(&mut self, name: K, value: V) -> Result<()>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.map.insert(header_name(name)?, header_value(value)?);
        Ok(())
    }

    /// Add a value without removing existing ones
    pub fn append<K, V>(&mut self, name: K, value: V) -> Result<()>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.map.append(header_name(name)?, header_value(value)?);
        Ok(())
    }

    /// Remove every value of `name`, returning whether anything was removed
    pub fn remove<K: AsHeaderName>(&mut self, name: K) -> bool {
        self.map.remove(name).is_some()
    }

    /// Overlay `other` on top of `self`
    ///
    /// Every name present in `other` replaces all values of that name in
    /// `self`; names only present in `self` are kept.
    pub fn merge(&mut self, other: &Headers) {
        for name in other.map.keys() {
            let mut values = other.map.get_all(name).iter();
            if let Some(first) = values.next() {
                self.map.insert(name.clone(), first.clone());
            }
            for value in values {
                self.map.append(name.clone(), value.clone());
            }
        }
    }

    /// Return a new collection with `other` overlaid on a copy of `self`
    pub fn merged(&self, other: &Headers) -> Headers {
        let mut headers = self.clone();
        headers.merge(other);
        headers
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> Iter<'_, HeaderValue> {
        self.map.iter()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &HeaderMap {
        &self.map
    }

    /// Take the underlying map
    pub fn into_map(self) -> HeaderMap {
        self.map
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<HeaderMap> for Headers {
    fn from(map: HeaderMap) -> Self {
        Self { map }
    }
}

impl<K, V, const LEN: usize> TryFrom<[(K, V); LEN]> for Headers
where
    HeaderName: TryFrom<K>,
    <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
    HeaderValue: TryFrom<V>,
    <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
{
    type Error = Error;

    fn try_from(pairs: [(K, V); LEN]) -> Result<Self> {
        let mut headers = Headers::new();
        for (name, value) in pairs {
            headers.append(name, value)?;
        }
        Ok(headers)
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
