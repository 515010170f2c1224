//! A flat collection of query parameters.

mod decode;
mod encode;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io::Write;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Query parameters keyed by name, each holding one or more values.
///
/// Keys are kept sorted so that iteration and
/// [`to_query_string`](Params::to_query_string) are deterministic. A key that
/// is present always has at least one value, which may be empty.
///
/// ```
/// use protoquery::Params;
///
/// let mut params = Params::parse("ids=1,2&ids=3&name=a+b").unwrap();
/// assert_eq!(params.get("name"), Some("a b"));
/// assert_eq!(params.get("ids"), Some("1,2"));
/// assert_eq!(params.joined("ids").as_deref(), Some("1,2,3"));
///
/// params.set("name", "c");
/// assert_eq!(params.to_query_string(false), "ids=1,2&ids=3&name=c");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    inner: BTreeMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string such as `a=1&b=2`.
    ///
    /// A leading `?` is skipped, empty `&&` segments are ignored and a segment
    /// without `=` is a key with an empty value. Keys and values are
    /// percent-decoded with `+` read as a space.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut params = Params::new();
        for segment in input.split('&').filter(|segment| !segment.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            params.append(decode_component(key)?, decode_component(value)?);
        }
        Ok(params)
    }

    /// The first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every value for `key` joined with `,`, the list separator.
    pub fn joined(&self, key: &str) -> Option<Cow<'_, str>> {
        self.inner.get(key).map(|values| join_values(values))
    }

    /// Replaces all values for `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// Adds `value` after any existing values for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Each key with all of its values, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Each `(key, value)` pair, sorted by key.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
    }

    /// Renders the parameters as `k=v` pairs joined by `&`.
    ///
    /// See [`Config::use_form_encoding`](crate::Config::use_form_encoding) for
    /// the two percent-encoding modes.
    pub fn to_query_string(&self, use_form_encoding: bool) -> String {
        // a guess: most keys and values need no escaping
        let mut output = String::with_capacity(self.len() * 16);
        for (key, value) in self.pairs() {
            if !output.is_empty() {
                output.push('&');
            }
            output.extend(encode::encode(key, use_form_encoding));
            output.push('=');
            output.extend(encode::encode(value, use_form_encoding));
        }
        output
    }

    /// Writes the output of [`to_query_string`](Params::to_query_string).
    pub fn write_query_string<W: Write>(&self, writer: &mut W, use_form_encoding: bool) -> Result<()> {
        let mut first = true;
        for (key, value) in self.pairs() {
            if !first {
                writer.write_all(b"&")?;
            }
            first = false;
            for chunk in encode::encode(key, use_form_encoding) {
                writer.write_all(chunk.as_bytes())?;
            }
            writer.write_all(b"=")?;
            for chunk in encode::encode(value, use_form_encoding) {
                writer.write_all(chunk.as_bytes())?;
            }
        }
        Ok(())
    }
}

pub(crate) fn join_values(values: &[String]) -> Cow<'_, str> {
    match values {
        [single] => Cow::Borrowed(single.as_str()),
        _ => Cow::Owned(values.join(",")),
    }
}

fn decode_component(input: &str) -> Result<String> {
    match decode::decode(input.as_bytes()) {
        Cow::Borrowed(_) => Ok(input.to_owned()),
        Cow::Owned(bytes) => String::from_utf8(bytes).map_err(|err| Error::Utf8(err.utf8_error())),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Serialized as a sequence of `(key, value)` pairs, the shape form and query
/// serializers accept at the top level.
impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.pairs())
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(String, String)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
