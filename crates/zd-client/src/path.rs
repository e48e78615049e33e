//! Path building from literal, identifier and query-parameter segments.
//!
//! Every resource call is described as an ordered list of [`Segment`]s:
//!
//! ```rust
//! use zendesk_client::{EndpointPath, QueryParams, Segment};
//!
//! let path = EndpointPath::new(vec![
//!     Segment::from("organizations"),
//!     Segment::from("destroy_many"),
//!     Segment::from(QueryParams::new().with("ids", vec![1u64, 2, 3])),
//! ])
//! .resolve()
//! .unwrap();
//!
//! assert_eq!(path.to_string(), "organizations/destroy_many?ids=1,2,3");
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// A resource identifier: Zendesk ids are numeric, some endpoints take names or external ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Number(u64),
    Text(String),
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Identifier::Number(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Text(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

/// A query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    /// Serialized as one comma-joined value (`ids=1,2,3`).
    List(Vec<String>),
}

impl QueryValue {
    fn encode(&self) -> String {
        match self {
            QueryValue::Scalar(value) => urlencoding::encode(value).into_owned(),
            QueryValue::List(items) => items
                .iter()
                .map(|item| urlencoding::encode(item).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<Vec<u64>> for QueryValue {
    fn from(values: Vec<u64>) -> Self {
        QueryValue::List(values.iter().map(u64::to_string).collect())
    }
}

impl From<&[u64]> for QueryValue {
    fn from(values: &[u64]) -> Self {
        QueryValue::List(values.iter().map(u64::to_string).collect())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Query parameters attached to the end of a path. Keys are unique and keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder form of [`QueryParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Split a comma-joined wire value back into its decoded elements.
    pub fn parse_list(value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }
        value
            .split(',')
            .map(|item| {
                urlencoding::decode(item)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| item.to_string())
            })
            .collect()
    }
}

/// One component of a REST path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Id(Identifier),
    /// Must be the last segment.
    Query(QueryParams),
}

impl Segment {
    /// An identifier segment (`organizations/{id}`).
    pub fn id(id: impl Into<Identifier>) -> Self {
        Segment::Id(id.into())
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Literal(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Literal(value)
    }
}

impl From<u64> for Segment {
    fn from(value: u64) -> Self {
        Segment::Id(Identifier::Number(value))
    }
}

impl From<Identifier> for Segment {
    fn from(value: Identifier) -> Self {
        Segment::Id(value)
    }
}

impl From<QueryParams> for Segment {
    fn from(value: QueryParams) -> Self {
        Segment::Query(value)
    }
}

/// An ordered segment sequence, validated when resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPath {
    segments: Vec<Segment>,
}

impl EndpointPath {
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Produce the normalized path and query string.
    pub fn resolve(&self) -> Result<ResolvedPath> {
        if self.segments.is_empty() {
            return Err(Error::invalid_path("path has no segments"));
        }

        let last = self.segments.len() - 1;
        let mut parts = Vec::with_capacity(self.segments.len());
        let mut query = Vec::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    if literal.trim().is_empty() {
                        return Err(Error::invalid_path(format!(
                            "segment {} is an empty literal",
                            index
                        )));
                    }
                    parts.push(urlencoding::encode(literal).into_owned());
                }
                Segment::Id(Identifier::Number(n)) => parts.push(n.to_string()),
                Segment::Id(Identifier::Text(text)) => {
                    if text.trim().is_empty() {
                        return Err(Error::invalid_path(format!(
                            "segment {} is an empty identifier",
                            index
                        )));
                    }
                    parts.push(urlencoding::encode(text).into_owned());
                }
                Segment::Query(params) => {
                    if index != last {
                        return Err(Error::invalid_path(format!(
                            "query parameters at segment {} must be the last segment",
                            index
                        )));
                    }
                    // An empty element would vanish when the list is split back apart.
                    if let Some((key, _)) = params.iter().find(|(_, v)| {
                        matches!(v, QueryValue::List(items) if items.iter().any(String::is_empty))
                    }) {
                        return Err(Error::invalid_path(format!(
                            "query list `{}` contains an empty element",
                            key
                        )));
                    }
                    query = params
                        .iter()
                        .map(|(k, v)| (urlencoding::encode(k).into_owned(), v.encode()))
                        .collect();
                }
            }
        }

        if parts.is_empty() {
            return Err(Error::invalid_path("path has no path segments"));
        }

        Ok(ResolvedPath {
            path: parts.join("/"),
            query,
            absolute: false,
        })
    }
}

/// Resolve a segment sequence in one step.
pub fn build(segments: impl IntoIterator<Item = Segment>) -> Result<ResolvedPath> {
    EndpointPath::new(segments).resolve()
}

/// A resolved request target: a base-relative path with encoded query pairs, or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: String,
    query: Vec<(String, String)>,
    absolute: bool,
}

impl ResolvedPath {
    /// A fully-qualified URL, used as-is (next-page links).
    pub fn absolute(url: impl Into<String>) -> Self {
        Self {
            path: url.into(),
            query: Vec::new(),
            absolute: true,
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encoded query pairs in order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the encoded value for a raw (unencoded) key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        let encoded = urlencoding::encode(key);
        self.query
            .iter()
            .find(|(k, _)| *k == encoded)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.query_value(key).is_some()
    }

    /// Set one scalar parameter, replacing an existing one with the same key.
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        let key = urlencoding::encode(key).into_owned();
        let value = urlencoding::encode(value).into_owned();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.query.is_empty() {
            return Ok(());
        }
        let separator = if self.absolute && self.path.contains('?') {
            '&'
        } else {
            '?'
        };
        write!(f, "{}", separator)?;
        let rendered = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        f.write_str(&rendered)
    }
}
