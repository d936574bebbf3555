//! Set-valued query parameters of a permission URI.
//!
//! A [`Query`] is a multimap: a key may repeat, and every occurrence
//! contributes one value. Comparison helpers implement the two relations the
//! matcher needs: [`subset`] and [`intersects`].

use std::collections::{BTreeMap, HashSet};

use crate::ANY_ADDRESS;

/// Query key naming the account that owns the accessed state.
pub const QUERY_OWNED_EOA: &str = "owned.eoa";

/// Query key naming the receiving account.
pub const QUERY_TO_EOA: &str = "to.eoa";

/// Query key naming a private-network party.
pub const QUERY_FROM_TM: &str = "from.tm";

/// Query parameters of a permission URI, keyed by parameter name.
///
/// Keys iterate in sorted order so that composed URIs are canonical.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, Vec<String>>);

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Append a value to `key`, keeping existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// All values of `key`, or an empty slice.
    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterate over `(key, value)` pairs, one per value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value.as_str())))
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.add(key, value);
        }
        query
    }
}

fn sanitize(value: &str) -> String {
    if value.starts_with("0x") {
        value.to_lowercase()
    } else {
        value.to_owned()
    }
}

/// Whether every asked value is covered by a granted value.
///
/// Hex values (`0x` prefix) compare case-insensitively, and a granted
/// [`ANY_ADDRESS`] covers any asked value. An empty ask is always covered.
pub fn subset(granted: &[String], asked: &[String]) -> bool {
    let granted = granted.iter().map(|value| sanitize(value)).collect::<Vec<_>>();

    asked.iter().all(|asked| {
        let asked = sanitize(asked);
        granted
            .iter()
            .any(|granted| granted == ANY_ADDRESS || *granted == asked)
    })
}

/// Whether at least one asked value also appears among the granted values.
pub fn intersects(granted: &[String], asked: &[String]) -> bool {
    let granted = granted.iter().collect::<HashSet<_>>();
    asked.iter().any(|asked| granted.contains(asked))
}
