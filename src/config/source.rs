use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Looks up raw configuration values by key.
///
/// A missing key is `None`, never an error. Implementations must answer the
/// same key the same way for as long as they live.
pub trait Resolver: Send + Sync + fmt::Debug {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Resolves keys against a fixed in-memory map.
///
/// ```
/// use envbind::{MapResolver, Resolver};
///
/// let resolver: MapResolver = [("PORT", "8080")].into_iter().collect();
/// assert_eq!(resolver.lookup("PORT").as_deref(), Some("8080"));
/// assert_eq!(resolver.lookup("HOST"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    values: HashMap<String, String>,
}

impl MapResolver {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Builds a resolver from entries that may carry a null marker.
    ///
    /// Keys mapped to `None` resolve exactly like keys that are not present.
    pub fn from_optional<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.into(), v.into())))
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<HashMap<String, String>> for MapResolver {
    fn from(values: HashMap<String, String>) -> Self {
        Self::new(values)
    }
}

impl Resolver for MapResolver {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Stacks resolvers so that later layers override earlier ones.
///
/// A lookup asks the most recently pushed layer first and falls through to
/// earlier layers until one of them has the key.
#[derive(Debug, Default)]
pub struct LayeredResolver {
    layers: Vec<Box<dyn Resolver>>,
}

impl LayeredResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, resolver: impl Resolver + 'static) -> Self {
        self.layers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Resolver for LayeredResolver {
    fn lookup(&self, key: &str) -> Option<String> {
        self.layers.iter().rev().find_map(|layer| layer.lookup(key))
    }
}
