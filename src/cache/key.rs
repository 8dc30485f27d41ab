//! Cache Key Module
//!
//! Derives deterministic cache keys from `(user, operation, params)`.
//!
//! # Key Format
//! `userId:operation:name1:value1,name2:value2`
//!
//! Parameters are sorted by name before joining, so argument order never
//! changes the key. `:` and `,` are reserved separators: user ids must not
//! contain `:`, and parameter names or values containing `:` or `,` may
//! produce colliding keys.

use std::fmt;

/// Separator between key components and between a parameter name and value
pub const KEY_SEPARATOR: &str = ":";
/// Separator between parameters
pub const PARAM_SEPARATOR: &str = ",";

// == Key Params ==
/// Named arguments of a cached operation.
///
/// Values are converted with `Display` when added. Insertion order is
/// irrelevant to the resulting key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyParams {
    pairs: Vec<(String, String)>,
}

impl KeyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a named parameter. A repeated name replaces the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        let name = name.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders `name:value` pairs sorted by name and comma-joined.
    fn render(&self) -> String {
        let mut sorted: Vec<&(String, String)> = self.pairs.iter().collect();
        sorted.sort();
        sorted
            .iter()
            .map(|(name, value)| format!("{name}{KEY_SEPARATOR}{value}"))
            .collect::<Vec<_>>()
            .join(PARAM_SEPARATOR)
    }
}

impl<K, V> FromIterator<(K, V)> for KeyParams
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = KeyParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

// == Cache Key ==
/// An opaque cache key.
///
/// The user component is kept alongside the rendered string so invalidation
/// compares user ids exactly instead of by string prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    rendered: String,
    user_len: usize,
}

impl CacheKey {
    /// The user this key belongs to.
    pub fn user_id(&self) -> &str {
        &self.rendered[..self.user_len]
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id() == user_id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

// == Build Key ==
/// Builds the cache key for one logical request. Pure and deterministic.
pub fn build_key(user_id: &str, operation: &str, params: &KeyParams) -> CacheKey {
    let rendered = format!(
        "{user_id}{KEY_SEPARATOR}{operation}{KEY_SEPARATOR}{}",
        params.render()
    );
    CacheKey {
        rendered,
        user_len: user_id.len(),
    }
}
