//! Request options forwarded to the API
//!
//! Options tune what a lookup returns (field selection, hostname
//! resolution, translation language, ...). The same set is folded into
//! cache keys, so two lookups differing only in options are cached
//! independently.

use std::collections::BTreeMap;
use std::fmt;

/// A single option value: string, boolean, or integer.
///
/// Booleans always render as the `true`/`false` tokens; integers render in
/// decimal. The rendered form is used both in URLs and in cache keys.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Bool(bool),
    Int(i64),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(value) => f.write_str(value),
            OptionValue::Bool(value) => f.write_str(if *value { "true" } else { "false" }),
            OptionValue::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

/// An open-ended set of request options.
///
/// Held in a sorted map, so iteration order (and therefore cache-key and
/// query-string order) does not depend on insertion order.
///
/// # Example
/// ```
/// use ipregistry::LookupOptions;
///
/// let options = LookupOptions::new()
///     .set("hostname", true)
///     .set("fields", "location,security");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    values: BTreeMap<String, OptionValue>,
}

impl LookupOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Check whether any option is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate options in canonical (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Convert to query string parameters.
    ///
    /// Returns (name, rendered value) pairs suitable for URL encoding, in
    /// canonical order.
    pub fn to_query_params(&self) -> Vec<(&str, String)> {
        self.iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect()
    }
}
