//! Cache key construction
//!
//! Keys are plain composite strings, readable and stable across processes
//! and releases: no hashing, no randomization. Two lookups share an entry
//! exactly when target and options agree.

use std::fmt::Write as _;

use crate::options::LookupOptions;

/// Build the cache key for a lookup: the target followed by
/// `;name=value` for each option, in canonical name order.
///
/// An empty option set yields the bare target with no trailing
/// separators. The empty target (an origin lookup) is itself a valid key.
pub fn cache_key(target: &str, options: &LookupOptions) -> String {
    let mut key = String::from(target);
    for (name, value) in options.iter() {
        let _ = write!(key, ";{name}={value}");
    }
    key
}
