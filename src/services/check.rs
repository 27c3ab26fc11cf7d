//! Stateless predicates consulted before touching the store.
//!
//! None of these take a lock; callers pass in a map they already hold.

use crate::state::kv::InnerMap;

/// Longest accepted key, in characters, after trimming whitespace.
pub const MAX_KEY_LEN: usize = 16;

/// Longest accepted value, in characters.
pub const MAX_VALUE_LEN: usize = 512;

/// Maximum number of distinct keys the store holds.
pub const MAX_KEYS: usize = 1024;

pub fn key_exists(key: &str, map: &InnerMap) -> bool {
    map.contains_key(key)
}

/// A key is valid when, once surrounding whitespace is trimmed, it is
/// non-empty and no longer than [`MAX_KEY_LEN`].
pub fn valid_key(key: &str) -> bool {
    let len = key.trim().chars().count();
    len > 0 && len <= MAX_KEY_LEN
}

pub fn valid_value(value: &str) -> bool {
    value.chars().count() <= MAX_VALUE_LEN
}

pub fn within_capacity(map: &InnerMap) -> bool {
    map.len() <= MAX_KEYS
}

/// Whether writing `key` keeps the map within capacity. Overwriting a key
/// that is already present never grows the map, so it is always admitted.
pub fn can_admit(key: &str, map: &InnerMap) -> bool {
    key_exists(key, map) || map.len() < MAX_KEYS
}
