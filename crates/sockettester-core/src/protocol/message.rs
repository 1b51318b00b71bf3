//! The message carried by one frame.
//!
//! A [`Message`] is a flat mapping from string keys to string values, for
//! example `{"hmiEvent":"resetPlant"}`.  Nested objects, numbers, booleans and
//! `null` are not part of the format: producers should only emit
//! string-valued objects, and anything else fails to decode.
//!
//! # Key order
//!
//! Entries are kept in a `BTreeMap`, so serialization always emits keys in
//! sorted order.  Two messages with the same entries are equal regardless of
//! the order in which the entries were inserted.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A string-to-string mapping serialized as one JSON object per frame.
///
/// `#[serde(transparent)]` makes the wrapper invisible on the wire: a
/// `Message` serializes exactly like the map it contains.
///
/// # Examples
///
/// ```rust
/// use sockettester_core::Message;
///
/// let msg = Message::single("hmiEvent", "resetPlant");
/// assert_eq!(msg.get("hmiEvent"), Some("resetPlant"));
/// assert_eq!(msg.to_string(), r#"{"hmiEvent":"resetPlant"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(BTreeMap<String, String>);

impl Message {
    /// Creates an empty message (`{}` on the wire).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a message with exactly one entry.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut msg = Self::new();
        msg.insert(key, value);
        msg
    }

    /// Inserts an entry, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

}

impl<K, V> FromIterator<(K, V)> for Message
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for Message {
    /// Formats the message as compact JSON, the same text that goes on the wire
    /// (without the delimiter).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Serializing a map of strings cannot fail.
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
