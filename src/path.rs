//! Path codec for flat field names
//!
//! A field is identified by the property keys leading to it from the schema
//! root. On the wire that sequence is joined with `.`:
//!
//! - `["user", "name"]` <-> `"user.name"`
//! - No escaping: a key that itself contains `.` cannot be told apart from
//!   a path boundary. Schemas with such keys round-trip incorrectly.

use std::fmt;

use serde::{Serialize, Serializer};

/// Separator between path segments in a flat key
pub const SEPARATOR: char = '.';

/// Joins path segments into a flat key.
pub fn encode<S: AsRef<str>>(segments: &[S]) -> String {
    let mut key = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            key.push(SEPARATOR);
        }
        key.push_str(segment.as_ref());
    }
    key
}

/// Splits a flat key into path segments.
///
/// Always yields at least one segment; `""` decodes to `[""]`.
pub fn decode(key: &str) -> Vec<String> {
    key.split(SEPARATOR).map(str::to_string).collect()
}

/// Ordered sequence of property keys from the schema root to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Path of a top-level property
    pub fn root(key: impl Into<String>) -> Self {
        FieldPath(vec![key.into()])
    }

    /// Parses a flat key
    pub fn parse(key: &str) -> Self {
        FieldPath(decode(key))
    }

    /// Returns a new path with `key` appended
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        FieldPath(segments)
    }

    /// Extends an optional parent path
    pub fn under(parent: Option<&FieldPath>, key: impl Into<String>) -> Self {
        match parent {
            Some(parent) => parent.child(key),
            None => FieldPath::root(key),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment (the property key)
    pub fn key(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Flat encoding used as the submission name
    pub fn encode(&self) -> String {
        encode(&self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_joins_with_dot() {
        assert_eq!(encode(&["user", "address", "city"]), "user.address.city");
        assert_eq!(encode(&["name"]), "name");
    }

    #[test]
    fn test_decode_splits_on_dot() {
        assert_eq!(decode("user.address.city"), vec!["user", "address", "city"]);
        assert_eq!(decode("name"), vec!["name"]);
    }

    #[test]
    fn test_decode_empty_key() {
        assert_eq!(decode(""), vec![""]);
    }

    #[test]
    fn test_round_trip_without_separator_in_keys() {
        let segments = vec!["a".to_string(), "b_c".to_string(), "d-e".to_string()];
        assert_eq!(decode(&encode(&segments)), segments);
    }

    #[test]
    fn test_separator_in_key_is_ambiguous() {
        // Known limitation: the key "a.b" is indistinguishable from the path a -> b
        assert_eq!(encode(&["a.b"]), encode(&["a", "b"]));
        assert_eq!(decode(&encode(&["a.b"])), vec!["a", "b"]);
    }

    #[test]
    fn test_field_path_child() {
        let user = FieldPath::root("user");
        let name = user.child("name");
        assert_eq!(name.encode(), "user.name");
        assert_eq!(name.key(), "name");
        assert_eq!(name.depth(), 2);
        assert_eq!(user.depth(), 1);
    }

    #[test]
    fn test_field_path_under() {
        assert_eq!(FieldPath::under(None, "a").encode(), "a");
        let parent = FieldPath::parse("a.b");
        assert_eq!(FieldPath::under(Some(&parent), "c").to_string(), "a.b.c");
    }

    #[test]
    fn test_field_path_serializes_as_flat_key() {
        let path = FieldPath::parse("user.tags");
        assert_eq!(serde_json::to_value(&path).unwrap(), "user.tags");
    }
}
