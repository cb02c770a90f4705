//! Submission aggregation
//!
//! Rebuilds a nested value tree from flat `(key, value)` pairs:
//!
//! 1. Group values by key in first-seen order. A key seen once is a scalar,
//!    a key seen more than once becomes a list in submission order.
//! 2. Split every key on the path separator and insert its value into a
//!    nested map, creating groups for every segment but the last.
//!
//! Arity comes from repetition alone: a multi-choice field with a single
//! selection arrives here as a scalar. The validation step corrects this
//! against the schema.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;

use crate::mapper::literal_text;
use crate::path::{decode, encode};

use super::errors::{PayloadError, PayloadResult};
use super::types::{FlatEntry, FlatValue, NormalizedPayload, PayloadNode};

/// Aggregates flat entries into a normalized payload.
///
/// # Errors
///
/// Returns `PayloadError::PathConflict` when one key is a leaf and another
/// key nests below it (`a` and `a.b`), in either submission order.
pub fn normalize<I, E>(entries: I) -> PayloadResult<NormalizedPayload>
where
    I: IntoIterator<Item = E>,
    E: Into<FlatEntry>,
{
    let mut grouped: IndexMap<String, Vec<FlatValue>> = IndexMap::new();
    for entry in entries {
        let FlatEntry { key, value } = entry.into();
        grouped.entry(key).or_default().push(value);
    }

    let mut root = IndexMap::new();
    for (key, mut values) in grouped {
        let node = if values.len() == 1 {
            PayloadNode::Value(values.remove(0))
        } else {
            PayloadNode::List(values)
        };
        insert(&mut root, &key, node)?;
    }

    Ok(NormalizedPayload::from_root(root))
}

fn insert(
    root: &mut IndexMap<String, PayloadNode>,
    key: &str,
    node: PayloadNode,
) -> PayloadResult<()> {
    let segments = decode(key);
    // decode always yields at least one segment
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| PayloadNode::Map(IndexMap::new()));
        current = match slot {
            PayloadNode::Map(map) => map,
            _ => {
                return Err(PayloadError::PathConflict {
                    key: key.to_string(),
                    prefix: encode(&segments[..=depth]),
                })
            }
        };
    }

    match current.entry(last.clone()) {
        Entry::Vacant(slot) => {
            slot.insert(node);
            Ok(())
        }
        Entry::Occupied(_) => Err(PayloadError::PathConflict {
            key: key.to_string(),
            prefix: key.to_string(),
        }),
    }
}

/// Flattens a JSON object into the entries a form would submit for it.
///
/// Arrays become repeated keys, nested objects dotted keys, scalars their
/// text form. Nulls and empty arrays submit nothing.
pub fn flatten(value: &Value) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    if let Value::Object(map) = value {
        for (key, child) in map {
            flatten_into(&mut entries, vec![key.clone()], child);
        }
    }
    entries
}

fn flatten_into(entries: &mut Vec<FlatEntry>, path: Vec<String>, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                let mut child_path = path.clone();
                child_path.push(key.clone());
                flatten_into(entries, child_path, child);
            }
        }
        Value::Array(items) => {
            let key = encode(&path);
            for item in items {
                entries.push(FlatEntry::new(key.clone(), literal_text(item)));
            }
        }
        scalar => entries.push(FlatEntry::new(encode(&path), literal_text(scalar))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::FileHandle;
    use serde_json::json;

    #[test]
    fn test_repeated_keys_become_lists() {
        let payload = normalize(vec![
            ("user.name", "Ada"),
            ("user.tags", "x"),
            ("user.tags", "y"),
        ])
        .unwrap();
        assert_eq!(
            payload.to_json(),
            json!({ "user": { "name": "Ada", "tags": ["x", "y"] } })
        );
    }

    #[test]
    fn test_three_repeats_append() {
        let payload = normalize(vec![("c", "1"), ("c", "2"), ("c", "3")]).unwrap();
        assert_eq!(payload.to_json(), json!({ "c": ["1", "2", "3"] }));
    }

    #[test]
    fn test_single_value_stays_scalar() {
        let payload = normalize(vec![("colors", "red")]).unwrap();
        assert_eq!(payload.to_json(), json!({ "colors": "red" }));
    }

    #[test]
    fn test_empty_submission() {
        let payload = normalize(Vec::<FlatEntry>::new()).unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload.to_json(), json!({}));
    }

    #[test]
    fn test_order_is_first_submission_order() {
        let payload = normalize(vec![("b", "1"), ("a", "2"), ("b", "3")]).unwrap();
        let keys: Vec<&String> = payload.root().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_interleaved_repeats() {
        let payload = normalize(vec![("t", "1"), ("u", "x"), ("t", "2")]).unwrap();
        assert_eq!(payload.to_json(), json!({ "t": ["1", "2"], "u": "x" }));
    }

    #[test]
    fn test_leaf_then_container_conflict() {
        let err = normalize(vec![("a", "1"), ("a.b", "2")]).unwrap_err();
        assert_eq!(
            err,
            PayloadError::PathConflict {
                key: "a.b".into(),
                prefix: "a".into()
            }
        );
    }

    #[test]
    fn test_container_then_leaf_conflict() {
        let err = normalize(vec![("a.b", "2"), ("a", "1")]).unwrap_err();
        assert_eq!(
            err,
            PayloadError::PathConflict {
                key: "a".into(),
                prefix: "a".into()
            }
        );
    }

    #[test]
    fn test_deep_conflict_names_prefix() {
        let err = normalize(vec![("a.b", "1"), ("a.b.c", "2")]).unwrap_err();
        assert_eq!(
            err,
            PayloadError::PathConflict {
                key: "a.b.c".into(),
                prefix: "a.b".into()
            }
        );
    }

    #[test]
    fn test_file_values_kept_as_handles() {
        let file = FileHandle {
            file_name: "avatar.png".into(),
            content_type: Some("image/png".into()),
            size: None,
        };
        let payload = normalize(vec![
            FlatEntry::new("name", "Ada"),
            FlatEntry::new("avatar", file.clone()),
        ])
        .unwrap();
        assert_eq!(
            payload.get("avatar"),
            Some(&PayloadNode::Value(FlatValue::File(file)))
        );
    }

    #[test]
    fn test_flatten_then_normalize_round_trip() {
        let value = json!({
            "url": "https://example.net",
            "user": { "name": "Ada", "age": "36", "address": { "city": "London" } },
            "bio": ""
        });
        let payload = normalize(flatten(&value)).unwrap();
        assert_eq!(payload.to_json(), value);
    }

    #[test]
    fn test_flatten_arrays_repeat_keys() {
        let entries = flatten(&json!({ "tags": ["x", "y"], "n": 3, "none": null }));
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_text().unwrap()))
            .collect();
        assert_eq!(pairs, vec![("tags", "x"), ("tags", "y"), ("n", "3")]);
    }
}
