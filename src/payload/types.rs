//! Flat submission and normalized payload types

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::path::decode;

/// Metadata of an uploaded file; bytes are never retained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: Option<u64>,
}

/// Value half of a flat entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatValue {
    Text(String),
    File(FileHandle),
}

impl FlatValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlatValue::Text(text) => Some(text),
            FlatValue::File(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FlatValue::Text(text) => Value::String(text.clone()),
            FlatValue::File(file) => json!({
                "fileName": file.file_name,
                "contentType": file.content_type,
                "size": file.size,
            }),
        }
    }
}

impl From<String> for FlatValue {
    fn from(text: String) -> Self {
        FlatValue::Text(text)
    }
}

impl From<&str> for FlatValue {
    fn from(text: &str) -> Self {
        FlatValue::Text(text.to_string())
    }
}

impl From<FileHandle> for FlatValue {
    fn from(file: FileHandle) -> Self {
        FlatValue::File(file)
    }
}

/// One `(key, value)` pair of a raw submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub key: String,
    pub value: FlatValue,
}

impl FlatEntry {
    pub fn new(key: impl Into<String>, value: impl Into<FlatValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<FlatValue>> From<(K, V)> for FlatEntry {
    fn from((key, value): (K, V)) -> Self {
        FlatEntry::new(key, value)
    }
}

/// Node of the reconstructed value tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadNode {
    /// Key submitted once
    Value(FlatValue),
    /// Key submitted more than once, in submission order
    List(Vec<FlatValue>),
    /// Group of dotted keys sharing a prefix
    Map(IndexMap<String, PayloadNode>),
}

impl PayloadNode {
    pub fn to_json(&self) -> Value {
        match self {
            PayloadNode::Value(value) => value.to_json(),
            PayloadNode::List(values) => Value::Array(values.iter().map(FlatValue::to_json).collect()),
            PayloadNode::Map(map) => map_to_json(map),
        }
    }
}

fn map_to_json(map: &IndexMap<String, PayloadNode>) -> Value {
    let mut object = Map::with_capacity(map.len());
    for (key, node) in map {
        object.insert(key.clone(), node.to_json());
    }
    Value::Object(object)
}

/// Nested value tree rebuilt from one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPayload {
    root: IndexMap<String, PayloadNode>,
}

impl NormalizedPayload {
    pub(crate) fn from_root(root: IndexMap<String, PayloadNode>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &IndexMap<String, PayloadNode> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Looks up a node by flat key
    pub fn get(&self, key: &str) -> Option<&PayloadNode> {
        let segments = decode(key);
        let (first, rest) = segments.split_first()?;
        let mut node = self.root.get(first)?;
        for segment in rest {
            node = match node {
                PayloadNode::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// JSON view; object keys keep first-submission order
    pub fn to_json(&self) -> Value {
        map_to_json(&self.root)
    }
}
