//! Schema loader for named form schemas
//!
//! - One schema per `<name>.json` file in the schema directory
//! - The file stem is the form name
//! - Every file must parse as an object-rooted schema; a bad file aborts loading

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::parser::parse_root;
use super::types::ObjectSchema;

/// A parsed schema together with its source document
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Form name (file stem for loaded files)
    pub name: String,
    /// Schema as written
    pub source: Value,
    /// Typed root object
    pub root: ObjectSchema,
}

impl SchemaDocument {
    /// Parses a schema value under the given name.
    pub fn from_value(name: impl Into<String>, source: Value) -> SchemaResult<Self> {
        let root = parse_root(&source)?;
        Ok(Self {
            name: name.into(),
            source,
            root,
        })
    }
}

/// Reads schema files from a directory into an in-memory registry.
pub struct SchemaLoader {
    schema_dir: PathBuf,
    /// Sorted by name so listings are deterministic
    schemas: BTreeMap<String, SchemaDocument>,
}

impl SchemaLoader {
    /// Creates a loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let dir = self.schema_dir.display().to_string();
        if !self.schema_dir.is_dir() {
            return Err(SchemaError::malformed(dir, "schema directory does not exist"));
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(&dir, format!("Failed to read schema directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(&dir, format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            let document = Self::load_file(&path)?;
            self.register(document)?;
        }

        Ok(())
    }

    /// Reads and parses a single schema file.
    ///
    /// The document is named after the file stem.
    pub fn load_file(path: &Path) -> SchemaResult<SchemaDocument> {
        let source = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::malformed(&source, format!("Failed to read file: {}", e)))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed(&source, format!("Invalid JSON: {}", e)))?;

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("form")
            .to_string();

        SchemaDocument::from_value(name, value)
    }

    /// Registers a parsed schema. Names are unique.
    pub fn register(&mut self, document: SchemaDocument) -> SchemaResult<()> {
        if self.schemas.contains_key(&document.name) {
            return Err(SchemaError::duplicate(&document.name));
        }
        self.schemas.insert(document.name.clone(), document);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&SchemaDocument> {
        self.schemas.get(name)
    }

    /// Returns loaded schema names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Returns all loaded schemas.
    pub fn documents(&self) -> impl Iterator<Item = &SchemaDocument> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
