//! Compiled schema cache
//!
//! Keyed by the schema's JSON text, so the same document compiles once no
//! matter where it came from. The cache is owned by its caller.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::schema::SchemaResult;

use super::compiled::CompiledSchema;

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub schema: Arc<CompiledSchema>,
    /// `false` when this lookup compiled the schema
    pub hit: bool,
}

/// Thread-safe map from schema text to compiled schema
#[derive(Debug, Default)]
pub struct ValidatorCache {
    compiled: RwLock<HashMap<String, Arc<CompiledSchema>>>,
}

impl ValidatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled form of `schema`, compiling it on first use.
    ///
    /// A schema that fails to compile is not cached.
    pub fn get_or_compile(&self, schema: &Value) -> SchemaResult<CacheLookup> {
        let key = schema.to_string();

        if let Some(found) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(CacheLookup {
                schema: Arc::clone(found),
                hit: true,
            });
        }

        let compiled = Arc::new(CompiledSchema::compile(schema)?);
        let mut entries = self
            .compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another thread may have compiled it meanwhile; keep the first
        let schema = Arc::clone(entries.entry(key).or_insert(compiled));
        Ok(CacheLookup { schema, hit: false })
    }

    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    fn schema() -> Value {
        json!({ "type": "object", "properties": { "a": { "type": "integer" } } })
    }

    #[test]
    fn test_compiles_once() {
        let cache = ValidatorCache::new();
        let first = cache.get_or_compile(&schema()).unwrap();
        let second = cache.get_or_compile(&schema()).unwrap();
        assert!(!first.hit);
        assert!(second.hit);
        assert!(Arc::ptr_eq(&first.schema, &second.schema));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_compile_not_cached() {
        let cache = ValidatorCache::new();
        assert!(cache.get_or_compile(&json!({ "type": "string" })).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(ValidatorCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let lookup = cache.get_or_compile(&schema()).unwrap();
                    lookup.schema.validate(&json!({ "a": i.to_string() })).valid
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(cache.len(), 1);
    }
}
