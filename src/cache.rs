// File: src/cache.rs
//! Generated-result cache: full records by verb id, raw paradigms by
//! (root, pattern). A pure accelerator; every miss and every backend failure
//! comes back as `None`.

use crate::core::types::{ConjugationForms, VerbConjugation};
use crate::error::CacheError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Byte-oriented key/value backend.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;

    /// Returns whether the key was present.
    fn remove(&self, key: &str) -> Result<bool, CacheError>;
}

/// Process-local store. Key-level writes, last writer wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: HashMap<String, Vec<u8>>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Copy of every entry, for persistence.
    pub fn snapshot(&self) -> Result<HashMap<String, Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> CacheError {
    CacheError::Backend("store lock poisoned".to_string())
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        Ok(entries.remove(key).is_some())
    }
}

fn record_key(verb_id: &str) -> String {
    format!("verb:{verb_id}")
}

fn generated_key(root: &str, pattern_id: &str) -> String {
    format!("generated:{root}:{pattern_id}")
}

/// Typed cache over a [`CacheStore`].
pub struct ConjugationCache<S: CacheStore = MemoryStore> {
    store: S,
}

impl ConjugationCache<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: CacheStore> ConjugationCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache_conjugation(&self, record: &VerbConjugation) {
        self.write(&record_key(&record.verb_id), record);
    }

    pub fn get_conjugation(&self, verb_id: &str) -> Option<VerbConjugation> {
        self.read(&record_key(verb_id))
    }

    pub fn has_conjugation(&self, verb_id: &str) -> bool {
        match self.store.get(&record_key(verb_id)) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(verb_id, error = %e, "cache backend failed on lookup");
                false
            }
        }
    }

    pub fn invalidate_conjugation(&self, verb_id: &str) {
        if let Err(e) = self.store.remove(&record_key(verb_id)) {
            warn!(verb_id, error = %e, "cache backend failed on invalidate");
        }
    }

    /// Batch put; one failed write does not stop the rest.
    pub fn cache_multiple_conjugations(&self, records: &[VerbConjugation]) {
        for record in records {
            self.cache_conjugation(record);
        }
        debug!(count = records.len(), "cached record batch");
    }

    pub fn cache_generated_conjugations(
        &self,
        root: &str,
        pattern_id: &str,
        forms: &ConjugationForms,
    ) {
        self.write(&generated_key(root, pattern_id), forms);
    }

    pub fn get_generated_conjugations(
        &self,
        root: &str,
        pattern_id: &str,
    ) -> Option<ConjugationForms> {
        self.read(&generated_key(root, pattern_id))
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        let result = bincode::serialize(value)
            .map_err(CacheError::from)
            .and_then(|bytes| self.store.put(key, bytes));
        if let Err(e) = result {
            warn!(key, error = %e, "cache write skipped");
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "cache backend failed, treating as miss");
                return None;
            }
        };
        match bincode::deserialize(&bytes) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "undecodable cache entry, treating as miss");
                None
            }
        }
    }
}
