//! Save/load persistence
//!
//! Features:
//! - Key-value backend abstraction (LocalStorage on web, in-memory elsewhere)
//! - JSON records with per-field defaults, so older or partial saves merge
//!   into the current layout
//! - Corruption detection: undecodable saves surface as `StoreError::Codec`
//!   and callers fall back to defaults

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::progression::ProgressionRecord;

/// Storage key for the player's progression record
pub const PROGRESSION_KEY: &str = "playerData";

/// Persistence failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored data is corrupt: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("nothing stored under '{0}'")]
    Missing(String),
}

/// Raw string key-value storage
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Where progression records live
pub trait ProgressionStore {
    fn get(&self) -> Result<ProgressionRecord, StoreError>;
    fn set(&mut self, record: &ProgressionRecord) -> Result<(), StoreError>;
}

/// Read and decode a JSON value
pub fn load_json<T: DeserializeOwned, K: KeyValueStore + ?Sized>(
    backend: &K,
    key: &str,
) -> Result<T, StoreError> {
    let json = backend
        .read(key)?
        .ok_or_else(|| StoreError::Missing(key.to_string()))?;
    Ok(serde_json::from_str(&json)?)
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize, K: KeyValueStore + ?Sized>(
    backend: &mut K,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    backend.write(key, &json)
}

/// Progression store over any key-value backend
#[derive(Debug)]
pub struct JsonStore<K: KeyValueStore> {
    backend: K,
    key: String,
}

impl<K: KeyValueStore> JsonStore<K> {
    pub fn new(backend: K) -> Self {
        Self::with_key(backend, PROGRESSION_KEY)
    }

    pub fn with_key(backend: K, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
        }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }
}

impl<K: KeyValueStore> ProgressionStore for JsonStore<K> {
    fn get(&self) -> Result<ProgressionRecord, StoreError> {
        load_json(&self.backend, &self.key)
    }

    fn set(&mut self, record: &ProgressionRecord) -> Result<(), StoreError> {
        save_json(&mut self.backend, &self.key, record)
    }
}

/// In-memory backend (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key (e.g. a save from an older version)
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
