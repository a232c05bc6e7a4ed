//! In-memory key-value backend for testing

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory key-value backend for testing and development
///
/// Clones share the same underlying map, so two record stores built from
/// clones behave like two sessions over one browser profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LoanResult<()> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .clear();
        Ok(())
    }

    /// Number of stored keys
    pub fn len(&self) -> LoanResult<usize> {
        Ok(self.entries.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> LoanResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> LoanError {
    LoanError::Storage("memory storage lock poisoned".to_string())
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> LoanResult<Option<String>> {
        Ok(self.entries.read().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LoanResult<()> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LoanResult<bool> {
        Ok(self
            .entries
            .write()
            .map_err(|_| poisoned())?
            .remove(key)
            .is_some())
    }
}
