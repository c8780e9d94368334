//! In-memory model store for testing and ephemeral use.
//!
//! [`InMemoryModelStore`] keeps all entries in a `HashMap` protected by a
//! `RwLock`. Nothing is persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use modelref_digest::Digest;
use tracing::debug;

use crate::error::{NameError, Result};
use crate::name::Name;
use crate::traits::ModelStore;

/// An in-memory implementation of [`ModelStore`].
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    entries: RwLock<HashMap<String, Digest>>,
}

impl InMemoryModelStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The storage key for `name`, or the reason it cannot be one.
fn key(name: &Name) -> Result<String> {
    name.validate()?;
    if !name.model.is_present() {
        return Err(NameError::NoModel {
            name: name.to_string(),
        });
    }
    Ok(name.display_longest())
}

fn poisoned<E: std::fmt::Display>(e: E) -> NameError {
    NameError::LockPoisoned(e.to_string())
}

impl ModelStore for InMemoryModelStore {
    fn resolve(&self, name: &Name) -> Result<Option<Digest>> {
        let key = key(name)?;
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(&key).copied())
    }

    fn put(&self, name: &Name, digest: Digest) -> Result<()> {
        let key = key(name)?;
        if !digest.is_valid() {
            return Err(NameError::InvalidDigest(digest.to_string()));
        }

        let mut entries = self.entries.write().map_err(poisoned)?;
        debug!(name = %key, digest = %digest.short_hex(), "stored model");
        entries.insert(key, digest);
        Ok(())
    }

    fn remove(&self, name: &Name) -> Result<bool> {
        let key = key(name)?;
        let mut entries = self.entries.write().map_err(poisoned)?;
        let removed = entries.remove(&key).is_some();
        if removed {
            debug!(name = %key, "removed model");
        }
        Ok(removed)
    }

    fn list(&self, prefix: &str) -> Result<Vec<(String, Digest)>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut result: Vec<(String, Digest)> = entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        result.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(result)
    }
}
