//! In-memory set-based backend.
//!
//! The reference implementation of the adapter contract: grant groups
//! live in native in-process sets, one per owner, exactly mirroring how
//! the Redis variant maps onto SADD / SISMEMBER / SREM / SMEMBERS.
//! Nothing is persisted; intended for tests, examples, and ephemeral
//! stores.

use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::backend::GrantBackend;
use crate::error::{Error, Result};

type Groups = HashMap<String, BTreeSet<String>>;

/// Set-based backend over process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    groups: RwLock<Groups>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock means a writer panicked mid-update; the table can
    // no longer be trusted, so every call reports the engine as gone.
    fn read_groups(&self) -> Result<RwLockReadGuard<'_, Groups>> {
        self.groups
            .read()
            .map_err(|_| Error::unavailable("memory", "grant table lock poisoned"))
    }

    fn write_groups(&self) -> Result<RwLockWriteGuard<'_, Groups>> {
        self.groups
            .write()
            .map_err(|_| Error::unavailable("memory", "grant table lock poisoned"))
    }
}

#[async_trait]
impl GrantBackend for MemoryBackend {
    async fn insert(&self, owner: &str, key: &str) -> Result<()> {
        let mut groups = self.write_groups()?;
        groups
            .entry(owner.to_string())
            .or_default()
            .insert(key.to_string());
        Ok(())
    }

    async fn exists(&self, owner: &str, key: &str) -> Result<bool> {
        let groups = self.read_groups()?;
        Ok(groups.get(owner).is_some_and(|group| group.contains(key)))
    }

    async fn remove(&self, owner: &str, key: &str) -> Result<()> {
        let mut groups = self.write_groups()?;
        if let Some(group) = groups.get_mut(owner) {
            group.remove(key);
            // Dropping emptied groups keeps all_owners equal to the set
            // of owners with at least one grant.
            if group.is_empty() {
                groups.remove(owner);
            }
        }
        Ok(())
    }

    async fn members_of(&self, owner: &str) -> Result<BTreeSet<String>> {
        let groups = self.read_groups()?;
        Ok(groups.get(owner).cloned().unwrap_or_default())
    }

    async fn all_owners(&self) -> Result<BTreeSet<String>> {
        let groups = self.read_groups()?;
        Ok(groups.keys().cloned().collect())
    }

    async fn wipe(&self) -> Result<()> {
        let mut groups = self.write_groups()?;
        groups.clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// ============================================================================
// Tests
// ============================================================================
