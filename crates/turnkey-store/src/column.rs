//! Wide-column-style embedded backend.
//!
//! Mapping: one sled tree per owner is the row, and each grant key is a
//! column cell in that row (the cell value is empty; presence is the
//! fact). Cell writes are atomic per grant, so concurrent mutations of
//! different grants under one owner never clobber each other. Owner
//! enumeration lists the non-empty rows; `wipe` drops whole rows.
//!
//! Row trees are name-prefixed so they coexist with sled's internal
//! trees and with any other trees sharing the database.

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;

use crate::backend::GrantBackend;
use crate::error::{Error, Result};

const BACKEND: &str = "column";
const ROW_PREFIX: &str = "grant_row:";

/// Wide-column-style backend over an embedded sled database.
#[derive(Debug, Clone)]
pub struct ColumnBackend {
    db: sled::Db,
}

impl ColumnBackend {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| Error::unavailable_with_source(BACKEND, "opening database", e))?;
        Ok(Self::with_db(db))
    }

    /// Attaches to an already-open sled database.
    pub fn with_db(db: sled::Db) -> Self {
        Self { db }
    }

    fn row(&self, owner: &str) -> Result<sled::Tree> {
        self.db
            .open_tree(format!("{ROW_PREFIX}{owner}"))
            .map_err(|e| Error::unavailable_with_source(BACKEND, "opening row", e))
    }
}

#[async_trait]
impl GrantBackend for ColumnBackend {
    async fn insert(&self, owner: &str, key: &str) -> Result<()> {
        let row = self.row(owner)?;
        row.insert(key.as_bytes(), Vec::new())
            .map_err(|e| Error::unavailable_with_source(BACKEND, "writing cell", e))?;
        row.flush()
            .map_err(|e| Error::unavailable_with_source(BACKEND, "flushing database", e))?;
        Ok(())
    }

    async fn exists(&self, owner: &str, key: &str) -> Result<bool> {
        self.row(owner)?
            .contains_key(key.as_bytes())
            .map_err(|e| Error::unavailable_with_source(BACKEND, "reading cell", e))
    }

    async fn remove(&self, owner: &str, key: &str) -> Result<()> {
        let row = self.row(owner)?;
        row.remove(key.as_bytes())
            .map_err(|e| Error::unavailable_with_source(BACKEND, "deleting cell", e))?;
        row.flush()
            .map_err(|e| Error::unavailable_with_source(BACKEND, "flushing database", e))?;
        Ok(())
    }

    async fn members_of(&self, owner: &str) -> Result<BTreeSet<String>> {
        let mut members = BTreeSet::new();
        for entry in self.row(owner)?.iter() {
            let (key, _) = entry
                .map_err(|e| Error::unavailable_with_source(BACKEND, "scanning row", e))?;
            members.insert(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(members)
    }

    async fn all_owners(&self) -> Result<BTreeSet<String>> {
        let mut owners = BTreeSet::new();
        for name in self.db.tree_names() {
            let name = String::from_utf8_lossy(&name).into_owned();
            let Some(owner) = name.strip_prefix(ROW_PREFIX) else {
                continue;
            };
            // Emptied rows linger until wiped; only rows with at least
            // one cell count as owners.
            let row = self.row(owner)?;
            if !row.is_empty() {
                owners.insert(owner.to_string());
            }
        }
        Ok(owners)
    }

    async fn wipe(&self) -> Result<()> {
        for name in self.db.tree_names() {
            if name.starts_with(ROW_PREFIX.as_bytes()) {
                self.db
                    .drop_tree(&name)
                    .map_err(|e| Error::unavailable_with_source(BACKEND, "dropping row", e))?;
            }
        }
        self.db
            .flush()
            .map_err(|e| Error::unavailable_with_source(BACKEND, "flushing database", e))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}

// ============================================================================
// Tests
// ============================================================================
