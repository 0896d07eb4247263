//! Document-style embedded backend.
//!
//! Mapping: one document per owner, keyed by owner id inside a single
//! sled tree. The document body is the owner's grant group serialized as
//! a JSON array. `insert` and `remove` are read-modify-write document
//! updates, which is the document family's native model; concurrent
//! writers to the same owner race at document granularity. Emptied
//! documents are deleted, so owner enumeration is plain key iteration.

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;

use crate::backend::GrantBackend;
use crate::error::{Error, Result};

const BACKEND: &str = "document";
const TREE: &str = "grant_documents";

/// Document-style backend over an embedded sled database.
#[derive(Debug, Clone)]
pub struct DocumentBackend {
    tree: sled::Tree,
}

impl DocumentBackend {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| Error::unavailable_with_source(BACKEND, "opening database", e))?;
        Self::with_db(&db)
    }

    /// Attaches to an already-open sled database.
    ///
    /// Lets one embedded database host grant documents next to other
    /// application trees.
    pub fn with_db(db: &sled::Db) -> Result<Self> {
        let tree = db
            .open_tree(TREE)
            .map_err(|e| Error::unavailable_with_source(BACKEND, "opening document tree", e))?;
        Ok(Self { tree })
    }

    fn read_document(&self, owner: &str) -> Result<BTreeSet<String>> {
        match self
            .tree
            .get(owner.as_bytes())
            .map_err(|e| Error::unavailable_with_source(BACKEND, "reading document", e))?
        {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| Error::unavailable_with_source(BACKEND, "decoding document", e)),
            None => Ok(BTreeSet::new()),
        }
    }

    fn write_document(&self, owner: &str, document: &BTreeSet<String>) -> Result<()> {
        if document.is_empty() {
            self.tree
                .remove(owner.as_bytes())
                .map_err(|e| Error::unavailable_with_source(BACKEND, "deleting document", e))?;
        } else {
            let bytes = serde_json::to_vec(document)
                .map_err(|e| Error::unavailable_with_source(BACKEND, "encoding document", e))?;
            self.tree
                .insert(owner.as_bytes(), bytes)
                .map_err(|e| Error::unavailable_with_source(BACKEND, "writing document", e))?;
        }
        self.tree
            .flush()
            .map_err(|e| Error::unavailable_with_source(BACKEND, "flushing database", e))?;
        Ok(())
    }
}

#[async_trait]
impl GrantBackend for DocumentBackend {
    async fn insert(&self, owner: &str, key: &str) -> Result<()> {
        let mut document = self.read_document(owner)?;
        if document.insert(key.to_string()) {
            self.write_document(owner, &document)?;
        }
        Ok(())
    }

    async fn exists(&self, owner: &str, key: &str) -> Result<bool> {
        Ok(self.read_document(owner)?.contains(key))
    }

    async fn remove(&self, owner: &str, key: &str) -> Result<()> {
        let mut document = self.read_document(owner)?;
        if document.remove(key) {
            self.write_document(owner, &document)?;
        }
        Ok(())
    }

    async fn members_of(&self, owner: &str) -> Result<BTreeSet<String>> {
        self.read_document(owner)
    }

    async fn all_owners(&self) -> Result<BTreeSet<String>> {
        let mut owners = BTreeSet::new();
        for entry in self.tree.iter() {
            let (key, _) = entry
                .map_err(|e| Error::unavailable_with_source(BACKEND, "listing documents", e))?;
            owners.insert(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(owners)
    }

    async fn wipe(&self) -> Result<()> {
        self.tree
            .clear()
            .map_err(|e| Error::unavailable_with_source(BACKEND, "clearing documents", e))?;
        self.tree
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
