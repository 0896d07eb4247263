//! Backend adapter contract and factory.
//!
//! This module defines the [`GrantBackend`] trait that every storage
//! variant must satisfy, the closed [`BackendKind`] set, and the factory
//! that constructs a backend from configuration.
//!
//! # Backends
//!
//! - `MemoryBackend`: in-process sets, the reference implementation
//! - `DocumentBackend`: one document per owner over sled (requires the
//!   `backend-sled` feature)
//! - `ColumnBackend`: one row per owner, one cell per grant, over sled
//!   (requires the `backend-sled` feature)
//! - `RedisBackend`: one Redis set per owner (requires the
//!   `backend-redis` feature)
//!
//! # Example
//!
//! ```rust,ignore
//! use turnkey_store::{create_backend, StoreConfig};
//!
//! let config = StoreConfig::document("/var/lib/turnkey");
//! let backend = create_backend(&config).await?;
//!
//! backend.insert("Member:42", "admin").await?;
//! assert!(backend.exists("Member:42", "admin").await?);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::memory::MemoryBackend;

#[cfg(feature = "backend-sled")]
use crate::column::ColumnBackend;
#[cfg(feature = "backend-sled")]
use crate::document::DocumentBackend;
#[cfg(feature = "backend-redis")]
use crate::redis::RedisBackend;

/// Minimal persistence capability set satisfied by every backend variant.
///
/// An implementation stores opaque encoded grant keys grouped by owner
/// id. It holds no role semantics: scoping, identity resolution, and key
/// validation all happen above the contract, so variants differ only in
/// how the six operations map onto their engine's native primitives.
///
/// Implementations must be safe for concurrent use from many tasks.
/// Ordering across concurrent mutations of the same grant is whatever
/// the engine natively provides; no extra coordination is layered on top.
#[async_trait]
pub trait GrantBackend: Send + Sync {
    /// Adds `key` to the owner's grant group. Idempotent.
    async fn insert(&self, owner: &str, key: &str) -> Result<()>;

    /// Returns whether `key` is present in the owner's grant group.
    async fn exists(&self, owner: &str, key: &str) -> Result<bool>;

    /// Removes `key` from the owner's grant group.
    ///
    /// Removing an absent key is a no-op, not an error.
    async fn remove(&self, owner: &str, key: &str) -> Result<()>;

    /// All encoded grant keys held by one owner.
    async fn members_of(&self, owner: &str) -> Result<BTreeSet<String>>;

    /// Every owner id currently holding at least one grant.
    async fn all_owners(&self) -> Result<BTreeSet<String>>;

    /// Destroys every grant across all owners.
    async fn wipe(&self) -> Result<()>;

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;
}

/// The closed set of backend kinds.
///
/// Selection is explicit: an unknown kind is an error, never a silent
/// fallback to a different variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process set-based reference backend.
    Memory,
    /// Embedded document-style backend (sled).
    Document,
    /// Embedded wide-column-style backend (sled).
    Column,
    /// Set-based backend over a Redis server.
    Redis,
}

impl BackendKind {
    /// The kind name as accepted in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Document => "document",
            BackendKind::Column => "column",
            BackendKind::Redis => "redis",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(BackendKind::Memory),
            "document" => Ok(BackendKind::Document),
            "column" => Ok(BackendKind::Column),
            "redis" => Ok(BackendKind::Redis),
            _ => Err(Error::unsupported(
                s,
                "unknown backend kind (supported: memory, document, column, redis)",
            )),
        }
    }
}

/// Creates a backend from configuration.
///
/// The kind named by `config.backend` is constructed with its
/// engine-specific parameters; kinds compiled out by feature flags fail
/// with [`Error::UnsupportedBackend`] rather than falling back to a
/// different variant.
///
/// # Errors
///
/// [`Error::UnsupportedBackend`] for unknown or compiled-out kinds,
/// [`Error::Config`] when a required parameter is missing, and
/// [`Error::Unavailable`] when the engine cannot be opened or reached.
pub async fn create_backend(config: &StoreConfig) -> Result<Arc<dyn GrantBackend>> {
    match config.backend.parse::<BackendKind>()? {
        BackendKind::Memory => Ok(Arc::new(MemoryBackend::new())),

        #[cfg(feature = "backend-sled")]
        BackendKind::Document => {
            let path = require_path(config, BackendKind::Document)?;
            Ok(Arc::new(DocumentBackend::open(path)?))
        }

        #[cfg(feature = "backend-sled")]
        BackendKind::Column => {
            let path = require_path(config, BackendKind::Column)?;
            Ok(Arc::new(ColumnBackend::open(path)?))
        }

        #[cfg(feature = "backend-redis")]
        BackendKind::Redis => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| Error::config("redis backend requires a connection 'url'"))?;
            let backend = RedisBackend::connect(url, config.namespace.as_str()).await?;
            Ok(Arc::new(backend))
        }

        #[cfg(not(feature = "backend-sled"))]
        kind @ (BackendKind::Document | BackendKind::Column) => Err(Error::unsupported(
            kind.as_str(),
            "not compiled in; enable the 'backend-sled' feature",
        )),

        #[cfg(not(feature = "backend-redis"))]
        kind @ BackendKind::Redis => Err(Error::unsupported(
            kind.as_str(),
            "not compiled in; enable the 'backend-redis' feature",
        )),
    }
}

#[cfg(feature = "backend-sled")]
fn require_path(config: &StoreConfig, kind: BackendKind) -> Result<&str> {
    config
        .path
        .as_deref()
        .ok_or_else(|| Error::config(format!("{kind} backend requires a data 'path'")))
}

// ============================================================================
// Tests
// ============================================================================
