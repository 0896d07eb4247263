//! Grant storage for Turnkey.
//!
//! This crate provides the backend adapter contract, the concrete
//! backend variants, and the store facade that applications talk to.
//!
//! # Features
//!
//! - `backend-sled` (default): the embedded `document` and `column`
//!   variants
//! - `backend-redis`: the `redis` variant
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      turnkey-store                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Store (facade: set / check / delete / roles / clear)       │
//! │  Grantee (owner-bound view)                                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  GrantBackend trait (six-operation adapter contract)        │
//! │  ├── MemoryBackend (in-process sets, reference)             │
//! │  ├── DocumentBackend (one document per owner, sled)         │
//! │  ├── ColumnBackend (one row per owner, sled)                │
//! │  └── RedisBackend (one set per owner, Redis)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  StoreConfig (kind selection + engine parameters)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identity resolution and key encoding live in `turnkey-core`; the
//! backends below the contract never see roles or scopes, only opaque
//! keys grouped by owner.
//!
//! # Example
//!
//! ```rust,ignore
//! use turnkey_core::Scope;
//! use turnkey_store::{Store, StoreConfig};
//!
//! let store = Store::open(&StoreConfig::document("/var/lib/turnkey")).await?;
//!
//! store.set("admin", &member, Scope::Global).await?;
//! assert!(store.check("admin", &member, Scope::Global).await?);
//! ```

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

// Core modules (always available)
pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod store;

// Feature-gated engine modules
#[cfg(feature = "backend-sled")]
pub mod column;

#[cfg(feature = "backend-sled")]
pub mod document;

#[cfg(feature = "backend-redis")]
pub mod redis;

// Re-exports
pub use backend::{BackendKind, GrantBackend, create_backend};
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use memory::MemoryBackend;
pub use store::{Grantee, Store};

#[cfg(feature = "backend-sled")]
pub use column::ColumnBackend;

#[cfg(feature = "backend-sled")]
pub use document::DocumentBackend;

#[cfg(feature = "backend-redis")]
pub use self::redis::RedisBackend;
