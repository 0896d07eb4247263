//! Turnkey Core — identity capabilities, resolved identifiers, and the
//! grant-key codec.
//!
//! This crate provides the foundational vocabulary used across all
//! Turnkey crates. It has no storage dependencies (dependency level 0);
//! the backend adapters and the store facade live in `turnkey-store`.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`identity`]: Identity capabilities and resolved identifiers
//! - [`key`]: Canonical grant-key encoding and decoding

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod key;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use identity::{Identifiable, Kinded, OwnerRef, Scope, ID_SEPARATOR};
pub use key::{GrantKey, KEY_SEPARATOR};
