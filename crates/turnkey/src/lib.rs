//! Turnkey grant store — umbrella crate.
//!
//! This crate re-exports the Turnkey components for convenience. Feature
//! flags forward to the storage crate's backend selection.

#![doc = include_str!("../README.md")]

pub use turnkey_core as core;
pub use turnkey_store as store;
