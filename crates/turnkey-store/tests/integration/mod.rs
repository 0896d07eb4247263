//! Per-backend integration modules.

#[cfg(feature = "backend-sled")]
pub mod column;
#[cfg(feature = "backend-sled")]
pub mod document;
#[cfg(feature = "backend-redis")]
pub mod redis;
