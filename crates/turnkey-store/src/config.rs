//! Store configuration.
//!
//! [`StoreConfig`] selects the backend variant and carries the
//! engine-specific parameters the factory needs. It deserializes from
//! TOML or JSON with per-field defaults, so a minimal config is just
//! `backend = "memory"`.

use serde::{Deserialize, Serialize};

/// Grant store configuration.
///
/// Used by [`create_backend`](crate::backend::create_backend) to select
/// and construct the backend variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend kind: "memory", "document", "column" or "redis".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Data directory for the embedded sled variants.
    pub path: Option<String>,

    /// Connection URL for the redis variant.
    pub url: Option<String>,

    /// Key namespace prefix for the redis variant.
    ///
    /// Keys are stored as `<namespace>:<owner>`, and `clear` deletes only
    /// keys under this namespace. The namespace is used verbatim inside a
    /// match pattern, so avoid glob characters.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_namespace() -> String {
    "turnkey".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
            url: None,
            namespace: default_namespace(),
        }
    }
}

impl StoreConfig {
    /// Config for the in-memory backend.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Config for the document backend rooted at `path`.
    pub fn document<S: Into<String>>(path: S) -> Self {
        Self {
            backend: "document".to_string(),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Config for the wide-column backend rooted at `path`.
    pub fn column<S: Into<String>>(path: S) -> Self {
        Self {
            backend: "column".to_string(),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Config for the redis backend at `url`.
    pub fn redis<S: Into<String>>(url: S) -> Self {
        Self {
            backend: "redis".to_string(),
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
