//! Error types for Turnkey core.

/// Errors raised while resolving identities or encoding grant keys.
///
/// Everything here fails before a storage backend is ever consulted.
/// All variants are marked with `#[non_exhaustive]` to allow adding
/// new failure modes without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An owner or target value exposed no usable identity.
    #[error("unidentifiable {kind}: instance has no identity")]
    UnidentifiableInstance {
        /// Kind tag of the value that could not be identified.
        kind: String,
    },

    /// A role name that cannot take part in a grant key.
    #[error("invalid role name {role:?}: {reason}")]
    InvalidRole {
        /// The offending role name.
        role: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A kind tag that cannot take part in an identity or grant key.
    #[error("invalid kind tag {kind:?}: {reason}")]
    InvalidKind {
        /// The offending kind tag.
        kind: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A raw identity string that does not parse as `Kind:id`.
    #[error("invalid identity {value:?}: expected non-empty `Kind:id`")]
    InvalidIdentity {
        /// The raw string that failed to parse.
        value: String,
    },
}

/// Convenience `Result` type alias for Turnkey core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new unidentifiable-instance error.
    pub fn unidentifiable<S: Into<String>>(kind: S) -> Self {
        Error::UnidentifiableInstance { kind: kind.into() }
    }

    /// Creates a new invalid-role error.
    pub fn invalid_role<R, M>(role: R, reason: M) -> Self
    where
        R: Into<String>,
        M: Into<String>,
    {
        Error::InvalidRole {
            role: role.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-kind error.
    pub fn invalid_kind<K, M>(kind: K, reason: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::InvalidKind {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-identity error.
    pub fn invalid_identity<S: Into<String>>(value: S) -> Self {
        Error::InvalidIdentity {
            value: value.into(),
        }
    }
}
