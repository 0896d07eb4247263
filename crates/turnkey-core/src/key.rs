//! Canonical grant-key encoding and decoding.
//!
//! A grant is stored as one opaque key inside its owner's group:
//!
//! ```text
//! admin                    unscoped
//! manager/Document         type-level
//! creator/Document:42      instance-level
//! ```
//!
//! The owner id is never part of the key; backends group keys by owner,
//! so enumerating one owner's grants never scans the whole store. Role
//! names are case-sensitive and stored verbatim, with no normalization.
//!
//! Decoding splits at the first [`KEY_SEPARATOR`] only. The separator is
//! rejected in role names and kind tags at encode time, so an instance id
//! containing it cannot shift the role boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::{Scope, validate_kind};

/// Separator between the role name and the target descriptor in a key.
pub const KEY_SEPARATOR: char = '/';

/// Validates a role name for use in a grant key.
fn validate_role(role: &str) -> Result<()> {
    if role.is_empty() {
        return Err(Error::invalid_role(role, "role name is empty"));
    }
    if role.contains(KEY_SEPARATOR) {
        return Err(Error::invalid_role(
            role,
            format!("contains the reserved key separator '{KEY_SEPARATOR}'"),
        ));
    }
    Ok(())
}

/// A canonically encoded grant key.
///
/// Produced by [`GrantKey::encode`]; the encoded form is the unit of
/// storage for every backend. Two grants are the same grant exactly when
/// their owner ids and encoded keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrantKey(String);

impl GrantKey {
    /// Encodes a role and scope into the canonical key form.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRole`] for empty role names or names containing
    /// the key separator, [`Error::InvalidKind`] for scopes carrying a
    /// malformed kind tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use turnkey_core::{GrantKey, Scope};
    ///
    /// let unscoped = GrantKey::encode("admin", &Scope::Global)?;
    /// assert_eq!(unscoped.as_str(), "admin");
    ///
    /// let scoped = GrantKey::encode("creator", &Scope::for_instance("Document", "42")?)?;
    /// assert_eq!(scoped.as_str(), "creator/Document:42");
    /// # Ok::<(), turnkey_core::Error>(())
    /// ```
    pub fn encode(role: &str, scope: &Scope) -> Result<Self> {
        validate_role(role)?;
        match scope {
            Scope::Global => {}
            Scope::Kind(kind) => validate_kind(kind)?,
            Scope::Instance { kind, id } => {
                validate_kind(kind)?;
                // Constructors reject empty ids; hand-built scopes are
                // checked again here so a blank id never reaches storage.
                if id.is_empty() {
                    return Err(Error::invalid_identity(format!("{kind}:")));
                }
            }
        }
        Ok(match scope.descriptor() {
            None => Self(role.to_string()),
            Some(descriptor) => Self(format!("{role}{KEY_SEPARATOR}{descriptor}")),
        })
    }

    /// Splits a raw encoded key into its role name and target descriptor.
    ///
    /// Splits at the first separator only, so descriptors containing the
    /// separator inside an instance id stay intact.
    pub fn decode(raw: &str) -> (&str, Option<&str>) {
        match raw.split_once(KEY_SEPARATOR) {
            Some((role, descriptor)) => (role, Some(descriptor)),
            None => (raw, None),
        }
    }

    /// Role name portion of a raw encoded key.
    pub fn role_of(raw: &str) -> &str {
        Self::decode(raw).0
    }

    /// Role name portion of this key.
    pub fn role(&self) -> &str {
        Self::role_of(&self.0)
    }

    /// Target descriptor portion of this key, `None` for unscoped keys.
    pub fn target(&self) -> Option<&str> {
        Self::decode(&self.0).1
    }

    /// Returns the encoded key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the encoded string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GrantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for GrantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================
