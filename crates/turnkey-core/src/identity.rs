//! Identity capabilities and resolved identifiers.
//!
//! Anything that holds or scopes a grant must opt into identification:
//! [`Kinded`] supplies a compile-time kind tag, and [`Identifiable`] adds
//! a runtime instance id. Resolution turns those capabilities into the
//! stable string identifiers the key space is organized around:
//! [`OwnerRef`] (`Kind:id`) groups an owner's grants, and [`Scope`] names
//! the optional target a grant is narrowed to.
//!
//! Resolution is fail-fast: a value whose identity is `None` or empty is
//! rejected with [`Error::UnidentifiableInstance`] before any backend is
//! consulted, so no grant can ever be written under a blank identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::key::KEY_SEPARATOR;

/// Separator between a kind tag and an instance id inside an identity.
pub const ID_SEPARATOR: char = ':';

// ============================================================================
// Capabilities
// ============================================================================

/// Compile-time kind tag for anything addressable in the grant key space.
///
/// The tag must be stable across releases and unique per addressable type;
/// it becomes part of every stored identifier, so changing it orphans
/// existing grants.
pub trait Kinded {
    /// Stable kind tag for this type.
    ///
    /// Must be non-empty and must not contain [`KEY_SEPARATOR`] or
    /// [`ID_SEPARATOR`]; violations surface as errors on first use.
    const KIND: &'static str;
}

/// Runtime identity accessor for concrete instances.
///
/// `identity` returns `None` when the value has no durable id yet, for
/// example an entity that has not been persisted. Resolution then fails
/// with [`Error::UnidentifiableInstance`] instead of writing a grant
/// under a blank id.
///
/// # Examples
///
/// ```
/// use turnkey_core::{Identifiable, Kinded, OwnerRef};
///
/// struct Member {
///     id: Option<u64>,
/// }
///
/// impl Kinded for Member {
///     const KIND: &'static str = "Member";
/// }
///
/// impl Identifiable for Member {
///     fn identity(&self) -> Option<String> {
///         self.id.map(|id| id.to_string())
///     }
/// }
///
/// let owner = OwnerRef::resolve(&Member { id: Some(42) })?;
/// assert_eq!(owner.as_str(), "Member:42");
///
/// assert!(OwnerRef::resolve(&Member { id: None }).is_err());
/// # Ok::<(), turnkey_core::Error>(())
/// ```
pub trait Identifiable: Kinded {
    /// Durable instance id, if the value has one.
    fn identity(&self) -> Option<String>;
}

/// Validates a kind tag for use inside identifiers and grant keys.
pub(crate) fn validate_kind(kind: &str) -> Result<()> {
    if kind.is_empty() {
        return Err(Error::invalid_kind(kind, "kind tag is empty"));
    }
    if kind.contains(KEY_SEPARATOR) {
        return Err(Error::invalid_kind(
            kind,
            format!("contains the reserved key separator '{KEY_SEPARATOR}'"),
        ));
    }
    if kind.contains(ID_SEPARATOR) {
        return Err(Error::invalid_kind(
            kind,
            format!("contains the reserved id separator '{ID_SEPARATOR}'"),
        ));
    }
    Ok(())
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty())
}

// ============================================================================
// OwnerRef
// ============================================================================

/// Resolved identity of a grant owner, rendered as `Kind:id`.
///
/// Backends use this string as the grouping key for the owner's grants;
/// it is never decomposed again on the read path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerRef(String);

impl OwnerRef {
    /// Resolves a typed owner into its stable identifier.
    ///
    /// # Errors
    ///
    /// [`Error::UnidentifiableInstance`] when the owner's identity is
    /// `None` or empty, [`Error::InvalidKind`] when its kind tag contains
    /// a reserved separator.
    pub fn resolve<O: Identifiable>(owner: &O) -> Result<Self> {
        validate_kind(O::KIND)?;
        let id = non_empty(owner.identity()).ok_or_else(|| Error::unidentifiable(O::KIND))?;
        Ok(Self(format!("{}{ID_SEPARATOR}{id}", O::KIND)))
    }

    /// Builds an owner reference from a raw kind tag and instance id.
    ///
    /// Boundary callers (CLI arguments, wire payloads) use this when no
    /// typed value is in hand. The id may contain any character except
    /// that it must be non-empty.
    pub fn from_parts(kind: &str, id: &str) -> Result<Self> {
        validate_kind(kind)?;
        if id.is_empty() {
            return Err(Error::invalid_identity(format!("{kind}{ID_SEPARATOR}")));
        }
        Ok(Self(format!("{kind}{ID_SEPARATOR}{id}")))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind tag portion of the identifier.
    pub fn kind(&self) -> &str {
        self.0
            .split_once(ID_SEPARATOR)
            .map(|(kind, _)| kind)
            .unwrap_or(&self.0)
    }

    /// Instance id portion of the identifier.
    pub fn id(&self) -> &str {
        self.0
            .split_once(ID_SEPARATOR)
            .map(|(_, id)| id)
            .unwrap_or("")
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OwnerRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for OwnerRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(ID_SEPARATOR) {
            Some((kind, id)) => Self::from_parts(kind, id),
            None => Err(Error::invalid_identity(s)),
        }
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Resolved target scope of a grant.
///
/// The three forms occupy distinct regions of the key space and never
/// collide: a type-level grant does not satisfy an instance-level check,
/// and neither satisfies an unscoped one. There is no wildcard matching
/// and no fallback from one form to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Unscoped: the role applies globally for the owner.
    #[default]
    Global,
    /// Scoped to every instance of one kind.
    Kind(String),
    /// Scoped to a single identified instance.
    Instance {
        /// Kind tag of the target.
        kind: String,
        /// Durable instance id of the target.
        id: String,
    },
}

impl Scope {
    /// Type-level scope covering every instance of `T`.
    pub fn kind<T: Kinded>() -> Self {
        Scope::Kind(T::KIND.to_string())
    }

    /// Instance-level scope for one identified value.
    ///
    /// # Errors
    ///
    /// [`Error::UnidentifiableInstance`] when the target's identity is
    /// `None` or empty.
    pub fn instance<T: Identifiable>(target: &T) -> Result<Self> {
        let id = non_empty(target.identity()).ok_or_else(|| Error::unidentifiable(T::KIND))?;
        Ok(Scope::Instance {
            kind: T::KIND.to_string(),
            id,
        })
    }

    /// Type-level scope from a raw kind tag, validated.
    pub fn for_kind(kind: &str) -> Result<Self> {
        validate_kind(kind)?;
        Ok(Scope::Kind(kind.to_string()))
    }

    /// Instance-level scope from raw parts, validated.
    pub fn for_instance(kind: &str, id: &str) -> Result<Self> {
        validate_kind(kind)?;
        if id.is_empty() {
            return Err(Error::invalid_identity(format!("{kind}{ID_SEPARATOR}")));
        }
        Ok(Scope::Instance {
            kind: kind.to_string(),
            id: id.to_string(),
        })
    }

    /// Target descriptor as embedded in grant keys, `None` for `Global`.
    pub fn descriptor(&self) -> Option<String> {
        match self {
            Scope::Global => None,
            Scope::Kind(kind) => Some(kind.clone()),
            Scope::Instance { kind, id } => Some(format!("{kind}{ID_SEPARATOR}{id}")),
        }
    }

    /// Returns whether this is the unscoped form.
    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("*"),
            Scope::Kind(kind) => f.write_str(kind),
            Scope::Instance { kind, id } => write!(f, "{kind}{ID_SEPARATOR}{id}"),
        }
    }
}

impl FromStr for Scope {
    type Err = Error;

    /// Parses `Kind` as a type-level scope and `Kind:id` as an
    /// instance-level scope. The unscoped form is not parsed; it is the
    /// absence of a target.
    ///
    /// # Examples
    ///
    /// ```
    /// use turnkey_core::Scope;
    ///
    /// let type_level: Scope = "Document".parse()?;
    /// assert_eq!(type_level, Scope::Kind("Document".to_string()));
    ///
    /// let instance: Scope = "Document:42".parse()?;
    /// assert_eq!(instance.descriptor().as_deref(), Some("Document:42"));
    /// # Ok::<(), turnkey_core::Error>(())
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(ID_SEPARATOR) {
            Some((kind, id)) => Self::for_instance(kind, id),
            None => Self::for_kind(s),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
