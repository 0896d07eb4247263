//! The grant store facade.
//!
//! [`Store`] is an explicit handle over one backend adapter. It resolves
//! identities, encodes grant keys, and delegates the six capability
//! operations; it holds no other state. Construct one where the
//! application decides, clone it freely, drop it to tear down. Every
//! operation is a stateless round-trip, so the handle is safe to share
//! across tasks.
//!
//! [`Grantee`] is an owner-bound view for call sites that address one
//! owner repeatedly: the owner is resolved once, then each call skips
//! re-resolution.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use turnkey_core::{GrantKey, Identifiable, OwnerRef, Scope};

use crate::backend::{GrantBackend, create_backend};
use crate::config::StoreConfig;
use crate::error::Result;

// ============================================================================
// Store
// ============================================================================

/// Handle to a grant store bound to one backend variant.
///
/// Cloning is cheap; clones share the underlying backend.
///
/// # Example
///
/// ```rust,ignore
/// use turnkey_core::Scope;
/// use turnkey_store::{Store, StoreConfig};
///
/// let store = Store::open(&StoreConfig::memory()).await?;
///
/// store.set("admin", &member, Scope::Global).await?;
/// assert!(store.check("admin", &member, Scope::Global).await?);
///
/// store.delete("admin", &member, Scope::Global).await?;
/// assert!(!store.check("admin", &member, Scope::Global).await?);
/// ```
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn GrantBackend>,
}

impl Store {
    /// Opens a store with the backend selected by `config`.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let backend = create_backend(config).await?;
        log::info!("grant store opened on '{}' backend", backend.name());
        Ok(Self { backend })
    }

    /// Wraps an already-constructed backend.
    ///
    /// Used when the application owns the engine handle, for example a
    /// shared embedded database or a persistent Redis connection.
    pub fn with_backend(backend: Arc<dyn GrantBackend>) -> Self {
        Self { backend }
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Grants `role` to `owner` under `scope`.
    ///
    /// Granting an already-held role is a no-op; there are no grant
    /// counts.
    pub async fn set<O: Identifiable>(&self, role: &str, owner: &O, scope: Scope) -> Result<()> {
        let owner = OwnerRef::resolve(owner)?;
        self.set_key(&owner, role, &scope).await
    }

    /// Returns whether `owner` holds `role` under exactly `scope`.
    ///
    /// There is no cascade between scope forms: a type-level grant never
    /// satisfies an instance-level check, and vice versa.
    pub async fn check<O: Identifiable>(
        &self,
        role: &str,
        owner: &O,
        scope: Scope,
    ) -> Result<bool> {
        let owner = OwnerRef::resolve(owner)?;
        self.check_key(&owner, role, &scope).await
    }

    /// Revokes `role` from `owner` under `scope`.
    ///
    /// Only the named scope form is removed; sibling forms of the same
    /// role are untouched. Revoking an absent grant is a no-op.
    pub async fn delete<O: Identifiable>(&self, role: &str, owner: &O, scope: Scope) -> Result<()> {
        let owner = OwnerRef::resolve(owner)?;
        self.delete_key(&owner, role, &scope).await
    }

    /// Role names granted to `owner`, deduplicated.
    ///
    /// Target scoping is stripped: a type-scoped and an instance-scoped
    /// grant of the same role collapse into one entry. Scope-aware
    /// queries go through [`Store::check`].
    pub async fn roles_of<O: Identifiable>(&self, owner: &O) -> Result<BTreeSet<String>> {
        let owner = OwnerRef::resolve(owner)?;
        self.roles_of_key(&owner).await
    }

    /// Role names granted to anyone in the store, deduplicated, with
    /// target scoping stripped.
    pub async fn roles(&self) -> Result<BTreeSet<String>> {
        let mut roles = BTreeSet::new();
        for owner in self.backend.all_owners().await? {
            for key in self.backend.members_of(&owner).await? {
                roles.insert(GrantKey::role_of(&key).to_string());
            }
        }
        Ok(roles)
    }

    /// Destroys every grant in the store.
    pub async fn clear(&self) -> Result<()> {
        log::info!("clearing all grants on '{}' backend", self.backend.name());
        self.backend.wipe().await
    }

    /// Owner-bound view for a typed owner.
    pub fn grantee<O: Identifiable>(&self, owner: &O) -> Result<Grantee<'_>> {
        Ok(Grantee {
            store: self,
            owner: OwnerRef::resolve(owner)?,
        })
    }

    /// Owner-bound view for a pre-resolved owner id.
    ///
    /// Boundary callers (CLI, wire handlers) land here when no typed
    /// value exists on their side.
    pub fn grantee_ref(&self, owner: OwnerRef) -> Grantee<'_> {
        Grantee { store: self, owner }
    }

    async fn set_key(&self, owner: &OwnerRef, role: &str, scope: &Scope) -> Result<()> {
        let key = GrantKey::encode(role, scope)?;
        log::debug!("grant '{key}' to '{owner}'");
        self.backend.insert(owner.as_str(), key.as_str()).await
    }

    async fn check_key(&self, owner: &OwnerRef, role: &str, scope: &Scope) -> Result<bool> {
        let key = GrantKey::encode(role, scope)?;
        self.backend.exists(owner.as_str(), key.as_str()).await
    }

    async fn delete_key(&self, owner: &OwnerRef, role: &str, scope: &Scope) -> Result<()> {
        let key = GrantKey::encode(role, scope)?;
        log::debug!("revoke '{key}' from '{owner}'");
        self.backend.remove(owner.as_str(), key.as_str()).await
    }

    async fn roles_of_key(&self, owner: &OwnerRef) -> Result<BTreeSet<String>> {
        let keys = self.backend.members_of(owner.as_str()).await?;
        Ok(keys
            .iter()
            .map(|key| GrantKey::role_of(key).to_string())
            .collect())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend.name())
            .finish()
    }
}

// ============================================================================
// Grantee
// ============================================================================

/// Owner-bound view over a store.
///
/// The owner is resolved once at construction; each call then reuses the
/// resolved id. Semantics are identical to the corresponding [`Store`]
/// operations.
#[derive(Debug, Clone)]
pub struct Grantee<'a> {
    store: &'a Store,
    owner: OwnerRef,
}

impl Grantee<'_> {
    /// The resolved owner id this view addresses.
    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    /// Grants an unscoped role.
    pub async fn grant(&self, role: &str) -> Result<()> {
        self.store.set_key(&self.owner, role, &Scope::Global).await
    }

    /// Grants a role under `scope`.
    pub async fn grant_on(&self, role: &str, scope: Scope) -> Result<()> {
        self.store.set_key(&self.owner, role, &scope).await
    }

    /// Revokes an unscoped role.
    pub async fn revoke(&self, role: &str) -> Result<()> {
        self.store
            .delete_key(&self.owner, role, &Scope::Global)
            .await
    }

    /// Revokes a role under `scope`.
    pub async fn revoke_on(&self, role: &str, scope: Scope) -> Result<()> {
        self.store.delete_key(&self.owner, role, &scope).await
    }

    /// Returns whether the owner holds an unscoped role.
    pub async fn has(&self, role: &str) -> Result<bool> {
        self.store
            .check_key(&self.owner, role, &Scope::Global)
            .await
    }

    /// Returns whether the owner holds a role under exactly `scope`.
    pub async fn has_on(&self, role: &str, scope: Scope) -> Result<bool> {
        self.store.check_key(&self.owner, role, &scope).await
    }

    /// Role names granted to this owner, deduplicated, with target
    /// scoping stripped.
    pub async fn roles(&self) -> Result<BTreeSet<String>> {
        self.store.roles_of_key(&self.owner).await
    }
}

// ============================================================================
// Tests
// ============================================================================
