//! Common test entities and the shared store contract.
//!
//! Every backend variant must pass the same behavioral contract; each
//! integration module builds a fresh store for its variant and feeds it
//! to these assertions. All contract functions expect an empty store.

use turnkey_core::{Identifiable, Kinded, Scope};
use turnkey_store::Store;

/// A grant owner with an optional persisted id.
pub struct Member {
    id: Option<u64>,
}

impl Kinded for Member {
    const KIND: &'static str = "Member";
}

impl Identifiable for Member {
    fn identity(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

/// A grant target.
pub struct Document {
    id: u64,
}

impl Kinded for Document {
    const KIND: &'static str = "Document";
}

impl Identifiable for Document {
    fn identity(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

/// An identified member.
pub fn member(id: u64) -> Member {
    Member { id: Some(id) }
}

/// A member that has not been persisted yet.
pub fn unsaved_member() -> Member {
    Member { id: None }
}

/// An identified document.
pub fn document(id: u64) -> Document {
    Document { id }
}

/// Grants in all three scope forms are stored and found again; roles
/// that were never granted check false in every form.
pub async fn assert_assign_and_check(store: &Store) {
    let actor = member(1);
    let report = document(42);
    let on_report = Scope::instance(&report).expect("resolve target");

    store
        .set("admin", &actor, Scope::Global)
        .await
        .expect("set unscoped role");
    store
        .set("manager", &actor, Scope::kind::<Document>())
        .await
        .expect("set type-level role");
    store
        .set("creator", &actor, on_report.clone())
        .await
        .expect("set instance-level role");

    assert!(
        store
            .check("admin", &actor, Scope::Global)
            .await
            .expect("check unscoped role")
    );
    assert!(
        store
            .check("manager", &actor, Scope::kind::<Document>())
            .await
            .expect("check type-level role")
    );
    assert!(
        store
            .check("creator", &actor, on_report.clone())
            .await
            .expect("check instance-level role")
    );

    assert!(
        !store
            .check("owner", &actor, Scope::Global)
            .await
            .expect("check absent unscoped role")
    );
    assert!(
        !store
            .check("tester", &actor, Scope::kind::<Document>())
            .await
            .expect("check absent type-level role")
    );
    assert!(
        !store
            .check("waiter", &actor, on_report)
            .await
            .expect("check absent instance-level role")
    );
}

/// Revocation removes exactly the named scope form and nothing else;
/// revoking an absent grant is a quiet no-op.
pub async fn assert_revoke(store: &Store) {
    let actor = member(1);
    let report = document(42);
    let on_report = Scope::instance(&report).expect("resolve target");

    store
        .set("admin", &actor, Scope::Global)
        .await
        .expect("set unscoped role");
    store
        .set("admin", &actor, Scope::kind::<Document>())
        .await
        .expect("set type-level role");
    store
        .set("admin", &actor, on_report.clone())
        .await
        .expect("set instance-level role");

    store
        .delete("admin", &actor, Scope::kind::<Document>())
        .await
        .expect("revoke type-level role");

    assert!(
        store
            .check("admin", &actor, Scope::Global)
            .await
            .expect("check unscoped role")
    );
    assert!(
        !store
            .check("admin", &actor, Scope::kind::<Document>())
            .await
            .expect("check revoked type-level role")
    );
    assert!(
        store
            .check("admin", &actor, on_report.clone())
            .await
            .expect("check instance-level role")
    );

    store
        .delete("admin", &actor, Scope::Global)
        .await
        .expect("revoke unscoped role");
    store
        .delete("admin", &actor, on_report.clone())
        .await
        .expect("revoke instance-level role");
    store
        .delete("admin", &actor, Scope::Global)
        .await
        .expect("revoke already-revoked role");

    assert!(
        !store
            .check("admin", &actor, Scope::Global)
            .await
            .expect("check revoked unscoped role")
    );
    assert!(
        !store
            .check("admin", &actor, on_report)
            .await
            .expect("check revoked instance-level role")
    );
}

/// Role enumeration strips target scoping, deduplicates, and in the
/// store-wide form aggregates across owners.
pub async fn assert_role_enumeration(store: &Store) {
    let first = member(1);
    let second = member(2);
    let report = document(42);

    store
        .set("waiter", &first, Scope::Global)
        .await
        .expect("set waiter");
    store
        .set("cooker", &first, Scope::kind::<Document>())
        .await
        .expect("set cooker");
    store
        .set("worker", &first, Scope::instance(&report).expect("resolve target"))
        .await
        .expect("set worker");
    // The same role twice in different scopes still lists once.
    store
        .set("cooker", &first, Scope::Global)
        .await
        .expect("set cooker again");
    store
        .set("waiter", &second, Scope::Global)
        .await
        .expect("set waiter for second owner");

    let roles = store.roles_of(&first).await.expect("list owner roles");
    assert_eq!(
        roles.into_iter().collect::<Vec<_>>(),
        vec!["cooker", "waiter", "worker"]
    );

    let all = store.roles().await.expect("list all roles");
    assert_eq!(
        all.into_iter().collect::<Vec<_>>(),
        vec!["cooker", "waiter", "worker"]
    );

    let second_roles = store.roles_of(&second).await.expect("list second owner roles");
    assert_eq!(second_roles.into_iter().collect::<Vec<_>>(), vec!["waiter"]);
}

/// The three scope forms of one role never satisfy each other's checks.
pub async fn assert_scope_isolation(store: &Store) {
    let actor = member(1);
    let report = document(42);
    let other = document(43);
    let on_report = Scope::instance(&report).expect("resolve target");

    store
        .set("manager", &actor, Scope::kind::<Document>())
        .await
        .expect("set type-level role");

    assert!(
        !store
            .check("manager", &actor, Scope::Global)
            .await
            .expect("type-level grant must not satisfy unscoped check")
    );
    assert!(
        !store
            .check("manager", &actor, on_report.clone())
            .await
            .expect("type-level grant must not satisfy instance check")
    );

    store
        .set("creator", &actor, on_report)
        .await
        .expect("set instance-level role");

    assert!(
        !store
            .check("creator", &actor, Scope::kind::<Document>())
            .await
            .expect("instance grant must not satisfy type-level check")
    );
    assert!(
        !store
            .check("creator", &actor, Scope::instance(&other).expect("resolve target"))
            .await
            .expect("instance grant must not satisfy sibling instance check")
    );
}

/// Granting is idempotent and unknown owners read as empty.
pub async fn assert_idempotent_operations(store: &Store) {
    let actor = member(1);

    store
        .set("admin", &actor, Scope::Global)
        .await
        .expect("set role");
    store
        .set("admin", &actor, Scope::Global)
        .await
        .expect("set role again");

    let roles = store.roles_of(&actor).await.expect("list roles");
    assert_eq!(roles.len(), 1);

    let stranger = member(999);
    assert!(
        !store
            .check("admin", &stranger, Scope::Global)
            .await
            .expect("check unknown owner")
    );
    assert!(
        store
            .roles_of(&stranger)
            .await
            .expect("list unknown owner roles")
            .is_empty()
    );
}

/// An owner without an identity is rejected before anything is stored.
pub async fn assert_unidentifiable_rejected(store: &Store) {
    let ghost = unsaved_member();

    assert!(store.set("admin", &ghost, Scope::Global).await.is_err());
    assert!(store.roles().await.expect("list all roles").is_empty());
}

/// Clearing destroys every grant for every owner.
pub async fn assert_clear(store: &Store) {
    let first = member(1);
    let second = member(2);

    store
        .set("admin", &first, Scope::Global)
        .await
        .expect("set first owner role");
    store
        .set("auditor", &second, Scope::kind::<Document>())
        .await
        .expect("set second owner role");

    store.clear().await.expect("clear store");

    assert!(
        !store
            .check("admin", &first, Scope::Global)
            .await
            .expect("check cleared role")
    );
    assert!(store.roles().await.expect("list all roles").is_empty());
    assert!(
        store
            .roles_of(&second)
            .await
            .expect("list cleared owner roles")
            .is_empty()
    );
}
