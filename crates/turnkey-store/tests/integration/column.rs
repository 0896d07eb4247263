//! Store contract over the wide-column-style sled backend.

use tempfile::TempDir;
use turnkey_core::Scope;
use turnkey_store::{Store, StoreConfig};

use crate::common;

async fn fresh_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = StoreConfig::column(dir.path().join("grants").display().to_string());
    let store = Store::open(&config).await.expect("open column store");
    (dir, store)
}

#[tokio::test]
async fn test_assign_and_check() {
    let (_dir, store) = fresh_store().await;
    common::assert_assign_and_check(&store).await;
}

#[tokio::test]
async fn test_revoke() {
    let (_dir, store) = fresh_store().await;
    common::assert_revoke(&store).await;
}

#[tokio::test]
async fn test_role_enumeration() {
    let (_dir, store) = fresh_store().await;
    common::assert_role_enumeration(&store).await;
}

#[tokio::test]
async fn test_scope_isolation() {
    let (_dir, store) = fresh_store().await;
    common::assert_scope_isolation(&store).await;
}

#[tokio::test]
async fn test_idempotent_operations() {
    let (_dir, store) = fresh_store().await;
    common::assert_idempotent_operations(&store).await;
}

#[tokio::test]
async fn test_unidentifiable_rejected() {
    let (_dir, store) = fresh_store().await;
    common::assert_unidentifiable_rejected(&store).await;
}

#[tokio::test]
async fn test_clear() {
    let (_dir, store) = fresh_store().await;
    common::assert_clear(&store).await;
}

#[tokio::test]
async fn test_grants_survive_reopen() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = StoreConfig::column(dir.path().join("grants").display().to_string());

    {
        let store = Store::open(&config).await.expect("open column store");
        store
            .set("admin", &common::member(1), Scope::Global)
            .await
            .expect("set role");
        store
            .set("auditor", &common::member(1), Scope::Global)
            .await
            .expect("set second role");
    }

    let store = Store::open(&config).await.expect("reopen column store");
    let roles = store
        .roles_of(&common::member(1))
        .await
        .expect("list roles after reopen");
    assert_eq!(
        roles.into_iter().collect::<Vec<_>>(),
        vec!["admin", "auditor"]
    );
}
