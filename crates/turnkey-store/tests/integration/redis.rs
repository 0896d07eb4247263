//! Store contract over the Redis backend.
//!
//! These tests need a live Redis server and are ignored by default:
//!
//! ```text
//! cargo test -p turnkey-store --features backend-redis -- --ignored
//! ```
//!
//! Each test works inside its own key namespace and clears it on entry,
//! so runs are repeatable and never touch keys outside their namespace.

use std::sync::Arc;

use turnkey_store::{RedisBackend, Store, StoreConfig};

use crate::common;

const REDIS_URL: &str = "redis://127.0.0.1/";

async fn fresh_store(namespace: &str) -> Store {
    let mut config = StoreConfig::redis(REDIS_URL);
    config.namespace = namespace.to_string();
    let store = Store::open(&config).await.expect("connect to redis");
    store.clear().await.expect("clear redis namespace");
    store
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_assign_and_check() {
    common::assert_assign_and_check(&fresh_store("turnkey_test_assign").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_revoke() {
    common::assert_revoke(&fresh_store("turnkey_test_revoke").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_role_enumeration() {
    common::assert_role_enumeration(&fresh_store("turnkey_test_roles").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_scope_isolation() {
    common::assert_scope_isolation(&fresh_store("turnkey_test_scopes").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_idempotent_operations() {
    common::assert_idempotent_operations(&fresh_store("turnkey_test_idem").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_unidentifiable_rejected() {
    common::assert_unidentifiable_rejected(&fresh_store("turnkey_test_unident").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_clear() {
    common::assert_clear(&fresh_store("turnkey_test_clear").await).await;
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_store_over_shared_connection() {
    // Applications with a persistent Redis connection hand it straight
    // to the backend instead of opening a second one.
    let client = redis::Client::open(REDIS_URL).expect("parse redis url");
    let manager = client
        .get_connection_manager()
        .await
        .expect("connect to redis");

    let backend = RedisBackend::with_manager(manager, "turnkey_test_shared");
    assert_eq!(backend.namespace(), "turnkey_test_shared");

    let store = Store::with_backend(Arc::new(backend));
    store.clear().await.expect("clear redis namespace");

    common::assert_assign_and_check(&store).await;
    store.clear().await.expect("clear redis namespace");
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_namespaces_are_isolated() {
    let first = fresh_store("turnkey_test_ns_a").await;
    let second = fresh_store("turnkey_test_ns_b").await;

    first
        .set("admin", &common::member(1), turnkey_core::Scope::Global)
        .await
        .expect("set role in first namespace");

    assert!(
        !second
            .check("admin", &common::member(1), turnkey_core::Scope::Global)
            .await
            .expect("check role in second namespace")
    );

    // Clearing one namespace must not bleed into the other.
    second.clear().await.expect("clear second namespace");
    assert!(
        first
            .check("admin", &common::member(1), turnkey_core::Scope::Global)
            .await
            .expect("check role in first namespace")
    );

    first.clear().await.expect("clear first namespace");
}
