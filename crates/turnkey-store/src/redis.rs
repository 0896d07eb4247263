//! Set-based backend over a Redis server.
//!
//! Mapping: one Redis set per owner under a configurable key namespace.
//! `insert` / `exists` / `remove` / `members_of` are SADD / SISMEMBER /
//! SREM / SMEMBERS on the owner's set; owner enumeration matches the
//! namespace pattern and strips the prefix; `wipe` deletes every key in
//! the namespace and nothing outside it.
//!
//! Every operation is a live round-trip on a multiplexed connection.
//! Nothing is cached, so concurrent processes sharing one server always
//! observe each other's writes.

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::backend::GrantBackend;
use crate::error::{Error, Result};

const BACKEND: &str = "redis";

fn group_key(namespace: &str, owner: &str) -> String {
    format!("{namespace}:{owner}")
}

fn owner_pattern(namespace: &str) -> String {
    format!("{namespace}:*")
}

fn op_err(action: &'static str) -> impl FnOnce(redis::RedisError) -> Error {
    move |e| Error::unavailable_with_source(BACKEND, action, e)
}

/// Set-based backend over a live Redis server.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
    namespace: String,
}

impl RedisBackend {
    /// Connects to `url` and prepares a multiplexed connection.
    ///
    /// The connection manager reconnects on failure; individual
    /// operations that hit a dead connection still surface
    /// [`Error::Unavailable`] rather than blocking.
    pub async fn connect(url: &str, namespace: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| Error::unavailable_with_source(BACKEND, "parsing connection url", e))?;
        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| Error::unavailable_with_source(BACKEND, "connecting", e))?;
        Ok(Self::with_manager(manager, namespace))
    }

    /// Wraps an existing connection manager.
    ///
    /// Lets an application share one persistent Redis connection between
    /// the grant store and its other uses.
    pub fn with_manager<S: Into<String>>(manager: ConnectionManager, namespace: S) -> Self {
        Self {
            manager,
            namespace: namespace.into(),
        }
    }

    /// The key namespace this backend operates under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn namespace_keys(&self) -> Result<Vec<String>> {
        let mut con = self.manager.clone();
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(owner_pattern(&self.namespace))
            .query_async(&mut con)
            .await
            .map_err(op_err("listing owner sets"))?;
        Ok(keys)
    }
}

#[async_trait]
impl GrantBackend for RedisBackend {
    async fn insert(&self, owner: &str, key: &str) -> Result<()> {
        let mut con = self.manager.clone();
        let _: () = con
            .sadd(group_key(&self.namespace, owner), key)
            .await
            .map_err(op_err("adding grant"))?;
        Ok(())
    }

    async fn exists(&self, owner: &str, key: &str) -> Result<bool> {
        let mut con = self.manager.clone();
        let held: bool = con
            .sismember(group_key(&self.namespace, owner), key)
            .await
            .map_err(op_err("checking grant"))?;
        Ok(held)
    }

    async fn remove(&self, owner: &str, key: &str) -> Result<()> {
        let mut con = self.manager.clone();
        let _: () = con
            .srem(group_key(&self.namespace, owner), key)
            .await
            .map_err(op_err("removing grant"))?;
        Ok(())
    }

    async fn members_of(&self, owner: &str) -> Result<BTreeSet<String>> {
        let mut con = self.manager.clone();
        let members: Vec<String> = con
            .smembers(group_key(&self.namespace, owner))
            .await
            .map_err(op_err("listing grants"))?;
        Ok(members.into_iter().collect())
    }

    async fn all_owners(&self) -> Result<BTreeSet<String>> {
        let prefix = format!("{}:", self.namespace);
        Ok(self
            .namespace_keys()
            .await?
            .iter()
            .filter_map(|key| key.strip_prefix(&prefix))
            .map(str::to_string)
            .collect())
    }

    async fn wipe(&self) -> Result<()> {
        let keys = self.namespace_keys().await?;
        // DEL with no arguments is a protocol error.
        if keys.is_empty() {
            return Ok(());
        }
        let mut con = self.manager.clone();
        let _: () = con.del(keys).await.map_err(op_err("deleting owner sets"))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}

impl fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisBackend")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
