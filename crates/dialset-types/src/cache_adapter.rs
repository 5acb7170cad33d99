//! Adapter for the fast, possibly stale key-bytes store (the Live Cache)
//!
//! Implementations may be replicas with eventual consistency: a `get` right
//! after a `set` is allowed to return the previous value.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait CacheAdapter: Debug + Send + Sync {
	/// Reads raw bytes. `Ok(None)` means the key is absent.
	async fn get(&self, key: &str) -> DsResult<Option<Box<[u8]>>>;

	/// Writes raw bytes (last writer wins)
	async fn set(&self, key: &str, value: &[u8]) -> DsResult<()>;

	async fn delete(&self, key: &str) -> DsResult<()>;
}

// vim: ts=4
