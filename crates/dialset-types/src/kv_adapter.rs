//! Adapter that persists structured blobs (the Persistent Store)

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait KvAdapter: Debug + Send + Sync {
	/// Loads the value stored under a tenant-qualified key.
	/// Returns `Error::NotFound` if the key has never been stored.
	async fn load(&self, key: &str) -> DsResult<serde_json::Value>;

	/// Stores a value, replacing any previous one
	async fn store(&self, key: &str, value: &serde_json::Value) -> DsResult<()>;

	/// Deletes a value. Deleting a missing key is not an error.
	async fn delete(&self, key: &str) -> DsResult<()>;
}

// vim: ts=4
