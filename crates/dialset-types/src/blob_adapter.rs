//! Adapter that manages and stores binary files with their content type (the File Store)
use async_trait::async_trait;
use std::{collections::BTreeMap, fmt::Debug};

use crate::prelude::*;

/// Free-form metadata stored next to a file
pub type FileMetadata = BTreeMap<String, String>;

#[async_trait]
pub trait BlobAdapter: Debug + Send + Sync {
	/// Saves a file under a key, replacing any previous content
	async fn save_file(
		&self,
		key: &str,
		data: &[u8],
		content_type: &str,
		metadata: &FileMetadata,
	) -> DsResult<()>;

	/// Reads a file with its content type. `Ok(None)` if it does not exist.
	async fn read_file(&self, key: &str) -> DsResult<Option<AssetHandle>>;

	/// Checks if a file exists, returns its size
	async fn stat_file(&self, key: &str) -> Option<u64>;
}

// vim: ts=4
