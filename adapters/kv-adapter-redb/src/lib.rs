//! Redb-based Persistent Store adapter
//!
//! Implements the KvAdapter trait on a single redb file. Values are stored as
//! JSON text under their (already tenant-namespaced) key.
//!
//! # Storage Layout
//!
//! - `{storage_path}/kv.db`, table `kv`: key -> value_json

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dialset::error::{DsResult, Error as DsError};
use dialset::kv_adapter::KvAdapter;
use tracing::{debug, trace};

mod error;
pub use error::Error;

const DB_FILE_NAME: &str = "kv.db";

/// Stores JSON documents: key -> value_json
const TABLE_KV: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// KV Adapter using redb for storage
#[derive(Clone)]
pub struct KvAdapterRedb {
	path: PathBuf,
	db: Arc<redb::Database>,
}

impl std::fmt::Debug for KvAdapterRedb {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KvAdapterRedb").field("path", &self.path).finish_non_exhaustive()
	}
}

impl KvAdapterRedb {
	/// Open (or create) the store under `storage_path`
	pub async fn new(storage_path: impl AsRef<Path>) -> DsResult<Self> {
		let path = storage_path.as_ref().join(DB_FILE_NAME);
		debug!("Opening KV store at {:?}", path);

		let db = Self::open(storage_path.as_ref(), &path)?;
		Ok(Self { path, db: Arc::new(db) })
	}

	fn open(storage_path: &Path, path: &Path) -> Result<redb::Database, Error> {
		std::fs::create_dir_all(storage_path)?;
		let db = redb::Database::create(path)?;

		// Create table up front so readers never see a missing table
		let tx = db.begin_write()?;
		tx.open_table(TABLE_KV)?;
		tx.commit()?;
		Ok(db)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Raw JSON text stored under `key`, if any
	fn read_raw(&self, key: &str) -> Result<Option<String>, Error> {
		let tx = self.db.begin_read()?;
		let table = tx.open_table(TABLE_KV)?;
		Ok(table.get(key)?.map(|guard| guard.value().to_string()))
	}

	fn write_raw(&self, key: &str, json: &str) -> Result<(), Error> {
		let tx = self.db.begin_write()?;
		{
			let mut table = tx.open_table(TABLE_KV)?;
			table.insert(key, json)?;
		}
		tx.commit()?;
		Ok(())
	}

	fn remove_raw(&self, key: &str) -> Result<(), Error> {
		let tx = self.db.begin_write()?;
		{
			let mut table = tx.open_table(TABLE_KV)?;
			table.remove(key)?;
		}
		tx.commit()?;
		Ok(())
	}
}

#[async_trait]
impl KvAdapter for KvAdapterRedb {
	async fn load(&self, key: &str) -> DsResult<serde_json::Value> {
		let Some(raw) = self.read_raw(key)? else {
			trace!("KV key {} not found", key);
			return Err(DsError::NotFound);
		};
		let value = serde_json::from_str(&raw).map_err(Error::from)?;
		Ok(value)
	}

	async fn store(&self, key: &str, value: &serde_json::Value) -> DsResult<()> {
		let json = serde_json::to_string(value).map_err(Error::from)?;
		self.write_raw(key, &json)?;

		debug!("Stored KV key {} ({} bytes)", key, json.len());
		Ok(())
	}

	async fn delete(&self, key: &str) -> DsResult<()> {
		self.remove_raw(key)?;
		Ok(())
	}
}

// vim: ts=4
