//! Test adapter builders and failing doubles
//!
//! Builders return the TempDir alongside the adapter so cleanup happens when
//! it is dropped at the end of the test.

use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;

use dialset::blob_adapter::{BlobAdapter, FileMetadata};
use dialset::cache_adapter::CacheAdapter;
use dialset::hooks::FrozenHookRegistry;
use dialset::kv_adapter::KvAdapter;
use dialset::prelude::*;
use dialset::{Config, Runtime, RuntimeState};
use dialset_blob_adapter_fs::BlobAdapterFs;
use dialset_cache_adapter_mem::MemCacheAdapter;
use dialset_kv_adapter_redb::KvAdapterRedb;

/// Backends behind a test runtime, kept so tests can poke at them directly
pub struct TestBackends {
	pub kv: Arc<KvAdapterRedb>,
	pub cache: Arc<MemCacheAdapter>,
	pub blob: Arc<BlobAdapterFs>,
	pub temp_dir: TempDir,
}

pub async fn create_test_backends() -> TestBackends {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let kv = KvAdapterRedb::new(temp_dir.path().join("kv")).await.expect("Failed to create KV adapter");
	let blob = BlobAdapterFs::new(temp_dir.path().join("files").into())
		.await
		.expect("Failed to create blob adapter");

	TestBackends {
		kv: Arc::new(kv),
		cache: Arc::new(MemCacheAdapter::new(64)),
		blob: Arc::new(blob),
		temp_dir,
	}
}

pub async fn create_test_runtime(config: Config) -> (Runtime, TestBackends) {
	create_test_runtime_with_hooks(config, FrozenHookRegistry::empty()).await
}

pub async fn create_test_runtime_with_hooks(
	config: Config,
	hooks: FrozenHookRegistry,
) -> (Runtime, TestBackends) {
	let backends = create_test_backends().await;
	let mut builder = RuntimeState::builder();
	builder
		.config(config)
		.kv_adapter(backends.kv.clone())
		.cache_adapter(backends.cache.clone())
		.blob_adapter(backends.blob.clone())
		.hooks(hooks);
	let runtime = builder.build().expect("Failed to build runtime");
	(runtime, backends)
}

/// Persistent Store that fails every call
#[derive(Debug)]
pub struct FailingKv;

#[async_trait]
impl KvAdapter for FailingKv {
	async fn load(&self, _key: &str) -> DsResult<serde_json::Value> {
		Err(Error::DbError)
	}
	async fn store(&self, _key: &str, _value: &serde_json::Value) -> DsResult<()> {
		Err(Error::DbError)
	}
	async fn delete(&self, _key: &str) -> DsResult<()> {
		Err(Error::DbError)
	}
}

/// Live Cache that fails every call
#[derive(Debug)]
pub struct FailingCache;

#[async_trait]
impl CacheAdapter for FailingCache {
	async fn get(&self, _key: &str) -> DsResult<Option<Box<[u8]>>> {
		Err(Error::DbError)
	}
	async fn set(&self, _key: &str, _value: &[u8]) -> DsResult<()> {
		Err(Error::DbError)
	}
	async fn delete(&self, _key: &str) -> DsResult<()> {
		Err(Error::DbError)
	}
}

/// File Store whose reads fail with an I/O error
#[derive(Debug)]
pub struct FailingBlob;

#[async_trait]
impl BlobAdapter for FailingBlob {
	async fn save_file(
		&self,
		_key: &str,
		_data: &[u8],
		_content_type: &str,
		_metadata: &FileMetadata,
	) -> DsResult<()> {
		Err(Error::Io(std::io::Error::other("disk on fire")))
	}
	async fn read_file(&self, _key: &str) -> DsResult<Option<AssetHandle>> {
		Err(Error::Io(std::io::Error::other("disk on fire")))
	}
	async fn stat_file(&self, _key: &str) -> Option<u64> {
		None
	}
}

// vim: ts=4
