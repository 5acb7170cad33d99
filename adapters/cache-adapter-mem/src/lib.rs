//! In-process Live Cache adapter
//!
//! Keeps raw byte values in a bounded LRU map. Suitable for a single node;
//! values written here are not visible to other processes.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use dialset::cache_adapter::CacheAdapter;
use dialset::prelude::*;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
	Some(capacity) => capacity,
	None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone)]
pub struct MemCacheAdapter {
	cache: Arc<parking_lot::Mutex<LruCache<String, Box<[u8]>>>>,
}

impl MemCacheAdapter {
	/// Create a cache holding at most `capacity` keys (0 selects the default)
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
		debug!("Creating in-memory cache with capacity {}", capacity);
		Self { cache: Arc::new(parking_lot::Mutex::new(LruCache::new(capacity))) }
	}

	pub fn len(&self) -> usize {
		self.cache.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.lock().is_empty()
	}

	/// Drop every cached value
	pub fn clear(&self) {
		self.cache.lock().clear();
	}
}

impl Default for MemCacheAdapter {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY.get())
	}
}

#[async_trait]
impl CacheAdapter for MemCacheAdapter {
	async fn get(&self, key: &str) -> DsResult<Option<Box<[u8]>>> {
		// LRU lookup updates recency, so it needs exclusive access
		let mut cache = self.cache.lock();
		Ok(cache.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &[u8]) -> DsResult<()> {
		let mut cache = self.cache.lock();
		if let Some((evicted, _)) = cache.push(key.to_string(), value.into())
			&& evicted != key
		{
			trace!("Evicted cache key {}", evicted);
		}
		Ok(())
	}

	async fn delete(&self, key: &str) -> DsResult<()> {
		let mut cache = self.cache.lock();
		cache.pop(key);
		Ok(())
	}
}


// vim: ts=4
