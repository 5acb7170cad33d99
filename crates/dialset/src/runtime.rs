//! Runtime facade
//!
//! Single place where the application asks for the final runtime value of a
//! knob, a settings record, or a branded asset. Values may live in the Live
//! Cache, the Persistent Store, the File Store, compiled-in defaults, or an
//! edition-specific override; callers should not need to know which.

use std::sync::Arc;

use dialset_types::blob_adapter::BlobAdapter;
use dialset_types::cache_adapter::CacheAdapter;
use dialset_types::kv_adapter::KvAdapter;

use crate::asset::{AssetResolver, StaticBundle};
use crate::config::Config;
use crate::hooks::FrozenHookRegistry;
use crate::prelude::*;
use crate::settings::{Settings, SettingsStore};
use crate::tunable::{
	BEAT_MULTIPLIER, BUILD_FENCE_LOOKUP_TABLE_INTERVAL, DOC_PERMISSION_SYNC_MULTIPLIER,
	TunableKnob,
};

pub type Runtime = Arc<RuntimeState>;

#[derive(Debug)]
pub struct RuntimeState {
	pub config: Config,
	cache: Arc<dyn CacheAdapter>,
	settings: SettingsStore,
	assets: AssetResolver,
}

impl RuntimeState {
	pub fn builder() -> RuntimeBuilder {
		RuntimeBuilder::new()
	}

	fn tenant<'a>(&self, tn_id: Option<&'a TnId>) -> Option<&'a TnId> {
		self.config.effective_tenant(tn_id)
	}

	/// Resolve any numeric knob against the Live Cache
	pub async fn tunable<T>(&self, knob: &TunableKnob<T>) -> T
	where
		T: std::str::FromStr + Copy + std::fmt::Debug + Send + Sync,
	{
		knob.resolve(self.cache.as_ref()).await
	}

	/// Scale factor for periodic cloud task frequency
	pub async fn beat_multiplier(&self) -> f64 {
		self.tunable(&BEAT_MULTIPLIER).await
	}

	/// Scale factor for document permission sync frequency
	pub async fn doc_permission_sync_multiplier(&self) -> f64 {
		self.tunable(&DOC_PERMISSION_SYNC_MULTIPLIER).await
	}

	/// Seconds between fence lookup table rebuilds
	pub async fn build_fence_lookup_table_interval(&self) -> i64 {
		self.tunable(&BUILD_FENCE_LOOKUP_TABLE_INTERVAL).await
	}

	pub async fn load_settings(&self, tn_id: Option<&TnId>) -> Settings {
		self.settings.load(self.tenant(tn_id)).await
	}

	pub async fn store_settings(&self, tn_id: Option<&TnId>, settings: &Settings) -> DsResult<()> {
		self.settings.store(self.tenant(tn_id), settings).await
	}

	pub async fn get_logo(&self, tn_id: Option<&TnId>) -> DsResult<AssetHandle> {
		self.assets.get_logo(self.tenant(tn_id)).await
	}

	pub async fn get_logotype(&self, tn_id: Option<&TnId>) -> DsResult<AssetHandle> {
		self.assets.get_logotype(self.tenant(tn_id)).await
	}

	pub async fn get_emailable_logo(&self, tn_id: Option<&TnId>) -> DsResult<AssetHandle> {
		self.assets.get_emailable_logo(self.tenant(tn_id), self.config.emailable_logo_max_dim).await
	}

	pub fn assets(&self) -> &AssetResolver {
		&self.assets
	}
}

pub struct RuntimeBuilder {
	config: Config,
	kv_adapter: Option<Arc<dyn KvAdapter>>,
	cache_adapter: Option<Arc<dyn CacheAdapter>>,
	blob_adapter: Option<Arc<dyn BlobAdapter>>,
	bundle: Option<StaticBundle>,
	hooks: Option<FrozenHookRegistry>,
}

impl RuntimeBuilder {
	pub fn new() -> Self {
		Self {
			config: Config::default(),
			kv_adapter: None,
			cache_adapter: None,
			blob_adapter: None,
			bundle: None,
			hooks: None,
		}
	}

	pub fn config(&mut self, config: Config) -> &mut Self {
		self.config = config;
		self
	}

	// Adapters
	pub fn kv_adapter(&mut self, kv_adapter: Arc<dyn KvAdapter>) -> &mut Self {
		self.kv_adapter = Some(kv_adapter);
		self
	}
	pub fn cache_adapter(&mut self, cache_adapter: Arc<dyn CacheAdapter>) -> &mut Self {
		self.cache_adapter = Some(cache_adapter);
		self
	}
	pub fn blob_adapter(&mut self, blob_adapter: Arc<dyn BlobAdapter>) -> &mut Self {
		self.blob_adapter = Some(blob_adapter);
		self
	}

	/// Defaults to [`StaticBundle::builtin`]
	pub fn static_bundle(&mut self, bundle: StaticBundle) -> &mut Self {
		self.bundle = Some(bundle);
		self
	}

	/// Defaults to an empty registry
	pub fn hooks(&mut self, hooks: FrozenHookRegistry) -> &mut Self {
		self.hooks = Some(hooks);
		self
	}

	pub fn build(self) -> DsResult<Runtime> {
		let Some(kv) = self.kv_adapter else {
			error!("FATAL: No KV adapter configured");
			return Err(Error::ConfigError("No KV adapter configured".into()));
		};
		let Some(cache) = self.cache_adapter else {
			error!("FATAL: No cache adapter configured");
			return Err(Error::ConfigError("No cache adapter configured".into()));
		};
		let Some(blob) = self.blob_adapter else {
			error!("FATAL: No blob adapter configured");
			return Err(Error::ConfigError("No blob adapter configured".into()));
		};
		let bundle = Arc::new(self.bundle.unwrap_or_else(StaticBundle::builtin));
		let hooks = Arc::new(self.hooks.unwrap_or_default());

		let settings = SettingsStore::new(kv, Arc::clone(&cache), (&self.config).into());
		let assets = AssetResolver::new(blob, bundle, hooks);

		info!(
			"Runtime ready (multi_tenant={}, query_history={})",
			self.config.multi_tenant, self.config.query_history_mode
		);
		Ok(Arc::new(RuntimeState { config: self.config, cache, settings, assets }))
	}
}

impl Default for RuntimeBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
