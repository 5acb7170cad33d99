//! Named asset resolution: File Store override, else Static Bundle

use std::sync::Arc;

use dialset_types::blob_adapter::BlobAdapter;

use super::emailable::resolve_emailable_asset;
use super::static_bundle::StaticBundle;
use crate::hooks::{FrozenHookRegistry, LOGO_FILENAME, LOGOTYPE_FILENAME, OverrideHandle};
use crate::prelude::*;

pub const LOGO_STATIC_NAME: &str = "static/images/logo.png";
pub const LOGOTYPE_STATIC_NAME: &str = "static/images/logotype.png";

#[derive(Debug, Clone)]
pub struct AssetResolver {
	blob: Arc<dyn BlobAdapter>,
	bundle: Arc<StaticBundle>,
	hooks: Arc<FrozenHookRegistry>,
}

impl AssetResolver {
	pub fn new(
		blob: Arc<dyn BlobAdapter>,
		bundle: Arc<StaticBundle>,
		hooks: Arc<FrozenHookRegistry>,
	) -> Self {
		Self { blob, bundle, hooks }
	}

	/// Resolve an asset from the File Store (when `persisted_key` is given),
	/// else from the Static Bundle.
	///
	/// File Store misses and errors fall through to the bundle. Only a miss in
	/// both is an error (`Error::NotFound`), and that means a packaging defect.
	pub async fn resolve_asset(
		&self,
		persisted_key: Option<&str>,
		static_key: &str,
	) -> DsResult<AssetHandle> {
		if let Some(key) = persisted_key {
			match self.blob.read_file(key).await {
				Ok(Some(handle)) => return Ok(handle),
				Ok(None) => debug!("Persisted asset {} not found, using static {}", key, static_key),
				Err(err) => warn!("Failed to read persisted asset {}: {}, using static {}", key, err, static_key),
			}
		}

		self.bundle.get(static_key).inspect_err(|_| {
			error!("Resource not found: persisted={:?} static={}", persisted_key, static_key);
		})
	}

	/// Resolve a named asset whose persisted key comes from an override hook
	async fn resolve_overridable(
		&self,
		handle: OverrideHandle,
		tn_id: Option<&TnId>,
		static_key: &str,
	) -> DsResult<AssetHandle> {
		let persisted_key: Option<String> = self.hooks.try_invoke(handle, tn_id.cloned(), None).await;
		self.resolve_asset(persisted_key.as_deref(), static_key).await
	}

	pub async fn get_logo(&self, tn_id: Option<&TnId>) -> DsResult<AssetHandle> {
		self.resolve_overridable(LOGO_FILENAME, tn_id, LOGO_STATIC_NAME).await
	}

	pub async fn get_logotype(&self, tn_id: Option<&TnId>) -> DsResult<AssetHandle> {
		self.resolve_overridable(LOGOTYPE_FILENAME, tn_id, LOGOTYPE_STATIC_NAME).await
	}

	/// The logo as a PNG no larger than `max_dim` on either side
	pub async fn get_emailable_logo(
		&self,
		tn_id: Option<&TnId>,
		max_dim: u32,
	) -> DsResult<AssetHandle> {
		let logo = self.get_logo(tn_id).await?;
		tokio::task::spawn_blocking(move || resolve_emailable_asset(&logo, max_dim)).await?
	}
}

// vim: ts=4
