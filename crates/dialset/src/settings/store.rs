//! Settings load/store across the Persistent Store and the Live Cache

use std::sync::Arc;

use dialset_types::cache_adapter::CacheAdapter;
use dialset_types::kv_adapter::KvAdapter;

use super::types::{QueryHistoryMode, Settings};
use crate::config::Config;
use crate::prelude::*;
use crate::tunable::{flag_to_bytes, resolve_bool_tunable};

/// Persistent Store key of the serialized settings record
pub const SETTINGS_KEY: &str = "settings";

/// Live Cache key of the anonymous-user flag
pub const ANONYMOUS_USER_ENABLED_KEY: &str = "anonymous_user_enabled";

/// Deployment-level values that always win over persisted ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvOverrides {
	pub disable_user_knowledge: bool,
	pub query_history_mode: QueryHistoryMode,
	pub show_extra_connectors: bool,
}

impl From<&Config> for EnvOverrides {
	fn from(config: &Config) -> Self {
		Self {
			disable_user_knowledge: config.disable_user_knowledge,
			query_history_mode: config.query_history_mode,
			show_extra_connectors: config.show_extra_connectors,
		}
	}
}

impl EnvOverrides {
	pub fn apply(&self, settings: &mut Settings) {
		settings.query_history_mode = self.query_history_mode;
		settings.show_extra_connectors = self.show_extra_connectors;
		if self.disable_user_knowledge {
			settings.user_knowledge_enabled = false;
		}
	}
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
	kv: Arc<dyn KvAdapter>,
	cache: Arc<dyn CacheAdapter>,
	overrides: EnvOverrides,
}

impl SettingsStore {
	pub fn new(kv: Arc<dyn KvAdapter>, cache: Arc<dyn CacheAdapter>, overrides: EnvOverrides) -> Self {
		Self { kv, cache, overrides }
	}

	/// Load the fully populated settings record for a tenant.
	///
	/// Never fails: a missing or unreadable persisted record degrades to the
	/// defaults, and the cache flag self-heals (see [`resolve_bool_tunable`]).
	pub async fn load(&self, tn_id: Option<&TnId>) -> Settings {
		let key = tenant_key(tn_id, SETTINGS_KEY);

		let mut settings = match self.kv.load(&key).await {
			Ok(serde_json::Value::Null) => Settings::default(),
			Ok(value) => serde_json::from_value::<Settings>(value).unwrap_or_else(|err| {
				error!("Error deserializing settings {}: {}", key, err);
				Settings::default()
			}),
			Err(Error::NotFound) => {
				debug!("No settings found in KV store for key: {}", key);
				Settings::default()
			}
			Err(err) => {
				error!("Error loading settings from KV store: {}", err);
				Settings::default()
			}
		};

		let anonymous_user_enabled =
			resolve_bool_tunable(self.cache.as_ref(), ANONYMOUS_USER_ENABLED_KEY, tn_id, false).await;
		settings.anonymous_user_enabled = Some(anonymous_user_enabled);

		self.overrides.apply(&mut settings);
		settings
	}

	/// Persist a settings record.
	///
	/// The cache flag is written first, then the record. The two writes are
	/// not atomic; if the second fails the cache value still wins on next load.
	pub async fn store(&self, tn_id: Option<&TnId>, settings: &Settings) -> DsResult<()> {
		if let Some(enabled) = settings.anonymous_user_enabled {
			let cache_key = tenant_key(tn_id, ANONYMOUS_USER_ENABLED_KEY);
			self.cache.set(&cache_key, flag_to_bytes(enabled)).await?;
		}

		let key = tenant_key(tn_id, SETTINGS_KEY);
		let value = serde_json::to_value(settings)?;
		self.kv.store(&key, &value).await?;

		info!("Settings stored for {}", tn_id.map_or("global", TnId::as_str));
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_overrides_applied_unconditionally() {
		let overrides = EnvOverrides {
			disable_user_knowledge: true,
			query_history_mode: QueryHistoryMode::Disabled,
			show_extra_connectors: false,
		};
		let mut settings = Settings { user_knowledge_enabled: true, ..Default::default() };
		overrides.apply(&mut settings);
		assert!(!settings.user_knowledge_enabled);
		assert_eq!(settings.query_history_mode, QueryHistoryMode::Disabled);
		assert!(!settings.show_extra_connectors);
	}

	#[test]
	fn test_kill_switch_off_keeps_stored_value() {
		let overrides = EnvOverrides::from(&Config::default());
		let mut settings = Settings { user_knowledge_enabled: false, ..Default::default() };
		overrides.apply(&mut settings);
		assert!(!settings.user_knowledge_enabled);
		assert!(settings.show_extra_connectors);
	}
}

// vim: ts=4
