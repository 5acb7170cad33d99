//! Deployment configuration
//!
//! Values are read once from the environment at startup. Anything that fails
//! to parse falls back to its default with a warning, so a typo in a deployment
//! manifest never prevents the process from starting.

use std::str::FromStr;

use crate::prelude::*;
use crate::settings::QueryHistoryMode;

pub const ENV_MULTI_TENANT: &str = "MULTI_TENANT";
pub const ENV_DISABLE_USER_KNOWLEDGE: &str = "DISABLE_USER_KNOWLEDGE";
pub const ENV_QUERY_HISTORY_TYPE: &str = "QUERY_HISTORY_TYPE";
pub const ENV_SHOW_EXTRA_CONNECTORS: &str = "SHOW_EXTRA_CONNECTORS";
pub const ENV_EMAILABLE_LOGO_MAX_DIM: &str = "EMAILABLE_LOGO_MAX_DIM";

pub const DEFAULT_EMAILABLE_LOGO_MAX_DIM: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Forward the caller's tenant to the backends. When false every call is global.
	pub multi_tenant: bool,
	/// Deployment-level kill switch for user knowledge
	pub disable_user_knowledge: bool,
	pub query_history_mode: QueryHistoryMode,
	pub show_extra_connectors: bool,
	/// Bounding box for the emailable logo variant
	pub emailable_logo_max_dim: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			multi_tenant: false,
			disable_user_knowledge: false,
			query_history_mode: QueryHistoryMode::Normal,
			show_extra_connectors: true,
			emailable_logo_max_dim: DEFAULT_EMAILABLE_LOGO_MAX_DIM,
		}
	}
}

impl Config {
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Build a config from an arbitrary variable source
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let default = Self::default();
		Self {
			multi_tenant: read_var(&lookup, ENV_MULTI_TENANT, parse_bool, default.multi_tenant),
			disable_user_knowledge: read_var(
				&lookup,
				ENV_DISABLE_USER_KNOWLEDGE,
				parse_bool,
				default.disable_user_knowledge,
			),
			query_history_mode: read_var(
				&lookup,
				ENV_QUERY_HISTORY_TYPE,
				|s| QueryHistoryMode::from_str(s).ok(),
				default.query_history_mode,
			),
			show_extra_connectors: read_var(
				&lookup,
				ENV_SHOW_EXTRA_CONNECTORS,
				parse_bool,
				default.show_extra_connectors,
			),
			emailable_logo_max_dim: read_var(
				&lookup,
				ENV_EMAILABLE_LOGO_MAX_DIM,
				|s| s.parse::<u32>().ok().filter(|dim| *dim > 0),
				default.emailable_logo_max_dim,
			),
		}
	}

	pub fn multi_tenant(mut self, multi_tenant: bool) -> Self {
		self.multi_tenant = multi_tenant;
		self
	}
	pub fn disable_user_knowledge(mut self, disable: bool) -> Self {
		self.disable_user_knowledge = disable;
		self
	}
	pub fn query_history_mode(mut self, mode: QueryHistoryMode) -> Self {
		self.query_history_mode = mode;
		self
	}
	pub fn show_extra_connectors(mut self, show: bool) -> Self {
		self.show_extra_connectors = show;
		self
	}
	pub fn emailable_logo_max_dim(mut self, max_dim: u32) -> Self {
		self.emailable_logo_max_dim = max_dim;
		self
	}

	/// The tenant actually used for backend keys
	pub fn effective_tenant<'a>(&self, tn_id: Option<&'a TnId>) -> Option<&'a TnId> {
		if self.multi_tenant { tn_id } else { None }
	}
}

fn read_var<F, T, P>(lookup: &F, name: &str, parse: P, default: T) -> T
where
	F: Fn(&str) -> Option<String>,
	P: Fn(&str) -> Option<T>,
{
	let Some(raw) = lookup(name) else {
		return default;
	};
	if let Some(value) = parse(raw.trim()) {
		value
	} else {
		warn!("Invalid value for {}: {:?}, using default", name, raw);
		default
	}
}

fn parse_bool(s: &str) -> Option<bool> {
	match s.to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Some(true),
		"false" | "0" | "no" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
		move |name| map.get(name).cloned()
	}

	#[test]
	fn test_defaults_when_unset() {
		let config = Config::from_lookup(|_| None);
		assert_eq!(config, Config::default());
		assert!(config.show_extra_connectors);
		assert_eq!(config.emailable_logo_max_dim, 300);
	}

	#[test]
	fn test_reads_values() {
		let config = Config::from_lookup(lookup_from(&[
			("MULTI_TENANT", "true"),
			("DISABLE_USER_KNOWLEDGE", "1"),
			("QUERY_HISTORY_TYPE", "anonymized"),
			("SHOW_EXTRA_CONNECTORS", "False"),
			("EMAILABLE_LOGO_MAX_DIM", "128"),
		]));
		assert!(config.multi_tenant);
		assert!(config.disable_user_knowledge);
		assert_eq!(config.query_history_mode, QueryHistoryMode::Anonymized);
		assert!(!config.show_extra_connectors);
		assert_eq!(config.emailable_logo_max_dim, 128);
	}

	#[test]
	fn test_invalid_values_fall_back() {
		let config = Config::from_lookup(lookup_from(&[
			("MULTI_TENANT", "maybe"),
			("QUERY_HISTORY_TYPE", "everything"),
			("EMAILABLE_LOGO_MAX_DIM", "0"),
		]));
		assert!(!config.multi_tenant);
		assert_eq!(config.query_history_mode, QueryHistoryMode::Normal);
		assert_eq!(config.emailable_logo_max_dim, DEFAULT_EMAILABLE_LOGO_MAX_DIM);
	}

	#[test]
	fn test_bool_spellings() {
		for raw in ["true", "TRUE", "1", "yes", "Yes", " yes "] {
			let config = Config::from_lookup(lookup_from(&[("MULTI_TENANT", raw)]));
			assert!(config.multi_tenant, "{:?} should enable", raw);
		}
		for raw in ["false", "False", "0", "no", "NO"] {
			let config = Config::from_lookup(lookup_from(&[("SHOW_EXTRA_CONNECTORS", raw)]));
			assert!(!config.show_extra_connectors, "{:?} should disable", raw);
		}
	}

	#[test]
	fn test_unknown_bool_spellings_fall_back() {
		for raw in ["on", "off", "", "enabled", "2"] {
			let config = Config::from_lookup(lookup_from(&[
				("MULTI_TENANT", raw),
				("SHOW_EXTRA_CONNECTORS", raw),
			]));
			assert!(!config.multi_tenant, "{:?} should keep the default", raw);
			assert!(config.show_extra_connectors, "{:?} should keep the default", raw);
		}
	}

	#[test]
	fn test_effective_tenant() {
		let tn_id = TnId::from("acme");
		assert_eq!(Config::default().effective_tenant(Some(&tn_id)), None);
		assert_eq!(Config::default().multi_tenant(true).effective_tenant(Some(&tn_id)), Some(&tn_id));
	}
}

// vim: ts=4
