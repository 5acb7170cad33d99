//! Tunable resolver
//!
//! Scalar knobs that operators adjust live by writing into the Live Cache.
//! Resolution never fails: a missing, unreadable, unparseable, or invalid
//! override always degrades to the knob's default. Callers poll these at the
//! start of every control-loop tick, so each call is a single cache read with
//! no state kept between calls.

use std::fmt::Debug;
use std::str::FromStr;

use dialset_types::cache_adapter::CacheAdapter;

use crate::prelude::*;

/// Tenant under which cloud-wide knobs live
pub const CLOUD_TENANT_ID: &str = "cloud";

/// Key prefix for operator-tunable runtime knobs
pub const RUNTIME_KEY_PREFIX: &str = "runtime";

pub const BEAT_MULTIPLIER_DEFAULT: f64 = 8.0;
pub const DOC_PERMISSION_SYNC_MULTIPLIER_DEFAULT: f64 = 1.0;
pub const BUILD_FENCE_LOOKUP_TABLE_INTERVAL_DEFAULT: i64 = 120;

/// Descriptor of a numeric knob
#[derive(Debug, Clone, Copy)]
pub struct TunableKnob<T: 'static> {
	pub key: &'static str,
	/// `None` reads the global namespace
	pub tenant_scope: Option<&'static str>,
	pub default: T,
	pub validate: fn(T) -> bool,
}

impl<T> TunableKnob<T>
where
	T: FromStr + Copy + Debug + Send + Sync,
{
	pub async fn resolve(&self, cache: &dyn CacheAdapter) -> T {
		let tn_id = self.tenant_scope.map(TnId::from);
		resolve_numeric_tunable(cache, self.key, tn_id.as_ref(), self.default, self.validate).await
	}
}

/// Scales the frequency of periodic cloud tasks
pub const BEAT_MULTIPLIER: TunableKnob<f64> = TunableKnob {
	key: "runtime:beat_multiplier",
	tenant_scope: Some(CLOUD_TENANT_ID),
	default: BEAT_MULTIPLIER_DEFAULT,
	validate: is_positive_finite,
};

/// Scales the frequency of document permission syncs
pub const DOC_PERMISSION_SYNC_MULTIPLIER: TunableKnob<f64> = TunableKnob {
	key: "runtime:doc_permission_sync_multiplier",
	tenant_scope: Some(CLOUD_TENANT_ID),
	default: DOC_PERMISSION_SYNC_MULTIPLIER_DEFAULT,
	validate: is_positive_finite,
};

/// Seconds between rebuilds of the active fence lookup table
pub const BUILD_FENCE_LOOKUP_TABLE_INTERVAL: TunableKnob<i64> = TunableKnob {
	key: "runtime:build_fence_lookup_table_interval",
	tenant_scope: Some(CLOUD_TENANT_ID),
	default: BUILD_FENCE_LOOKUP_TABLE_INTERVAL_DEFAULT,
	validate: is_positive,
};

pub fn is_positive<T: PartialOrd + Default>(value: T) -> bool {
	value > T::default()
}

pub fn is_positive_finite(value: f64) -> bool {
	value.is_finite() && value > 0.0
}

/// Decode cache bytes as UTF-8 text and parse as `T`
fn parse_raw<T: FromStr>(raw: &[u8]) -> Option<T> {
	std::str::from_utf8(raw).ok()?.trim().parse::<T>().ok()
}

/// Resolve a numeric knob from the Live Cache.
///
/// Absent → `default`. Unparseable → `default`. Candidate rejected by
/// `validate` → `default`. Cache errors are logged and treated as absent.
pub async fn resolve_numeric_tunable<T, F>(
	cache: &dyn CacheAdapter,
	key: &str,
	tn_id: Option<&TnId>,
	default: T,
	validate: F,
) -> T
where
	T: FromStr + Copy + Debug + Send + Sync,
	F: Fn(T) -> bool + Send,
{
	let cache_key = tenant_key(tn_id, key);

	let candidate = match cache.get(&cache_key).await {
		Ok(Some(raw)) => parse_raw::<T>(&raw).unwrap_or_else(|| {
			debug!("Unparseable tunable {}: {:?}, using default", cache_key, String::from_utf8_lossy(&raw));
			default
		}),
		Ok(None) => default,
		Err(err) => {
			warn!("Failed to read tunable {} from live cache: {}", cache_key, err);
			default
		}
	};

	if validate(candidate) {
		candidate
	} else {
		debug!("Tunable {} rejected value {:?}, using default {:?}", cache_key, candidate, default);
		default
	}
}

/// Resolve a boolean flag from the Live Cache, healing a missing entry.
///
/// `"1"` is true, any other stored value is false. When the key is absent the
/// default is written back so later readers (and operators) see the effective
/// value. A read error returns the default without writing.
pub async fn resolve_bool_tunable(
	cache: &dyn CacheAdapter,
	key: &str,
	tn_id: Option<&TnId>,
	default: bool,
) -> bool {
	let cache_key = tenant_key(tn_id, key);

	match cache.get(&cache_key).await {
		Ok(Some(raw)) => flag_from_bytes(&raw),
		Ok(None) => {
			debug!("Tunable {} missing, writing default {}", cache_key, default);
			if let Err(err) = cache.set(&cache_key, flag_to_bytes(default)).await {
				warn!("Failed to write default for tunable {}: {}", cache_key, err);
			}
			default
		}
		Err(err) => {
			error!("Failed to read tunable {} from live cache: {}", cache_key, err);
			default
		}
	}
}

pub(crate) fn flag_from_bytes(raw: &[u8]) -> bool {
	std::str::from_utf8(raw).is_ok_and(|s| s.trim() == "1")
}

pub(crate) fn flag_to_bytes(value: bool) -> &'static [u8] {
	if value { b"1" } else { b"0" }
}


// vim: ts=4
