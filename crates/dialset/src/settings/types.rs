//! Settings record types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How chat history is recorded for admin query history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryHistoryMode {
	#[default]
	Normal,
	Disabled,
	Anonymized,
}

impl QueryHistoryMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::Disabled => "disabled",
			Self::Anonymized => "anonymized",
		}
	}
}

impl fmt::Display for QueryHistoryMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for QueryHistoryMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"normal" => Ok(Self::Normal),
			"disabled" => Ok(Self::Disabled),
			"anonymized" => Ok(Self::Anonymized),
			_ => Err(()),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
	#[default]
	Active,
	PaymentReminder,
	GatedAccess,
}

/// Workspace settings record.
///
/// Every field has a default so partially written blobs still load.
/// `query_history_mode` and `show_extra_connectors` are deployment-controlled
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub feature_flags: BTreeMap<String, bool>,
	pub maximum_chat_retention_days: Option<u32>,
	pub gpu_enabled: Option<bool>,
	pub application_status: ApplicationStatus,
	/// Mirrored into the Live Cache, which wins on load
	pub anonymous_user_enabled: Option<bool>,
	pub pro_search_enabled: Option<bool>,
	pub temperature_override_enabled: Option<bool>,
	pub auto_scroll: Option<bool>,
	pub image_extraction_and_analysis_enabled: Option<bool>,
	pub search_time_image_analysis_enabled: Option<bool>,
	pub image_analysis_max_size_mb: Option<u32>,
	pub deep_research_enabled: Option<bool>,
	pub user_knowledge_enabled: bool,

	#[serde(skip)]
	pub query_history_mode: QueryHistoryMode,
	#[serde(skip)]
	pub show_extra_connectors: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			feature_flags: BTreeMap::new(),
			maximum_chat_retention_days: None,
			gpu_enabled: None,
			application_status: ApplicationStatus::Active,
			anonymous_user_enabled: None,
			pro_search_enabled: None,
			temperature_override_enabled: None,
			auto_scroll: None,
			image_extraction_and_analysis_enabled: Some(false),
			search_time_image_analysis_enabled: Some(false),
			image_analysis_max_size_mb: Some(20),
			deep_research_enabled: None,
			user_knowledge_enabled: true,
			query_history_mode: QueryHistoryMode::Normal,
			show_extra_connectors: true,
		}
	}
}

impl Settings {
	/// Feature flag lookup; unknown flags are off
	pub fn feature_enabled(&self, name: &str) -> bool {
		self.feature_flags.get(name).copied().unwrap_or(false)
	}
}


// vim: ts=4
