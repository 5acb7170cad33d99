//! Settings aggregate: a structured settings record merged from the
//! Persistent Store, the Live Cache, and deployment overrides.

pub mod store;
pub mod types;

pub use store::{ANONYMOUS_USER_ENABLED_KEY, SETTINGS_KEY, SettingsStore};
pub use types::{ApplicationStatus, QueryHistoryMode, Settings};

// vim: ts=4
