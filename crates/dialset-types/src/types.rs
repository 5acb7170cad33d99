//! Common types used throughout dialset.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// TnId //
//******//
/// Tenant identifier. Resolver entry points take `Option<&TnId>`, where `None`
/// selects the global (single-tenant) namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TnId(pub Box<str>);

impl TnId {
	pub fn new(id: impl Into<Box<str>>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for TnId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for TnId {
	fn from(id: &str) -> Self {
		Self(id.into())
	}
}

impl Serialize for TnId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for TnId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(TnId(String::deserialize(deserializer)?.into()))
	}
}

/// Namespace a logical key by tenant: `"{tn_id}:{key}"`, or the bare key when global.
pub fn tenant_key(tn_id: Option<&TnId>, key: &str) -> String {
	match tn_id {
		Some(tn_id) => format!("{}:{}", tn_id, key),
		None => key.to_string(),
	}
}

// AssetHandle //
//*************//
/// A resolved binary asset. Immutable: derived variants are new handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetHandle {
	pub bytes: Arc<[u8]>,
	pub mime_type: Box<str>,
}

impl AssetHandle {
	pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<Box<str>>) -> Self {
		Self { bytes: bytes.into(), mime_type: mime_type.into() }
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}


// vim: ts=4
