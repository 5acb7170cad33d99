//! Static bundle: first-party assets addressed by name

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::prelude::*;

use super::cascade::{LOGO_STATIC_NAME, LOGOTYPE_STATIC_NAME};

static LOGO_PNG: &[u8] = include_bytes!("../../static/images/logo.png");
static LOGOTYPE_PNG: &[u8] = include_bytes!("../../static/images/logotype.png");

#[derive(Debug, Clone, Default)]
pub struct StaticBundle {
	entries: HashMap<Box<str>, AssetHandle>,
}

impl StaticBundle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bundle with the compiled-in assets
	pub fn builtin() -> Self {
		Self::new()
			.with(LOGO_STATIC_NAME, LOGO_PNG, "image/png")
			.with(LOGOTYPE_STATIC_NAME, LOGOTYPE_PNG, "image/png")
	}

	/// Load every file below `root`. Names are `/`-separated paths relative to `root`.
	pub async fn from_dir(root: impl AsRef<Path>) -> DsResult<Self> {
		let root = root.as_ref();
		let mut bundle = Self::new();
		let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

		while let Some(dir) = pending.pop() {
			let mut entries = tokio::fs::read_dir(&dir).await?;
			while let Some(entry) = entries.next_entry().await? {
				let path = entry.path();
				if entry.file_type().await?.is_dir() {
					pending.push(path);
					continue;
				}

				let name = path
					.strip_prefix(root)
					.map_err(|_| Error::Internal(format!("path outside bundle root: {:?}", path)))?
					.components()
					.map(|c| c.as_os_str().to_string_lossy())
					.collect::<Vec<_>>()
					.join("/");
				let bytes = tokio::fs::read(&path).await?;
				let mime_type = detect_mime_type(&name, &bytes);
				debug!("Static asset {} ({}, {} bytes)", name, mime_type, bytes.len());
				bundle.insert(name, AssetHandle::new(bytes, mime_type));
			}
		}

		info!("Loaded {} static assets from {:?}", bundle.len(), root);
		Ok(bundle)
	}

	pub fn with(mut self, name: impl Into<Box<str>>, bytes: &[u8], mime_type: &str) -> Self {
		self.insert(name, AssetHandle::new(bytes, mime_type));
		self
	}

	pub fn insert(&mut self, name: impl Into<Box<str>>, handle: AssetHandle) {
		self.entries.insert(name.into(), handle);
	}

	/// Look up an asset. Unknown names are `Error::NotFound`.
	pub fn get(&self, name: &str) -> DsResult<AssetHandle> {
		self.entries.get(name).cloned().ok_or(Error::NotFound)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Content type from magic bytes, then from the file extension
pub fn detect_mime_type(name: &str, bytes: &[u8]) -> &'static str {
	if let Ok(format) = image::guess_format(bytes) {
		return format.to_mime_type();
	}

	let ext = Path::new(name).extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
	match ext.as_deref() {
		Some("svg") => "image/svg+xml",
		Some("ico") => "image/x-icon",
		Some("css") => "text/css",
		Some("js") => "text/javascript",
		Some("json") => "application/json",
		Some("html" | "htm") => "text/html",
		Some("txt") => "text/plain",
		Some("woff2") => "font/woff2",
		_ => "application/octet-stream",
	}
}


// vim: ts=4
