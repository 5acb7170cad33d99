//! Filesystem File Store adapter
//!
//! Each file lives at `{base_dir}/files/{key}` as a single object: a magic
//! line, one line of JSON holding the content type and metadata, then the
//! payload. Writes go to a temporary file that is renamed into place once, so
//! readers always see a matching (content, content type) pair.
//!
//! Files placed by hand without the header are served as-is with the default
//! content type.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use std::{
	path::{Component, Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{
	fs::{File, create_dir_all, read, remove_file, rename},
	io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};

use dialset::{
	blob_adapter::{self, FileMetadata},
	prelude::*,
};

const FILES_DIR: &str = "files";
const TMP_DIR: &str = "tmp";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// First line of every file written by this adapter
const MAGIC_LINE: &[u8] = b"dialset-file v1\n";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Header stored in front of every payload
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileHeader {
	content_type: String,
	#[serde(default)]
	metadata: FileMetadata,
}

impl FileHeader {
	fn headerless() -> Self {
		Self { content_type: DEFAULT_CONTENT_TYPE.into(), ..Default::default() }
	}

	fn encode(&self, data: &[u8]) -> DsResult<Vec<u8>> {
		let json = serde_json::to_vec(self)?;
		let mut out = Vec::with_capacity(MAGIC_LINE.len() + json.len() + 1 + data.len());
		out.extend_from_slice(MAGIC_LINE);
		out.extend_from_slice(&json);
		out.push(b'\n');
		out.extend_from_slice(data);
		Ok(out)
	}
}

/// Splits a stored object into its header and payload
fn split_object(raw: &[u8]) -> DsResult<(FileHeader, &[u8])> {
	let Some(rest) = raw.strip_prefix(MAGIC_LINE) else {
		return Ok((FileHeader::headerless(), raw));
	};
	let end = rest.iter().position(|b| *b == b'\n').ok_or(Error::Parse)?;
	let header = serde_json::from_slice(&rest[..end])?;
	Ok((header, &rest[end + 1..]))
}

/// Validates a key and returns it as a relative path
///
/// Keys are `/`-separated names. Empty segments, `.`/`..` and absolute paths
/// are rejected so a key can never escape the store.
fn key_path(key: &str) -> DsResult<PathBuf> {
	if key.is_empty() || key.contains('\\') || key.contains('\0') {
		return Err(Error::ValidationError(format!("invalid file key: {:?}", key)));
	}
	let mut path = PathBuf::new();
	for segment in key.split('/') {
		match Path::new(segment).components().next() {
			Some(Component::Normal(_)) if !segment.is_empty() => path.push(segment),
			_ => return Err(Error::ValidationError(format!("invalid file key: {:?}", key))),
		}
	}
	Ok(path)
}

#[derive(Debug)]
pub struct BlobAdapterFs {
	base_dir: Box<Path>,
}

impl BlobAdapterFs {
	pub async fn new(base_dir: Box<Path>) -> Result<Self, Error> {
		create_dir_all(base_dir.join(FILES_DIR)).await?;
		create_dir_all(base_dir.join(TMP_DIR)).await?;
		Ok(Self { base_dir })
	}

	fn file_path(&self, key: &str) -> DsResult<PathBuf> {
		Ok(self.base_dir.join(FILES_DIR).join(key_path(key)?))
	}

	fn tmp_path(&self) -> PathBuf {
		let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
		self.base_dir.join(TMP_DIR).join(format!("tmp-{}-{}", std::process::id(), seq))
	}

	/// Writes `data` to `dest` through a temporary file
	async fn write_atomic(&self, dest: &Path, data: &[u8]) -> DsResult<()> {
		if let Some(parent) = dest.parent() {
			create_dir_all(parent).await?;
		}

		let tmp_path = self.tmp_path();
		let res = async {
			let mut file = File::create(&tmp_path).await?;
			file.write_all(data).await?;
			file.sync_all().await?;
			rename(&tmp_path, dest).await?;
			Ok::<(), Error>(())
		}
		.await;

		if res.is_err() {
			debug!("write failed, removing tmpfile: {:?}", &tmp_path);
			let _ = remove_file(&tmp_path).await;
		}
		res
	}

	/// Reads only the header of a stored object and its length in bytes.
	/// `None` if the file does not exist.
	async fn read_header(&self, key: &str) -> DsResult<Option<(FileHeader, u64, u64)>> {
		let file = match File::open(self.file_path(key)?).await {
			Ok(file) => file,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};
		// Size and header come from the same open handle, so a concurrent
		// rename cannot mix two versions
		let total = file.metadata().await?.len();
		let mut reader = BufReader::new(file);

		let mut line = Vec::new();
		reader.read_until(b'\n', &mut line).await?;
		if line != MAGIC_LINE {
			return Ok(Some((FileHeader::headerless(), 0, total)));
		}

		let mut json = Vec::new();
		reader.read_until(b'\n', &mut json).await?;
		if json.pop() != Some(b'\n') {
			return Err(Error::Parse);
		}
		let header = serde_json::from_slice(&json)?;
		let header_len = (MAGIC_LINE.len() + json.len() + 1) as u64;
		Ok(Some((header, header_len, total)))
	}

	/// Metadata saved with a file, `None` if the file does not exist
	pub async fn file_metadata(&self, key: &str) -> DsResult<Option<FileMetadata>> {
		Ok(self.read_header(key).await?.map(|(header, _, _)| header.metadata))
	}

	/// Removes a file. Missing files are not an error.
	pub async fn delete_file(&self, key: &str) -> DsResult<()> {
		match remove_file(self.file_path(key)?).await {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(err.into()),
		}
	}
}

#[async_trait]
impl blob_adapter::BlobAdapter for BlobAdapterFs {
	async fn save_file(
		&self,
		key: &str,
		data: &[u8],
		content_type: &str,
		metadata: &FileMetadata,
	) -> DsResult<()> {
		let file_path = self.file_path(key)?;
		info!("save_file: {:?} ({} bytes, {})", file_path, data.len(), content_type);

		let header = FileHeader { content_type: content_type.to_string(), metadata: metadata.clone() };
		self.write_atomic(&file_path, &header.encode(data)?).await
	}

	async fn read_file(&self, key: &str) -> DsResult<Option<AssetHandle>> {
		let raw = match read(self.file_path(key)?).await {
			Ok(raw) => raw,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};
		let (header, payload) = split_object(&raw)?;
		Ok(Some(AssetHandle::new(payload, header.content_type)))
	}

	async fn stat_file(&self, key: &str) -> Option<u64> {
		let (_, header_len, total) = self.read_header(key).await.ok()??;
		Some(total.saturating_sub(header_len))
	}
}


// vim: ts=4
