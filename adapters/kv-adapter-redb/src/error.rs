//! Failures of the redb-backed store, keeping the underlying cause

use std::fmt;

#[derive(Debug)]
pub enum Error {
	/// Storage directory could not be created
	Io(std::io::Error),
	Open(redb::DatabaseError),
	Transaction(redb::TransactionError),
	Table(redb::TableError),
	Storage(redb::StorageError),
	Commit(redb::CommitError),
	/// Stored text is not valid JSON, or a value could not be encoded
	Json(serde_json::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::Io(e) => write!(f, "cannot create storage directory: {}", e),
			Error::Open(e) => write!(f, "cannot open database: {}", e),
			Error::Transaction(e) => write!(f, "cannot begin transaction: {}", e),
			Error::Table(e) => write!(f, "cannot open kv table: {}", e),
			Error::Storage(e) => write!(f, "storage failure: {}", e),
			Error::Commit(e) => write!(f, "cannot commit: {}", e),
			Error::Json(e) => write!(f, "invalid stored value: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(e) => Some(e),
			Error::Open(e) => Some(e),
			Error::Transaction(e) => Some(e),
			Error::Table(e) => Some(e),
			Error::Storage(e) => Some(e),
			Error::Commit(e) => Some(e),
			Error::Json(e) => Some(e),
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Io(err)
	}
}

impl From<redb::DatabaseError> for Error {
	fn from(err: redb::DatabaseError) -> Self {
		Error::Open(err)
	}
}

impl From<redb::TransactionError> for Error {
	fn from(err: redb::TransactionError) -> Self {
		Error::Transaction(err)
	}
}

impl From<redb::TableError> for Error {
	fn from(err: redb::TableError) -> Self {
		Error::Table(err)
	}
}

impl From<redb::StorageError> for Error {
	fn from(err: redb::StorageError) -> Self {
		Error::Storage(err)
	}
}

impl From<redb::CommitError> for Error {
	fn from(err: redb::CommitError) -> Self {
		Error::Commit(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Json(err)
	}
}

impl From<Error> for dialset::error::Error {
	fn from(err: Error) -> Self {
		tracing::warn!("KV store: {}", err);
		match err {
			Error::Json(_) => dialset::error::Error::Parse,
			Error::Io(e) => dialset::error::Error::Io(e),
			_ => dialset::error::Error::DbError,
		}
	}
}

// vim: ts=4
