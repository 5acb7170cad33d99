//! Error type shared by the resolver and all adapters.

use std::fmt;

pub type DsResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Key, file, or static asset does not exist
	NotFound,
	/// Stored bytes could not be parsed
	Parse,
	/// Backend storage failure
	DbError,
	ConfigError(String),
	ValidationError(String),
	ImageError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Parse => write!(f, "parse error"),
			Error::DbError => write!(f, "database error"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ImageError(msg) => write!(f, "image error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		if err.kind() == std::io::ErrorKind::NotFound {
			return Self::NotFound;
		}
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::debug!("serde_json: {}", err);
		Self::Parse
	}
}

impl From<std::num::ParseIntError> for Error {
	fn from(_err: std::num::ParseIntError) -> Self {
		Self::Parse
	}
}

impl From<std::num::ParseFloatError> for Error {
	fn from(_err: std::num::ParseFloatError) -> Self {
		Self::Parse
	}
}

impl From<std::str::Utf8Error> for Error {
	fn from(_err: std::str::Utf8Error) -> Self {
		Self::Parse
	}
}

impl From<tokio::task::JoinError> for Error {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::Internal(format!("blocking task failed: {}", err))
	}
}

#[cfg(feature = "image")]
impl From<image::ImageError> for Error {
	fn from(err: image::ImageError) -> Self {
		Self::ImageError(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_io_not_found_maps_to_not_found() {
		let err: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
		assert!(matches!(err, Error::NotFound));

		let err: Error = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
		assert!(matches!(err, Error::Io(_)));
	}

	#[test]
	fn test_parse_errors() {
		let err: Error = "abc".parse::<i64>().unwrap_err().into();
		assert!(matches!(err, Error::Parse));
		let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, Error::Parse));
	}

	#[test]
	fn test_display() {
		assert_eq!(Error::NotFound.to_string(), "not found");
		assert_eq!(Error::ConfigError("x".into()).to_string(), "config error: x");
	}
}

// vim: ts=4
