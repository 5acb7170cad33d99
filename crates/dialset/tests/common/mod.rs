//! Shared helpers for dialset integration tests

#![allow(dead_code)]

pub mod adapters;
pub mod fixtures;

pub use adapters::*;
pub use fixtures::*;

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
		)
		.try_init();
}

// vim: ts=4
