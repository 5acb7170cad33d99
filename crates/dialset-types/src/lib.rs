//! Shared types, adapter traits, and core utilities for dialset.
//!
//! This crate contains the foundational types that are shared between the
//! resolver crate and all backend adapter implementations. Keeping them in a
//! separate crate lets adapter crates compile without pulling in the resolver.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod blob_adapter;
pub mod cache_adapter;
pub mod error;
pub mod kv_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
