//! Layered resolution of runtime-tunable values.
//!
//! Feature flags, numeric load-control knobs, and branded assets are resolved
//! from several backends with a fixed precedence, so operational behavior can
//! be adjusted live, per deployment or per tenant, without redeploying:
//!
//! - [`tunable`]: scalar knobs read from the Live Cache with parse/validate/fallback
//! - [`settings`]: settings records merged from the Persistent Store, the Live
//!   Cache, and deployment overrides
//! - [`asset`]: File Store overrides over the Static Bundle, plus derived variants
//! - [`hooks`]: optional edition-specific overrides registered at startup
//!
//! [`runtime::RuntimeState`] ties them together behind one facade.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod asset;
pub mod config;
pub mod hooks;
pub mod prelude;
pub mod runtime;
pub mod settings;
pub mod tunable;

pub use dialset_types::{blob_adapter, cache_adapter, error, kv_adapter, types};

pub use config::Config;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeState};

// vim: ts=4
