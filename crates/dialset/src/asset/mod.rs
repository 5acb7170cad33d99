//! Asset cascade: persisted overrides from the File Store, falling back to
//! the Static Bundle, plus derived variants of resolved assets.

pub mod cascade;
pub mod emailable;
pub mod static_bundle;

pub use cascade::{AssetResolver, LOGO_STATIC_NAME, LOGOTYPE_STATIC_NAME};
pub use emailable::resolve_emailable_asset;
pub use static_bundle::StaticBundle;

// vim: ts=4
