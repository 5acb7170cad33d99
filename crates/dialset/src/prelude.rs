pub use dialset_types::error::{DsResult, Error};
pub use dialset_types::types::{AssetHandle, TnId, tenant_key};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
