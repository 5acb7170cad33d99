pub use crate::error::{DsResult, Error};
pub use crate::types::{AssetHandle, TnId};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
