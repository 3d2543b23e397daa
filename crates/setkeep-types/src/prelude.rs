pub use crate::error::{Error, SkResult};
pub use crate::types::{OwnerRef, SettingId, SettingType, Timestamp};
pub use crate::value::{DataType, SettingValue};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
