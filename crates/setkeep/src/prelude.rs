pub use setkeep_types::prelude::*;

pub use crate::collection::SettingsCollection;
pub use crate::owner::HasSettings;
pub use crate::repository::{SetOptions, SettingsRepository};
pub use crate::scope::{Scope, ScopeName};
pub use crate::store::SettingsStore;

// vim: ts=4
