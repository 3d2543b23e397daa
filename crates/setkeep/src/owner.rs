//! Records that own settings

use async_trait::async_trait;

use crate::prelude::*;

/// Implemented by any record settings can be attached to
#[async_trait]
pub trait HasSettings: Sync {
	fn settings_owner(&self) -> OwnerRef;

	/// Every setting owned by this record, whatever its setting type
	async fn settings(&self, store: &SettingsStore) -> SkResult<SettingsCollection> {
		store.instance(None, Some(self.settings_owner()), None).all().await
	}

	/// Repository for the model settings of this record
	fn model_settings(&self, store: &SettingsStore) -> SettingsRepository {
		store.model(self.settings_owner(), None)
	}
}

// vim: ts=4
