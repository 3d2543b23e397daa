//! Store handle
//!
//! Holds the storage adapter and the configuration and hands out
//! repositories bound to a scope.

use std::sync::Arc;

use setkeep_types::{config::SettingsConfig, settings_adapter::SettingsAdapter};

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct SettingsStore {
	adapter: Arc<dyn SettingsAdapter>,
	config: Arc<SettingsConfig>,
}

impl SettingsStore {
	pub fn new(adapter: Arc<dyn SettingsAdapter>, config: SettingsConfig) -> SkResult<Self> {
		config.validate()?;
		Ok(Self { adapter, config: Arc::new(config) })
	}

	pub fn config(&self) -> &SettingsConfig {
		&self.config
	}

	/// Repository bound to any combination of scope components
	pub fn instance(
		&self,
		setting_type: Option<SettingType>,
		owner: Option<OwnerRef>,
		data_type: Option<DataType>,
	) -> SettingsRepository {
		self.scoped(Scope::new(setting_type, owner, data_type))
	}

	pub fn scoped(&self, scope: Scope) -> SettingsRepository {
		SettingsRepository::new(self.adapter.clone(), self.config.clone(), scope)
	}

	pub fn app(&self, data_type: Option<DataType>) -> SettingsRepository {
		self.instance(Some(SettingType::App), None, data_type)
	}

	pub fn global(&self, data_type: Option<DataType>) -> SettingsRepository {
		self.instance(Some(SettingType::Global), None, data_type)
	}

	pub fn user(&self, user: OwnerRef, data_type: Option<DataType>) -> SettingsRepository {
		self.instance(Some(SettingType::User), Some(user), data_type)
	}

	pub fn model(&self, owner: OwnerRef, data_type: Option<DataType>) -> SettingsRepository {
		self.instance(Some(SettingType::Model), Some(owner), data_type)
	}

	/// Repository selected by name, e.g. from a command line or a request parameter
	pub fn named(
		&self,
		name: ScopeName,
		owner: Option<OwnerRef>,
		data_type: Option<DataType>,
	) -> SkResult<SettingsRepository> {
		Ok(self.scoped(name.scope(owner, data_type)?))
	}
}

// vim: ts=4
