//! Store configuration
//!
//! Table and column names and the default classification are injected through
//! [`SettingsConfig`] instead of being read from global state. Names end up in
//! SQL verbatim, so they are restricted to plain identifiers.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

const MAX_IDENTIFIER_LEN: usize = 64;

/// Column names of the settings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingColumns {
	pub id: Box<str>,
	pub key: Box<str>,
	pub value: Box<str>,
	pub data_type: Box<str>,
	pub setting_type: Box<str>,
	/// Owner relation name; the owner is stored in `<owner>_type` and `<owner>_id`
	pub owner: Box<str>,
	pub description: Box<str>,
	pub created_at: Box<str>,
	pub updated_at: Box<str>,
}

impl Default for SettingColumns {
	fn default() -> Self {
		Self {
			id: "id".into(),
			key: "key".into(),
			value: "value".into(),
			data_type: "data_type".into(),
			setting_type: "setting_type".into(),
			owner: "owner".into(),
			description: "description".into(),
			created_at: "created_at".into(),
			updated_at: "updated_at".into(),
		}
	}
}

impl SettingColumns {
	pub fn owner_type(&self) -> String {
		format!("{}_type", self.owner)
	}

	pub fn owner_id(&self) -> String {
		format!("{}_id", self.owner)
	}

	/// All physical column names, in table order
	pub fn physical(&self) -> Vec<String> {
		vec![
			self.id.to_string(),
			self.key.to_string(),
			self.value.to_string(),
			self.data_type.to_string(),
			self.setting_type.to_string(),
			self.owner_type(),
			self.owner_id(),
			self.description.to_string(),
			self.created_at.to_string(),
			self.updated_at.to_string(),
		]
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
	pub table: Box<str>,
	pub columns: SettingColumns,
	/// Classification of new ownerless settings when neither the call nor the scope names one
	pub default_setting_type: SettingType,
	/// Connection pool size for pooled adapters
	pub max_connections: u32,
}

impl Default for SettingsConfig {
	fn default() -> Self {
		Self {
			table: "settings".into(),
			columns: SettingColumns::default(),
			default_setting_type: SettingType::App,
			max_connections: 5,
		}
	}
}

impl SettingsConfig {
	/// Create a builder starting from the defaults
	pub fn builder() -> SettingsConfigBuilder {
		SettingsConfigBuilder::new()
	}

	/// Check a configuration obtained by other means (e.g. deserialized)
	pub fn validate(&self) -> SkResult<()> {
		check_identifier("table", &self.table)?;

		let physical = self.columns.physical();
		for (i, column) in physical.iter().enumerate() {
			check_identifier("column", column)?;
			if physical[..i].iter().any(|c| c.eq_ignore_ascii_case(column)) {
				return Err(Error::ConfigError(format!("Column '{}' is configured twice", column)));
			}
		}

		if self.default_setting_type.requires_owner() {
			return Err(Error::ConfigError(format!(
				"Default setting type must be ownerless, got '{}'",
				self.default_setting_type
			)));
		}

		if self.max_connections == 0 {
			return Err(Error::ConfigError("max_connections must be at least 1".into()));
		}

		Ok(())
	}
}

fn check_identifier(what: &str, name: &str) -> SkResult<()> {
	let mut chars = name.chars();
	let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
	let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

	if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN {
		Ok(())
	} else {
		Err(Error::ConfigError(format!("Invalid {} name: '{}'", what, name)))
	}
}

/// Builder for SettingsConfig with fluent API
#[derive(Debug, Clone)]
pub struct SettingsConfigBuilder {
	config: SettingsConfig,
}

impl SettingsConfigBuilder {
	pub fn new() -> Self {
		Self { config: SettingsConfig::default() }
	}

	pub fn table(mut self, table: impl Into<Box<str>>) -> Self {
		self.config.table = table.into();
		self
	}

	pub fn columns(mut self, columns: SettingColumns) -> Self {
		self.config.columns = columns;
		self
	}

	pub fn key_column(mut self, column: impl Into<Box<str>>) -> Self {
		self.config.columns.key = column.into();
		self
	}

	pub fn value_column(mut self, column: impl Into<Box<str>>) -> Self {
		self.config.columns.value = column.into();
		self
	}

	/// Set the owner relation name (columns become `<name>_type` and `<name>_id`)
	pub fn owner_relation(mut self, relation: impl Into<Box<str>>) -> Self {
		self.config.columns.owner = relation.into();
		self
	}

	pub fn default_setting_type(mut self, setting_type: SettingType) -> Self {
		self.config.default_setting_type = setting_type;
		self
	}

	pub fn max_connections(mut self, max_connections: u32) -> Self {
		self.config.max_connections = max_connections;
		self
	}

	pub fn build(self) -> SkResult<SettingsConfig> {
		self.config.validate()?;
		debug!("Settings config: table={} owner={}", self.config.table, self.config.columns.owner);
		Ok(self.config)
	}
}

impl Default for SettingsConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config_is_valid() {
		let config = SettingsConfig::builder().build().unwrap();
		assert_eq!(config, SettingsConfig::default());
		assert_eq!(config.columns.owner_type(), "owner_type");
		assert_eq!(config.columns.owner_id(), "owner_id");
	}

	#[test]
	fn test_custom_names() {
		let config = SettingsConfig::builder()
			.table("app_settings")
			.value_column("payload")
			.owner_relation("settable")
			.build()
			.unwrap();
		assert_eq!(config.columns.value.as_ref(), "payload");
		assert_eq!(config.columns.owner_type(), "settable_type");
	}

	#[test]
	fn test_rejects_unsafe_identifiers() {
		assert!(SettingsConfig::builder().table("settings; DROP TABLE x").build().is_err());
		assert!(SettingsConfig::builder().key_column("1key").build().is_err());
		assert!(SettingsConfig::builder().value_column("").build().is_err());
	}

	#[test]
	fn test_rejects_duplicate_columns() {
		let res = SettingsConfig::builder().value_column("key").build();
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_rejects_owned_default_type() {
		assert!(SettingsConfig::builder().default_setting_type(SettingType::User).build().is_err());
		assert!(SettingsConfig::builder().default_setting_type(SettingType::Global).build().is_ok());
	}

	#[test]
	fn test_deserialize_partial_config() {
		let config: SettingsConfig =
			serde_json::from_str(r#"{"table": "prefs", "columns": {"owner": "subject"}}"#).unwrap();
		assert_eq!(config.table.as_ref(), "prefs");
		assert_eq!(config.columns.key.as_ref(), "key");
		assert_eq!(config.columns.owner_id(), "subject_id");
		assert_eq!(config.default_setting_type, SettingType::App);
		assert!(config.validate().is_ok());
	}
}

// vim: ts=4
