//! Settings repository
//!
//! Builds queries from the repository scope and runs them through the storage
//! adapter. Reads return decoded [`Setting`]s; writes coerce the supplied
//! value to the declared data type before anything is persisted.

use std::sync::{Arc, OnceLock};

use setkeep_types::{
	codec,
	config::SettingsConfig,
	query::SettingQuery,
	setting::{NewSetting, Setting},
	settings_adapter::SettingsAdapter,
};

use crate::prelude::*;

/// Optional classification for [`SettingsRepository::set_with`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetOptions {
	/// Replaces the stored description when given
	pub description: Option<String>,
	pub setting_type: Option<SettingType>,
	pub data_type: Option<DataType>,
	pub owner: Option<OwnerRef>,
}

impl SetOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn setting_type(mut self, setting_type: SettingType) -> Self {
		self.setting_type = Some(setting_type);
		self
	}

	pub fn data_type(mut self, data_type: DataType) -> Self {
		self.data_type = Some(data_type);
		self
	}

	pub fn owner(mut self, owner: OwnerRef) -> Self {
		self.owner = Some(owner);
		self
	}
}

/// Explicit option wins, but must not contradict the scope
fn resolve<T>(explicit: Option<T>, scoped: Option<&T>, what: &str) -> SkResult<Option<T>>
where
	T: Clone + PartialEq + std::fmt::Display,
{
	match (explicit, scoped) {
		(Some(explicit), Some(scoped)) if explicit != *scoped => Err(Error::ScopeConflict(format!(
			"{} {} contradicts the repository scope ({})",
			what, explicit, scoped
		))),
		(Some(explicit), _) => Ok(Some(explicit)),
		(None, scoped) => Ok(scoped.cloned()),
	}
}

/// Explicit option must agree with the row that is about to be updated
fn check_existing<T>(explicit: Option<&T>, stored: Option<&T>, what: &str, key: &str) -> SkResult<()>
where
	T: PartialEq + std::fmt::Debug,
{
	match explicit {
		Some(explicit) if Some(explicit) != stored => Err(Error::ScopeConflict(format!(
			"setting '{}' is stored with {} {:?}, requested {:?}",
			key, what, stored, explicit
		))),
		_ => Ok(()),
	}
}

#[derive(Debug, Clone)]
pub struct SettingsRepository {
	adapter: Arc<dyn SettingsAdapter>,
	config: Arc<SettingsConfig>,
	scope: Scope,
	query: OnceLock<SettingQuery>,
}

impl SettingsRepository {
	pub(crate) fn new(
		adapter: Arc<dyn SettingsAdapter>,
		config: Arc<SettingsConfig>,
		scope: Scope,
	) -> Self {
		Self { adapter, config, scope, query: OnceLock::new() }
	}

	pub fn scope(&self) -> &Scope {
		&self.scope
	}

	/// Base query of the scope, built on first use
	pub fn query(&self) -> &SettingQuery {
		self.query.get_or_init(|| self.scope.query())
	}

	/// Fresh base query, independent of the cached one
	pub fn new_query(&self) -> SettingQuery {
		self.scope.query()
	}

	/// Same storage, another scope. The base query is rebuilt from the new scope.
	pub fn with_scope(&self, scope: Scope) -> Self {
		Self::new(self.adapter.clone(), self.config.clone(), scope)
	}

	pub fn where_key(&self, key: &str) -> SettingQuery {
		self.query().clone().where_key(key)
	}

	pub fn where_owner(&self, owner: OwnerRef) -> SettingQuery {
		self.query().clone().where_owner(owner)
	}

	/// Run a query, usually one continued from [`Self::where_key`] or [`Self::where_owner`]
	pub async fn fetch(&self, query: &SettingQuery) -> SkResult<SettingsCollection> {
		debug!("Settings query [{}]: {:?}", self.scope, query);
		let rows = self.adapter.list_settings(query).await?;
		SettingsCollection::from_rows(rows)
	}

	pub async fn find(&self, key: &str) -> SkResult<Option<Setting>> {
		let settings = self.fetch(&self.where_key(key).take(1)).await?;
		Ok(settings.into_first())
	}

	pub async fn find_or_fail(&self, key: &str) -> SkResult<Setting> {
		self.find(key).await?.ok_or(Error::NotFound)
	}

	/// Value of the setting, or `default` when the scope holds no such key
	pub async fn get(&self, key: &str, default: impl Into<SettingValue>) -> SkResult<SettingValue> {
		match self.find(key).await? {
			Some(setting) => Ok(setting.value),
			None => Ok(default.into()),
		}
	}

	async fn get_as(&self, key: &str, data_type: DataType) -> SkResult<Option<SettingValue>> {
		match self.find(key).await? {
			Some(setting) => codec::coerce(setting.value, data_type).map(Some),
			None => Ok(None),
		}
	}

	pub async fn get_string(&self, key: &str) -> SkResult<Option<String>> {
		Ok(self.get_as(key, DataType::String).await?.and_then(|v| v.as_str().map(str::to_owned)))
	}

	pub async fn get_int(&self, key: &str) -> SkResult<Option<i64>> {
		Ok(self.get_as(key, DataType::Int).await?.and_then(|v| v.as_int()))
	}

	pub async fn get_float(&self, key: &str) -> SkResult<Option<f64>> {
		Ok(self.get_as(key, DataType::Float).await?.and_then(|v| v.as_float()))
	}

	pub async fn get_bool(&self, key: &str) -> SkResult<Option<bool>> {
		Ok(self.get_as(key, DataType::Bool).await?.and_then(|v| v.as_bool()))
	}

	pub async fn get_json(&self, key: &str) -> SkResult<Option<serde_json::Value>> {
		Ok(self.get_as(key, DataType::Json).await?.and_then(|v| v.as_json().cloned()))
	}

	pub async fn set(&self, key: &str, value: impl Into<SettingValue>) -> SkResult<Setting> {
		self.set_with(key, value, SetOptions::default()).await
	}

	/// Update the setting found by [`Self::find`], or create it within the scope
	///
	/// The lookup only uses the repository scope, never `opts`. On a loosely
	/// scoped repository an existing row of another owner or setting type is
	/// therefore the one updated, and options contradicting it fail with
	/// [`Error::ScopeConflict`]. Scope the repository (e.g. [`Self::with_scope`])
	/// to create a row for a specific owner or setting type.
	pub async fn set_with(
		&self,
		key: &str,
		value: impl Into<SettingValue>,
		opts: SetOptions,
	) -> SkResult<Setting> {
		let value = value.into();

		if let Some(existing) = self.find(key).await? {
			check_existing(opts.data_type.as_ref(), Some(&existing.data_type), "data type", key)?;
			check_existing(
				opts.setting_type.as_ref(),
				Some(&existing.setting_type),
				"setting type",
				key,
			)?;
			check_existing(opts.owner.as_ref(), existing.owner.as_ref(), "owner", key)?;

			let value = codec::coerce(value, existing.data_type)?;
			let row = self
				.adapter
				.update_setting(existing.id, &codec::encode(&value), opts.description.as_deref())
				.await?;
			info!("Setting '{}' updated [{}] (id={})", key, self.scope, row.id);
			return row.into_setting();
		}

		let owner = resolve(opts.owner, self.scope.owner.as_ref(), "owner")?;
		let setting_type = resolve(opts.setting_type, self.scope.setting_type.as_ref(), "setting type")?
			.unwrap_or(if owner.is_some() {
				SettingType::Model
			} else {
				self.config.default_setting_type
			});
		let data_type = resolve(opts.data_type, self.scope.data_type.as_ref(), "data type")?
			.unwrap_or_else(|| value.data_type());

		let value = codec::coerce(value, data_type)?;
		let new_setting =
			NewSetting::new(key, &value, setting_type, owner, opts.description.as_deref());
		let row = self.adapter.create_setting(&new_setting).await?;
		info!("Setting '{}' stored [{}] (id={})", key, self.scope, row.id);
		row.into_setting()
	}

	pub async fn all(&self) -> SkResult<SettingsCollection> {
		self.fetch(self.query()).await
	}

	pub async fn all_of_setting_type(
		&self,
		setting_type: SettingType,
	) -> SkResult<SettingsCollection> {
		self.fetch(&self.query().clone().where_setting_type(setting_type)).await
	}

	pub async fn all_of_data_type(&self, data_type: DataType) -> SkResult<SettingsCollection> {
		self.fetch(&self.query().clone().where_data_type(data_type)).await
	}

	/// Settings owned by `owner`, optionally restricted to any of `filter_types`
	pub async fn all_related_to_model(
		&self,
		owner: OwnerRef,
		filter_types: &[SettingType],
	) -> SkResult<SettingsCollection> {
		let query = self.where_owner(owner).where_setting_types(filter_types.iter().copied());
		self.fetch(&query).await
	}

	/// Remove the scoped setting; `false` when there was nothing to remove
	pub async fn delete(&self, key: &str) -> SkResult<bool> {
		let deleted = self.adapter.delete_settings(&self.where_key(key)).await?;
		if deleted > 0 {
			info!("Setting '{}' deleted [{}] ({} rows)", key, self.scope, deleted);
		}
		Ok(deleted > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_prefers_explicit_without_conflict() {
		assert_eq!(resolve(Some(DataType::Int), None, "data type").unwrap(), Some(DataType::Int));
		assert_eq!(resolve(None, Some(&DataType::Int), "data type").unwrap(), Some(DataType::Int));
		assert_eq!(
			resolve(Some(DataType::Int), Some(&DataType::Int), "data type").unwrap(),
			Some(DataType::Int)
		);
		assert_eq!(resolve::<DataType>(None, None, "data type").unwrap(), None);
	}

	#[test]
	fn test_resolve_rejects_contradiction() {
		let res = resolve(Some(SettingType::Global), Some(&SettingType::App), "setting type");
		assert!(matches!(res, Err(Error::ScopeConflict(_))));
	}

	#[test]
	fn test_check_existing() {
		let owner = OwnerRef::new("user", 1);

		assert!(check_existing(None, Some(&DataType::Int), "data type", "k").is_ok());
		assert!(check_existing(Some(&DataType::Int), Some(&DataType::Int), "data type", "k").is_ok());
		assert!(check_existing(Some(&DataType::Bool), Some(&DataType::Int), "data type", "k").is_err());
		assert!(check_existing(Some(&owner), None, "owner", "k").is_err());
	}

	#[test]
	fn test_set_options_builder() {
		let opts = SetOptions::new().description("Theme").data_type(DataType::String);
		assert_eq!(opts.description.as_deref(), Some("Theme"));
		assert_eq!(opts.data_type, Some(DataType::String));
		assert_eq!(opts.setting_type, None);
	}
}

// vim: ts=4
