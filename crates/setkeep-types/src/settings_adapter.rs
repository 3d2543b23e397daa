//! Adapter that persists settings rows.
//!
//! The repository only relies on this capability set; it never assumes a
//! particular storage engine beyond a relational table holding the configured
//! columns.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::query::SettingQuery;
use crate::setting::{NewSetting, SettingRow};

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// List rows matching all filters of the query, in insertion order
	async fn list_settings(&self, query: &SettingQuery) -> SkResult<Vec<SettingRow>>;

	/// First row matching the query
	async fn read_setting(&self, query: &SettingQuery) -> SkResult<Option<SettingRow>> {
		let rows = self.list_settings(&query.clone().take(1)).await?;
		Ok(rows.into_iter().next())
	}

	/// Create a setting, or update the value of the row with the same key,
	/// setting type and owner.
	///
	/// Must be atomic. A conflicting row with a different data type is left
	/// untouched and reported as `Error::ScopeConflict`.
	async fn create_setting(&self, setting: &NewSetting) -> SkResult<SettingRow>;

	/// Replace the stored value of an existing row; a `None` description keeps the old one
	async fn update_setting(
		&self,
		id: SettingId,
		value: &str,
		description: Option<&str>,
	) -> SkResult<SettingRow>;

	/// Delete all rows matching the query, returns the number of deleted rows
	async fn delete_settings(&self, query: &SettingQuery) -> SkResult<u64>;
}

// vim: ts=4
