//! SQLite adapter for setkeep settings
//!
//! Stores every setting in a single table whose name and columns come from
//! [`SettingsConfig`]. Creation is an atomic upsert backed by a unique index
//! over key, setting type and owner.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use setkeep_types::{
	config::SettingsConfig,
	prelude::*,
	query::SettingQuery,
	setting::{NewSetting, SettingRow},
	settings_adapter::SettingsAdapter,
};

mod schema;
mod setting;
mod table;
mod utils;

use table::SettingsTable;
use utils::{db_error, inspect};

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
	table: SettingsTable,
}

impl SettingsAdapterSqlite {
	/// Open (or create) the database file and make sure the settings table exists
	pub async fn new(path: impl AsRef<Path>, config: &SettingsConfig) -> SkResult<Self> {
		config.validate()?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(config.max_connections)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(db_error)?;

		let table = SettingsTable::new(config);
		schema::init_db(&db, &table).await.inspect_err(inspect).map_err(db_error)?;

		info!("Settings database ready: {} (table {})", path.as_ref().display(), config.table);
		Ok(Self { db, table })
	}

	/// Close the connection pool
	pub async fn close(&self) {
		self.db.close().await;
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn list_settings(&self, query: &SettingQuery) -> SkResult<Vec<SettingRow>> {
		setting::list(&self.db, &self.table, query).await
	}

	async fn create_setting(&self, new_setting: &NewSetting) -> SkResult<SettingRow> {
		new_setting.validate()?;
		setting::create(&self.db, &self.table, new_setting).await
	}

	async fn update_setting(
		&self,
		id: SettingId,
		value: &str,
		description: Option<&str>,
	) -> SkResult<SettingRow> {
		setting::update(&self.db, &self.table, id, value, description).await
	}

	async fn delete_settings(&self, query: &SettingQuery) -> SkResult<u64> {
		setting::delete(&self.db, &self.table, query).await
	}
}

// vim: ts=4
