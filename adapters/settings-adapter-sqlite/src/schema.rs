//! Database schema initialization
//!
//! Creates the settings table and its indexes if they do not exist yet.

use sqlx::SqlitePool;

use crate::table::SettingsTable;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool, t: &SettingsTable) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Owner columns hold '' for ownerless settings so the unique index also
	// covers app and global settings (NULLs never collide in SQLite)
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS {table} (
		{id} integer PRIMARY KEY,
		{key} text NOT NULL,
		{value} text NOT NULL,
		{data_type} text NOT NULL,
		{setting_type} text NOT NULL,
		{owner_type} text NOT NULL DEFAULT '',
		{owner_id} text NOT NULL DEFAULT '',
		{description} text,
		{created_at} integer NOT NULL DEFAULT (unixepoch()),
		{updated_at} integer NOT NULL DEFAULT (unixepoch())
	)",
		table = t.name,
		id = t.id,
		key = t.key,
		value = t.value,
		data_type = t.data_type,
		setting_type = t.setting_type,
		owner_type = t.owner_type,
		owner_id = t.owner_id,
		description = t.description,
		created_at = t.created_at,
		updated_at = t.updated_at,
	))
	.execute(&mut *tx)
	.await?;

	sqlx::query(&format!(
		"CREATE UNIQUE INDEX IF NOT EXISTS {} ON {}({}, {}, {}, {})",
		t.scope_index, t.name, t.key, t.setting_type, t.owner_type, t.owner_id
	))
	.execute(&mut *tx)
	.await?;

	sqlx::query(&format!(
		"CREATE INDEX IF NOT EXISTS {} ON {}({}, {})",
		t.owner_index, t.name, t.owner_type, t.owner_id
	))
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
