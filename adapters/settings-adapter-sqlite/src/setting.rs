//! Settings rows: filtered listing, atomic upsert, update and delete

use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

use setkeep_types::{
	prelude::*,
	query::{Filter, SettingQuery},
	setting::{NewSetting, SettingRow},
};

use crate::table::SettingsTable;
use crate::utils::*;

/// Append the WHERE clause for all query filters
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, t: &SettingsTable, filters: &[Filter]) {
	query.push(" WHERE 1=1");
	for filter in filters {
		match filter {
			Filter::Key(key) => {
				query.push(format!(" AND {}=", t.key)).push_bind(key.to_string());
			}
			Filter::SettingTypes(types) => {
				query.push(format!(" AND {} IN ", t.setting_type));
				push_in(query, types.iter().map(SettingType::as_str));
			}
			Filter::Owner(owner) => {
				query.push(format!(" AND {}=", t.owner_type)).push_bind(owner.typ.to_string());
				query.push(format!(" AND {}=", t.owner_id)).push_bind(owner.id.to_string());
			}
			Filter::DataType(data_type) => {
				query.push(format!(" AND {}=", t.data_type)).push_bind(data_type.as_str());
			}
		}
	}
}

fn decode_err(err: Error) -> sqlx::Error {
	sqlx::Error::Decode(Box::new(err))
}

fn map_setting_row(row: &SqliteRow) -> Result<SettingRow, sqlx::Error> {
	let owner_type: String = row.try_get("owner_type")?;
	let owner_id: String = row.try_get("owner_id")?;

	Ok(SettingRow {
		id: SettingId(row.try_get("id")?),
		key: row.try_get::<String, _>("key")?.into_boxed_str(),
		value: row.try_get::<String, _>("value")?.into_boxed_str(),
		data_type: row.try_get::<&str, _>("data_type")?.parse().map_err(decode_err)?,
		setting_type: row.try_get::<&str, _>("setting_type")?.parse().map_err(decode_err)?,
		owner: if owner_type.is_empty() && owner_id.is_empty() {
			None
		} else {
			Some(OwnerRef::new(owner_type, owner_id))
		},
		description: row.try_get::<Option<String>, _>("description")?.map(String::into_boxed_str),
		created_at: Timestamp(row.try_get("created_at")?),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

/// List settings matching the query, in insertion order
pub(crate) async fn list(
	db: &SqlitePool,
	t: &SettingsTable,
	opts: &SettingQuery,
) -> SkResult<Vec<SettingRow>> {
	let mut query = QueryBuilder::new(format!("SELECT {} FROM {}", t.columns, t.name));
	push_filters(&mut query, t, opts.filters());
	query.push(format!(" ORDER BY {}", t.id));
	if let Some(limit) = opts.limit() {
		query.push(" LIMIT ").push_bind(i64::from(limit));
	}
	debug!("SQL: {}", query.sql());

	let rows = query.build().fetch_all(db).await.inspect_err(inspect).map_err(db_error)?;

	collect_res(rows.iter().map(map_setting_row))
}

/// Insert a setting or update the value of the row sharing its key, type and owner
pub(crate) async fn create(
	db: &SqlitePool,
	t: &SettingsTable,
	setting: &NewSetting,
) -> SkResult<SettingRow> {
	let (owner_type, owner_id) = match &setting.owner {
		Some(owner) => (owner.typ.to_string(), owner.id.to_string()),
		None => (String::new(), String::new()),
	};

	// The conflict update only applies to a row of the same data type
	let sql = format!(
		"INSERT INTO {table} ({key}, {value}, {data_type}, {setting_type}, {owner_type}, {owner_id}, {description})
		VALUES (?, ?, ?, ?, ?, ?, ?)
		ON CONFLICT ({key}, {setting_type}, {owner_type}, {owner_id}) DO UPDATE SET
			{value}=excluded.{value},
			{description}=coalesce(excluded.{description}, {table}.{description}),
			{updated_at}=unixepoch()
		WHERE {table}.{data_type}=excluded.{data_type}
		RETURNING {columns}",
		table = t.name,
		key = t.key,
		value = t.value,
		data_type = t.data_type,
		setting_type = t.setting_type,
		owner_type = t.owner_type,
		owner_id = t.owner_id,
		description = t.description,
		updated_at = t.updated_at,
		columns = t.columns,
	);

	let res = sqlx::query(&sql)
		.bind(setting.key.as_ref())
		.bind(setting.value.as_ref())
		.bind(setting.data_type.as_str())
		.bind(setting.setting_type.as_str())
		.bind(owner_type)
		.bind(owner_id)
		.bind(setting.description.as_deref())
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(db_error)?;

	match res {
		Some(row) => map_setting_row(&row).inspect_err(inspect).map_err(db_error),
		None => Err(Error::ScopeConflict(format!(
			"setting '{}' already exists as {} {} with another data type than {}",
			setting.key,
			setting.setting_type,
			setting.owner.as_ref().map_or_else(|| "(no owner)".to_string(), ToString::to_string),
			setting.data_type
		))),
	}
}

/// Replace the value of an existing setting
pub(crate) async fn update(
	db: &SqlitePool,
	t: &SettingsTable,
	id: SettingId,
	value: &str,
	description: Option<&str>,
) -> SkResult<SettingRow> {
	let sql = format!(
		"UPDATE {table} SET {value}=?, {description}=coalesce(?, {description}), {updated_at}=unixepoch()
		WHERE {id}=? RETURNING {columns}",
		table = t.name,
		value = t.value,
		description = t.description,
		updated_at = t.updated_at,
		id = t.id,
		columns = t.columns,
	);

	let res = sqlx::query(&sql).bind(value).bind(description).bind(id.0).fetch_one(db).await;

	map_res(res, |row| map_setting_row(&row))
}

/// Delete settings matching the query
pub(crate) async fn delete(
	db: &SqlitePool,
	t: &SettingsTable,
	opts: &SettingQuery,
) -> SkResult<u64> {
	let mut query = QueryBuilder::new(format!("DELETE FROM {}", t.name));
	push_filters(&mut query, t, opts.filters());
	debug!("SQL: {}", query.sql());

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(db_error)?;

	Ok(res.rows_affected())
}

// vim: ts=4
