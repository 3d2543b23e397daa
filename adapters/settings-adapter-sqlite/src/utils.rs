//! Shared utilities for SQLite adapter
//!
//! Error mapping and query building helpers used by the statement modules.

use setkeep_types::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Build an IN clause with parameterized values
pub(crate) fn push_in<'a>(
	query: &mut sqlx::QueryBuilder<'a, sqlx::Sqlite>,
	values: impl IntoIterator<Item = &'static str>,
) {
	query.push("(");
	for (i, value) in values.into_iter().enumerate() {
		if i > 0 {
			query.push(", ");
		}
		query.push_bind(value);
	}
	query.push(")");
}

/// Quote a validated identifier
pub(crate) fn quote(ident: &str) -> String {
	format!("\"{}\"", ident)
}

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Translate a driver error, keeping the original as the error source
pub(crate) fn db_error(err: sqlx::Error) -> Error {
	match err {
		sqlx::Error::RowNotFound => Error::NotFound,
		err => Error::persistence(err),
	}
}

/// Map a single-row query result, translating SQL errors to SkResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> SkResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(db_error),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(db_error(err))
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> SkResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(db_error)?);
	}
	Ok(items)
}

// vim: ts=4
