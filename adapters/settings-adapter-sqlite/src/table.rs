//! Quoted table and column names, resolved once from the configuration

use setkeep_types::config::SettingsConfig;

use crate::utils::quote;

#[derive(Debug, Clone)]
pub(crate) struct SettingsTable {
	pub name: String,
	pub scope_index: String,
	pub owner_index: String,
	pub id: String,
	pub key: String,
	pub value: String,
	pub data_type: String,
	pub setting_type: String,
	pub owner_type: String,
	pub owner_id: String,
	pub description: String,
	pub created_at: String,
	pub updated_at: String,
	/// Select list aliasing the configured columns to their canonical names
	pub columns: String,
}

impl SettingsTable {
	pub fn new(config: &SettingsConfig) -> Self {
		let cols = &config.columns;
		let id = quote(&cols.id);
		let key = quote(&cols.key);
		let value = quote(&cols.value);
		let data_type = quote(&cols.data_type);
		let setting_type = quote(&cols.setting_type);
		let owner_type = quote(&cols.owner_type());
		let owner_id = quote(&cols.owner_id());
		let description = quote(&cols.description);
		let created_at = quote(&cols.created_at);
		let updated_at = quote(&cols.updated_at);

		let columns = format!(
			"{id} AS \"id\", {key} AS \"key\", {value} AS \"value\", \
			{data_type} AS \"data_type\", {setting_type} AS \"setting_type\", \
			{owner_type} AS \"owner_type\", {owner_id} AS \"owner_id\", \
			{description} AS \"description\", {created_at} AS \"created_at\", \
			{updated_at} AS \"updated_at\""
		);

		Self {
			name: quote(&config.table),
			scope_index: quote(&format!("idx_{}_scope", config.table)),
			owner_index: quote(&format!("idx_{}_owner", config.table)),
			id,
			key,
			value,
			data_type,
			setting_type,
			owner_type,
			owner_id,
			description,
			created_at,
			updated_at,
			columns,
		}
	}
}


// vim: ts=4
