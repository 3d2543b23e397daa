//! Settings adapter query tests
//!
//! Tests filtering by key, setting type, owner and data type, limits and ordering

use setkeep_adapter_sqlite::SettingsAdapterSqlite;
use setkeep_types::config::SettingsConfig;
use setkeep_types::prelude::*;
use setkeep_types::query::SettingQuery;
use setkeep_types::setting::NewSetting;
use setkeep_types::settings_adapter::SettingsAdapter;
use tempfile::TempDir;

async fn create_seeded_adapter() -> (SettingsAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter =
		SettingsAdapterSqlite::new(temp_dir.path().join("settings.db"), &SettingsConfig::default())
			.await
			.expect("Failed to create adapter");

	let alice = OwnerRef::new("user", "alice");
	let bob = OwnerRef::new("user", "bob");
	let post = OwnerRef::new("post", 42);

	let seed = [
		NewSetting::new("site.name", &"Setkeep".into(), SettingType::App, None, None),
		NewSetting::new("site.open", &true.into(), SettingType::Global, None, None),
		NewSetting::new("theme", &"light".into(), SettingType::App, None, None),
		NewSetting::new("theme", &"dark".into(), SettingType::User, Some(alice.clone()), None),
		NewSetting::new("theme", &"solar".into(), SettingType::User, Some(bob), None),
		NewSetting::new("page.size", &SettingValue::Int(25), SettingType::User, Some(alice), None),
		NewSetting::new("pinned", &false.into(), SettingType::Model, Some(post), None),
	];
	for new_setting in &seed {
		adapter.create_setting(new_setting).await.expect("Failed to seed setting");
	}

	(adapter, temp_dir)
}

fn keys(rows: &[setkeep_types::setting::SettingRow]) -> Vec<&str> {
	rows.iter().map(|row| row.key.as_ref()).collect()
}

#[tokio::test]
async fn test_list_all_in_insertion_order() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let rows = adapter.list_settings(&SettingQuery::new()).await.unwrap();

	assert_eq!(
		keys(&rows),
		vec!["site.name", "site.open", "theme", "theme", "theme", "page.size", "pinned"]
	);
	assert!(rows.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_filter_by_key() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let rows = adapter.list_settings(&SettingQuery::new().where_key("theme")).await.unwrap();
	assert_eq!(rows.len(), 3);

	let rows = adapter.list_settings(&SettingQuery::new().where_key("missing")).await.unwrap();
	assert!(rows.is_empty());
}

#[tokio::test]
async fn test_filter_by_setting_type() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let rows = adapter
		.list_settings(&SettingQuery::new().where_setting_type(SettingType::User))
		.await
		.unwrap();

	assert_eq!(keys(&rows), vec!["theme", "theme", "page.size"]);
	assert!(rows.iter().all(|row| row.setting_type == SettingType::User));
}

#[tokio::test]
async fn test_filter_by_setting_type_group() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let rows = adapter
		.list_settings(
			&SettingQuery::new().where_setting_types([SettingType::App, SettingType::Global]),
		)
		.await
		.unwrap();

	assert_eq!(keys(&rows), vec!["site.name", "site.open", "theme"]);
	assert!(rows.iter().all(|row| row.owner.is_none()));
}

#[tokio::test]
async fn test_filter_by_owner() {
	let (adapter, _temp) = create_seeded_adapter().await;
	let alice = OwnerRef::new("user", "alice");

	let rows = adapter.list_settings(&SettingQuery::new().where_owner(alice.clone())).await.unwrap();

	assert_eq!(keys(&rows), vec!["theme", "page.size"]);
	assert!(rows.iter().all(|row| row.owner.as_ref() == Some(&alice)));

	// Owner type is part of the match
	let rows = adapter
		.list_settings(&SettingQuery::new().where_owner(OwnerRef::new("post", "alice")))
		.await
		.unwrap();
	assert!(rows.is_empty());
}

#[tokio::test]
async fn test_filter_by_data_type() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let rows =
		adapter.list_settings(&SettingQuery::new().where_data_type(DataType::Bool)).await.unwrap();

	assert_eq!(keys(&rows), vec!["site.open", "pinned"]);
}

#[tokio::test]
async fn test_combined_filters() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let query = SettingQuery::new()
		.where_setting_type(SettingType::User)
		.where_owner(OwnerRef::new("user", "bob"))
		.where_key("theme");
	let rows = adapter.list_settings(&query).await.unwrap();

	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].value.as_ref(), "solar");
}

#[tokio::test]
async fn test_limit() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let rows = adapter.list_settings(&SettingQuery::new().take(2)).await.unwrap();
	assert_eq!(keys(&rows), vec!["site.name", "site.open"]);

	let row = adapter
		.read_setting(&SettingQuery::new().where_key("theme"))
		.await
		.unwrap()
		.expect("theme should exist");
	assert_eq!(row.setting_type, SettingType::App, "First matching row should be returned");
}

#[tokio::test]
async fn test_delete_with_filters() {
	let (adapter, _temp) = create_seeded_adapter().await;

	let deleted = adapter
		.delete_settings(&SettingQuery::new().where_owner(OwnerRef::new("user", "alice")))
		.await
		.unwrap();
	assert_eq!(deleted, 2);

	let rows = adapter.list_settings(&SettingQuery::new().where_key("theme")).await.unwrap();
	assert_eq!(rows.len(), 2);
}

// vim: ts=4
