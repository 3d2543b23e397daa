//! Owner trait tests

use std::sync::Arc;

use setkeep::config::SettingsConfig;
use setkeep::prelude::*;
use setkeep_adapter_sqlite::SettingsAdapterSqlite;
use tempfile::TempDir;

struct Team {
	id: u32,
}

impl HasSettings for Team {
	fn settings_owner(&self) -> OwnerRef {
		OwnerRef::new("team", self.id)
	}
}

async fn create_test_store() -> (SettingsStore, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let config = SettingsConfig::default();

	let adapter = SettingsAdapterSqlite::new(temp_dir.path().join("settings.db"), &config)
		.await
		.expect("Failed to create adapter");
	let store = SettingsStore::new(Arc::new(adapter), config).expect("Failed to create store");

	(store, temp_dir)
}

#[tokio::test]
async fn test_record_without_settings() {
	let (store, _temp) = create_test_store().await;

	let settings = Team { id: 1 }.settings(&store).await.unwrap();
	assert!(settings.is_empty());
}

#[tokio::test]
async fn test_record_settings() {
	let (store, _temp) = create_test_store().await;
	let red = Team { id: 1 };
	let blue = Team { id: 2 };

	red.model_settings(&store).set("color", "red").await.unwrap();
	red.model_settings(&store).set("size", 5).await.unwrap();
	blue.model_settings(&store).set("color", "blue").await.unwrap();
	store.app(None).set("color", "grey").await.unwrap();

	let settings = red.settings(&store).await.unwrap();
	assert_eq!(settings.keys(), vec!["color", "size"]);
	assert_eq!(settings.to_map().get("color"), Some(&SettingValue::from("red")));
	assert!(settings.iter().all(|s| s.setting_type == SettingType::Model));

	let settings = blue.settings(&store).await.unwrap();
	assert_eq!(settings.len(), 1);
}

// vim: ts=4
