//! Typed container over query results

use serde::Serialize;
use std::collections::BTreeMap;

use setkeep_types::setting::{Setting, SettingRow};

use crate::prelude::*;

/// Ordered settings, in the order the query returned them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsCollection {
	settings: Vec<Setting>,
}

impl SettingsCollection {
	pub fn new(settings: Vec<Setting>) -> Self {
		Self { settings }
	}

	/// Decode raw rows; the first undecodable row fails the whole collection
	pub fn from_rows(rows: Vec<SettingRow>) -> SkResult<Self> {
		rows.into_iter().map(SettingRow::into_setting).collect::<SkResult<Vec<_>>>().map(Self::new)
	}

	pub fn first(&self) -> Option<&Setting> {
		self.settings.first()
	}

	pub fn first_or_fail(&self) -> SkResult<&Setting> {
		self.settings.first().ok_or(Error::NotFound)
	}

	/// Take ownership of the first setting
	pub fn into_first(self) -> Option<Setting> {
		self.settings.into_iter().next()
	}

	pub fn find_key(&self, key: &str) -> Option<&Setting> {
		self.settings.iter().find(|setting| &*setting.key == key)
	}

	pub fn len(&self) -> usize {
		self.settings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.settings.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
		self.settings.iter()
	}

	pub fn keys(&self) -> Vec<&str> {
		self.settings.iter().map(|setting| setting.key.as_ref()).collect()
	}

	/// Key to value map. When a key occurs more than once the first occurrence wins.
	pub fn to_map(&self) -> BTreeMap<Box<str>, SettingValue> {
		let mut map = BTreeMap::new();
		for setting in &self.settings {
			map.entry(setting.key.clone()).or_insert_with(|| setting.value.clone());
		}
		map
	}

	/// Check that every value still matches its declared data type
	pub fn validate(&self) -> SkResult<()> {
		match self.settings.iter().find(|setting| !setting.is_valid()) {
			Some(setting) => Err(Error::type_coercion(
				setting.data_type,
				setkeep_types::codec::describe(&setting.value),
			)),
			None => Ok(()),
		}
	}
}

impl IntoIterator for SettingsCollection {
	type Item = Setting;
	type IntoIter = std::vec::IntoIter<Setting>;

	fn into_iter(self) -> Self::IntoIter {
		self.settings.into_iter()
	}
}

impl<'a> IntoIterator for &'a SettingsCollection {
	type Item = &'a Setting;
	type IntoIter = std::slice::Iter<'a, Setting>;

	fn into_iter(self) -> Self::IntoIter {
		self.settings.iter()
	}
}

impl FromIterator<Setting> for SettingsCollection {
	fn from_iter<I: IntoIterator<Item = Setting>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}


// vim: ts=4
