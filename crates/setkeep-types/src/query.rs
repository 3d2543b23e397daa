//! Setting queries built from composable filters
//!
//! A [`SettingQuery`] is a plain value: every builder method consumes the query
//! and returns the augmented one, so composing filters never touches state
//! outside the query being built. All filters are conjoined; the setting types
//! inside one [`Filter::SettingTypes`] group are disjoined.

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
	Key(Box<str>),
	/// Matches any of the listed types
	SettingTypes(Box<[SettingType]>),
	Owner(OwnerRef),
	DataType(DataType),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingQuery {
	filters: Vec<Filter>,
	limit: Option<u32>,
}

impl SettingQuery {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	pub fn where_key(self, key: impl Into<Box<str>>) -> Self {
		self.filter(Filter::Key(key.into()))
	}

	pub fn where_setting_type(self, setting_type: SettingType) -> Self {
		self.filter(Filter::SettingTypes(Box::new([setting_type])))
	}

	/// Restrict to any of the given types; an empty list adds no restriction
	pub fn where_setting_types(self, types: impl IntoIterator<Item = SettingType>) -> Self {
		let mut group: Vec<SettingType> = Vec::new();
		for typ in types {
			if !group.contains(&typ) {
				group.push(typ);
			}
		}

		if group.is_empty() {
			self
		} else {
			self.filter(Filter::SettingTypes(group.into_boxed_slice()))
		}
	}

	pub fn where_owner(self, owner: OwnerRef) -> Self {
		self.filter(Filter::Owner(owner))
	}

	pub fn where_data_type(self, data_type: DataType) -> Self {
		self.filter(Filter::DataType(data_type))
	}

	/// Limit the number of returned rows
	pub fn take(mut self, limit: u32) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	pub fn limit(&self) -> Option<u32> {
		self.limit
	}
}


// vim: ts=4
