//! Setting entity and its raw storage forms

use serde::Serialize;

use crate::codec;
use crate::prelude::*;

/// Runtime setting instance (decoded from the database)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
	pub id: SettingId,
	pub key: Box<str>,
	pub value: SettingValue,
	pub data_type: DataType,
	pub setting_type: SettingType,
	pub owner: Option<OwnerRef>,
	pub description: Option<Box<str>>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

impl Setting {
	/// The value's representation matches the declared data type
	pub fn is_valid(&self) -> bool {
		self.value.data_type() == self.data_type
	}

	pub fn is_owned_by(&self, owner: &OwnerRef) -> bool {
		self.owner.as_ref() == Some(owner)
	}
}

/// Setting row as stored: the value is still in its text form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
	pub id: SettingId,
	pub key: Box<str>,
	pub value: Box<str>,
	pub data_type: DataType,
	pub setting_type: SettingType,
	pub owner: Option<OwnerRef>,
	pub description: Option<Box<str>>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

impl SettingRow {
	/// Decode the stored value according to the declared data type
	pub fn into_setting(self) -> SkResult<Setting> {
		let value = codec::decode(&self.value, self.data_type).inspect_err(|err| {
			warn!("Setting '{}' (id={}) holds an undecodable value: {}", self.key, self.id, err);
		})?;

		Ok(Setting {
			id: self.id,
			key: self.key,
			value,
			data_type: self.data_type,
			setting_type: self.setting_type,
			owner: self.owner,
			description: self.description,
			created_at: self.created_at,
			updated_at: self.updated_at,
		})
	}
}

/// Data for creating a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSetting {
	pub key: Box<str>,
	pub value: Box<str>,
	pub data_type: DataType,
	pub setting_type: SettingType,
	pub owner: Option<OwnerRef>,
	pub description: Option<Box<str>>,
}

impl NewSetting {
	/// Encode a typed value into a new setting record
	pub fn new(
		key: &str,
		value: &SettingValue,
		setting_type: SettingType,
		owner: Option<OwnerRef>,
		description: Option<&str>,
	) -> Self {
		Self {
			key: key.into(),
			value: codec::encode(value).into_boxed_str(),
			data_type: value.data_type(),
			setting_type,
			owner,
			description: description.map(Box::from),
		}
	}

	/// Check the classification invariants before anything reaches storage
	pub fn validate(&self) -> SkResult<()> {
		if self.key.trim().is_empty() {
			return Err(Error::ValidationError("Setting key must not be empty".into()));
		}
		match (&self.owner, self.setting_type.requires_owner()) {
			(None, true) => Err(Error::ValidationError(format!(
				"{} setting '{}' needs an owner",
				self.setting_type, self.key
			))),
			(Some(owner), false) => Err(Error::ValidationError(format!(
				"{} setting '{}' cannot be owned by {}",
				self.setting_type, self.key, owner
			))),
			(Some(owner), true) => owner.validate(),
			(None, false) => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(value: &str, data_type: DataType) -> SettingRow {
		SettingRow {
			id: SettingId(1),
			key: "theme".into(),
			value: value.into(),
			data_type,
			setting_type: SettingType::App,
			owner: None,
			description: None,
			created_at: Timestamp(0),
			updated_at: Timestamp(0),
		}
	}

	#[test]
	fn test_row_decodes_into_typed_setting() {
		let setting = row("12", DataType::Int).into_setting().unwrap();
		assert_eq!(setting.value, SettingValue::Int(12));
		assert!(setting.is_valid());
	}

	#[test]
	fn test_row_with_corrupt_value_fails() {
		let err = row("twelve", DataType::Int).into_setting().unwrap_err();
		assert!(matches!(err, Error::TypeCoercion { expected: DataType::Int, .. }));
	}

	#[test]
	fn test_new_setting_owner_rules() {
		let value = SettingValue::from("dark");
		let user = OwnerRef::new("user", 1);

		assert!(NewSetting::new("theme", &value, SettingType::App, None, None).validate().is_ok());
		assert!(
			NewSetting::new("theme", &value, SettingType::User, Some(user.clone()), None)
				.validate()
				.is_ok()
		);
		assert!(NewSetting::new("theme", &value, SettingType::User, None, None).validate().is_err());
		assert!(
			NewSetting::new("theme", &value, SettingType::Global, Some(user), None)
				.validate()
				.is_err()
		);
		assert!(NewSetting::new(" ", &value, SettingType::App, None, None).validate().is_err());
	}
}

// vim: ts=4
