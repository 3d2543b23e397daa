//! Repository scopes
//!
//! A [`Scope`] is the immutable `(setting type, owner, data type)` triple a
//! repository is bound to. Every present component narrows the base query.

use std::{fmt, str::FromStr};

use setkeep_types::query::SettingQuery;

use crate::prelude::*;

/// Components narrowing the settings a repository sees and modifies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
	pub setting_type: Option<SettingType>,
	pub owner: Option<OwnerRef>,
	pub data_type: Option<DataType>,
}

impl Scope {
	/// Unrestricted scope: every setting in the table
	pub fn any() -> Self {
		Self::default()
	}

	pub fn new(
		setting_type: Option<SettingType>,
		owner: Option<OwnerRef>,
		data_type: Option<DataType>,
	) -> Self {
		Self { setting_type, owner, data_type }
	}

	pub fn with_setting_type(mut self, setting_type: SettingType) -> Self {
		self.setting_type = Some(setting_type);
		self
	}

	pub fn with_owner(mut self, owner: OwnerRef) -> Self {
		self.owner = Some(owner);
		self
	}

	pub fn with_data_type(mut self, data_type: DataType) -> Self {
		self.data_type = Some(data_type);
		self
	}

	pub fn is_unrestricted(&self) -> bool {
		self.setting_type.is_none() && self.owner.is_none() && self.data_type.is_none()
	}

	/// Conjoin the scope components to a query: setting type, owner, data type
	pub fn apply(&self, mut query: SettingQuery) -> SettingQuery {
		if let Some(setting_type) = self.setting_type {
			query = query.where_setting_type(setting_type);
		}
		if let Some(owner) = &self.owner {
			query = query.where_owner(owner.clone());
		}
		if let Some(data_type) = self.data_type {
			query = query.where_data_type(data_type);
		}
		query
	}

	/// Base query of this scope
	pub fn query(&self) -> SettingQuery {
		self.apply(SettingQuery::new())
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_unrestricted() {
			return f.write_str("any");
		}

		let mut parts = Vec::new();
		if let Some(setting_type) = self.setting_type {
			parts.push(setting_type.to_string());
		}
		if let Some(owner) = &self.owner {
			parts.push(owner.to_string());
		}
		if let Some(data_type) = self.data_type {
			parts.push(format!("<{}>", data_type));
		}
		f.write_str(&parts.join(" "))
	}
}

// ScopeName //
//***********//
/// Named repository constructors, selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeName {
	Any,
	App,
	Global,
	User,
	Model,
}

impl ScopeName {
	pub fn setting_type(self) -> Option<SettingType> {
		match self {
			ScopeName::Any => None,
			ScopeName::App => Some(SettingType::App),
			ScopeName::Global => Some(SettingType::Global),
			ScopeName::User => Some(SettingType::User),
			ScopeName::Model => Some(SettingType::Model),
		}
	}

	/// Build the scope, checking the owner against the setting type
	pub fn scope(self, owner: Option<OwnerRef>, data_type: Option<DataType>) -> SkResult<Scope> {
		match (self.setting_type(), &owner) {
			(Some(setting_type), None) if setting_type.requires_owner() => {
				return Err(Error::ValidationError(format!("{} scope needs an owner", self)));
			}
			(Some(setting_type), Some(owner)) if !setting_type.requires_owner() => {
				return Err(Error::ValidationError(format!(
					"{} scope cannot be owned by {}",
					self, owner
				)));
			}
			(_, Some(owner)) => owner.validate()?,
			_ => (),
		}

		Ok(Scope::new(self.setting_type(), owner, data_type))
	}
}

impl fmt::Display for ScopeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.setting_type() {
			Some(setting_type) => write!(f, "{}", setting_type),
			None => f.write_str("any"),
		}
	}
}

impl FromStr for ScopeName {
	type Err = Error;

	fn from_str(s: &str) -> SkResult<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"any" | "all" | "instance" => Ok(ScopeName::Any),
			"app" | "byapptype" => Ok(ScopeName::App),
			"global" | "byglobaltype" => Ok(ScopeName::Global),
			"user" | "byusertype" => Ok(ScopeName::User),
			"model" | "bymodeltype" => Ok(ScopeName::Model),
			_ => Err(Error::ValidationError(format!("Unknown scope: {}", s))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use setkeep_types::query::Filter;

	#[test]
	fn test_apply_in_fixed_order() {
		let owner = OwnerRef::new("user", 1);
		let scope = Scope::any()
			.with_data_type(DataType::Bool)
			.with_owner(owner.clone())
			.with_setting_type(SettingType::User);

		let query = scope.query();
		assert_eq!(
			query.filters(),
			&[
				Filter::SettingTypes(Box::new([SettingType::User])),
				Filter::Owner(owner),
				Filter::DataType(DataType::Bool),
			]
		);
	}

	#[test]
	fn test_unrestricted_scope_adds_nothing() {
		assert!(Scope::any().query().filters().is_empty());
		assert_eq!(Scope::any().to_string(), "any");
	}

	#[test]
	fn test_apply_keeps_existing_filters() {
		let query = Scope::any().with_setting_type(SettingType::App).apply(
			SettingQuery::new().where_key("theme"),
		);

		assert_eq!(query.filters().len(), 2);
		assert_eq!(query.filters()[0], Filter::Key("theme".into()));
	}

	#[test]
	fn test_scope_name_parse() {
		assert_eq!("app".parse::<ScopeName>().unwrap(), ScopeName::App);
		assert_eq!("byUserType".parse::<ScopeName>().unwrap(), ScopeName::User);
		assert_eq!("MODEL".parse::<ScopeName>().unwrap(), ScopeName::Model);
		assert_eq!("any".parse::<ScopeName>().unwrap(), ScopeName::Any);
		assert!("team".parse::<ScopeName>().is_err());
	}

	#[test]
	fn test_scope_name_owner_rules() {
		let owner = OwnerRef::new("user", "u1");

		assert!(ScopeName::User.scope(None, None).is_err());
		assert!(ScopeName::App.scope(Some(owner.clone()), None).is_err());
		assert!(ScopeName::Model.scope(Some(OwnerRef::new("post", "")), None).is_err());

		let scope = ScopeName::User.scope(Some(owner.clone()), Some(DataType::String)).unwrap();
		assert_eq!(scope, Scope::new(Some(SettingType::User), Some(owner.clone()), Some(DataType::String)));

		// Any accepts an optional owner
		let scope = ScopeName::Any.scope(Some(owner.clone()), None).unwrap();
		assert_eq!(scope.setting_type, None);
		assert_eq!(scope.owner, Some(owner));
	}
}

// vim: ts=4
