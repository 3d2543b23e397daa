//! Common types used throughout setkeep.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::prelude::*;

// SettingId //
//***********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingId(pub i64);

impl fmt::Display for SettingId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl fmt::Display for Timestamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

// SettingType //
//*************//
/// Ownership tier of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingType {
	/// Application-wide, no owner
	#[serde(rename = "app")]
	App,
	/// Installation-wide, no owner
	#[serde(rename = "global")]
	Global,
	/// Per user, owner is the user record
	#[serde(rename = "user")]
	User,
	/// Attached to an arbitrary owning record
	#[serde(rename = "model")]
	Model,
}

impl SettingType {
	pub fn as_str(&self) -> &'static str {
		match self {
			SettingType::App => "app",
			SettingType::Global => "global",
			SettingType::User => "user",
			SettingType::Model => "model",
		}
	}

	/// User and model settings are meaningless without an owner
	pub fn requires_owner(&self) -> bool {
		matches!(self, SettingType::User | SettingType::Model)
	}
}

impl fmt::Display for SettingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SettingType {
	type Err = Error;

	fn from_str(s: &str) -> SkResult<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"app" => Ok(SettingType::App),
			"global" => Ok(SettingType::Global),
			"user" => Ok(SettingType::User),
			"model" => Ok(SettingType::Model),
			_ => Err(Error::ValidationError(format!("Unknown setting type: {}", s))),
		}
	}
}

// OwnerRef //
//**********//
/// Polymorphic reference to the record a setting belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
	#[serde(rename = "type")]
	pub typ: Box<str>,
	pub id: Box<str>,
}

impl OwnerRef {
	pub fn new(typ: impl Into<Box<str>>, id: impl fmt::Display) -> Self {
		Self { typ: typ.into(), id: id.to_string().into_boxed_str() }
	}

	/// Reject references that cannot be told apart from "no owner" in storage
	pub fn validate(&self) -> SkResult<()> {
		if self.typ.trim().is_empty() || self.id.trim().is_empty() {
			return Err(Error::ValidationError(format!(
				"Owner reference needs a type and an id, got '{}'",
				self
			)));
		}
		Ok(())
	}
}

impl fmt::Display for OwnerRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.typ, self.id)
	}
}


// vim: ts=4
