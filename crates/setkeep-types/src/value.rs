//! Setting values and their declared data types

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::prelude::*;

/// Declared value kind of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
	#[serde(rename = "string")]
	String,
	#[serde(rename = "int")]
	Int,
	#[serde(rename = "float")]
	Float,
	#[serde(rename = "bool")]
	Bool,
	#[serde(rename = "json")]
	Json,
}

impl DataType {
	pub fn as_str(&self) -> &'static str {
		match self {
			DataType::String => "string",
			DataType::Int => "int",
			DataType::Float => "float",
			DataType::Bool => "bool",
			DataType::Json => "json",
		}
	}
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DataType {
	type Err = Error;

	fn from_str(s: &str) -> SkResult<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"string" | "str" => Ok(DataType::String),
			"int" | "integer" => Ok(DataType::Int),
			"float" | "double" => Ok(DataType::Float),
			"bool" | "boolean" => Ok(DataType::Bool),
			"json" | "array" | "object" => Ok(DataType::Json),
			_ => Err(Error::ValidationError(format!("Unknown data type: {}", s))),
		}
	}
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type comes from the declared DataType
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	Float(f64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// The data type this value naturally belongs to
	pub fn data_type(&self) -> DataType {
		match self {
			SettingValue::String(_) => DataType::String,
			SettingValue::Int(_) => DataType::Int,
			SettingValue::Float(_) => DataType::Float,
			SettingValue::Bool(_) => DataType::Bool,
			SettingValue::Json(_) => DataType::Json,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		self.data_type().as_str()
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			SettingValue::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_json(&self) -> Option<&serde_json::Value> {
		match self {
			SettingValue::Json(j) => Some(j),
			_ => None,
		}
	}
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&crate::codec::encode(self))
	}
}

impl From<&str> for SettingValue {
	fn from(value: &str) -> Self {
		SettingValue::String(value.to_owned())
	}
}

impl From<String> for SettingValue {
	fn from(value: String) -> Self {
		SettingValue::String(value)
	}
}

impl From<i64> for SettingValue {
	fn from(value: i64) -> Self {
		SettingValue::Int(value)
	}
}

impl From<i32> for SettingValue {
	fn from(value: i32) -> Self {
		SettingValue::Int(i64::from(value))
	}
}

impl From<f64> for SettingValue {
	fn from(value: f64) -> Self {
		SettingValue::Float(value)
	}
}

impl From<bool> for SettingValue {
	fn from(value: bool) -> Self {
		SettingValue::Bool(value)
	}
}

impl From<serde_json::Value> for SettingValue {
	fn from(value: serde_json::Value) -> Self {
		SettingValue::Json(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_data_type_parse_aliases() {
		assert_eq!("integer".parse::<DataType>().ok(), Some(DataType::Int));
		assert_eq!("Boolean".parse::<DataType>().ok(), Some(DataType::Bool));
		assert_eq!("array".parse::<DataType>().ok(), Some(DataType::Json));
		assert_eq!("double".parse::<DataType>().ok(), Some(DataType::Float));
		assert!("date".parse::<DataType>().is_err());
	}

	#[test]
	fn test_untagged_deserialize_prefers_bool_and_int() {
		let v: SettingValue = serde_json::from_str("true").unwrap();
		assert_eq!(v, SettingValue::Bool(true));
		let v: SettingValue = serde_json::from_str("7").unwrap();
		assert_eq!(v, SettingValue::Int(7));
		let v: SettingValue = serde_json::from_str("7.5").unwrap();
		assert_eq!(v, SettingValue::Float(7.5));
		let v: SettingValue = serde_json::from_str(r#"{"a":1}"#).unwrap();
		assert_eq!(v.data_type(), DataType::Json);
	}

	#[test]
	fn test_accessors() {
		assert_eq!(SettingValue::from("dark").as_str(), Some("dark"));
		assert_eq!(SettingValue::from(3).as_int(), Some(3));
		assert_eq!(SettingValue::from(false).as_bool(), Some(false));
		assert_eq!(SettingValue::from(3).as_str(), None);
		assert_eq!(SettingValue::from(1).data_type(), DataType::Int);
		assert_eq!(SettingValue::from(1.0).data_type(), DataType::Float);
	}
}

// vim: ts=4
