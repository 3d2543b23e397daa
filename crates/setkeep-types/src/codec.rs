//! Type coercion layer
//!
//! Maps a declared [`DataType`] to its textual storage form and back, and
//! validates supplied values against a declared type. `decode` is the inverse
//! of `encode`: `decode(&encode(&v), v.data_type()) == v` for every valid value.
//!
//! Conversions between types are only performed when no information is lost;
//! everything else is reported as [`Error::TypeCoercion`].

use crate::prelude::*;

/// Largest integer magnitude an f64 represents exactly
const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

const DESCRIBE_MAX_LEN: usize = 40;

/// Encode a value to its storable text form
pub fn encode(value: &SettingValue) -> String {
	match value {
		SettingValue::String(s) => s.clone(),
		SettingValue::Int(i) => i.to_string(),
		// Display on f64 yields the shortest text that parses back to the same value
		SettingValue::Float(f) => f.to_string(),
		SettingValue::Bool(b) => b.to_string(),
		SettingValue::Json(j) => j.to_string(),
	}
}

/// Decode stored text as the declared data type
pub fn decode(raw: &str, data_type: DataType) -> SkResult<SettingValue> {
	match data_type {
		DataType::String => Ok(SettingValue::String(raw.to_owned())),
		DataType::Int => raw
			.trim()
			.parse::<i64>()
			.map(SettingValue::Int)
			.map_err(|_| Error::type_coercion(data_type, describe_text(raw))),
		DataType::Float => match raw.trim().parse::<f64>() {
			Ok(f) if f.is_finite() => Ok(SettingValue::Float(f)),
			_ => Err(Error::type_coercion(data_type, describe_text(raw))),
		},
		DataType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
			"true" | "1" => Ok(SettingValue::Bool(true)),
			"false" | "0" => Ok(SettingValue::Bool(false)),
			_ => Err(Error::type_coercion(data_type, describe_text(raw))),
		},
		DataType::Json => serde_json::from_str(raw)
			.map(SettingValue::Json)
			.map_err(|_| Error::type_coercion(data_type, describe_text(raw))),
	}
}

/// Validate a supplied value against a declared data type, converting losslessly
pub fn coerce(value: SettingValue, data_type: DataType) -> SkResult<SettingValue> {
	let mismatch = |value: &SettingValue| Error::type_coercion(data_type, describe(value));

	match (value, data_type) {
		(SettingValue::Float(f), DataType::Float) if !f.is_finite() => {
			Err(mismatch(&SettingValue::Float(f)))
		}
		(value, data_type) if value.data_type() == data_type => Ok(value),

		(SettingValue::Int(i), DataType::Float) if i.unsigned_abs() <= MAX_EXACT_FLOAT_INT => {
			#[allow(clippy::cast_precision_loss)]
			Ok(SettingValue::Float(i as f64))
		}
		(SettingValue::Float(f), DataType::Int) => float_to_int(f)
			.map(SettingValue::Int)
			.ok_or_else(|| mismatch(&SettingValue::Float(f))),

		(SettingValue::String(s), data_type) => decode(&s, data_type),

		(SettingValue::Bool(b), DataType::Json) => Ok(SettingValue::Json(b.into())),
		(SettingValue::Int(i), DataType::Json) => Ok(SettingValue::Json(i.into())),
		(SettingValue::Float(f), DataType::Json) => serde_json::Number::from_f64(f)
			.map(|n| SettingValue::Json(serde_json::Value::Number(n)))
			.ok_or_else(|| mismatch(&SettingValue::Float(f))),

		(SettingValue::Json(j), data_type) => {
			let converted = match (&j, data_type) {
				(serde_json::Value::String(s), DataType::String) => {
					Some(SettingValue::String(s.clone()))
				}
				(serde_json::Value::Bool(b), DataType::Bool) => Some(SettingValue::Bool(*b)),
				(serde_json::Value::Number(n), DataType::Int) => {
					n.as_i64().map(SettingValue::Int)
				}
				(serde_json::Value::Number(n), DataType::Float) => json_number_to_float(n),
				_ => None,
			};
			converted.ok_or_else(|| mismatch(&SettingValue::Json(j)))
		}

		(value, _) => Err(mismatch(&value)),
	}
}

/// Integral JSON numbers convert only while an f64 holds them exactly
fn json_number_to_float(n: &serde_json::Number) -> Option<SettingValue> {
	let magnitude = n.as_i64().map(i64::unsigned_abs).or_else(|| n.as_u64());
	if magnitude.is_some_and(|m| m > MAX_EXACT_FLOAT_INT) {
		return None;
	}
	n.as_f64().filter(|f| f.is_finite()).map(SettingValue::Float)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_int(f: f64) -> Option<i64> {
	// i64::MIN is exactly representable, i64::MAX rounds up to 2^63
	if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
		Some(f as i64)
	} else {
		None
	}
}

/// Short human-readable shape of a value for error messages
pub fn describe(value: &SettingValue) -> String {
	format!("{} {}", value.type_name(), truncate(&encode(value)))
}

fn describe_text(raw: &str) -> String {
	format!("text {:?}", truncate(raw))
}

fn truncate(s: &str) -> String {
	if s.chars().count() <= DESCRIBE_MAX_LEN {
		s.to_owned()
	} else {
		let mut short: String = s.chars().take(DESCRIBE_MAX_LEN).collect();
		short.push('…');
		short
	}
}


// vim: ts=4
