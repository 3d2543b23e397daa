//! Error type shared by the repository and the storage adapters

use std::fmt;

use crate::value::DataType;

pub type SkResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// No setting matched the key within the scope
	NotFound,
	/// A stored or supplied value does not fit its declared data type
	TypeCoercion { expected: DataType, found: Box<str> },
	/// The requested classification contradicts the repository scope or the stored row
	ScopeConflict(String),
	ValidationError(String),
	ConfigError(String),

	// externals
	Persistence(Box<dyn std::error::Error + Send + Sync>),
	Json(serde_json::Error),
}

impl Error {
	pub fn type_coercion(expected: DataType, found: impl Into<Box<str>>) -> Self {
		Self::TypeCoercion { expected, found: found.into() }
	}

	pub fn persistence<E>(err: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::Persistence(Box::new(err))
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "setting not found"),
			Error::TypeCoercion { expected, found } => {
				write!(f, "type coercion failed: expected {}, found {}", expected, found)
			}
			Error::ScopeConflict(msg) => write!(f, "scope conflict: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Persistence(err) => write!(f, "persistence error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Persistence(err) => Some(err.as_ref()),
			Error::Json(err) => Some(err),
			_ => None,
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	#[test]
	fn test_json_error_is_not_a_coercion_error() {
		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err = Error::from(json_err);

		assert!(matches!(err, Error::Json(_)));
		assert!(err.to_string().starts_with("json error: "));
		assert!(err.source().is_some());
	}
}

// vim: ts=4
