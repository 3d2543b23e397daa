//! Scoped, typed key/value settings.
//!
//! A [`SettingsStore`](store::SettingsStore) hands out
//! [`SettingsRepository`](repository::SettingsRepository) instances bound to a
//! [`Scope`](scope::Scope). The repository accumulates the scope components
//! into one query, runs it through the configured
//! [`SettingsAdapter`](setkeep_types::settings_adapter::SettingsAdapter) and
//! returns decoded settings wrapped in a
//! [`SettingsCollection`](collection::SettingsCollection).

pub mod collection;
pub mod owner;
pub mod prelude;
pub mod repository;
pub mod scope;
pub mod store;

pub use setkeep_types::{codec, config, error, query, setting, settings_adapter, types, value};

// vim: ts=4
