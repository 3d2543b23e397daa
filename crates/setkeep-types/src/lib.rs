//! Shared types, value coercion, query filters and the adapter trait for setkeep.
//!
//! This crate contains the foundational types that are shared between the
//! repository crate and the storage adapter implementations. Adapters only
//! depend on this crate, so they compile in parallel with the repository.

pub mod codec;
pub mod config;
pub mod error;
pub mod prelude;
pub mod query;
pub mod setting;
pub mod settings_adapter;
pub mod types;
pub mod value;

// vim: ts=4
