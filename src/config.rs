//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive scanning,
//! the catalog and placeholder localization, and helpers to load it from disk.

mod load;
mod schema;

pub use load::{default_catalog_path, default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
