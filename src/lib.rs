//! Media descriptors for audio and video resources.
//!
//! A [`Media`] is built from a locator by asking a [`Probe`] for track
//! layout, length and raw metadata, then normalizing that metadata with a
//! [`Normalizer`]. Items can be stored in a [`Catalog`] and listed in a
//! case-insensitive title order.

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod media;
pub mod probe;

pub use catalog::{Catalog, SqliteCatalog};
pub use error::{CatalogError, LocatorError, MediaError, ProbeError};
pub use media::{KindFilter, Media, MediaKind, Normalizer};
pub use probe::{FileProbe, Probe, ProbeReport};
