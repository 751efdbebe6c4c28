//! Persistent media catalog, keyed by location.

mod sqlite;

pub use sqlite::SqliteCatalog;

use crate::error::CatalogError;
use crate::media::{KindFilter, Media, MediaRecord};

/// Columns that can be updated in place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaColumn {
    Time,
    Length,
    Picture,
    Title,
    Artist,
    Genre,
    Album,
}

impl MediaColumn {
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Length => "length",
            Self::Picture => "picture",
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Genre => "genre",
            Self::Album => "album",
        }
    }

    fn accepts(self, value: &ColumnValue<'_>) -> bool {
        matches!(
            (self, value),
            (Self::Time | Self::Length, ColumnValue::Integer(_))
                | (Self::Picture, ColumnValue::Blob(_))
                | (
                    Self::Title | Self::Artist | Self::Genre | Self::Album,
                    ColumnValue::Text(_)
                )
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue<'a> {
    Integer(u64),
    Text(Option<&'a str>),
    Blob(Option<&'a [u8]>),
}

pub trait Catalog: Send + Sync {
    /// Insert or replace the entry for `media.location()`.
    fn upsert(&self, media: &Media) -> Result<(), CatalogError>;

    /// Update one column of an existing entry.
    fn update_field(
        &self,
        location: &str,
        column: MediaColumn,
        value: ColumnValue<'_>,
    ) -> Result<(), CatalogError>;

    fn get(&self, location: &str) -> Result<Option<MediaRecord>, CatalogError>;

    fn list(&self, filter: KindFilter) -> Result<Vec<MediaRecord>, CatalogError>;

    /// Returns whether an entry was removed.
    fn remove(&self, location: &str) -> Result<bool, CatalogError>;
}
