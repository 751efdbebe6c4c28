//! Error types shared by the media core and its collaborators.
//!
//! Probing and locator trouble is recovered inside the constructors and
//! only logged. Catalog failures are always returned to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("path is not absolute: {}", .0.display())]
    NotAbsolute(PathBuf),
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unsupported locator: {0}")]
    Unsupported(String),

    #[error("failed to read media: {0}")]
    Read(#[from] lofty::error::LoftyError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("no catalog entry for {0}")]
    NotFound(String),

    #[error("catalog connection lock poisoned")]
    Poisoned,

    #[error("invalid media type tag {0}")]
    InvalidKind(i32),

    #[error("value does not fit column {0}")]
    ColumnType(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media location must not be empty")]
    EmptyLocation,

    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
