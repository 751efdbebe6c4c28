use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::catalog::{Catalog, ColumnValue, MediaColumn};
use crate::error::{CatalogError, MediaError};
use crate::probe::Probe;

use super::kind::MediaKind;
use super::locator;
use super::normalize::{Metadata, Normalizer};

/// Every persisted field of a media item, as stored in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRecord {
    pub location: String,
    pub file_name: String,
    pub time: u64,
    pub length: u64,
    pub kind: MediaKind,
    pub width: u32,
    pub height: u32,
    pub picture: Option<Vec<u8>>,
    pub meta: Metadata,
}

/// A playable audio or video resource, keyed by its location.
///
/// Built once per location, either by probing ([`Media::probe`],
/// [`Media::from_file`]) or from catalog fields ([`Media::from_record`]).
/// Only the playback time and the picture change afterwards.
#[derive(Clone)]
pub struct Media {
    location: String,
    file_name: String,
    time: u64,
    length: u64,
    kind: MediaKind,
    width: u32,
    height: u32,
    picture: Option<Vec<u8>>,
    meta: Metadata,
    catalog: Option<Arc<dyn Catalog>>,
}

/// Shared access for concurrent readers; writers go through the setters.
pub type MediaHandle = Arc<RwLock<Media>>;

impl Media {
    fn bare(location: String, file_name: String) -> Result<Self, MediaError> {
        if location.is_empty() {
            return Err(MediaError::EmptyLocation);
        }
        Ok(Self {
            location,
            file_name,
            time: 0,
            length: 0,
            kind: MediaKind::default(),
            width: 0,
            height: 0,
            picture: None,
            meta: Metadata::default(),
            catalog: None,
        })
    }

    /// Probe `location` and build a media item from the report.
    ///
    /// A failing probe is logged and leaves the item as audio with zero
    /// length and no metadata. When `catalog` is given the item is stored
    /// before it is returned and later picture changes are written through.
    pub fn probe(
        location: impl Into<String>,
        probe: &dyn Probe,
        normalizer: &Normalizer,
        catalog: Option<Arc<dyn Catalog>>,
    ) -> Result<Self, MediaError> {
        let location = location.into();
        let file_name = locator::display_name(&location);
        Self::bare(location, file_name)?
            .probed(probe, normalizer)
            .attach(catalog)
    }

    /// Probe a local file. The display name is the file name without extension.
    pub fn from_file(
        path: &Path,
        probe: &dyn Probe,
        normalizer: &Normalizer,
        catalog: Option<Arc<dyn Catalog>>,
    ) -> Result<Self, MediaError> {
        let location = locator::from_path(path)?;
        Self::bare(location, locator::file_stem(path))?
            .probed(probe, normalizer)
            .attach(catalog)
    }

    /// Rebuild from persisted fields. Artist, genre and album still get placeholders.
    ///
    /// `catalog` marks the item as backed by the store it came from; nothing
    /// is written here.
    pub fn from_record(
        record: MediaRecord,
        normalizer: &Normalizer,
        catalog: Option<Arc<dyn Catalog>>,
    ) -> Result<Self, MediaError> {
        let MediaRecord {
            location,
            file_name,
            time,
            length,
            kind,
            width,
            height,
            picture,
            mut meta,
        } = record;

        normalizer.fill_placeholders(&mut meta);

        let mut media = Self::bare(location, file_name)?;
        media.time = time;
        media.length = length;
        media.kind = kind;
        media.width = width;
        media.height = height;
        media.picture = picture;
        media.meta = meta;
        media.catalog = catalog;
        Ok(media)
    }

    fn probed(mut self, probe: &dyn Probe, normalizer: &Normalizer) -> Self {
        match probe.probe(&self.location) {
            Ok(report) => {
                self.kind = MediaKind::classify(report.has_video_track);
                self.length = report.length;
                self.meta = normalizer.normalize(&report.meta);
            }
            Err(e) => warn!("failed to probe {}: {e}", self.location),
        }
        self
    }

    fn attach(mut self, catalog: Option<Arc<dyn Catalog>>) -> Result<Self, MediaError> {
        if let Some(catalog) = catalog {
            catalog.upsert(&self)?;
            self.catalog = Some(catalog);
        }
        Ok(self)
    }

    pub fn to_record(&self) -> MediaRecord {
        MediaRecord {
            location: self.location.clone(),
            file_name: self.file_name.clone(),
            time: self.time,
            length: self.length,
            kind: self.kind,
            width: self.width,
            height: self.height,
            picture: self.picture.clone(),
            meta: self.meta.clone(),
        }
    }

    pub fn into_handle(self) -> MediaHandle {
        Arc::new(RwLock::new(self))
    }

    pub fn is_catalog_backed(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Display name derived from the location; empty when it could not be parsed.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Playback position in milliseconds.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// In memory only. Persisting the position is up to the caller.
    pub fn set_time(&mut self, time: u64) {
        self.time = time;
    }

    /// Length in milliseconds.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn picture(&self) -> Option<&[u8]> {
        self.picture.as_deref()
    }

    /// Replace the picture.
    ///
    /// A catalog-backed item writes the catalog first; if that fails the
    /// in-memory picture is left untouched and the error is returned.
    pub fn set_picture(&mut self, picture: Option<Vec<u8>>) -> Result<(), CatalogError> {
        debug!("set new picture for {}", self.title());
        if let Some(catalog) = &self.catalog {
            catalog.update_field(
                &self.location,
                MediaColumn::Picture,
                ColumnValue::Blob(picture.as_deref()),
            )?;
        }
        self.picture = picture;
        Ok(())
    }

    /// Title, or the file name when the media has none.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.file_name)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    pub fn artist(&self) -> Option<&str> {
        self.meta.artist.as_deref()
    }

    pub fn genre(&self) -> Option<&str> {
        self.meta.genre.as_deref()
    }

    pub fn album(&self) -> Option<&str> {
        self.meta.album.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.meta.copyright.as_deref()
    }

    pub fn track_number(&self) -> Option<&str> {
        self.meta.track_number.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.description.as_deref()
    }

    pub fn rating(&self) -> Option<&str> {
        self.meta.rating.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.meta.date.as_deref()
    }

    pub fn settings(&self) -> Option<&str> {
        self.meta.settings.as_deref()
    }

    pub fn now_playing(&self) -> Option<&str> {
        self.meta.now_playing.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.meta.publisher.as_deref()
    }

    pub fn encoded_by(&self) -> Option<&str> {
        self.meta.encoded_by.as_deref()
    }

    pub fn track_id(&self) -> Option<&str> {
        self.meta.track_id.as_deref()
    }
}

impl fmt::Debug for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Media")
            .field("location", &self.location)
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("time", &self.time)
            .field("length", &self.length)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("picture_len", &self.picture.as_ref().map(Vec::len))
            .field("meta", &self.meta)
            .field("catalog_backed", &self.is_catalog_backed())
            .finish()
    }
}
