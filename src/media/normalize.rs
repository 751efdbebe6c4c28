//! Flat key/value metadata feed -> typed [`Metadata`].

use std::sync::Arc;

use tracing::{debug, warn};

use super::placeholder::{BuiltinPlaceholders, Category, Placeholders};

/// Metadata fields understood by the normalizer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MetaField {
    Title,
    Artist,
    Genre,
    Album,
    Copyright,
    TrackNumber,
    Description,
    Rating,
    Date,
    Settings,
    NowPlaying,
    Publisher,
    EncodedBy,
    TrackId,
}

/// Engine key vocabulary. Keys not listed here are ignored.
const KEYS: &[(&str, MetaField)] = &[
    ("title", MetaField::Title),
    ("artist", MetaField::Artist),
    ("genre", MetaField::Genre),
    ("album", MetaField::Album),
    ("copyright", MetaField::Copyright),
    ("track_number", MetaField::TrackNumber),
    ("description", MetaField::Description),
    ("rating", MetaField::Rating),
    ("date", MetaField::Date),
    ("setting", MetaField::Settings),
    ("now_playing", MetaField::NowPlaying),
    ("publisher", MetaField::Publisher),
    ("encoded_by", MetaField::EncodedBy),
    ("track_id", MetaField::TrackId),
];

impl MetaField {
    pub fn from_key(key: &str) -> Option<Self> {
        KEYS.iter().find(|(k, _)| *k == key).map(|&(_, f)| f)
    }

    pub fn key(self) -> &'static str {
        KEYS.iter()
            .find(|(_, f)| *f == self)
            .map(|&(k, _)| k)
            .unwrap_or_default()
    }

    fn category(self) -> Option<Category> {
        match self {
            Self::Artist => Some(Category::Artist),
            Self::Genre => Some(Category::Genre),
            Self::Album => Some(Category::Album),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub album: Option<String>,
    pub copyright: Option<String>,
    pub track_number: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub date: Option<String>,
    pub settings: Option<String>,
    pub now_playing: Option<String>,
    pub publisher: Option<String>,
    pub encoded_by: Option<String>,
    pub track_id: Option<String>,
}

impl Metadata {
    fn slot(&mut self, field: MetaField) -> &mut Option<String> {
        match field {
            MetaField::Title => &mut self.title,
            MetaField::Artist => &mut self.artist,
            MetaField::Genre => &mut self.genre,
            MetaField::Album => &mut self.album,
            MetaField::Copyright => &mut self.copyright,
            MetaField::TrackNumber => &mut self.track_number,
            MetaField::Description => &mut self.description,
            MetaField::Rating => &mut self.rating,
            MetaField::Date => &mut self.date,
            MetaField::Settings => &mut self.settings,
            MetaField::NowPlaying => &mut self.now_playing,
            MetaField::Publisher => &mut self.publisher,
            MetaField::EncodedBy => &mut self.encoded_by,
            MetaField::TrackId => &mut self.track_id,
        }
    }

    pub fn set(&mut self, field: MetaField, value: Option<String>) {
        *self.slot(field) = value;
    }
}

/// Applies the key table and placeholder policy for one locale.
#[derive(Clone)]
pub struct Normalizer {
    placeholders: Arc<dyn Placeholders>,
    locale: String,
}

impl Normalizer {
    pub fn new(placeholders: Arc<dyn Placeholders>, locale: impl Into<String>) -> Self {
        Self {
            placeholders,
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Placeholder when `value` is missing or empty, `value` otherwise.
    pub fn value_or_placeholder(&self, category: Category, value: Option<String>) -> String {
        match value {
            Some(v) if !v.is_empty() => v,
            _ => self.placeholders.placeholder_for(category, &self.locale),
        }
    }

    /// Apply artist/genre/album substitution to already-typed metadata.
    pub fn fill_placeholders(&self, meta: &mut Metadata) {
        let slots = [
            (Category::Artist, &mut meta.artist),
            (Category::Genre, &mut meta.genre),
            (Category::Album, &mut meta.album),
        ];
        for (category, slot) in slots {
            *slot = Some(self.value_or_placeholder(category, slot.take()));
        }
    }

    /// Consume `[k0, v0, k1, v1, ...]`.
    ///
    /// Unknown keys are skipped and a dangling trailing key is dropped.
    pub fn normalize(&self, pairs: &[String]) -> Metadata {
        let mut meta = Metadata::default();

        let chunks = pairs.chunks_exact(2);
        if let [dangling] = chunks.remainder() {
            warn!("metadata sequence has odd length, ignoring trailing key {dangling:?}");
        }

        for pair in chunks {
            let (key, value) = (&pair[0], &pair[1]);
            let Some(field) = MetaField::from_key(key) else {
                continue;
            };
            let value = match field.category() {
                Some(category) => self.value_or_placeholder(category, Some(value.clone())),
                None => value.clone(),
            };
            debug!("{} {value}", field.key());
            meta.set(field, Some(value));
        }

        self.fill_placeholders(&mut meta);
        meta
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinPlaceholders), "en")
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
