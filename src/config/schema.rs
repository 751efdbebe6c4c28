use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mediadesc/config.toml` or `~/.config/mediadesc/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MEDIADESC__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub catalog: CatalogSettings,
    pub locale: LocaleSettings,
    pub listing: ListingSettings,
}

const VIDEO_EXTENSIONS: &[&str] = &[
    ".3g2", ".3gp", ".3gp2", ".3gpp", ".amv", ".asf", ".avi", ".divx", ".dv", ".f4v", ".flv",
    ".gxf", ".iso", ".m1v", ".m2v", ".m2t", ".m2ts", ".m4v", ".mkv", ".mov", ".mp2", ".mp2v",
    ".mp4", ".mp4v", ".mpa", ".mpe", ".mpeg", ".mpeg1", ".mpeg2", ".mpeg4", ".mpg", ".mpv2",
    ".mts", ".mxf", ".nsv", ".nuv", ".ogg", ".ogm", ".ogv", ".ogx", ".ps", ".rec", ".rm", ".rmvb",
    ".tod", ".ts", ".tts", ".vob", ".vro", ".webm", ".wmv",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    ".a52", ".aac", ".ac3", ".adt", ".adts", ".aif", ".aifc", ".aiff", ".amr", ".aob", ".ape",
    ".awb", ".cda", ".dts", ".flac", ".it", ".m4a", ".m4p", ".mid", ".mka", ".mlp", ".mod",
    ".mp1", ".mp2", ".mp3", ".mpc", ".oga", ".ogg", ".oma", ".rmi", ".s3m", ".spx", ".tta",
    ".voc", ".vqf", ".w64", ".wav", ".wma", ".wv", ".xa", ".xm",
];

// Containers that are video-only in practice. Shared ones (.ogg, .mp2, .mpa) stay audio.
const VIDEO_ONLY_EXTENSIONS: &[&str] = &[
    ".3g2", ".3gp", ".3gp2", ".3gpp", ".amv", ".asf", ".avi", ".divx", ".dv", ".f4v", ".flv",
    ".gxf", ".iso", ".m1v", ".m2v", ".m2t", ".m2ts", ".m4v", ".mkv", ".mov", ".mp2v", ".mp4",
    ".mp4v", ".mpe", ".mpeg", ".mpeg1", ".mpeg2", ".mpeg4", ".mpg", ".mpv2", ".mts", ".mxf",
    ".nsv", ".nuv", ".ogm", ".ogv", ".ogx", ".ps", ".rec", ".rm", ".rmvb", ".tod", ".ts", ".tts",
    ".vob", ".vro", ".webm", ".wmv",
];

const EXCLUDED_DIRECTORIES: &[&str] = &[
    "/sdcard/alarms",
    "/sdcard/notifications",
    "/sdcard/ringtones",
    "/sdcard/media/alarms",
    "/sdcard/media/notifications",
    "/sdcard/media/ringtones",
    "/sdcard/media/audio/alarms",
    "/sdcard/media/audio/notifications",
    "/sdcard/media/audio/ringtones",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Extensions recognized as playable media (lowercase, dot-prefixed).
    pub extensions: Vec<String>,
    /// Extensions whose files are reported as having a video track.
    pub video_extensions: Vec<String>,
    /// Absolute path prefixes skipped while scanning.
    pub excluded_directories: Vec<PathBuf>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        let mut extensions: Vec<String> = VIDEO_EXTENSIONS
            .iter()
            .chain(AUDIO_EXTENSIONS)
            .map(|e| e.to_string())
            .collect();
        extensions.sort();
        extensions.dedup();

        Self {
            extensions,
            video_extensions: VIDEO_ONLY_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_directories: EXCLUDED_DIRECTORIES.iter().map(PathBuf::from).collect(),
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Persist scanned media into the SQLite catalog.
    pub enabled: bool,
    /// Catalog database file. Defaults to `$XDG_DATA_HOME/mediadesc/catalog.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Language tag used for "unknown artist"-style placeholders, e.g. `en`, `fr-FR`.
    pub language: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            language: super::load::language_from_env().unwrap_or_else(|| "en".to_string()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingField {
    /// Title, falling back to the file name.
    Title,
    Artist,
    Album,
    Genre,
    Kind,
    /// Duration as `m:ss`.
    Length,
    #[serde(alias = "filename", alias = "file_name")]
    FileName,
    Location,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Which fields the CLI prints per media, and in what order.
    ///
    /// Example: ["artist", "title", "length"]
    pub fields: Vec<ListingField>,
    /// Separator used to join `fields`.
    pub separator: String,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            fields: vec![
                ListingField::Kind,
                ListingField::Artist,
                ListingField::Title,
                ListingField::Length,
            ],
            separator: " - ".to_string(),
        }
    }
}
