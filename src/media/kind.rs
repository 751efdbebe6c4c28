use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Classification of a constructed media item.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    /// Also the fallback when probing fails.
    #[default]
    Audio,
}

impl MediaKind {
    pub fn classify(has_video_track: bool) -> Self {
        if has_video_track {
            Self::Video
        } else {
            Self::Audio
        }
    }

    /// Stable integer tag used by the catalog (`Video = 0`, `Audio = 1`).
    pub fn tag(self) -> i32 {
        match self {
            Self::Video => 0,
            Self::Audio => 1,
        }
    }
}

impl TryFrom<i32> for MediaKind {
    type Error = CatalogError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Video),
            1 => Ok(Self::Audio),
            other => Err(CatalogError::InvalidKind(other)),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Video => "video",
            Self::Audio => "audio",
        })
    }
}

/// Query filter over media kinds. `All` is never the kind of a media item.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(MediaKind),
}

impl KindFilter {
    /// `All = -1`, otherwise the kind's own tag.
    pub fn tag(self) -> i32 {
        match self {
            Self::All => -1,
            Self::Only(kind) => kind.tag(),
        }
    }
}

impl From<MediaKind> for KindFilter {
    fn from(kind: MediaKind) -> Self {
        Self::Only(kind)
    }
}
