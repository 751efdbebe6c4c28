use std::collections::HashSet;
use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::debug;

use crate::config::LibrarySettings;
use crate::error::ProbeError;
use crate::media::locator;

use super::{Probe, ProbeReport};

/// Probes `file://` locators: tags and length through `lofty`, video
/// presence from the configured video extensions.
#[derive(Debug, Clone, Default)]
pub struct FileProbe {
    video_extensions: HashSet<String>,
}

impl FileProbe {
    pub fn new<I, S>(video_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            video_extensions: video_extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .filter(|e| e.len() > 1)
                .collect(),
        }
    }

    pub fn from_settings(settings: &LibrarySettings) -> Self {
        Self::new(&settings.video_extensions)
    }

    fn is_video(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.video_extensions.contains(&normalize_extension(ext)))
            .unwrap_or(false)
    }

    pub fn probe_path(&self, path: &Path) -> Result<ProbeReport, ProbeError> {
        let has_video_track = self.is_video(path);

        let tagged = match lofty::read_from_path(path) {
            Ok(tagged) => tagged,
            // Video containers lofty cannot parse are still classified.
            Err(e) if has_video_track && path.is_file() => {
                debug!("no tags for video {}: {e}", path.display());
                return Ok(ProbeReport {
                    has_video_track,
                    ..ProbeReport::default()
                });
            }
            Err(e) => return Err(e.into()),
        };

        let length = u64::try_from(tagged.properties().duration().as_millis()).unwrap_or(u64::MAX);

        let mut meta = Vec::new();
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            let mut push = |key: &str, value: Option<String>| {
                if let Some(v) = value {
                    meta.push(key.to_string());
                    meta.push(v);
                }
            };
            push("title", tag.title().map(|v| v.into_owned()));
            push("artist", tag.artist().map(|v| v.into_owned()));
            push("album", tag.album().map(|v| v.into_owned()));
            push("genre", tag.genre().map(|v| v.into_owned()));
            push("description", tag.comment().map(|v| v.into_owned()));
            push("track_number", tag.track().map(|n| n.to_string()));
        }

        Ok(ProbeReport {
            has_video_track,
            length,
            meta,
        })
    }
}

impl Probe for FileProbe {
    fn probe(&self, location: &str) -> Result<ProbeReport, ProbeError> {
        let path = locator::to_path(location)
            .ok_or_else(|| ProbeError::Unsupported(location.to_string()))?;
        self.probe_path(&path)
    }
}

/// `MKV`, `.mkv`, ` .Mkv ` -> `.mkv`
fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim().trim_start_matches('.').to_ascii_lowercase())
}
