use crate::config::ListingField;
use crate::media::Media;

/// `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_length(millis: u64) -> String {
    let secs = millis / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Build a listing line for `media` from `fields`, joined by `sep`.
///
/// Empty fields are skipped; falls back to the title when nothing was produced.
pub fn format_line(media: &Media, fields: &[ListingField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            ListingField::Title => Some(media.title().to_string()),
            ListingField::Artist => media.artist().map(str::to_string),
            ListingField::Album => media.album().map(str::to_string),
            ListingField::Genre => media.genre().map(str::to_string),
            ListingField::Kind => Some(media.kind().to_string()),
            ListingField::Length => (media.length() > 0).then(|| format_length(media.length())),
            ListingField::FileName => Some(media.file_name().to_string()),
            ListingField::Location => Some(media.location().to_string()),
        };
        if let Some(p) = part.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
            parts.push(p);
        }
    }

    if parts.is_empty() {
        media.title().to_string()
    } else {
        parts.join(sep)
    }
}
