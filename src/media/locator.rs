use std::path::Path;

use tracing::debug;
use url::Url;

use crate::error::LocatorError;

/// Display name for a URL-shaped locator.
///
/// The last segment of the path as written in `location`, or the host when
/// that segment is empty. The URL parser only validates; nothing is
/// re-encoded or case-folded. A locator that does not parse as a URL yields
/// the empty string, which callers treat as "unknown".
pub fn display_name(location: &str) -> String {
    if let Err(e) = Url::parse(location) {
        debug!("no display name for {location:?}: {e}");
        return String::new();
    }
    let (authority, path) = split_raw(location);
    match path.rsplit('/').next() {
        Some(leaf) if !leaf.is_empty() => leaf.to_string(),
        _ => host(authority).to_string(),
    }
}

/// Raw authority and path of a valid URL, query and fragment dropped.
fn split_raw(location: &str) -> (&str, &str) {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let rest = &location[..end];
    let rest = rest.split_once(':').map_or(rest, |(_, r)| r);
    match rest.strip_prefix("//") {
        Some(hier) => hier.split_at(hier.find('/').unwrap_or(hier.len())),
        None => ("", rest),
    }
}

/// `user@host:port` -> `host`; bracketed IPv6 literals keep their brackets.
fn host(authority: &str) -> &str {
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host.starts_with('[') {
        return host.find(']').map_or(host, |i| &host[..=i]);
    }
    host.split(':').next().unwrap_or(host)
}

/// Turn an absolute filesystem path into a `file://` locator.
pub fn from_path(path: &Path) -> Result<String, LocatorError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| LocatorError::NotAbsolute(path.to_path_buf()))
}

/// Filesystem path behind a `file://` locator, if it is one.
pub fn to_path(location: &str) -> Option<std::path::PathBuf> {
    let url = Url::parse(location).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// File name without its final extension, e.g. `Song.live.mp3` -> `Song.live`.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_name_takes_last_path_segment() {
        assert_eq!(display_name("http://host.example/path/Song.mp3"), "Song.mp3");
        assert_eq!(display_name("file:///music/a/b/Track%2001.flac"), "Track%2001.flac");
        assert_eq!(display_name("smb://nas/share/movie.mkv?x=1"), "movie.mkv");
    }

    #[test]
    fn display_name_falls_back_to_host_for_empty_leaf() {
        assert_eq!(display_name("http://host.example/"), "host.example");
        assert_eq!(display_name("http://host.example"), "host.example");
        assert_eq!(display_name("http://host.example/dir/"), "host.example");
    }

    #[test]
    fn display_name_is_empty_for_malformed_locators() {
        assert_eq!(display_name("not a url"), "");
        assert_eq!(display_name("/music/song.mp3"), "");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn display_name_keeps_the_leaf_as_written() {
        assert_eq!(display_name("http://host.example/path/My Song.mp3"), "My Song.mp3");
        assert_eq!(display_name("http://host.example/path/Café.mp3"), "Café.mp3");
        assert_eq!(display_name("smb://nas/share/Movie.MKV#t=10"), "Movie.MKV");
    }

    #[test]
    fn host_fallback_keeps_the_host_as_written() {
        assert_eq!(display_name("http://Host.Example/"), "Host.Example");
        assert_eq!(display_name("http://user@Media.Box:8080/?list=1"), "Media.Box");
        assert_eq!(display_name("http://[::1]:8080/"), "[::1]");
    }

    #[test]
    fn display_name_without_host_or_leaf_is_empty() {
        assert_eq!(display_name("file:///"), "");
    }

    #[test]
    fn from_path_requires_absolute_paths() {
        let loc = from_path(Path::new("/music/Song.mp3")).unwrap();
        assert_eq!(loc, "file:///music/Song.mp3");
        assert_eq!(to_path(&loc), Some(PathBuf::from("/music/Song.mp3")));

        assert!(matches!(
            from_path(Path::new("music/Song.mp3")),
            Err(LocatorError::NotAbsolute(_))
        ));
    }

    #[test]
    fn to_path_ignores_other_schemes() {
        assert_eq!(to_path("http://host.example/a.mp3"), None);
        assert_eq!(to_path("garbage"), None);
    }

    #[test]
    fn file_stem_drops_only_the_last_extension() {
        assert_eq!(file_stem(Path::new("/m/Song.live.mp3")), "Song.live");
        assert_eq!(file_stem(Path::new("/m/noext")), "noext");
    }
}
