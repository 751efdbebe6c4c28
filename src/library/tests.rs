use super::*;
use crate::catalog::{Catalog, SqliteCatalog};
use crate::config::{LibrarySettings, ListingField};
use crate::error::ProbeError;
use crate::media::{KindFilter, Media, MediaKind, Normalizer, locator};
use crate::probe::{Probe, ProbeReport};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

/// Titles come from a fixed table keyed by file stem; `.mkv` is video;
/// files named `broken.*` fail.
struct TableProbe(&'static [(&'static str, &'static str)]);

impl Probe for TableProbe {
    fn probe(&self, location: &str) -> Result<ProbeReport, ProbeError> {
        let path = locator::to_path(location)
            .ok_or_else(|| ProbeError::Unsupported(location.to_string()))?;
        let stem = locator::file_stem(&path);
        if stem == "broken" {
            return Err(ProbeError::Unsupported(location.to_string()));
        }

        let mut meta = Vec::new();
        if let Some((_, title)) = self.0.iter().find(|(s, _)| *s == stem) {
            meta = vec!["title".to_string(), title.to_string()];
        }
        Ok(ProbeReport {
            has_video_track: path.extension().is_some_and(|e| e == "mkv"),
            length: 61_000,
            meta,
        })
    }
}

fn settings() -> LibrarySettings {
    LibrarySettings {
        extensions: vec![".mp3".into(), ".mkv".into()],
        excluded_directories: Vec::new(),
        ..LibrarySettings::default()
    }
}

fn sample(meta: &[&str], length: u64) -> Media {
    struct Fixed(ProbeReport);
    impl Probe for Fixed {
        fn probe(&self, _: &str) -> Result<ProbeReport, ProbeError> {
            Ok(self.0.clone())
        }
    }
    let probe = Fixed(ProbeReport {
        has_video_track: false,
        length,
        meta: meta.iter().map(|s| s.to_string()).collect(),
    });
    Media::from_file(
        Path::new("/music/Song.mp3"),
        &probe,
        &Normalizer::default(),
        None,
    )
    .unwrap()
}

#[test]
fn format_length_switches_to_hours() {
    assert_eq!(format_length(0), "0:00");
    assert_eq!(format_length(59_999), "0:59");
    assert_eq!(format_length(180_000), "3:00");
    assert_eq!(format_length(3_600_000), "1:00:00");
    assert_eq!(format_length(3_725_000), "1:02:05");
}

#[test]
fn format_line_joins_requested_fields() {
    let media = sample(&["title", "Song", "artist", "  Band  "], 185_000);
    let fields = [
        ListingField::Kind,
        ListingField::Artist,
        ListingField::Title,
        ListingField::Length,
    ];
    assert_eq!(format_line(&media, &fields, " - "), "audio - Band - Song - 3:05");
    assert_eq!(
        format_line(&media, &[ListingField::FileName, ListingField::Location], " | "),
        "Song | file:///music/Song.mp3"
    );
}

#[test]
fn format_line_skips_zero_length_and_empty_fields() {
    let media = sample(&["title", ""], 0);
    assert_eq!(
        format_line(&media, &[ListingField::Title, ListingField::Length], " - "),
        ""
    );
    assert_eq!(
        format_line(&media, &[ListingField::Length, ListingField::FileName], " - "),
        "Song"
    );
}

#[test]
fn format_line_falls_back_to_title() {
    let media = sample(&["title", "Only"], 0);
    assert_eq!(format_line(&media, &[ListingField::Length], " - "), "Only");
    assert_eq!(format_line(&media, &[], " - "), "Only");
}

#[test]
fn format_line_shows_placeholders() {
    let media = sample(&[], 1_000);
    assert_eq!(
        format_line(&media, &[ListingField::Album, ListingField::Genre], "/"),
        "Unknown Album/Unknown Genre"
    );
}

#[test]
fn load_returns_items_in_title_order() {
    let dir = tempdir().unwrap();
    for name in ["one.mp3", "two.mp3", "three.mkv", "notes.txt"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    let probe = TableProbe(&[("one", "charlie"), ("two", "Alpha"), ("three", "bravo")]);

    let items = load(dir.path(), &settings(), &probe, &Normalizer::default(), None);

    let titles: Vec<&str> = items.iter().map(Media::title).collect();
    assert_eq!(titles, vec!["Alpha", "bravo", "charlie"]);
    assert_eq!(items[1].kind(), MediaKind::Video);
    assert!(items.iter().all(|m| m.location().starts_with("file:///")));
    assert!(items.iter().all(|m| m.length() == 61_000));
}

#[test]
fn load_keeps_items_whose_probe_failed() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.mp3"), b"x").unwrap();
    fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    let probe = TableProbe(&[]);

    let items = load(dir.path(), &settings(), &probe, &Normalizer::default(), None);

    let names: Vec<&str> = items.iter().map(Media::file_name).collect();
    assert_eq!(names, vec!["a", "broken"]);
    assert_eq!(items[1].length(), 0);
    assert_eq!(items[1].kind(), MediaKind::Audio);
    assert_eq!(items[1].artist(), None);
}

#[test]
fn load_stores_every_item_in_the_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    fs::write(dir.path().join("b.mkv"), b"x").unwrap();
    let catalog: Arc<dyn Catalog> = Arc::new(SqliteCatalog::open_in_memory().unwrap());

    let items = load(
        dir.path(),
        &settings(),
        &TableProbe(&[]),
        &Normalizer::default(),
        Some(catalog.clone()),
    );

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(Media::is_catalog_backed));
    assert_eq!(catalog.list(KindFilter::All).unwrap().len(), 2);
    assert_eq!(
        catalog.list(KindFilter::Only(MediaKind::Video)).unwrap()[0].file_name,
        "b"
    );
}

#[test]
fn load_of_missing_directory_is_empty() {
    let dir = tempdir().unwrap();
    let items = load(
        &dir.path().join("nope"),
        &settings(),
        &TableProbe(&[]),
        &Normalizer::default(),
        None,
    );
    assert!(items.is_empty());
}
