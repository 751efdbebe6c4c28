use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::config::LibrarySettings;
use crate::media::{Media, Normalizer, ordering};
use crate::probe::Probe;

fn is_media_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = format!(".{}", ext.to_ascii_lowercase());
            settings.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Component-wise prefix match, case-sensitive like the filesystem.
fn is_excluded(path: &Path, settings: &LibrarySettings) -> bool {
    settings
        .excluded_directories
        .iter()
        .any(|dir| path.starts_with(dir))
}

/// Media files under `dir`, in walk order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| {
            (settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
                && !is_excluded(e.path(), settings)
        })
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_media_file(path, settings) {
            files.push(path.to_path_buf());
        }
    }

    files
}

/// Scan `dir` and build a media item per file, in presentation order.
///
/// Files that cannot be turned into media (or stored, when `catalog` is
/// given) are logged and skipped.
pub fn load(
    dir: &Path,
    settings: &LibrarySettings,
    probe: &dyn Probe,
    normalizer: &Normalizer,
    catalog: Option<Arc<dyn Catalog>>,
) -> Vec<Media> {
    let root = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let files = scan(&root, settings);

    let mut items: Vec<Media> = files
        .iter()
        .filter_map(
            |path| match Media::from_file(path, probe, normalizer, catalog.clone()) {
                Ok(media) => Some(media),
                Err(e) => {
                    warn!("skipping {}: {e}", path.display());
                    None
                }
            },
        )
        .collect();

    ordering::sort(&mut items);
    info!("loaded {} of {} media files from {}", items.len(), files.len(), root.display());
    items
}
