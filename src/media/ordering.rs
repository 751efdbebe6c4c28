use std::cmp::Ordering;

use super::model::Media;

/// Case-folded title used for list ordering.
pub fn sort_key(media: &Media) -> String {
    media.title().to_uppercase()
}

/// Compare by title (file name when untitled), ignoring case.
///
/// Items whose folded titles match are equal; no secondary key is applied.
pub fn compare(a: &Media, b: &Media) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Stable sort into presentation order.
pub fn sort(items: &mut [Media]) {
    items.sort_by_cached_key(sort_key);
}
