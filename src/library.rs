//! Library scanning: find media files under a directory, build their
//! descriptors and format them for listing.

mod listing;
mod scan;

pub use listing::{format_length, format_line};
pub use scan::{load, scan};

#[cfg(test)]
mod tests;
