//! Media probing boundary.
//!
//! A [`Probe`] opens a locator and reports whether it carries a video track,
//! its length and a flat `[key, value, key, value, ...]` metadata sequence.
//! [`FileProbe`] implements it for local files with `lofty`.

mod file;

pub use file::FileProbe;

use crate::error::ProbeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub has_video_track: bool,
    /// Length in milliseconds.
    pub length: u64,
    /// Alternating keys and values.
    pub meta: Vec<String>,
}

pub trait Probe: Send + Sync {
    fn probe(&self, location: &str) -> Result<ProbeReport, ProbeError>;
}
