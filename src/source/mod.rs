//! Cue source seams.
//!
//! Fetching raw caption text and parsing it into cues belong to external
//! collaborators. This module defines their interfaces plus the two
//! implementations the binary uses:
//! - [`FileFetcher`] reads raw text from the filesystem
//! - [`JsonCueParser`] reads an already-parsed cue array

use crate::model::{Cue, SourceError, SourceUrl};
use tracing::debug;

pub mod file;
pub mod json;

pub use file::FileFetcher;
pub use json::JsonCueParser;

/// Retrieves the raw caption text for a source.
pub trait CueFetcher {
    /// Fetch the raw text behind `url`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the source cannot be read.
    fn fetch(&self, url: &SourceUrl) -> Result<String, SourceError>;
}

/// Turns raw caption text into an ordered cue sequence.
pub trait CueParser {
    /// Parse `raw` into cues ascending by start time.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` for malformed input.
    fn parse(&self, raw: &str) -> Result<Vec<Cue>, SourceError>;
}

/// Fetch and parse `url` in one step.
///
/// # Errors
///
/// Propagates the fetcher's or the parser's error.
pub fn load<F, P>(fetcher: &F, parser: &P, url: &SourceUrl) -> Result<Vec<Cue>, SourceError>
where
    F: CueFetcher + ?Sized,
    P: CueParser + ?Sized,
{
    let raw = fetcher.fetch(url)?;
    let cues = parser.parse(&raw)?;
    debug!(source = %url, count = cues.len(), "Loaded cues");
    Ok(cues)
}
