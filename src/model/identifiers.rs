//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::Serialize;
use std::fmt;

/// Identifier of a cue source (the URL or path the caption text comes from).
///
/// The cue store is keyed by this value: a different `SourceUrl` means the
/// whole cue sequence is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Smart constructor: validates non-empty, non-blank source identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSourceUrl> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidSourceUrl::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a source identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSourceUrl {
    /// The identifier was empty or whitespace only.
    #[error("Source URL cannot be empty")]
    Empty,
}
