//! Error types for cuesync.
//!
//! Errors are `thiserror` enums composing via `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`SourceError`] - Cue fetch and parse failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//!   - [`InvalidSourceUrl`] - Empty source identifier
//!
//! # Recovery Strategy
//!
//! Inside the engine every failure is non-fatal: a fetch or parse failure
//! leaves the cue store empty and the resolver reports "inactive" until the
//! source changes. Only the binary treats these errors as fatal.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::InvalidSourceUrl;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to fetch or parse the cue source.
    #[error("Failed to load cues: {0}")]
    Source(#[from] SourceError),

    /// Failed to load configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to initialize logging.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The cue source identifier was invalid.
    #[error("Invalid source: {0}")]
    InvalidSource(#[from] InvalidSourceUrl),

    /// Failed to write output.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when fetching or parsing a cue source.
///
/// The engine never surfaces these to the host; it logs them and keeps the
/// store empty for the failed source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source does not exist at the given path.
    #[error("Cue source not found: {path}")]
    NotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// I/O failure while reading the source.
    #[error("Failed to read cue source {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The raw text could not be parsed into cues.
    #[error("Failed to parse cues: {message}")]
    Parse {
        /// Parser error details.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_error_not_found_display() {
        let err = SourceError::NotFound {
            path: PathBuf::from("/tmp/missing.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("/tmp/missing.json"));
    }

    #[test]
    fn source_error_io_keeps_source_chain() {
        use std::error::Error as _;

        let err = SourceError::Io {
            path: PathBuf::from("/tmp/cues.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        assert!(err.to_string().contains("access denied"));
        assert!(err.source().is_some(), "io error should be exposed as source");
    }

    #[test]
    fn source_error_parse_display() {
        let err = SourceError::Parse {
            message: "expected `[`".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse cues: expected `[`");
    }

    #[test]
    fn app_error_from_source_error() {
        let err: AppError = SourceError::Parse {
            message: "bad".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("Failed to load cues"));
        assert!(msg.contains("bad"));
    }

    #[test]
    fn app_error_from_invalid_source() {
        let err: AppError = InvalidSourceUrl::Empty.into();
        assert!(err.to_string().contains("Source URL cannot be empty"));
    }

    #[test]
    fn app_error_from_io_error() {
        let err: AppError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(err.to_string().contains("pipe closed"));
    }
}
