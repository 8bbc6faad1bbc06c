//! Filesystem cue fetcher.

use super::CueFetcher;
use crate::model::{SourceError, SourceUrl};
use std::path::{Path, PathBuf};

/// Reads cue sources from the filesystem.
///
/// Source identifiers are treated as paths, resolved against an optional
/// base directory.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    /// Fetcher resolving paths as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher resolving relative paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Filesystem path for `url`.
    pub fn resolve_path(&self, url: &SourceUrl) -> PathBuf {
        let path = Path::new(url.as_str());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl CueFetcher for FileFetcher {
    fn fetch(&self, url: &SourceUrl) -> Result<String, SourceError> {
        let path = self.resolve_path(url);

        if !path.exists() {
            return Err(SourceError::NotFound { path });
        }

        std::fs::read_to_string(&path).map_err(|source| SourceError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn url(raw: &str) -> SourceUrl {
        SourceUrl::new(raw).expect("valid url")
    }

    #[test]
    fn fetch_reads_file_contents() {
        let temp_dir = std::env::temp_dir().join("cuesync_test_fetch_reads");
        let _ = fs::create_dir_all(&temp_dir);
        let file = temp_dir.join("cues.json");
        fs::write(&file, "[]").unwrap();

        let result = FileFetcher::new().fetch(&url(file.to_str().unwrap()));

        let _ = fs::remove_dir_all(&temp_dir);
        assert_eq!(result.unwrap(), "[]");
    }

    #[test]
    fn fetch_missing_file_is_not_found() {
        let result = FileFetcher::new().fetch(&url("/nonexistent/cuesync/cues.json"));

        match result {
            Err(SourceError::NotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/cuesync/cues.json"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let fetcher = FileFetcher::with_base_dir("/srv/captions");
        assert_eq!(
            fetcher.resolve_path(&url("en.json")),
            PathBuf::from("/srv/captions/en.json")
        );
    }

    #[test]
    fn absolute_paths_ignore_base_dir() {
        let fetcher = FileFetcher::with_base_dir("/srv/captions");
        assert_eq!(
            fetcher.resolve_path(&url("/tmp/en.json")),
            PathBuf::from("/tmp/en.json")
        );
    }

    #[test]
    fn fetch_uses_base_dir() {
        let temp_dir = std::env::temp_dir().join("cuesync_test_fetch_base");
        let _ = fs::create_dir_all(&temp_dir);
        fs::write(temp_dir.join("a.json"), "[1]").unwrap();

        let result = FileFetcher::with_base_dir(&temp_dir).fetch(&url("a.json"));

        let _ = fs::remove_dir_all(&temp_dir);
        assert_eq!(result.unwrap(), "[1]");
    }
}
