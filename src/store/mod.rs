//! Cue store for the current source.
//!
//! Holds the time-sorted cue sequence for exactly one source. The sequence is
//! never mutated in place: it is created when a source loads and replaced
//! wholesale when the source changes.
//!
//! The store also owns the fetch gate: a fetch is requested at most once per
//! source, and a failed fetch is never retried until the source changes.

use crate::model::{Cue, SourceUrl};
use std::sync::Arc;
use tracing::debug;

/// Load state of the current source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch has been requested for the current source.
    #[default]
    Idle,
    /// A fetch was requested and no result has arrived.
    Pending,
    /// Cues arrived for the current source.
    Loaded,
    /// The fetch or parse failed. Stays failed until the source changes.
    Failed,
}

/// Immutable cue sequence keyed by its source.
#[derive(Debug, Clone, Default)]
pub struct CueStore {
    source: Option<SourceUrl>,
    cues: Arc<[Cue]>,
    state: LoadState,
}

impl CueStore {
    /// Create an empty store with no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// The source the store is currently bound to.
    pub fn source(&self) -> Option<&SourceUrl> {
        self.source.as_ref()
    }

    /// Current load state.
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// Bind the store to `source`.
    ///
    /// Returns `true` when the source differs from the current one, in which
    /// case all cues are dropped and the fetch gate re-opens.
    pub fn switch_source(&mut self, source: &SourceUrl) -> bool {
        if self.source.as_ref() == Some(source) {
            return false;
        }
        debug!(from = ?self.source, to = %source, "Switching cue source");
        self.source = Some(source.clone());
        self.cues = Arc::from(Vec::new());
        self.state = LoadState::Idle;
        true
    }

    /// Trip the fetch gate if the store is empty and nothing was requested yet.
    ///
    /// Returns the source to fetch, or `None` if no fetch should start.
    pub fn take_fetch_request(&mut self) -> Option<SourceUrl> {
        if self.state != LoadState::Idle || !self.cues.is_empty() {
            return None;
        }
        let source = self.source.clone()?;
        self.state = LoadState::Pending;
        Some(source)
    }

    /// Replace the cue sequence for `source`.
    ///
    /// Results for a source other than the current one are stale and dropped.
    /// Returns whether the cues were accepted.
    pub fn replace(&mut self, source: &SourceUrl, cues: Vec<Cue>) -> bool {
        if self.source.as_ref() != Some(source) {
            debug!(stale = %source, "Dropping cues for stale source");
            return false;
        }
        self.cues = Arc::from(cues);
        self.state = LoadState::Loaded;
        true
    }

    /// Record a failed fetch for `source`. Stale failures are ignored.
    pub fn mark_failed(&mut self, source: &SourceUrl) -> bool {
        if self.source.as_ref() != Some(source) {
            return false;
        }
        self.state = LoadState::Failed;
        true
    }

    /// The cue sequence, ascending by start time.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Shared handle to the cue sequence.
    pub fn snapshot(&self) -> Arc<[Cue]> {
        Arc::clone(&self.cues)
    }

    /// Cue at array position `position`.
    pub fn get(&self, position: usize) -> Option<&Cue> {
        self.cues.get(position)
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the store holds no cues.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}
