//! Event-driven synchronization engine.
//!
//! Wires the cue store, resolver, formatter, and scroll sync together behind
//! the notifications a host delivers:
//!
//! - playback time updated: [`SyncEngine::tick`]
//! - cue data loaded / failed: [`SyncEngine::on_cues_loaded`], [`SyncEngine::on_fetch_failed`]
//! - layout measured: [`SyncEngine::on_layout_measured`]
//! - user scrolled / touched: [`SyncEngine::on_user_scroll`], [`SyncEngine::on_touch_start`]
//!
//! Everything runs synchronously on the caller's thread. The only
//! asynchronous boundary is the cue fetch: the engine asks for it through
//! [`TickOutput::fetch`] at most once per source and the host reports back.

use crate::formatter::{self, FormatterState, JoinStyle};
use crate::model::{Cue, SourceError, SourceUrl};
use crate::resolver::{resolve, BoundaryPolicy, Resolution};
use crate::scroll::{self, LatchReset, LineLayoutSnapshot, ScrollAction, ScrollPolicy, SyncState};
use crate::store::CueStore;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// How the transcript is laid out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// One running paragraph; the engine scrolls it itself.
    #[default]
    Paragraph,
    /// One row per cue; the host scrolls to the changed item.
    List,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    /// Gap policy for cue resolution.
    pub boundary_policy: BoundaryPolicy,
    /// Join style for paragraph formatting.
    pub join_style: JoinStyle,
    /// Transcript layout.
    pub display_mode: DisplayMode,
    /// Auto-scroll behavior.
    pub scroll: ScrollPolicy,
    /// When the touch latch re-opens.
    pub latch_reset: LatchReset,
}

/// The highlighted cue changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveChange {
    /// Sequence number of the newly active cue.
    pub sequence: u32,
    /// Array position of the newly active cue.
    pub position: usize,
}

/// Everything a host must act on after a tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TickOutput {
    /// Source the host should fetch, then report via `on_cues_loaded` or `on_fetch_failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<SourceUrl>,
    /// New highlighted cue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ActiveChange>,
    /// Scroll the host should perform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollAction>,
}

impl TickOutput {
    /// Whether the tick produced nothing to act on.
    pub fn is_empty(&self) -> bool {
        self.fetch.is_none() && self.change.is_none() && self.scroll.is_none()
    }
}

/// One cue ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    /// Sequence number of the cue.
    pub sequence: u32,
    /// Display text.
    pub text: String,
    /// Whether the cue is highlighted.
    pub active: bool,
}

/// Caption synchronization engine for one display surface.
#[derive(Debug, Clone, Default)]
pub struct SyncEngine {
    config: EngineConfig,
    store: CueStore,
    layout: Option<LineLayoutSnapshot>,
    sync: SyncState,
    /// Position of the highlighted cue. Survives gaps between cues.
    selected: Option<usize>,
}

impl SyncEngine {
    /// Create an engine with no source.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cue store for the current source.
    pub fn store(&self) -> &CueStore {
        &self.store
    }

    /// Scroll synchronization state.
    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    /// Most recent layout snapshot, if one was measured.
    pub fn layout(&self) -> Option<&LineLayoutSnapshot> {
        self.layout.as_ref()
    }

    /// Position of the highlighted cue.
    pub fn active_position(&self) -> Option<usize> {
        self.selected
    }

    /// The highlighted cue.
    pub fn active_cue(&self) -> Option<&Cue> {
        self.selected.and_then(|position| self.store.get(position))
    }

    /// Resolve `time` against the current cues without touching engine state.
    ///
    /// This is the caption line to show at `time` (empty text when inactive).
    pub fn resolve_at(&self, time: u64) -> Resolution<'_> {
        resolve(self.store.cues(), time, self.config.boundary_policy)
    }

    /// Playback position advanced to `time` (milliseconds) on `source`.
    pub fn tick(&mut self, time: u64, source: &SourceUrl) -> TickOutput {
        if self.store.switch_source(source) {
            self.reset_for_source();
        }

        let mut output = TickOutput {
            fetch: self.store.take_fetch_request(),
            ..TickOutput::default()
        };

        if self.store.is_empty() {
            return output;
        }

        let resolved = {
            let resolution = self.resolve_at(time);
            resolution.position().zip(resolution.index())
        };
        if let Some((position, sequence)) = resolved {
            if self.selected != Some(position) {
                debug!(time, sequence, position, "Active cue changed");
                self.selected = Some(position);
                output.change = Some(ActiveChange { sequence, position });
            }
        }

        output.scroll = self.sync_scroll();
        output
    }

    /// Cues for `source` arrived.
    ///
    /// Returns whether they were accepted; results for a source that is no
    /// longer current are dropped.
    pub fn on_cues_loaded(&mut self, source: &SourceUrl, cues: Vec<Cue>) -> bool {
        let accepted = self.store.replace(source, cues);
        if accepted {
            debug!(source = %source, count = self.store.len(), "Cue store populated");
        }
        accepted
    }

    /// The fetch for `source` failed.
    ///
    /// The store stays empty and every tick resolves to inactive until the
    /// source changes. There is no retry.
    pub fn on_fetch_failed(&mut self, source: &SourceUrl, error: &SourceError) {
        if self.store.mark_failed(source) {
            warn!(source = %source, error = %error, "Cue fetch failed; captions disabled for source");
        }
    }

    /// The renderer measured a new layout.
    ///
    /// Replaces the previous snapshot and retries a scroll sync that was
    /// skipped for lack of a layout.
    pub fn on_layout_measured(&mut self, layout: LineLayoutSnapshot) -> Option<ScrollAction> {
        self.layout = Some(layout);
        self.sync_scroll()
    }

    /// The scroll surface reported a new offset.
    pub fn on_user_scroll(&mut self, offset: f64) {
        self.sync.observe_scroll(offset);
    }

    /// The user started a touch scroll.
    pub fn on_touch_start(&mut self) {
        debug!("Touch scroll started; latching auto-scroll off");
        self.sync.on_touch_start();
    }

    /// Explicitly re-enable auto-scroll after a touch.
    pub fn resume_auto_scroll(&mut self) {
        self.sync.resume();
    }

    /// Playback position for the cue at `position` (seek-on-tap).
    pub fn seek_target(&self, position: usize) -> Option<Duration> {
        self.store.get(position).map(Cue::start)
    }

    /// Display text for every cue, in order, tagged active/inactive.
    ///
    /// Paragraph mode joins cues with [`formatter::format`]; list mode keeps
    /// raw cue text.
    pub fn render(&self) -> Vec<TranscriptSegment> {
        let mut state = FormatterState::default();
        self.store
            .cues()
            .iter()
            .enumerate()
            .map(|(index, cue)| {
                let text = match self.config.display_mode {
                    DisplayMode::Paragraph => {
                        formatter::format(&cue.text, index, &mut state, self.config.join_style)
                    }
                    DisplayMode::List => cue.text.clone(),
                };
                TranscriptSegment {
                    sequence: cue.sequence,
                    text,
                    active: self.selected == Some(index),
                }
            })
            .collect()
    }

    fn reset_for_source(&mut self) {
        self.selected = None;
        self.layout = None;
        self.sync.reset_for_source(self.config.latch_reset);
    }

    fn sync_scroll(&mut self) -> Option<ScrollAction> {
        if self.config.display_mode != DisplayMode::Paragraph {
            return None;
        }
        let position = self.selected?;
        let layout = self.layout.as_ref()?;
        scroll::on_active_change(
            position,
            self.store.len(),
            layout,
            &mut self.sync,
            &self.config.scroll,
        )
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
