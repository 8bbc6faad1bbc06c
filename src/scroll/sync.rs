//! Auto-scroll decisions for the active cue.
//!
//! Pure functions over an explicit [`SyncState`]: the caller owns the state
//! and feeds it every externally observed scroll and touch event.

use super::layout::{interpolate_line_index, LineLayoutSnapshot};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default distance kept between the viewport top and the active line.
pub const DEFAULT_TOP_PADDING: f64 = 50.0;

/// When the touch latch ([`SyncState::scroll_enabled`]) re-opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatchReset {
    /// Only an explicit resume re-enables auto-scroll.
    Never,
    /// Loading a different cue source also re-enables auto-scroll.
    #[default]
    SourceChange,
}

/// Auto-scroll configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPolicy {
    /// Scroll to the active line even when the viewport is already past it.
    pub always_auto_scroll: bool,
    /// Stop auto-scrolling once the user starts a touch scroll.
    pub disable_on_touch: bool,
    /// Space kept above the active line.
    pub top_padding: f64,
    /// Whether emitted scrolls should animate.
    pub animated: bool,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            always_auto_scroll: false,
            disable_on_touch: true,
            top_padding: DEFAULT_TOP_PADDING,
            animated: true,
        }
    }
}

/// Request to move the scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollAction {
    /// Target offset from the top of the scroll content.
    pub offset: f64,
    /// Whether the move should animate.
    pub animated: bool,
}

/// Scroll synchronization state, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncState {
    /// Cue position last synchronized, `None` before the first sync.
    pub active_index: Option<usize>,
    /// Auto-scroll latch. Cleared by a user touch-scroll.
    pub scroll_enabled: bool,
    /// Most recent scroll offset, from the user or from an emitted action.
    pub last_scroll_offset: f64,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            active_index: None,
            scroll_enabled: true,
            last_scroll_offset: 0.0,
        }
    }
}

impl SyncState {
    /// Record an externally observed scroll position.
    pub fn observe_scroll(&mut self, offset: f64) {
        self.last_scroll_offset = offset;
    }

    /// Latch auto-scroll off after a user-initiated touch scroll.
    pub fn on_touch_start(&mut self) {
        self.scroll_enabled = false;
    }

    /// Re-open the auto-scroll latch.
    pub fn resume(&mut self) {
        self.scroll_enabled = true;
    }

    /// Reset for a new cue source, keeping or re-opening the latch per `reset`.
    pub fn reset_for_source(&mut self, reset: LatchReset) {
        let scroll_enabled = match reset {
            LatchReset::Never => self.scroll_enabled,
            LatchReset::SourceChange => true,
        };
        *self = Self {
            scroll_enabled,
            ..Self::default()
        };
    }
}

/// Scroll target for cue `new_index`, or `None` if the layout cannot place it.
///
/// The line is estimated with [`interpolate_line_index`], then `top_padding`
/// is subtracted and the result clamped at zero.
pub fn target_offset(
    new_index: usize,
    cue_count: usize,
    layout: &LineLayoutSnapshot,
    top_padding: f64,
) -> Option<f64> {
    let line = interpolate_line_index(new_index, cue_count, layout.len())?;
    let y = layout.get(line)?.y;
    Some((y - top_padding).max(0.0))
}

/// React to a change of the active cue.
///
/// No-op when `new_index` is already synchronized or the layout is empty.
/// Otherwise records `new_index` as synchronized and returns a scroll action
/// when the gate allows one:
///
/// - a touch-latched state under `disable_on_touch` never scrolls;
/// - `always_auto_scroll` scrolls unconditionally;
/// - otherwise only forward: the last observed offset must be above the target.
pub fn on_active_change(
    new_index: usize,
    cue_count: usize,
    layout: &LineLayoutSnapshot,
    state: &mut SyncState,
    policy: &ScrollPolicy,
) -> Option<ScrollAction> {
    if state.active_index == Some(new_index) || layout.is_empty() {
        return None;
    }

    let target = target_offset(new_index, cue_count, layout, policy.top_padding);
    state.active_index = Some(new_index);
    let target = target?;

    if policy.disable_on_touch && !state.scroll_enabled {
        trace!(new_index, "Auto-scroll suppressed by touch latch");
        return None;
    }

    if policy.always_auto_scroll || state.last_scroll_offset < target {
        state.last_scroll_offset = target;
        return Some(ScrollAction {
            offset: target,
            animated: policy.animated,
        });
    }

    trace!(
        new_index,
        target,
        last = state.last_scroll_offset,
        "Viewport already past active line"
    );
    None
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
