//! Renderer-measured line layout and the cue-to-line mapping.

use serde::{Deserialize, Serialize};

/// One rendered line of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Vertical offset of the line's top edge within the scroll content.
    pub y: f64,
}

impl LineRecord {
    /// Create a line record at vertical offset `y`.
    pub fn new(y: f64) -> Self {
        Self { y }
    }
}

/// Ordered line positions produced by the renderer after a layout pass.
///
/// Read-only; a remeasure replaces the whole snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineLayoutSnapshot {
    lines: Vec<LineRecord>,
}

impl LineLayoutSnapshot {
    /// Create a snapshot from measured lines.
    pub fn new(lines: Vec<LineRecord>) -> Self {
        Self { lines }
    }

    /// Snapshot of `count` lines spaced `line_height` apart, starting at 0.
    pub fn uniform(count: usize, line_height: f64) -> Self {
        Self::new(
            (0..count)
                .map(|i| LineRecord::new(i as f64 * line_height))
                .collect(),
        )
    }

    /// Number of rendered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines were measured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`.
    pub fn get(&self, index: usize) -> Option<&LineRecord> {
        self.lines.get(index)
    }

    /// All lines in order.
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }
}

impl FromIterator<f64> for LineLayoutSnapshot {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(LineRecord::new).collect())
    }
}

/// Estimate the rendered line for cue `cue_index`.
///
/// Linear proportion from `[0, cue_count]` to `[0, line_count]`, floored.
/// This assumes uniform text density: a cue may wrap into zero, one, or many
/// lines, so the result is an approximation.
///
/// Returns `None` when there are no cues, or when the estimate falls outside
/// `[0, line_count)` (including an empty layout).
///
/// # Examples
///
/// ```
/// use cuesync::scroll::interpolate_line_index;
///
/// assert_eq!(interpolate_line_index(5, 10, 40), Some(20));
/// assert_eq!(interpolate_line_index(1, 3, 10), Some(3)); // 3.33 floors to 3
/// assert_eq!(interpolate_line_index(10, 10, 40), None);  // past the last line
/// assert_eq!(interpolate_line_index(0, 0, 40), None);
/// ```
pub fn interpolate_line_index(
    cue_index: usize,
    cue_count: usize,
    line_count: usize,
) -> Option<usize> {
    if cue_count == 0 {
        return None;
    }
    // u128 so the product cannot overflow for any usize inputs.
    let line = (cue_index as u128 * line_count as u128) / cue_count as u128;
    let line = usize::try_from(line).ok()?;
    (line < line_count).then_some(line)
}
