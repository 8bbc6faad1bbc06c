//! Joins cue texts into a flowing paragraph.
//!
//! Cues are short fragments. Concatenating every formatted cue in index order
//! must produce natural word spacing and paragraph breaks without any
//! whitespace added by the renderer.

use serde::{Deserialize, Serialize};

/// Literal paragraph marker in cue text: a backslash followed by `n`.
pub const NEWLINE_MARKER: &str = "\\n";

/// Replacement for each [`NEWLINE_MARKER`].
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// How a cue that directly follows a paragraph break is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinStyle {
    /// Trim the cue and drop its leading space so the new paragraph is not indented.
    #[default]
    TrimAfterBreak,
    /// Pad every interior cue on both sides, including after breaks.
    AlwaysPad,
}

/// Cross-call memory of the formatter.
///
/// Start a fresh state for every pass over the cue sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatterState {
    /// Index of the last cue that contained a paragraph marker.
    pub last_newline_index: Option<usize>,
}

impl FormatterState {
    /// Whether `index` is the first cue of a paragraph.
    ///
    /// With no break seen yet this is index 0.
    fn starts_paragraph(&self, index: usize) -> bool {
        self.last_newline_index.map_or(0, |last| last + 1) == index
    }
}

/// Format one cue's text for paragraph display.
///
/// Rules, first match wins:
/// 1. text with a [`NEWLINE_MARKER`]: each marker becomes [`PARAGRAPH_BREAK`],
///    the break is recorded, no padding is added;
/// 2. first cue after a break (only with [`JoinStyle::TrimAfterBreak`]):
///    trimmed text plus a trailing space;
/// 3. index 0: text plus a trailing space;
/// 4. otherwise: text padded with a space on both sides.
///
/// # Examples
///
/// ```
/// use cuesync::formatter::{format, FormatterState, JoinStyle};
///
/// let mut state = FormatterState::default();
/// let style = JoinStyle::TrimAfterBreak;
/// assert_eq!(format("hello", 0, &mut state, style), "hello ");
/// assert_eq!(format("world", 1, &mut state, style), " world ");
/// assert_eq!(format("line\\nbreak", 2, &mut state, style), "line\n\nbreak");
/// assert_eq!(format("next", 3, &mut state, style), "next ");
/// ```
pub fn format(text: &str, index: usize, state: &mut FormatterState, style: JoinStyle) -> String {
    if text.contains(NEWLINE_MARKER) {
        state.last_newline_index = Some(index);
        return text.replace(NEWLINE_MARKER, PARAGRAPH_BREAK);
    }

    if style == JoinStyle::TrimAfterBreak && state.starts_paragraph(index) {
        return format!("{} ", text.trim());
    }

    if index == 0 {
        return format!("{} ", text);
    }

    format!(" {} ", text)
}

/// Format every text in order with a fresh state and concatenate the result.
pub fn join_all<'a, I>(texts: I, style: JoinStyle) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = FormatterState::default();
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| format(text, index, &mut state, style))
        .collect()
}
