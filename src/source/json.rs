//! Parser for pre-parsed JSON cue arrays.
//!
//! Accepts the output of an upstream caption parser:
//!
//! ```json
//! [{"sequence": 0, "startTime": 0, "endTime": 1000, "text": "Hello"}]
//! ```
//!
//! Ordering is not validated. Unsorted input is a caller bug and resolves
//! incorrectly rather than failing here.

use super::CueParser;
use crate::model::{Cue, SourceError};

/// Parses a JSON array of cue objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCueParser;

impl CueParser for JsonCueParser {
    fn parse(&self, raw: &str) -> Result<Vec<Cue>, SourceError> {
        serde_json::from_str(raw).map_err(|e| SourceError::Parse {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cue_array() {
        let raw = r#"[
            {"sequence": 0, "startTime": 0, "endTime": 1000, "text": "a"},
            {"sequence": 1, "startTime": 1000, "endTime": 2000, "text": "b\\nc"}
        ]"#;

        let cues = JsonCueParser.parse(raw).expect("valid cues");

        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].text, "b\\nc", "escaped marker stays literal");
    }

    #[test]
    fn empty_array_is_empty_store() {
        assert!(JsonCueParser.parse("[]").expect("valid").is_empty());
    }

    #[test]
    fn missing_field_is_parse_error() {
        let raw = r#"[{"sequence": 0, "startTime": 0, "text": "a"}]"#;

        let err = JsonCueParser.parse(raw).unwrap_err();

        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(err.to_string().contains("endTime"), "got: {}", err);
    }

    #[test]
    fn unsorted_input_is_accepted() {
        let raw = r#"[
            {"sequence": 1, "startTime": 1000, "endTime": 2000, "text": "b"},
            {"sequence": 0, "startTime": 0, "endTime": 1000, "text": "a"}
        ]"#;

        assert_eq!(JsonCueParser.parse(raw).expect("accepted").len(), 2);
    }
}
