//! Time-to-cue resolution.
//!
//! Binary search over cue start times for the cue active at a playback time.
//!
//! # Complexity
//!
//! - `resolve`: O(log n)
//!
//! # Preconditions
//!
//! Cues must be ascending by `start_time`. Adjacent cues with identical start
//! times resolve to an unspecified one of them; unsorted input yields an
//! undefined (but non-panicking) result.

use crate::model::Cue;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to report when the playback time falls in a gap between cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// A gap resolves to "inactive".
    #[default]
    Strict,
    /// A gap resolves to the next cue, even though its start is still ahead.
    /// Past the last cue this is the last cue.
    NearestFallback,
}

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown boundary policy '{0}' (expected 'strict' or 'nearest-fallback')")]
pub struct UnknownBoundaryPolicy(pub String);

impl FromStr for BoundaryPolicy {
    type Err = UnknownBoundaryPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strict" => Ok(Self::Strict),
            "nearest-fallback" | "nearest" => Ok(Self::NearestFallback),
            other => Err(UnknownBoundaryPolicy(other.to_string())),
        }
    }
}

/// Result of resolving a playback time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    active: Option<(usize, &'a Cue)>,
}

impl<'a> Resolution<'a> {
    /// The inactive result: no cue, empty text.
    pub const INACTIVE: Resolution<'static> = Resolution { active: None };

    fn active(position: usize, cue: &'a Cue) -> Self {
        Self {
            active: Some((position, cue)),
        }
    }

    /// Sequence number of the active cue, `None` when inactive.
    pub fn index(&self) -> Option<u32> {
        self.active.map(|(_, cue)| cue.sequence)
    }

    /// Array position of the active cue within the store.
    pub fn position(&self) -> Option<usize> {
        self.active.map(|(position, _)| position)
    }

    /// Text of the active cue, empty when inactive.
    pub fn text(&self) -> &'a str {
        self.active.map_or("", |(_, cue)| cue.text.as_str())
    }

    /// The active cue itself.
    pub fn cue(&self) -> Option<&'a Cue> {
        self.active.map(|(_, cue)| cue)
    }

    /// Whether a cue is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Resolve the cue active at `time` (milliseconds).
///
/// Finds the rightmost cue whose `start_time <= time`. If `time` is within
/// that cue's interval it is active; otherwise `policy` decides the gap.
///
/// # Examples
///
/// ```
/// use cuesync::model::Cue;
/// use cuesync::resolver::{resolve, BoundaryPolicy};
///
/// let cues = vec![Cue::new(0, 0, 1000, "a"), Cue::new(1, 1000, 2000, "b")];
/// assert_eq!(resolve(&cues, 500, BoundaryPolicy::Strict).index(), Some(0));
/// assert_eq!(resolve(&cues, 2500, BoundaryPolicy::Strict).index(), None);
/// assert_eq!(resolve(&cues, 2500, BoundaryPolicy::NearestFallback).text(), "b");
/// ```
pub fn resolve(cues: &[Cue], time: u64, policy: BoundaryPolicy) -> Resolution<'_> {
    // First position whose start is after `time`; everything before it starts at or before.
    let high = cues.partition_point(|cue| cue.start_time <= time);

    let Some(low) = high.checked_sub(1) else {
        return Resolution::INACTIVE;
    };

    let candidate = &cues[low];
    if time <= candidate.end_time {
        return Resolution::active(low, candidate);
    }

    match policy {
        BoundaryPolicy::Strict => Resolution::INACTIVE,
        BoundaryPolicy::NearestFallback => {
            let next = high.min(cues.len() - 1);
            Resolution::active(next, &cues[next])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cues() -> Vec<Cue> {
        vec![Cue::new(0, 0, 1000, "a"), Cue::new(1, 1000, 2000, "b")]
    }

    fn gapped() -> Vec<Cue> {
        vec![
            Cue::new(10, 1000, 2000, "first"),
            Cue::new(11, 3000, 4000, "second"),
            Cue::new(12, 5000, 6000, "third"),
        ]
    }

    #[test]
    fn empty_cues_are_inactive() {
        let result = resolve(&[], 100, BoundaryPolicy::NearestFallback);
        assert_eq!(result, Resolution::INACTIVE);
        assert_eq!(result.text(), "");
    }

    #[test]
    fn time_before_first_cue_is_inactive_under_both_policies() {
        let cues = gapped();
        assert_eq!(resolve(&cues, 999, BoundaryPolicy::Strict).index(), None);
        assert_eq!(
            resolve(&cues, 999, BoundaryPolicy::NearestFallback).index(),
            None
        );
    }

    #[test]
    fn time_inside_cue_resolves_to_its_sequence() {
        let cues = two_cues();
        let result = resolve(&cues, 500, BoundaryPolicy::Strict);
        assert_eq!(result.index(), Some(0));
        assert_eq!(result.text(), "a");

        let result = resolve(&cues, 1500, BoundaryPolicy::Strict);
        assert_eq!(result.index(), Some(1));
        assert_eq!(result.text(), "b");
    }

    #[test]
    fn shared_boundary_prefers_later_cue() {
        // 1000 is both the end of "a" and the start of "b".
        let cues = two_cues();
        assert_eq!(resolve(&cues, 1000, BoundaryPolicy::Strict).index(), Some(1));
    }

    #[test]
    fn end_time_is_inclusive() {
        let cues = gapped();
        assert_eq!(resolve(&cues, 2000, BoundaryPolicy::Strict).index(), Some(10));
    }

    #[test]
    fn last_cue_is_resolvable() {
        let cues = gapped();
        let result = resolve(&cues, 5500, BoundaryPolicy::Strict);
        assert_eq!(result.index(), Some(12));
        assert_eq!(result.position(), Some(2));
    }

    #[test]
    fn gap_is_inactive_under_strict() {
        let cues = gapped();
        assert_eq!(resolve(&cues, 2500, BoundaryPolicy::Strict), Resolution::INACTIVE);
    }

    #[test]
    fn gap_falls_forward_under_nearest_fallback() {
        let cues = gapped();
        let result = resolve(&cues, 2500, BoundaryPolicy::NearestFallback);
        assert_eq!(result.index(), Some(11));
        assert_eq!(result.text(), "second");
        assert_eq!(result.position(), Some(1));
    }

    #[test]
    fn past_last_cue_falls_back_to_last_under_nearest_fallback() {
        let cues = two_cues();
        assert_eq!(resolve(&cues, 2500, BoundaryPolicy::Strict).index(), None);

        let result = resolve(&cues, 2500, BoundaryPolicy::NearestFallback);
        assert_eq!(result.index(), Some(1));
        assert_eq!(result.text(), "b");
    }

    #[test]
    fn sequence_is_reported_not_position() {
        let cues = gapped();
        let result = resolve(&cues, 1500, BoundaryPolicy::Strict);
        assert_eq!(result.index(), Some(10));
        assert_eq!(result.position(), Some(0));
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("strict".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Strict));
        assert_eq!("nearest-fallback".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::NearestFallback));
        assert_eq!(" nearest ".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::NearestFallback));
        assert_eq!(
            "loose".parse::<BoundaryPolicy>(),
            Err(UnknownBoundaryPolicy("loose".to_string()))
        );
    }

    #[test]
    fn policy_deserializes_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: BoundaryPolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"nearest-fallback\"").expect("valid toml");
        assert_eq!(w.policy, BoundaryPolicy::NearestFallback);
    }
}
