//! Built-in candidate rules.
//!
//! | Rule | Prefers | Score |
//! |------|---------|-------|
//! | `PreferUsed` | Buses already on the road today | 0 used, 1 fresh |
//! | `EarliestAvailable` | Buses idle the longest | seconds since midnight of availability |
//! | `LeastApproach` | Buses needing no deadhead | approach km |
//!
//! Reusing buses already in service keeps the number of vehicles touched
//! per day low, which is what the scorer penalizes.

use super::{BusCandidate, CandidateRule, RuleScore};
use crate::time::DAY_START;

/// Prefer buses that have already served a run today.
///
/// "Used" is counted by runs served. It agrees with "next available is past
/// the day start" except for a zero-travel run departing at 00:00.
#[derive(Debug, Clone, Copy)]
pub struct PreferUsed;

impl CandidateRule for PreferUsed {
    fn name(&self) -> &'static str {
        "PREFER_USED"
    }

    fn evaluate(&self, candidate: &BusCandidate<'_>) -> RuleScore {
        if candidate.used {
            0
        } else {
            1
        }
    }

    fn description(&self) -> &'static str {
        "Already-used buses before fresh ones"
    }
}

/// Prefer the bus that became available earliest.
#[derive(Debug, Clone, Copy)]
pub struct EarliestAvailable;

impl CandidateRule for EarliestAvailable {
    fn name(&self) -> &'static str {
        "EARLIEST_AVAILABLE"
    }

    fn evaluate(&self, candidate: &BusCandidate<'_>) -> RuleScore {
        candidate.next_available.duration_since(DAY_START).as_secs()
    }

    fn description(&self) -> &'static str {
        "Earliest next-available time"
    }
}

/// Prefer buses already at the start terminal.
#[derive(Debug, Clone, Copy)]
pub struct LeastApproach;

impl CandidateRule for LeastApproach {
    fn name(&self) -> &'static str {
        "LEAST_APPROACH"
    }

    fn evaluate(&self, candidate: &BusCandidate<'_>) -> RuleScore {
        RuleScore::from(candidate.approach_km)
    }

    fn description(&self) -> &'static str {
        "Fewest deadhead kilometres to the start terminal"
    }
}
