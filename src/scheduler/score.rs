//! Solution scoring.
//!
//! # Components
//!
//! | Component | Count | Weight (default) |
//! |-----------|-------|------------------|
//! | Unassigned runs | runs missing a bus or a driver | -1000 |
//! | Buses used | distinct buses serving at least one run | -100 |
//!
//! The score is the weighted sum; higher is better. With default weights
//! leaving one run uncovered costs as much as putting ten more buses on
//! the road.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ScoreWeights;
use crate::models::{Run, ScheduleSolution};
use crate::tracker::FleetTracker;

/// Score components of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub unassigned_run_count: usize,
    pub unassigned_penalty: i64,
    pub buses_used_count: usize,
    pub bus_used_penalty: i64,
}

impl ScoreBreakdown {
    /// Scores a finished set of runs.
    ///
    /// Only buses known to the fleet are counted as used.
    pub fn calculate(runs: &[Run], fleet: &FleetTracker, weights: &ScoreWeights) -> Self {
        let unassigned_run_count = runs.iter().filter(|r| !r.is_assigned()).count();

        let assigned: HashSet<&str> = runs
            .iter()
            .filter_map(|r| r.assigned_bus_id.as_deref())
            .collect();
        let buses_used_count = fleet
            .iter()
            .filter(|(_, record)| assigned.contains(record.bus.id.as_str()))
            .count();

        Self {
            unassigned_run_count,
            unassigned_penalty: count_i64(unassigned_run_count) * weights.unassigned_run_penalty,
            buses_used_count,
            bus_used_penalty: count_i64(buses_used_count) * weights.bus_used_penalty,
        }
    }

    /// Weighted total.
    #[inline]
    pub fn total(&self) -> i64 {
        self.unassigned_penalty + self.bus_used_penalty
    }

    /// One-line human-readable explanation.
    pub fn explanation(&self) -> String {
        format!(
            "{} unassigned runs (penalty: {}). {} buses used (penalty: {}).",
            self.unassigned_run_count,
            self.unassigned_penalty,
            self.buses_used_count,
            self.bus_used_penalty
        )
    }

    /// Writes counts, score and explanation onto a solution.
    pub fn apply_to(&self, solution: &mut ScheduleSolution) {
        solution.unassigned_run_count = self.unassigned_run_count;
        solution.buses_used_count = self.buses_used_count;
        solution.score = self.total();
        solution.score_explanation = self.explanation();
    }
}

fn count_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
