//! Schedule solution model.
//!
//! The output of one solve: every run with its assignment (or none), the
//! activity log, and the score with its components.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ActivityLog, Run};

/// The result of one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSolution {
    /// All runs in processing (departure) order.
    pub runs: Vec<Run>,
    /// Total score (higher is better, never positive with default weights).
    pub score: i64,
    /// Human-readable breakdown of the score.
    pub score_explanation: String,
    /// Runs left without a bus or driver.
    pub unassigned_run_count: usize,
    /// Distinct buses serving at least one run.
    pub buses_used_count: usize,
    /// Audit trail of every bus and driver transition.
    pub activity_log: ActivityLog,
}

impl ScheduleSolution {
    /// Runs with both a bus and a driver.
    pub fn assigned_runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(|r| r.is_assigned())
    }

    /// Runs missing a bus or a driver.
    pub fn unassigned_runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(|r| !r.is_assigned())
    }

    /// Finds a run by id.
    pub fn run(&self, run_id: &str) -> Option<&Run> {
        self.runs.iter().find(|r| r.id == run_id)
    }

    /// Runs served by a bus, in departure order.
    pub fn runs_for_bus<'a>(&'a self, bus_id: &'a str) -> impl Iterator<Item = &'a Run> + 'a {
        self.runs
            .iter()
            .filter(move |r| r.assigned_bus_id.as_deref() == Some(bus_id))
    }

    /// Runs operated by a driver, in departure order.
    pub fn runs_for_driver<'a>(&'a self, driver_id: &'a str) -> impl Iterator<Item = &'a Run> + 'a {
        self.runs
            .iter()
            .filter(move |r| r.assigned_driver_id.as_deref() == Some(driver_id))
    }

    /// Distinct bus ids in use, sorted.
    pub fn buses_in_use(&self) -> BTreeSet<&str> {
        self.runs
            .iter()
            .filter_map(|r| r.assigned_bus_id.as_deref())
            .collect()
    }
}
