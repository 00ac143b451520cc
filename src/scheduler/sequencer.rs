//! Run processing order.

use crate::models::Run;

/// Orders runs by departure time, keeping provider order on ties.
///
/// This order is the only thing that decides which run gets first pick of
/// buses and drivers.
pub fn sequence_runs(mut runs: Vec<Run>) -> Vec<Run> {
    runs.sort_by_key(|r| r.departure_time);
    runs
}
