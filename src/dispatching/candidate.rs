//! Feasible-bus view passed to dispatching rules.

use jiff::civil::Time;

use crate::tracker::{BusIdx, BusReadiness, BusRecord};

/// A bus that passed every feasibility check for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusCandidate<'a> {
    /// Handle into the fleet tracker.
    pub idx: BusIdx,
    pub bus_id: &'a str,
    /// Whether the bus has already served a run today.
    pub used: bool,
    /// When the bus became free.
    pub next_available: Time,
    /// When it can be at the start terminal.
    pub ready_at: Time,
    /// Deadhead distance to the start terminal (km).
    pub approach_km: u32,
}

impl<'a> BusCandidate<'a> {
    /// Builds a candidate from a record and its feasibility result.
    pub fn new(idx: BusIdx, record: &'a BusRecord, readiness: &BusReadiness) -> Self {
        Self {
            idx,
            bus_id: &record.bus.id,
            used: record.is_used(),
            next_available: record.next_available,
            ready_at: readiness.ready_at,
            approach_km: readiness.approach.km,
        }
    }
}
