//! Crew tracker: per-driver state during one solve.
//!
//! # Hours-of-service rules
//!
//! - Daily driving may not exceed the daily ceiling.
//! - Continuous driving may not exceed the continuous cap. A run that would
//!   push past it requires a mandatory break first.
//! - An idle wait of at least the rest-reset threshold before a departure
//!   counts as rest and clears continuous driving.
//!
//! Drivers move between terminals on their own (no bus needed) in a fixed
//! transfer time.

use std::collections::HashMap;

use jiff::civil::Time;

use super::Segment;
use crate::config::CrewRules;
use crate::models::{Driver, RouteTemplate, Run};
use crate::time::{minus_minutes, minutes_between, plus_minutes, DAY_START};

/// Stable handle to a driver record within one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverIdx(usize);

impl DriverIdx {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A driver's time-varying state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRecord {
    pub driver: Driver,
    pub next_available: Time,
    /// `None` until the driver's first run unless the catalog fixes it.
    pub location_id: Option<String>,
    /// Minutes driven since the last rest or break.
    pub continuous_minutes: u32,
    /// Minutes driven today.
    pub total_minutes: u32,
}

/// Outcome of a successful feasibility check, carried into the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverReadiness {
    /// Whether the driver must transfer from another terminal.
    pub transfer: bool,
    /// Earliest arrival at the start terminal.
    pub arrival_at_terminal: Time,
    /// Idle wait before departure long enough to count as rest.
    pub rested: bool,
    /// Whether a mandatory break precedes the run.
    pub break_required: bool,
    /// Arrival plus any break: the driver's effective start time.
    pub ready_at: Time,
}

/// Everything that happened to one driver while operating one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverTransition {
    pub driver_id: String,
    pub transfer: Option<Segment>,
    pub mandatory_break: Option<Segment>,
    pub service: Segment,
}

impl DriverRecord {
    fn new(driver: Driver) -> Self {
        Self {
            next_available: DAY_START,
            location_id: driver.start_location_id.clone(),
            continuous_minutes: 0,
            total_minutes: 0,
            driver,
        }
    }

    /// Checks whether the driver can operate a run of `route` departing at
    /// `departure`. Read-only.
    pub fn readiness(
        &self,
        route: &RouteTemplate,
        departure: Time,
        rules: &CrewRules,
    ) -> Option<DriverReadiness> {
        let travel = route.travel_time_minutes;
        if self.total_minutes.checked_add(travel)? > rules.max_daily_driving_minutes {
            return None;
        }

        let transfer = self
            .location_id
            .as_deref()
            .is_some_and(|loc| loc != route.start_terminal_id);
        let arrival_at_terminal = if transfer {
            plus_minutes(self.next_available, rules.driver_transfer_minutes)
        } else {
            self.next_available
        };

        let rested =
            minutes_between(self.next_available, departure) >= i64::from(rules.rest_reset_minutes);
        let continuous = if rested { 0 } else { self.continuous_minutes };

        let break_required =
            continuous.checked_add(travel)? > rules.max_continuous_driving_minutes;
        let ready_at = if break_required {
            plus_minutes(arrival_at_terminal, rules.mandatory_break_minutes)
        } else {
            arrival_at_terminal
        };

        if ready_at > departure {
            return None;
        }
        Some(DriverReadiness {
            transfer,
            arrival_at_terminal,
            rested,
            break_required,
            ready_at,
        })
    }
}

/// Arena of driver records for one solve.
#[derive(Debug, Clone, Default)]
pub struct CrewTracker {
    records: Vec<DriverRecord>,
    index: HashMap<String, DriverIdx>,
}

impl CrewTracker {
    /// Builds records from a catalog snapshot, ordered by driver id.
    pub fn new(mut drivers: Vec<Driver>) -> Self {
        drivers.sort_by(|a, b| a.id.cmp(&b.id));
        let records: Vec<DriverRecord> = drivers.into_iter().map(DriverRecord::new).collect();
        let mut index = HashMap::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            index.entry(r.driver.id.clone()).or_insert(DriverIdx(i));
        }
        Self { records, index }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: DriverIdx) -> &DriverRecord {
        &self.records[idx.0]
    }

    pub fn find(&self, driver_id: &str) -> Option<DriverIdx> {
        self.index.get(driver_id).copied()
    }

    pub fn record(&self, driver_id: &str) -> Option<&DriverRecord> {
        self.find(driver_id).map(|idx| self.get(idx))
    }

    /// All records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DriverIdx, &DriverRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (DriverIdx(i), r))
    }

    /// Applies an accepted run to a driver.
    ///
    /// Transfer and break intervals are placed as late as possible, ending
    /// at departure. The rest/break decision comes from `readiness` as-is.
    pub fn commit(
        &mut self,
        idx: DriverIdx,
        readiness: &DriverReadiness,
        route: &RouteTemplate,
        run: &Run,
        rules: &CrewRules,
    ) -> DriverTransition {
        let record = &mut self.records[idx.0];

        let break_start = if readiness.break_required {
            minus_minutes(run.departure_time, rules.mandatory_break_minutes)
        } else {
            run.departure_time
        };
        let transfer = readiness.transfer.then(|| Segment {
            start: minus_minutes(break_start, rules.driver_transfer_minutes),
            end: break_start,
            from: record.location_id.clone(),
            to: route.start_terminal_id.clone(),
            charge_km: None,
        });
        let mandatory_break = readiness.break_required.then(|| Segment {
            start: break_start,
            end: run.departure_time,
            from: Some(route.start_terminal_id.clone()),
            to: route.start_terminal_id.clone(),
            charge_km: None,
        });
        let service = Segment {
            start: run.departure_time,
            end: run.arrival_time,
            from: Some(route.start_terminal_id.clone()),
            to: route.end_terminal_id.clone(),
            charge_km: None,
        };

        if readiness.rested || readiness.break_required {
            record.continuous_minutes = 0;
        }
        record.continuous_minutes += route.travel_time_minutes;
        record.total_minutes += route.travel_time_minutes;
        record.location_id = Some(route.end_terminal_id.clone());
        record.next_available = run.arrival_time;

        DriverTransition {
            driver_id: record.driver.id.clone(),
            transfer,
            mandatory_break,
            service,
        }
    }
}
