//! Fleet tracker: per-bus state during one solve.
//!
//! # State machine
//!
//! A bus is always either at a terminal (start of day only) or at its home
//! depot. Serving a run moves it depot → start terminal (if needed) →
//! end terminal → depot, optionally followed by a charging interval. Every
//! run therefore ends with the bus back at its depot.
//!
//! # Feasibility
//!
//! A bus can take a run only if it can reach the start terminal by
//! departure and its charge covers the full round trip back to its depot,
//! not merely the run itself.

use std::collections::HashMap;

use jiff::civil::Time;

use super::{Leg, Segment};
use crate::config::FleetRules;
use crate::models::{Bus, RouteTemplate, Run};
use crate::time::{minus_minutes, plus_minutes, DAY_START};

/// Stable handle to a bus record within one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusIdx(usize);

impl BusIdx {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A bus's time-varying state.
#[derive(Debug, Clone, PartialEq)]
pub struct BusRecord {
    /// Catalog entry this record was derived from.
    pub bus: Bus,
    /// Earliest time the bus can start its next movement.
    pub next_available: Time,
    /// Where the bus currently is.
    pub location_id: String,
    /// Remaining range (km).
    pub charge_km: u32,
    /// Set while a charging interval is open; such a bus is never selected.
    pub charging: bool,
    /// Runs served so far in this solve.
    pub runs_served: u32,
}

/// Outcome of a successful feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusReadiness {
    /// Deadhead from the depot to the start terminal (none if already there).
    pub approach: Leg,
    /// Earliest arrival at the start terminal.
    pub ready_at: Time,
    /// Approach + route + return to depot (km).
    pub round_trip_km: u32,
}

/// Everything that happened to one bus while serving one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusTransition {
    pub bus_id: String,
    pub approach: Option<Segment>,
    pub service: Segment,
    pub return_to_depot: Option<Segment>,
    pub charging: Option<Segment>,
}

impl BusRecord {
    fn new(bus: Bus) -> Self {
        Self {
            next_available: DAY_START,
            location_id: bus.current_location_id.clone(),
            charge_km: bus.current_charge_km,
            charging: false,
            runs_served: 0,
            bus,
        }
    }

    /// Whether the bus has served a run earlier in the day.
    ///
    /// Equivalent to `next_available != DAY_START` except for a zero-travel
    /// run departing at 00:00 from the depot terminal.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.runs_served > 0
    }

    #[inline]
    pub fn is_at_depot(&self) -> bool {
        self.location_id == self.bus.depot_id
    }

    /// Deadhead needed to reach `terminal_id`.
    ///
    /// `None` when the bus is neither at the terminal nor at its own depot:
    /// buses are only ever redeployed from home.
    pub fn approach_leg(&self, terminal_id: &str, rules: &FleetRules) -> Option<Leg> {
        if self.location_id == terminal_id {
            Some(Leg::NONE)
        } else if self.is_at_depot() {
            Some(Leg {
                minutes: rules.depot_to_terminal_minutes,
                km: rules.depot_to_terminal_km,
            })
        } else {
            None
        }
    }

    /// Deadhead from `terminal_id` back to the home depot.
    pub fn return_leg(&self, terminal_id: &str, rules: &FleetRules) -> Leg {
        if terminal_id == self.bus.depot_id {
            Leg::NONE
        } else {
            Leg {
                minutes: rules.terminal_to_depot_minutes,
                km: rules.terminal_to_depot_km,
            }
        }
    }

    /// Checks whether the bus can serve a run of `route` departing at
    /// `departure`. Read-only.
    pub fn readiness(
        &self,
        route: &RouteTemplate,
        departure: Time,
        rules: &FleetRules,
    ) -> Option<BusReadiness> {
        if self.charging {
            return None;
        }
        let approach = self.approach_leg(&route.start_terminal_id, rules)?;
        let ready_at = plus_minutes(self.next_available, approach.minutes);
        if ready_at > departure {
            return None;
        }
        let round_trip_km = approach
            .km
            .checked_add(route.distance_km)?
            .checked_add(self.return_leg(&route.end_terminal_id, rules).km)?;
        if self.charge_km < round_trip_km {
            return None;
        }
        Some(BusReadiness {
            approach,
            ready_at,
            round_trip_km,
        })
    }

    /// Whether a bus arriving at its depot with `charge_km` must charge
    /// before it can be sent out again.
    pub fn needs_charge(&self, charge_km: u32, rules: &FleetRules) -> bool {
        let fraction = f64::from(charge_km) / f64::from(self.bus.range_km);
        fraction < rules.min_charge_fraction || charge_km < rules.minimal_operation_km()
    }
}

/// Arena of bus records for one solve.
#[derive(Debug, Clone, Default)]
pub struct FleetTracker {
    records: Vec<BusRecord>,
    index: HashMap<String, BusIdx>,
}

impl FleetTracker {
    /// Builds records from a catalog snapshot, ordered by bus id.
    pub fn new(mut buses: Vec<Bus>) -> Self {
        buses.sort_by(|a, b| a.id.cmp(&b.id));
        let records: Vec<BusRecord> = buses.into_iter().map(BusRecord::new).collect();
        let mut index = HashMap::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            index.entry(r.bus.id.clone()).or_insert(BusIdx(i));
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
    pub fn get(&self, idx: BusIdx) -> &BusRecord {
        &self.records[idx.0]
    }

    /// Looks up a bus by id.
    pub fn find(&self, bus_id: &str) -> Option<BusIdx> {
        self.index.get(bus_id).copied()
    }

    /// Record of a bus by id.
    pub fn record(&self, bus_id: &str) -> Option<&BusRecord> {
        self.find(bus_id).map(|idx| self.get(idx))
    }

    /// All records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BusIdx, &BusRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (BusIdx(i), r))
    }

    /// Applies an accepted run to a bus.
    ///
    /// Debits approach and route distance, moves the bus to the end
    /// terminal and then home, and opens and closes a charging interval if
    /// the charge on arrival at the depot is too low for another operation.
    pub fn commit(
        &mut self,
        idx: BusIdx,
        readiness: &BusReadiness,
        route: &RouteTemplate,
        run: &Run,
        rules: &FleetRules,
    ) -> BusTransition {
        let record = &mut self.records[idx.0];

        let start_charge = record.charge_km;
        // Round-trip feasibility covers the approach, so this never saturates.
        let at_terminal_charge = start_charge.saturating_sub(readiness.approach.km);
        let approach = (!readiness.approach.is_none()).then(|| Segment {
            start: minus_minutes(run.departure_time, readiness.approach.minutes),
            end: run.departure_time,
            from: Some(record.location_id.clone()),
            to: route.start_terminal_id.clone(),
            charge_km: Some((start_charge, at_terminal_charge)),
        });

        let after_route_charge = at_terminal_charge.saturating_sub(route.distance_km);
        let service = Segment {
            start: run.departure_time,
            end: run.arrival_time,
            from: Some(route.start_terminal_id.clone()),
            to: route.end_terminal_id.clone(),
            charge_km: Some((at_terminal_charge, after_route_charge)),
        };
        record.charge_km = after_route_charge;
        record.location_id = route.end_terminal_id.clone();
        record.next_available = run.arrival_time;
        record.runs_served += 1;

        let back = record.return_leg(&route.end_terminal_id, rules);
        let at_depot = plus_minutes(run.arrival_time, back.minutes);
        let depot_charge = after_route_charge.saturating_sub(back.km);
        let return_to_depot = (!back.is_none()).then(|| Segment {
            start: run.arrival_time,
            end: at_depot,
            from: Some(route.end_terminal_id.clone()),
            to: record.bus.depot_id.clone(),
            charge_km: Some((after_route_charge, depot_charge)),
        });
        record.location_id = record.bus.depot_id.clone();
        record.charge_km = depot_charge;
        record.next_available = at_depot;

        let mut charging = None;
        if record.needs_charge(depot_charge, rules) {
            record.charging = true;
            let charged_at = plus_minutes(at_depot, rules.charging_minutes);
            charging = Some(Segment {
                start: at_depot,
                end: charged_at,
                from: Some(record.bus.depot_id.clone()),
                to: record.bus.depot_id.clone(),
                charge_km: Some((depot_charge, record.bus.range_km)),
            });
            record.charge_km = record.bus.range_km;
            record.next_available = charged_at;
            record.charging = false;
        }

        BusTransition {
            bus_id: record.bus.id.clone(),
            approach,
            service,
            return_to_depot,
            charging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::time;

    fn rules() -> FleetRules {
        FleetRules::default()
    }

    fn route() -> RouteTemplate {
        RouteTemplate::new("R1", "T1", "T2", 20, 45)
    }

    #[test]
    fn test_records_sorted_by_id() {
        let fleet = FleetTracker::new(vec![
            Bus::new("B3", "D1", 200),
            Bus::new("B1", "D1", 200),
            Bus::new("B2", "D1", 200),
        ]);
        let ids: Vec<_> = fleet.iter().map(|(_, r)| r.bus.id.as_str()).collect();
        assert_eq!(ids, vec!["B1", "B2", "B3"]);
        assert_eq!(fleet.find("B2"), Some(BusIdx(1)));
        assert!(fleet.find("B9").is_none());
    }

    #[test]
    fn test_readiness_at_terminal() {
        let fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200).located_at("T1")]);
        let r = fleet
            .get(BusIdx(0))
            .readiness(&route(), time(8, 0, 0, 0), &rules())
            .unwrap();
        assert!(r.approach.is_none());
        assert_eq!(r.ready_at, DAY_START);
        // 0 + 20 + 10 (T2 is not the depot)
        assert_eq!(r.round_trip_km, 30);
    }

    #[test]
    fn test_readiness_from_depot() {
        let fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200)]);
        let r = fleet
            .get(BusIdx(0))
            .readiness(&route(), time(8, 0, 0, 0), &rules())
            .unwrap();
        assert_eq!(r.approach, Leg { minutes: 15, km: 5 });
        assert_eq!(r.ready_at, time(0, 15, 0, 0));
        assert_eq!(r.round_trip_km, 35);
    }

    #[test]
    fn test_readiness_rejects_foreign_location() {
        let fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200).located_at("T3")]);
        assert!(fleet
            .get(BusIdx(0))
            .readiness(&route(), time(8, 0, 0, 0), &rules())
            .is_none());
    }

    #[test]
    fn test_readiness_rejects_late_bus() {
        let mut fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200)]);
        fleet.records[0].next_available = time(7, 50, 0, 0);
        // 07:50 + 15 = 08:05 > 08:00
        assert!(fleet
            .get(BusIdx(0))
            .readiness(&route(), time(8, 0, 0, 0), &rules())
            .is_none());
        // Exactly on time is fine.
        assert!(fleet
            .get(BusIdx(0))
            .readiness(&route(), time(8, 5, 0, 0), &rules())
            .is_some());
    }

    #[test]
    fn test_readiness_requires_round_trip_charge() {
        // Needs 5 + 20 + 10 = 35 km.
        let fleet = FleetTracker::new(vec![
            Bus::new("B1", "D1", 200).with_charge(34),
            Bus::new("B2", "D1", 200).with_charge(35),
        ]);
        assert!(fleet.get(BusIdx(0)).readiness(&route(), time(8, 0, 0, 0), &rules()).is_none());
        assert!(fleet.get(BusIdx(1)).readiness(&route(), time(8, 0, 0, 0), &rules()).is_some());
    }

    #[test]
    fn test_readiness_rejects_overflowing_round_trip() {
        let fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 250)]);
        for km in [u32::MAX, u32::MAX - 10] {
            let route = RouteTemplate::new("R1", "T1", "T2", km, 45);
            assert!(fleet
                .get(BusIdx(0))
                .readiness(&route, time(8, 0, 0, 0), &rules())
                .is_none());
        }
    }

    #[test]
    fn test_readiness_skips_charging_bus() {
        let mut fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200)]);
        fleet.records[0].charging = true;
        assert!(fleet.get(BusIdx(0)).readiness(&route(), time(8, 0, 0, 0), &rules()).is_none());
    }

    #[test]
    fn test_commit_without_charging() {
        let mut fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200)]);
        let route = route();
        let run = Run::new("R1-0800", &route, time(8, 0, 0, 0));
        let readiness = fleet.get(BusIdx(0)).readiness(&route, run.departure_time, &rules()).unwrap();
        let t = fleet.commit(BusIdx(0), &readiness, &route, &run, &rules());

        let approach = t.approach.unwrap();
        assert_eq!(approach.start, time(7, 45, 0, 0));
        assert_eq!(approach.charge_km, Some((200, 195)));
        assert_eq!(t.service.charge_km, Some((195, 175)));
        let back = t.return_to_depot.unwrap();
        assert_eq!(back.end, time(9, 5, 0, 0));
        assert_eq!(back.charge_km, Some((175, 165)));
        assert!(t.charging.is_none());

        let r = fleet.get(BusIdx(0));
        assert_eq!(r.location_id, "D1");
        assert_eq!(r.charge_km, 165);
        assert_eq!(r.next_available, time(9, 5, 0, 0));
        assert!(r.is_used());
        assert!(!r.charging);
    }

    #[test]
    fn test_used_bus_has_left_day_start() {
        let mut fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200)]);
        assert!(!fleet.get(BusIdx(0)).is_used());
        assert_eq!(fleet.get(BusIdx(0)).next_available, DAY_START);

        let route = route();
        let run = Run::new("R1-0015", &route, time(0, 15, 0, 0));
        let readiness = fleet.get(BusIdx(0)).readiness(&route, run.departure_time, &rules()).unwrap();
        fleet.commit(BusIdx(0), &readiness, &route, &run, &rules());

        let r = fleet.get(BusIdx(0));
        assert!(r.is_used());
        assert_ne!(r.next_available, DAY_START);
    }

    #[test]
    fn test_commit_with_charging() {
        // 60 - 35 = 25 km left at depot = 12.5% of 200 → charge.
        let mut fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200).with_charge(60)]);
        let route = route();
        let run = Run::new("R1-0800", &route, time(8, 0, 0, 0));
        let readiness = fleet.get(BusIdx(0)).readiness(&route, run.departure_time, &rules()).unwrap();
        let t = fleet.commit(BusIdx(0), &readiness, &route, &run, &rules());

        let charging = t.charging.unwrap();
        assert_eq!(charging.start, time(9, 5, 0, 0));
        assert_eq!(charging.end, time(11, 5, 0, 0));
        assert_eq!(charging.charge_km, Some((25, 200)));

        let r = fleet.get(BusIdx(0));
        assert_eq!(r.charge_km, 200);
        assert_eq!(r.next_available, time(11, 5, 0, 0));
        assert!(!r.charging);
    }

    #[test]
    fn test_needs_charge_minimal_operation() {
        let fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 100)]);
        let r = fleet.get(BusIdx(0));
        // 24 km is 24% of range but cannot cover 5 + 20 km.
        assert!(r.needs_charge(24, &rules()));
        assert!(!r.needs_charge(25, &rules()));
        assert!(r.needs_charge(0, &rules()));
    }

    #[test]
    fn test_route_ending_at_depot_has_no_return() {
        let mut fleet = FleetTracker::new(vec![Bus::new("B1", "D1", 200).located_at("T1")]);
        let route = RouteTemplate::new("R2", "T1", "D1", 20, 30);
        let run = Run::new("R2-0800", &route, time(8, 0, 0, 0));
        let readiness = fleet.get(BusIdx(0)).readiness(&route, run.departure_time, &rules()).unwrap();
        assert_eq!(readiness.round_trip_km, 20);
        let t = fleet.commit(BusIdx(0), &readiness, &route, &run, &rules());
        assert!(t.approach.is_none());
        assert!(t.return_to_depot.is_none());
        assert_eq!(fleet.get(BusIdx(0)).next_available, time(8, 30, 0, 0));
    }
}
