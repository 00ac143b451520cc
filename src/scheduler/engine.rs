//! Greedy single-pass assignment engine.
//!
//! # Algorithm
//!
//! 1. Snapshot the catalog and build fresh fleet and crew trackers.
//! 2. Walk runs in departure order (stable on ties). Runs whose route is
//!    unknown or that would end past midnight are skipped.
//! 3. For each run, collect every feasible bus and rank them with the bus
//!    rule engine.
//! 4. With a bus chosen, take the first feasible driver in id order.
//! 5. Commit both only if both were found; otherwise leave the run
//!    unassigned and touch nothing.
//! 6. Score the result.
//!
//! No run is ever revisited. The result is feasible, not optimal.
//!
//! # Complexity
//! O(r * (b log b + d)) where r=runs, b=buses, d=drivers.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use jiff::civil::Time;
use tracing::{debug, info, instrument, warn};

use super::{sequence_runs, ActivityLogger, ScoreBreakdown};
use crate::catalog::CatalogProvider;
use crate::config::EngineConfig;
use crate::dispatching::{BusCandidate, RuleEngine};
use crate::models::{RouteTemplate, ScheduleSolution};
use crate::time::checked_plus_minutes;
use crate::tracker::{BusIdx, BusReadiness, CrewTracker, DriverIdx, DriverReadiness, FleetTracker};

/// Solution plus the final tracker state it was derived from.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub solution: ScheduleSolution,
    /// Bus state after the last run.
    pub fleet: FleetTracker,
    /// Driver state after the last run.
    pub crew: CrewTracker,
    pub score: ScoreBreakdown,
}

/// Assigns runs to buses and drivers.
///
/// The engine holds only immutable parameters; every solve builds its own
/// trackers, so one engine can serve concurrent solves.
///
/// # Example
///
/// ```
/// use jiff::civil::time;
/// use u_transit::catalog::Catalog;
/// use u_transit::config::EngineConfig;
/// use u_transit::models::{Bus, Driver, RouteTemplate};
/// use u_transit::scheduler::AssignmentEngine;
///
/// let catalog = Catalog::new()
///     .with_route(RouteTemplate::new("R1", "T1", "T2", 18, 45))
///     .with_bus(Bus::new("B1", "D1", 250))
///     .with_driver(Driver::new("DR1", "Ana"))
///     .with_timetable("R1", &[time(8, 0, 0, 0)]);
///
/// let solution = AssignmentEngine::new(EngineConfig::default()).solve(&catalog);
/// assert_eq!(solution.runs[0].assigned_bus_id.as_deref(), Some("B1"));
/// assert_eq!(solution.score, -100);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: EngineConfig,
    bus_rules: RuleEngine,
}

impl AssignmentEngine {
    /// Creates an engine with the standard bus rule chain.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            bus_rules: RuleEngine::standard(),
        }
    }

    /// Replaces the bus rule chain.
    pub fn with_bus_rules(mut self, rules: RuleEngine) -> Self {
        self.bus_rules = rules;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bus_rules(&self) -> &RuleEngine {
        &self.bus_rules
    }

    /// Produces a schedule for every run in the catalog.
    pub fn solve<C: CatalogProvider + ?Sized>(&self, catalog: &C) -> ScheduleSolution {
        self.solve_detailed(catalog).solution
    }

    /// Like [`solve`](Self::solve), also returning the final tracker state.
    #[instrument(name = "solve", skip_all, level = "debug")]
    pub fn solve_detailed<C: CatalogProvider + ?Sized>(&self, catalog: &C) -> SolveOutcome {
        let routes = catalog.route_templates();
        let mut fleet = FleetTracker::new(catalog.buses());
        let mut crew = CrewTracker::new(catalog.drivers());
        let mut runs = sequence_runs(catalog.runs());
        let mut logger = ActivityLogger::new();

        debug!(
            runs = runs.len(),
            buses = fleet.len(),
            drivers = crew.len(),
            routes = routes.len(),
            "starting solve"
        );

        for run in runs.iter_mut() {
            let Some(route) = routes.get(&run.route_id) else {
                warn!(run_id = %run.id, route_id = %run.route_id, "unknown route template, run skipped");
                continue;
            };
            if checked_plus_minutes(run.departure_time, route.travel_time_minutes).is_none() {
                warn!(run_id = %run.id, departure = %run.departure_time, "run ends past midnight, skipped");
                continue;
            }

            let Some((bus_idx, bus_ready)) = self.select_bus(&fleet, route, run.departure_time)
            else {
                debug!(run_id = %run.id, "no feasible bus");
                continue;
            };
            let Some((driver_idx, driver_ready)) =
                self.select_driver(&crew, route, run.departure_time)
            else {
                debug!(run_id = %run.id, bus_id = %fleet.get(bus_idx).bus.id, "no feasible driver");
                continue;
            };

            let bus = fleet.commit(bus_idx, &bus_ready, route, run, &self.config.fleet);
            let driver = crew.commit(driver_idx, &driver_ready, route, run, &self.config.crew);
            run.assign(&bus.bus_id, &driver.driver_id);
            debug!(
                run_id = %run.id,
                bus_id = %bus.bus_id,
                driver_id = %driver.driver_id,
                mandatory_break = driver.mandatory_break.is_some(),
                charging = bus.charging.is_some(),
                "run assigned"
            );
            logger.record(run, &bus, &driver);
        }

        let score = ScoreBreakdown::calculate(&runs, &fleet, &self.config.scoring);
        let mut solution = ScheduleSolution {
            runs,
            activity_log: logger.into_log(),
            ..Default::default()
        };
        score.apply_to(&mut solution);

        info!(
            runs = solution.runs.len(),
            unassigned = solution.unassigned_run_count,
            buses_used = solution.buses_used_count,
            score = solution.score,
            "solve finished"
        );

        SolveOutcome {
            solution,
            fleet,
            crew,
            score,
        }
    }

    /// Best feasible bus under the rule chain. Read-only.
    fn select_bus(
        &self,
        fleet: &FleetTracker,
        route: &RouteTemplate,
        departure: Time,
    ) -> Option<(BusIdx, BusReadiness)> {
        let feasible: Vec<_> = fleet
            .iter()
            .filter_map(|(idx, record)| {
                record
                    .readiness(route, departure, &self.config.fleet)
                    .map(|ready| (BusCandidate::new(idx, record, &ready), ready))
            })
            .collect();
        let candidates: Vec<BusCandidate<'_>> = feasible.iter().map(|(c, _)| *c).collect();

        let best = self.bus_rules.select_best(&candidates)?;
        let (candidate, ready) = feasible[best];
        Some((candidate.idx, ready))
    }

    /// First feasible driver in id order. Read-only.
    fn select_driver(
        &self,
        crew: &CrewTracker,
        route: &RouteTemplate,
        departure: Time,
    ) -> Option<(DriverIdx, DriverReadiness)> {
        crew.iter().find_map(|(idx, record)| {
            record
                .readiness(route, departure, &self.config.crew)
                .map(|ready| (idx, ready))
        })
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::CrewRules;
    use crate::models::{ActivityKind, Bus, Driver, EntityKind, Run, Stop};
    use jiff::civil::time;
    use std::sync::Arc;

    fn base_catalog() -> Catalog {
        Catalog::new()
            .with_stop(Stop::depot("D1", "Main Depot", 10))
            .with_stop(Stop::terminal("T1", "North"))
            .with_stop(Stop::terminal("T2", "South"))
            .with_route(RouteTemplate::new("R1", "T1", "T2", 20, 45))
    }

    fn engine() -> AssignmentEngine {
        AssignmentEngine::default()
    }

    #[test]
    fn test_scenario_bus_and_driver_at_terminal() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200).located_at("T1"))
            .with_driver(Driver::new("DR1", "Ana").located_at("T1"))
            .with_timetable("R1", &[time(8, 0, 0, 0)]);

        let outcome = engine().solve_detailed(&catalog);
        let run = &outcome.solution.runs[0];
        assert_eq!(run.assigned_bus_id.as_deref(), Some("B1"));
        assert_eq!(run.assigned_driver_id.as_deref(), Some("DR1"));

        let log = &outcome.solution.activity_log;
        assert_eq!(log.of_kind(ActivityKind::TravelToStartTerminal).count(), 0);
        assert_eq!(log.of_kind(ActivityKind::MandatoryBreak).count(), 0);
        assert_eq!(log.of_kind(ActivityKind::RouteService).count(), 2);

        let driver = outcome.crew.record("DR1").unwrap();
        assert_eq!(driver.continuous_minutes, 45);
        assert_eq!(driver.total_minutes, 45);
    }

    #[test]
    fn test_scenario_approach_from_depot() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(8, 0, 0, 0)]);

        let solution = engine().solve(&catalog);
        let approach: Vec<_> = solution
            .activity_log
            .entries_for(EntityKind::Bus, "B1")
            .filter(|e| e.activity_kind == ActivityKind::TravelToStartTerminal)
            .collect();
        assert_eq!(approach.len(), 1);
        assert_eq!(approach[0].duration_minutes(), 15);
        assert_eq!(approach[0].charge_used_km(), Some(5));
        assert_eq!(approach[0].start_location_id.as_deref(), Some("D1"));
        assert_eq!(approach[0].end_location_id.as_deref(), Some("T1"));
        assert_eq!(approach[0].end_time, time(8, 0, 0, 0));
    }

    #[test]
    fn test_scenario_charging_after_low_return() {
        // 100 km range, 5 + 70 + 10 = 85 km round trip leaves 15 km (15%).
        let catalog = Catalog::new()
            .with_route(RouteTemplate::new("RX", "T1", "T2", 70, 90))
            .with_bus(Bus::new("B1", "D1", 100))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("RX", &[time(8, 0, 0, 0)]);

        let outcome = engine().solve_detailed(&catalog);
        let charging: Vec<_> = outcome
            .solution
            .activity_log
            .of_kind(ActivityKind::Charging)
            .collect();
        assert_eq!(charging.len(), 1);
        assert_eq!(charging[0].duration_minutes(), 120);
        assert_eq!(charging[0].start_charge_km, Some(15));
        assert_eq!(charging[0].end_charge_km, Some(100));
        // Arrival 09:30, back at depot 09:50, charged 11:50.
        assert_eq!(charging[0].start_time, time(9, 50, 0, 0));

        let bus = outcome.fleet.record("B1").unwrap();
        assert_eq!(bus.charge_km, 100);
        assert_eq!(bus.location_id, "D1");
        assert_eq!(bus.next_available, time(11, 50, 0, 0));
        assert!(!bus.charging);
    }

    #[test]
    fn test_scenario_mandatory_break() {
        // Rest threshold longer than the break so a break can fit.
        let config = EngineConfig::default().with_crew(CrewRules {
            rest_reset_minutes: 60,
            ..CrewRules::default()
        });
        let catalog = Catalog::new()
            .with_route(RouteTemplate::new("OUT", "T1", "T2", 30, 130))
            .with_route(RouteTemplate::new("BACK", "T2", "T1", 30, 130))
            .with_bus(Bus::new("B1", "D1", 250))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("OUT", &[time(6, 0, 0, 0)])
            .with_timetable("BACK", &[time(8, 50, 0, 0)]);

        let outcome = AssignmentEngine::new(config).solve_detailed(&catalog);
        assert_eq!(outcome.solution.unassigned_run_count, 0);

        let timeline: Vec<_> = outcome
            .solution
            .activity_log
            .entries_for(EntityKind::Driver, "DR1")
            .collect();
        let kinds: Vec<_> = timeline.iter().map(|e| e.activity_kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityKind::RouteService,
                ActivityKind::MandatoryBreak,
                ActivityKind::RouteService,
            ]
        );
        let brk = timeline[1];
        assert_eq!(brk.duration_minutes(), 30);
        assert_eq!(brk.end_time, time(8, 50, 0, 0));
        assert_eq!(brk.start_location_id.as_deref(), Some("T2"));

        let driver = outcome.crew.record("DR1").unwrap();
        assert_eq!(driver.continuous_minutes, 130);
        assert_eq!(driver.total_minutes, 260);
    }

    #[test]
    fn test_scenario_used_bus_preferred() {
        // Only B2 reaches the 00:10 run; both can take the 10:00 run.
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_bus(Bus::new("B2", "D1", 200).located_at("T1"))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(0, 10, 0, 0), time(10, 0, 0, 0)]);

        let solution = engine().solve(&catalog);
        let buses: Vec<_> = solution
            .runs
            .iter()
            .map(|r| r.assigned_bus_id.as_deref())
            .collect();
        assert_eq!(buses, vec![Some("B2"), Some("B2")]);
        assert_eq!(solution.buses_used_count, 1);
        assert_eq!(solution.score, -100);
    }

    #[test]
    fn test_fresh_buses_tie_break_by_id() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B2", "D1", 200))
            .with_bus(Bus::new("B1", "D1", 200))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(8, 0, 0, 0)]);
        let solution = engine().solve(&catalog);
        assert_eq!(solution.runs[0].assigned_bus_id.as_deref(), Some("B1"));
    }

    #[test]
    fn test_driver_first_fit_by_id() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_bus(Bus::new("B2", "D1", 200))
            .with_driver(Driver::new("DR2", "Ben"))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(8, 0, 0, 0), time(8, 10, 0, 0)]);
        let solution = engine().solve(&catalog);
        assert_eq!(solution.runs[0].assigned_driver_id.as_deref(), Some("DR1"));
        // DR1 is on the road until 08:45.
        assert_eq!(solution.runs[1].assigned_driver_id.as_deref(), Some("DR2"));
        assert_eq!(solution.runs[1].assigned_bus_id.as_deref(), Some("B2"));
    }

    #[test]
    fn test_no_driver_commits_nothing() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_timetable("R1", &[time(8, 0, 0, 0)]);

        let outcome = engine().solve_detailed(&catalog);
        let run = &outcome.solution.runs[0];
        assert!(run.assigned_bus_id.is_none());
        assert!(run.assigned_driver_id.is_none());
        assert!(outcome.solution.activity_log.is_empty());

        let bus = outcome.fleet.record("B1").unwrap();
        assert_eq!(bus.runs_served, 0);
        assert_eq!(bus.charge_km, 200);
        assert_eq!(bus.next_available, crate::time::DAY_START);
        assert_eq!(outcome.solution.score, -1000);
        assert_eq!(outcome.solution.buses_used_count, 0);
    }

    #[test]
    fn test_no_bus_leaves_driver_untouched() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 30))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(8, 0, 0, 0)]);

        let outcome = engine().solve_detailed(&catalog);
        assert_eq!(outcome.solution.unassigned_run_count, 1);
        assert_eq!(outcome.crew.record("DR1").unwrap().total_minutes, 0);
    }

    #[test]
    fn test_unknown_route_is_skipped() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_run(Run::with_travel_time("RX-0800", "RX", time(8, 0, 0, 0), 30))
            .with_timetable("R1", &[time(9, 0, 0, 0)]);

        let solution = engine().solve(&catalog);
        assert_eq!(solution.runs.len(), 2);
        assert!(!solution.run("RX-0800").unwrap().is_assigned());
        assert!(solution.run("R1-0900").unwrap().is_assigned());
        assert_eq!(solution.activity_log.entries_for(EntityKind::Bus, "B1").count(), 3);
        assert_eq!(solution.score, -1000 - 100);
    }

    #[test]
    fn test_run_ending_past_midnight_is_skipped() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(22, 0, 0, 0), time(23, 30, 0, 0)]);

        let outcome = engine().solve_detailed(&catalog);
        let late = outcome.solution.run("R1-2330").unwrap();
        assert!(!late.is_assigned());
        assert_eq!(late.arrival_time, Time::MAX);
        assert!(outcome.solution.run("R1-2200").unwrap().is_assigned());
        assert!(outcome
            .solution
            .activity_log
            .entries()
            .iter()
            .all(|e| !e.description.contains("R1-2330")));
        assert_eq!(outcome.crew.record("DR1").unwrap().total_minutes, 45);
        assert_eq!(outcome.solution.unassigned_run_count, 1);
    }

    #[test]
    fn test_overflowing_route_distance_is_unassigned() {
        let catalog = base_catalog()
            .with_route(RouteTemplate::new("R2", "T1", "T2", u32::MAX - 10, 45))
            .with_bus(Bus::new("B1", "D1", 250))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R2", &[time(8, 0, 0, 0)]);

        let outcome = engine().solve_detailed(&catalog);
        assert!(!outcome.solution.runs[0].is_assigned());
        assert!(!outcome.fleet.record("B1").unwrap().is_used());
        assert!(outcome.solution.activity_log.is_empty());
        assert_eq!(outcome.solution.score, -1000);
    }

    #[test]
    fn test_daily_ceiling_leaves_runs_unassigned() {
        // 5 x 130 = 650 > 600: the fifth run has no driver.
        let departures = [
            time(0, 30, 0, 0),
            time(3, 30, 0, 0),
            time(6, 30, 0, 0),
            time(9, 30, 0, 0),
            time(12, 30, 0, 0),
        ];
        let catalog = Catalog::new()
            .with_route(RouteTemplate::new("LOOP", "T1", "T1", 10, 130))
            .with_bus(Bus::new("B1", "D1", 500))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("LOOP", &departures);

        let outcome = engine().solve_detailed(&catalog);
        assert_eq!(outcome.solution.assigned_runs().count(), 4);
        assert!(!outcome.solution.runs[4].is_assigned());
        assert_eq!(outcome.crew.record("DR1").unwrap().total_minutes, 520);
    }

    #[test]
    fn test_runs_processed_in_departure_order() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(12, 0, 0, 0), time(8, 0, 0, 0)]);
        let solution = engine().solve(&catalog);
        let ids: Vec<_> = solution.runs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R1-0800", "R1-1200"]);
        let first = &solution.activity_log.entries()[0];
        assert!(first.description.ends_with("R1-0800"));
    }

    #[test]
    fn test_sample_catalog_invariants() {
        let catalog =
            Catalog::from_json_reader(include_str!("../../data/sample_catalog.json").as_bytes())
                .unwrap();
        let outcome = engine().solve_detailed(&catalog);
        let solution = &outcome.solution;
        assert_eq!(solution.runs.len(), 12);

        for run in &solution.runs {
            assert_eq!(run.assigned_bus_id.is_some(), run.assigned_driver_id.is_some());
        }
        assert_eq!(
            solution.score,
            solution.unassigned_run_count as i64 * -1000 + solution.buses_used_count as i64 * -100
        );
        assert_eq!(solution.buses_used_count, solution.buses_in_use().len());

        for (_, driver) in outcome.crew.iter() {
            assert!(driver.total_minutes <= 600);
            assert!(driver.continuous_minutes <= 240);
        }
        for (_, bus) in outcome.fleet.iter() {
            assert!(bus.charge_km <= bus.bus.range_km);
            assert!(bus.is_at_depot() || !bus.is_used());

            let services: Vec<_> = solution
                .activity_log
                .entries_for(EntityKind::Bus, &bus.bus.id)
                .filter(|e| e.activity_kind == ActivityKind::RouteService)
                .collect();
            assert!(services.windows(2).all(|w| w[0].end_time <= w[1].start_time));
        }
    }

    #[test]
    fn test_idempotent() {
        let catalog =
            Catalog::from_json_reader(include_str!("../../data/sample_catalog.json").as_bytes())
                .unwrap();
        let engine = engine();
        let first = engine.solve(&catalog);
        let second = engine.solve(&catalog);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let catalog = Arc::new(
            Catalog::from_json_reader(include_str!("../../data/sample_catalog.json").as_bytes())
                .unwrap(),
        );
        let engine = Arc::new(engine());
        let expected = engine.solve(&catalog);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.solve(&catalog))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_catalog_not_modified() {
        let catalog = base_catalog()
            .with_bus(Bus::new("B1", "D1", 200))
            .with_driver(Driver::new("DR1", "Ana"))
            .with_timetable("R1", &[time(8, 0, 0, 0)]);
        let _ = engine().solve(&catalog);
        assert!(catalog.runs().iter().all(|r| !r.is_assigned()));
        assert_eq!(catalog.bus_list()[0].current_charge_km, 200);
    }
}
