//! Reference data catalogs.
//!
//! The assignment engine reads its inputs through [`CatalogProvider`]:
//! four snapshot reads taken once at the start of every solve. [`Catalog`]
//! is the in-memory reference provider; it can be assembled with builder
//! methods or loaded from a JSON document (see [`CatalogDocument`]).
//!
//! # Example
//!
//! ```
//! use jiff::civil::time;
//! use u_transit::catalog::{Catalog, CatalogProvider};
//! use u_transit::models::{Bus, Driver, RouteTemplate, Stop};
//!
//! let catalog = Catalog::new()
//!     .with_stop(Stop::depot("D1", "Main Depot", 10))
//!     .with_stop(Stop::terminal("T1", "North"))
//!     .with_stop(Stop::terminal("T2", "South"))
//!     .with_route(RouteTemplate::new("R1", "T1", "T2", 12, 40))
//!     .with_bus(Bus::new("B1", "D1", 250))
//!     .with_driver(Driver::new("DR1", "Ana"))
//!     .with_timetable("R1", &[time(8, 0, 0, 0), time(9, 0, 0, 0)]);
//!
//! assert_eq!(catalog.runs().len(), 2);
//! assert_eq!(catalog.runs()[0].id, "R1-0800");
//! ```

mod loader;

pub use loader::CatalogDocument;

use std::collections::HashMap;
use std::sync::Arc;

use jiff::civil::Time;
use tracing::warn;

use crate::error::{TransitError, TransitResult};
use crate::models::{Bus, Driver, RouteTemplate, Run, Stop};

/// Read access to the reference data a solve needs.
///
/// Each call returns an owned snapshot; the engine calls every method
/// exactly once per solve and never writes back.
pub trait CatalogProvider {
    /// All buses.
    fn buses(&self) -> Vec<Bus>;
    /// All drivers.
    fn drivers(&self) -> Vec<Driver>;
    /// All route templates keyed by id.
    fn route_templates(&self) -> HashMap<String, RouteTemplate>;
    /// All runs to schedule, arrival times precomputed.
    fn runs(&self) -> Vec<Run>;
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for &T {
    fn buses(&self) -> Vec<Bus> {
        (**self).buses()
    }
    fn drivers(&self) -> Vec<Driver> {
        (**self).drivers()
    }
    fn route_templates(&self) -> HashMap<String, RouteTemplate> {
        (**self).route_templates()
    }
    fn runs(&self) -> Vec<Run> {
        (**self).runs()
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    fn buses(&self) -> Vec<Bus> {
        (**self).buses()
    }
    fn drivers(&self) -> Vec<Driver> {
        (**self).drivers()
    }
    fn route_templates(&self) -> HashMap<String, RouteTemplate> {
        (**self).route_templates()
    }
    fn runs(&self) -> Vec<Run> {
        (**self).runs()
    }
}

/// In-memory catalog.
///
/// Entities keep insertion order; run order is the provider order the
/// sequencer falls back on for equal departure times.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    drivers: Vec<Driver>,
    routes: Vec<RouteTemplate>,
    runs: Vec<Run>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop.
    pub fn with_stop(mut self, stop: Stop) -> Self {
        self.stops.push(stop);
        self
    }

    /// Adds a bus.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.buses.push(bus);
        self
    }

    /// Adds a driver.
    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.drivers.push(driver);
        self
    }

    /// Adds a route template.
    pub fn with_route(mut self, route: RouteTemplate) -> Self {
        self.routes.push(route);
        self
    }

    /// Adds a prebuilt run.
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Generates one run per departure time of `route_id`.
    ///
    /// Unknown routes are skipped with a warning, matching how timetable
    /// files referencing retired routes are treated.
    pub fn with_timetable(mut self, route_id: &str, departure_times: &[Time]) -> Self {
        for &departure in departure_times {
            if let Err(err) = self.add_departure(route_id, departure) {
                warn!(route_id, %departure, error = %err, "skipping timetable entry");
                break;
            }
        }
        self
    }

    /// Generates a single run of `route_id` departing at `departure_time`.
    ///
    /// The run id is `"{route_id}-{HHMM}"` (`HHMMSS` off the minute) and the
    /// arrival time follows from the template's travel time.
    pub fn add_departure(&mut self, route_id: &str, departure_time: Time) -> TransitResult<&Run> {
        let route = self
            .route(route_id)
            .ok_or_else(|| TransitError::UnknownRoute(route_id.to_string()))?;
        let run = Run::new(Run::default_id(route_id, departure_time), route, departure_time);
        self.runs.push(run);
        Ok(&self.runs[self.runs.len() - 1])
    }

    /// All stops of every kind.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Finds a stop by id.
    pub fn stop(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id == stop_id)
    }

    /// Depot stops.
    pub fn depots(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(|s| s.is_depot())
    }

    /// Terminal stops.
    pub fn terminals(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(|s| s.is_terminal())
    }

    /// Finds a route template by id.
    pub fn route(&self, route_id: &str) -> Option<&RouteTemplate> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    /// Route templates in insertion order.
    pub fn route_list(&self) -> &[RouteTemplate] {
        &self.routes
    }

    /// Buses in insertion order.
    pub fn bus_list(&self) -> &[Bus] {
        &self.buses
    }

    /// Drivers in insertion order.
    pub fn driver_list(&self) -> &[Driver] {
        &self.drivers
    }

    /// Runs in provider order.
    pub fn run_list(&self) -> &[Run] {
        &self.runs
    }
}

impl CatalogProvider for Catalog {
    fn buses(&self) -> Vec<Bus> {
        self.buses.clone()
    }

    fn drivers(&self) -> Vec<Driver> {
        self.drivers.clone()
    }

    fn route_templates(&self) -> HashMap<String, RouteTemplate> {
        self.routes
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect()
    }

    fn runs(&self) -> Vec<Run> {
        self.runs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::time;

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_stop(Stop::depot("D1", "Main Depot", 10))
            .with_stop(Stop::terminal("T1", "North"))
            .with_stop(Stop::terminal("T2", "South"))
            .with_stop(Stop::waypoint("S1", "Market"))
            .with_route(RouteTemplate::new("R1", "T1", "T2", 12, 40))
            .with_bus(Bus::new("B1", "D1", 250))
            .with_driver(Driver::new("DR1", "Ana"))
    }

    #[test]
    fn test_timetable_generates_runs() {
        let c = sample_catalog().with_timetable("R1", &[time(9, 15, 0, 0), time(7, 0, 0, 0)]);
        let runs = c.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, "R1-0915");
        assert_eq!(runs[0].arrival_time, time(9, 55, 0, 0));
        assert_eq!(runs[1].id, "R1-0700");
    }

    #[test]
    fn test_same_minute_departures_get_distinct_ids() {
        let c = sample_catalog().with_timetable("R1", &[time(8, 0, 0, 0), time(8, 0, 30, 0)]);
        let ids: Vec<_> = c.run_list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R1-0800", "R1-080030"]);
    }

    #[test]
    fn test_unknown_route_timetable_skipped() {
        let c = sample_catalog().with_timetable("R9", &[time(8, 0, 0, 0)]);
        assert!(c.runs().is_empty());
    }

    #[test]
    fn test_add_departure_unknown_route() {
        let mut c = sample_catalog();
        let err = c.add_departure("R9", time(8, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, TransitError::UnknownRoute(id) if id == "R9"));
    }

    #[test]
    fn test_stop_queries() {
        let c = sample_catalog();
        assert_eq!(c.depots().count(), 1);
        assert_eq!(c.terminals().count(), 2);
        assert_eq!(c.stops().len(), 4);
        assert!(c.stop("S1").is_some());
    }

    #[test]
    fn test_provider_snapshots() {
        let c = sample_catalog().with_timetable("R1", &[time(8, 0, 0, 0)]);
        let shared = Arc::new(c);
        assert_eq!(shared.buses().len(), 1);
        assert_eq!(shared.drivers().len(), 1);
        assert!(shared.route_templates().contains_key("R1"));
        assert_eq!((&*shared).runs().len(), 1);
    }
}
