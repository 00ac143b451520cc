//! Run model.
//!
//! A run is one scheduled departure of a route template. Its arrival time
//! is fixed at creation (departure + template travel time); the bus and
//! driver fields are filled in by the assignment engine.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use super::RouteTemplate;
use crate::time::plus_minutes;

/// One scheduled departure of a route template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Unique run identifier (e.g. `"R1-0800"`).
    pub id: String,
    /// Route template this run follows.
    pub route_id: String,
    /// Departure from the route's start terminal.
    pub departure_time: Time,
    /// Arrival at the route's end terminal.
    pub arrival_time: Time,
    /// Bus serving this run, once assigned.
    pub assigned_bus_id: Option<String>,
    /// Driver operating this run, once assigned.
    pub assigned_driver_id: Option<String>,
}

impl Run {
    /// Creates an unassigned run of `route` departing at `departure_time`.
    pub fn new(id: impl Into<String>, route: &RouteTemplate, departure_time: Time) -> Self {
        Self::with_travel_time(id, &route.id, departure_time, route.travel_time_minutes)
    }

    /// Creates an unassigned run from a route id and its travel time.
    pub fn with_travel_time(
        id: impl Into<String>,
        route_id: impl Into<String>,
        departure_time: Time,
        travel_time_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            route_id: route_id.into(),
            departure_time,
            arrival_time: plus_minutes(departure_time, travel_time_minutes),
            assigned_bus_id: None,
            assigned_driver_id: None,
        }
    }

    /// Conventional run id: route id plus `HHMM` of the departure, or
    /// `HHMMSS` (with any fraction) when the departure is not on the minute.
    pub fn default_id(route_id: &str, departure_time: Time) -> String {
        let format = if departure_time.second() == 0 && departure_time.subsec_nanosecond() == 0 {
            "%H%M"
        } else {
            "%H%M%S%.f"
        };
        format!("{route_id}-{}", departure_time.strftime(format))
    }

    /// Whether both a bus and a driver are assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned_bus_id.is_some() && self.assigned_driver_id.is_some()
    }

    /// Sets both assignment fields at once.
    pub(crate) fn assign(&mut self, bus_id: &str, driver_id: &str) {
        self.assigned_bus_id = Some(bus_id.to_string());
        self.assigned_driver_id = Some(driver_id.to_string());
    }
}
