//! Route template and timetable models.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// A fixed route definition.
///
/// A route runs one way from its start terminal to its end terminal
/// through an ordered list of stops, covering a fixed distance in a fixed
/// travel time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTemplate {
    /// Unique route identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Terminal where every run of this route departs.
    pub start_terminal_id: String,
    /// Terminal where every run of this route arrives.
    pub end_terminal_id: String,
    /// Ordered stop IDs, including both terminals.
    #[serde(default)]
    pub stop_ids: Vec<String>,
    /// One-way distance (km).
    pub distance_km: u32,
    /// One-way travel time (min).
    pub travel_time_minutes: u32,
}

impl RouteTemplate {
    /// Creates a route from `start` to `end`; stop list holds both terminals.
    pub fn new(
        id: impl Into<String>,
        start_terminal_id: impl Into<String>,
        end_terminal_id: impl Into<String>,
        distance_km: u32,
        travel_time_minutes: u32,
    ) -> Self {
        let start = start_terminal_id.into();
        let end = end_terminal_id.into();
        Self {
            id: id.into(),
            name: String::new(),
            stop_ids: vec![start.clone(), end.clone()],
            start_terminal_id: start,
            end_terminal_id: end,
            distance_km,
            travel_time_minutes,
        }
    }

    /// Sets the route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the ordered stop list.
    pub fn with_stops(mut self, stop_ids: Vec<String>) -> Self {
        self.stop_ids = stop_ids;
        self
    }
}

/// Departure times of one route template, used to generate runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Route template these departures belong to.
    pub route_id: String,
    /// Departure times (any order).
    pub departure_times: Vec<Time>,
}

impl Timetable {
    /// Creates a timetable.
    pub fn new(route_id: impl Into<String>, departure_times: Vec<Time>) -> Self {
        Self {
            route_id: route_id.into(),
            departure_times,
        }
    }
}
