//! Catalog validation.
//!
//! Checks structural integrity of a catalog before scheduling. Detects:
//! - Duplicate IDs (stops, buses, drivers, routes, runs)
//! - Route terminals that are not terminal stops
//! - Route stop lists naming unknown stops
//! - Bus home depots that are not depot stops
//! - Bus and driver starting locations naming unknown stops
//! - Starting charge above full range
//! - Runs referencing unknown routes or with an inconsistent arrival time
//! - Runs that would end past midnight
//!
//! The assignment engine does not call this; it assumes well-formed input
//! and degrades to unassigned runs otherwise.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::StopKind;
use crate::time::checked_plus_minutes;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same type share an ID.
    DuplicateId,
    /// A route starts or ends at a stop that is not a terminal.
    NotATerminal,
    /// A reference to a stop that does not exist.
    UnknownStop,
    /// A bus's home depot is not a depot stop.
    NotADepot,
    /// A bus starts with more charge than its range.
    ChargeAboveRange,
    /// A run references a route that does not exist.
    UnknownRoute,
    /// A run's arrival differs from departure plus travel time.
    ArrivalMismatch,
    /// A run's departure plus travel time falls on the next day.
    PastMidnight,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a catalog, collecting every issue found.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("stop", catalog.stops().iter().map(|s| s.id.as_str()), &mut errors);
    check_unique("bus", catalog.bus_list().iter().map(|b| b.id.as_str()), &mut errors);
    check_unique("driver", catalog.driver_list().iter().map(|d| d.id.as_str()), &mut errors);
    check_unique("route", catalog.route_list().iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("run", catalog.run_list().iter().map(|r| r.id.as_str()), &mut errors);

    // Routes
    for route in catalog.route_list() {
        for terminal_id in [&route.start_terminal_id, &route.end_terminal_id] {
            match catalog.stop(terminal_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownStop,
                    format!("Route '{}' references unknown terminal '{}'", route.id, terminal_id),
                )),
                Some(stop) if !stop.is_terminal() => errors.push(ValidationError::new(
                    ValidationErrorKind::NotATerminal,
                    format!("Route '{}' uses non-terminal stop '{}' as a terminal", route.id, terminal_id),
                )),
                Some(_) => {}
            }
        }
        for stop_id in &route.stop_ids {
            if catalog.stop(stop_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownStop,
                    format!("Route '{}' references unknown stop '{}'", route.id, stop_id),
                ));
            }
        }
    }

    // Buses
    for bus in catalog.bus_list() {
        match catalog.stop(&bus.depot_id).map(|s| &s.kind) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStop,
                format!("Bus '{}' references unknown depot '{}'", bus.id, bus.depot_id),
            )),
            Some(StopKind::Depot { .. }) => {}
            Some(_) => errors.push(ValidationError::new(
                ValidationErrorKind::NotADepot,
                format!("Bus '{}' home '{}' is not a depot", bus.id, bus.depot_id),
            )),
        }
        if catalog.stop(&bus.current_location_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStop,
                format!(
                    "Bus '{}' starts at unknown location '{}'",
                    bus.id, bus.current_location_id
                ),
            ));
        }
        if bus.current_charge_km > bus.range_km {
            errors.push(ValidationError::new(
                ValidationErrorKind::ChargeAboveRange,
                format!(
                    "Bus '{}' charge {} km exceeds range {} km",
                    bus.id, bus.current_charge_km, bus.range_km
                ),
            ));
        }
    }

    // Drivers
    for driver in catalog.driver_list() {
        if let Some(location) = &driver.start_location_id {
            if catalog.stop(location).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownStop,
                    format!("Driver '{}' starts at unknown location '{}'", driver.id, location),
                ));
            }
        }
    }

    // Runs
    for run in catalog.run_list() {
        let Some(route) = catalog.route(&run.route_id) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoute,
                format!("Run '{}' references unknown route '{}'", run.id, run.route_id),
            ));
            continue;
        };
        let Some(expected) = checked_plus_minutes(run.departure_time, route.travel_time_minutes)
        else {
            errors.push(ValidationError::new(
                ValidationErrorKind::PastMidnight,
                format!(
                    "Run '{}' departs {} and takes {} min, ending past midnight",
                    run.id, run.departure_time, route.travel_time_minutes
                ),
            ));
            continue;
        };
        if run.arrival_time != expected {
            errors.push(ValidationError::new(
                ValidationErrorKind::ArrivalMismatch,
                format!(
                    "Run '{}' arrives {} but route '{}' implies {}",
                    run.id, run.arrival_time, route.id, expected
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    entity: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
}
