//! JSON catalog documents.
//!
//! # Format
//!
//! ```json
//! {
//!   "stops":      [{ "id": "D1", "name": "Main Depot",
//!                    "kind": { "type": "depot", "max_capacity": 20, "has_charging_station": true } }],
//!   "buses":      [{ "bus_id": "B1", "number_plate": "EV-001", "depot_id": "D1",
//!                    "range_km": 250, "current_charge_km": 250, "current_location_id": "D1" }],
//!   "drivers":    [{ "id": "DR1", "name": "Ana" }],
//!   "routes":     [{ "id": "R1", "start_terminal_id": "T1", "end_terminal_id": "T2",
//!                    "stop_ids": ["T1", "T2"], "distance_km": 12, "travel_time_minutes": 40 }],
//!   "timetables": [{ "route_id": "R1", "departure_times": ["08:00:00", "09:00:00"] }]
//! }
//! ```
//!
//! Every section is optional. Runs are generated from the timetables in
//! document order; timetables naming unknown routes are skipped.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::Catalog;
use crate::error::TransitResult;
use crate::models::{Bus, Driver, RouteTemplate, Stop, Timetable};

/// Serialized form of a [`Catalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub stops: Vec<Stop>,
    pub buses: Vec<Bus>,
    pub drivers: Vec<Driver>,
    pub routes: Vec<RouteTemplate>,
    pub timetables: Vec<Timetable>,
}

impl CatalogDocument {
    /// Builds the catalog, generating runs from the timetables.
    pub fn into_catalog(self) -> Catalog {
        let mut catalog = Catalog::new();
        for stop in self.stops {
            catalog = catalog.with_stop(stop);
        }
        for route in self.routes {
            catalog = catalog.with_route(route);
        }
        for bus in self.buses {
            catalog = catalog.with_bus(bus);
        }
        for driver in self.drivers {
            catalog = catalog.with_driver(driver);
        }
        for timetable in &self.timetables {
            catalog = catalog.with_timetable(&timetable.route_id, &timetable.departure_times);
        }
        catalog
    }
}

impl Catalog {
    /// Loads a catalog from a JSON document.
    pub fn from_json_reader<R: Read>(reader: R) -> TransitResult<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        let catalog = document.into_catalog();
        info!(
            stops = catalog.stops().len(),
            depots = catalog.depots().count(),
            terminals = catalog.terminals().count(),
            buses = catalog.bus_list().len(),
            drivers = catalog.driver_list().len(),
            routes = catalog.route_list().len(),
            runs = catalog.run_list().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> TransitResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}
