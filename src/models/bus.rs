//! Bus model.

use serde::{Deserialize, Serialize};

/// An electric bus as recorded in the fleet catalog.
///
/// Charge is tracked as remaining range in kilometres. A bus always
/// starts the day at `current_location_id` with `current_charge_km`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    /// Unique bus identifier.
    #[serde(alias = "bus_id")]
    pub id: String,
    /// Registration plate.
    #[serde(default)]
    pub number_plate: String,
    /// Home depot (where it returns after every run).
    pub depot_id: String,
    /// Range on a full charge (km).
    pub range_km: u32,
    /// Charge at the start of the day (km).
    pub current_charge_km: u32,
    /// Location at the start of the day.
    pub current_location_id: String,
}

impl Bus {
    /// Creates a fully charged bus parked at its home depot.
    pub fn new(id: impl Into<String>, depot_id: impl Into<String>, range_km: u32) -> Self {
        let depot = depot_id.into();
        Self {
            id: id.into(),
            number_plate: String::new(),
            current_location_id: depot.clone(),
            depot_id: depot,
            range_km,
            current_charge_km: range_km,
        }
    }

    /// Sets the number plate.
    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.number_plate = plate.into();
        self
    }

    /// Sets the starting charge (km).
    pub fn with_charge(mut self, charge_km: u32) -> Self {
        self.current_charge_km = charge_km;
        self
    }

    /// Sets the starting location.
    pub fn located_at(mut self, location_id: impl Into<String>) -> Self {
        self.current_location_id = location_id.into();
        self
    }
}
