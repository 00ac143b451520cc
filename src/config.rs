//! Engine parameters.
//!
//! All operating rules of the assignment engine live in one immutable
//! [`EngineConfig`] value handed to the engine at construction. The
//! defaults reproduce the standard operating rules for a depot-based
//! electric fleet; alternate parameter sets can be built in code or read
//! from JSON where every field is optional.
//!
//! # Example
//!
//! ```
//! use u_transit::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "crew": { "mandatory_break_minutes": 45 } }"#).unwrap();
//! assert_eq!(config.crew.mandatory_break_minutes, 45);
//! assert_eq!(config.crew.max_continuous_driving_minutes, 240);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TransitResult;

/// Complete parameter set for one engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bus movement and charging rules.
    pub fleet: FleetRules,
    /// Driver hours-of-service rules.
    pub crew: CrewRules,
    /// Score weights.
    pub scoring: ScoreWeights,
}

/// Bus movement and charging rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetRules {
    /// Deadhead time from a home depot to a start terminal (min).
    pub depot_to_terminal_minutes: u32,
    /// Deadhead distance from a home depot to a start terminal (km).
    pub depot_to_terminal_km: u32,
    /// Deadhead time from an end terminal back to the home depot (min).
    pub terminal_to_depot_minutes: u32,
    /// Deadhead distance from an end terminal back to the home depot (km).
    pub terminal_to_depot_km: u32,
    /// Length of one charging interval (min). Always restores full range.
    pub charging_minutes: u32,
    /// Charge fraction of full range below which a returning bus charges.
    pub min_charge_fraction: f64,
    /// Distance proxy for "one more minimal route" (km).
    pub minimal_next_route_km: u32,
}

/// Driver hours-of-service rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewRules {
    /// Cap on uninterrupted driving (min).
    pub max_continuous_driving_minutes: u32,
    /// Break forced once the continuous cap would be exceeded (min).
    pub mandatory_break_minutes: u32,
    /// Daily driving ceiling including overtime (min).
    pub max_daily_driving_minutes: u32,
    /// Idle wait that counts as rest and resets continuous driving (min).
    pub rest_reset_minutes: u32,
    /// Driver transfer time between two different terminals (min).
    pub driver_transfer_minutes: u32,
}

/// Score weights. Penalties are negative; higher scores are better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Added once per run left without a bus or driver.
    pub unassigned_run_penalty: i64,
    /// Added once per distinct bus that serves at least one run.
    pub bus_used_penalty: i64,
}

impl Default for FleetRules {
    fn default() -> Self {
        Self {
            depot_to_terminal_minutes: 15,
            depot_to_terminal_km: 5,
            terminal_to_depot_minutes: 20,
            terminal_to_depot_km: 10,
            charging_minutes: 120,
            min_charge_fraction: 0.20,
            minimal_next_route_km: 20,
        }
    }
}

impl Default for CrewRules {
    fn default() -> Self {
        Self {
            max_continuous_driving_minutes: 4 * 60,
            mandatory_break_minutes: 30,
            max_daily_driving_minutes: 10 * 60,
            rest_reset_minutes: 15,
            driver_transfer_minutes: 15,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            unassigned_run_penalty: -1000,
            bus_used_penalty: -100,
        }
    }
}

impl FleetRules {
    /// Charge a bus must keep at its depot to be sent out again without
    /// charging: one depot approach plus one minimal route.
    #[inline]
    pub fn minimal_operation_km(&self) -> u32 {
        self.depot_to_terminal_km + self.minimal_next_route_km
    }
}

impl EngineConfig {
    /// Parses a (possibly partial) configuration from JSON.
    pub fn from_json_str(json: &str) -> TransitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a (possibly partial) configuration from a JSON file.
    pub fn from_json_path(path: impl AsRef<std::path::Path>) -> TransitResult<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Replaces the fleet rules.
    pub fn with_fleet(mut self, fleet: FleetRules) -> Self {
        self.fleet = fleet;
        self
    }

    /// Replaces the crew rules.
    pub fn with_crew(mut self, crew: CrewRules) -> Self {
        self.crew = crew;
        self
    }

    /// Replaces the score weights.
    pub fn with_scoring(mut self, scoring: ScoreWeights) -> Self {
        self.scoring = scoring;
        self
    }
}
