//! Stop model.
//!
//! Every named place in the network is a [`Stop`]. Terminals start and end
//! routes; depots are home bases that hold buses and may offer charging.
//! The variant carries whatever extra data that kind of place needs.

use serde::{Deserialize, Serialize};

/// A named place: waypoint, terminal, or depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Unique stop identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What kind of place this is.
    pub kind: StopKind,
}

/// Stop classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopKind {
    /// Intermediate stop along a route.
    Waypoint,
    /// Start or end point of a route.
    Terminal,
    /// Home base for buses.
    Depot {
        /// Number of buses the depot can hold.
        max_capacity: u32,
        /// Whether buses can charge here.
        has_charging_station: bool,
    },
}

impl Stop {
    /// Creates an intermediate stop.
    pub fn waypoint(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: StopKind::Waypoint,
        }
    }

    /// Creates a terminal.
    pub fn terminal(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: StopKind::Terminal,
        }
    }

    /// Creates a depot with a charging station.
    pub fn depot(id: impl Into<String>, name: impl Into<String>, max_capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: StopKind::Depot {
                max_capacity,
                has_charging_station: true,
            },
        }
    }

    /// Sets whether a depot has a charging station. No-op for other kinds.
    pub fn with_charging_station(mut self, available: bool) -> Self {
        if let StopKind::Depot {
            has_charging_station,
            ..
        } = &mut self.kind
        {
            *has_charging_station = available;
        }
        self
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StopKind::Terminal)
    }

    #[inline]
    pub fn is_depot(&self) -> bool {
        matches!(self.kind, StopKind::Depot { .. })
    }

    /// Whether buses can charge here (depots with a charging station).
    pub fn can_charge(&self) -> bool {
        matches!(
            self.kind,
            StopKind::Depot {
                has_charging_station: true,
                ..
            }
        )
    }
}
