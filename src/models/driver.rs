//! Driver model.

use serde::{Deserialize, Serialize};

/// A crew member who can operate any bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Where the driver reports at the start of the day.
    /// `None` means the driver can be positioned at any terminal.
    #[serde(default)]
    pub start_location_id: Option<String>,
}

impl Driver {
    /// Creates a driver with no fixed starting location.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_location_id: None,
        }
    }

    /// Sets the starting location.
    pub fn located_at(mut self, location_id: impl Into<String>) -> Self {
        self.start_location_id = Some(location_id.into());
        self
    }
}
