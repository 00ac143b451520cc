//! Activity log model.
//!
//! The activity log is the audit trail of a solve: one interval per bus or
//! driver state transition (travel, service, charging, break). Entries are
//! appended in emission order and never revised, so the log is ordered by
//! emission, not necessarily by time. Per-entity timelines are obtained by
//! filtering.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// Which kind of entity an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Bus,
    Driver,
}

/// What the entity was doing during the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    /// Operating a scheduled run.
    RouteService,
    /// Bus deadheading depot → terminal, or driver transferring terminals.
    TravelToStartTerminal,
    /// Bus deadheading back to its home depot.
    TravelToDepot,
    /// Bus charging at its depot.
    Charging,
    /// Driver taking a mandatory break.
    MandatoryBreak,
    /// Explicit idle time. Not emitted by the assignment engine.
    WaitingIdle,
}

/// One logged interval for one bus or driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub activity_kind: ActivityKind,
    pub start_time: Time,
    pub end_time: Time,
    pub start_location_id: Option<String>,
    pub end_location_id: Option<String>,
    /// Free text, e.g. `"Route R1-0800"`, `"Charging at D1"`.
    pub description: String,
    /// Charge at interval start (km). Bus entries only.
    pub start_charge_km: Option<u32>,
    /// Charge at interval end (km). Bus entries only.
    pub end_charge_km: Option<u32>,
}

impl ActivityLogEntry {
    /// Creates a bus entry. `charge_km` is `(start, end)` in km.
    pub fn bus(
        bus_id: impl Into<String>,
        activity_kind: ActivityKind,
        (start_time, end_time): (Time, Time),
        (start_location_id, end_location_id): (Option<&str>, &str),
        charge_km: Option<(u32, u32)>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            entity_kind: EntityKind::Bus,
            entity_id: bus_id.into(),
            activity_kind,
            start_time,
            end_time,
            start_location_id: start_location_id.map(str::to_string),
            end_location_id: Some(end_location_id.to_string()),
            description: description.into(),
            start_charge_km: charge_km.map(|(start, _)| start),
            end_charge_km: charge_km.map(|(_, end)| end),
        }
    }

    /// Creates a driver entry. A driver's origin may be unknown.
    pub fn driver(
        driver_id: impl Into<String>,
        activity_kind: ActivityKind,
        (start_time, end_time): (Time, Time),
        (start_location_id, end_location_id): (Option<&str>, &str),
        description: impl Into<String>,
    ) -> Self {
        Self {
            entity_kind: EntityKind::Driver,
            entity_id: driver_id.into(),
            activity_kind,
            start_time,
            end_time,
            start_location_id: start_location_id.map(str::to_string),
            end_location_id: Some(end_location_id.to_string()),
            description: description.into(),
            start_charge_km: None,
            end_charge_km: None,
        }
    }

    /// Interval length in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        crate::time::minutes_between(self.start_time, self.end_time)
    }

    /// Charge consumed over the interval (negative when charging).
    pub fn charge_used_km(&self) -> Option<i64> {
        match (self.start_charge_km, self.end_charge_km) {
            (Some(s), Some(e)) => Some(i64::from(s) - i64::from(e)),
            _ => None,
        }
    }
}

/// Append-only sequence of activity entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityLogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ActivityLogEntry) {
        self.entries.push(entry);
    }

    /// All entries in emission order.
    pub fn entries(&self) -> &[ActivityLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timeline of one entity, in emission order.
    pub fn entries_for<'a>(
        &'a self,
        kind: EntityKind,
        entity_id: &'a str,
    ) -> impl Iterator<Item = &'a ActivityLogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.entity_kind == kind && e.entity_id == entity_id)
    }

    /// All entries of one activity kind.
    pub fn of_kind(&self, kind: ActivityKind) -> impl Iterator<Item = &ActivityLogEntry> {
        self.entries.iter().filter(move |e| e.activity_kind == kind)
    }

    pub fn into_entries(self) -> Vec<ActivityLogEntry> {
        self.entries
    }
}
