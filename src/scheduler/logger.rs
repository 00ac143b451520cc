//! Turns tracker transitions into activity log entries.
//!
//! Entries for one committed run are appended in a fixed order: bus
//! approach, driver transfer, driver break, bus service, driver service,
//! bus return, bus charging. Intervals that did not happen are skipped.

use crate::models::{ActivityKind, ActivityLog, ActivityLogEntry, Run};
use crate::tracker::{BusTransition, DriverTransition, Segment};

/// Accumulates the activity log of one solve.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogger {
    log: ActivityLog,
}

impl ActivityLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every interval of one committed run.
    pub fn record(&mut self, run: &Run, bus: &BusTransition, driver: &DriverTransition) {
        if let Some(seg) = &bus.approach {
            let desc = format!(
                "Depot {} to terminal {} for run {}",
                seg.from.as_deref().unwrap_or_default(),
                seg.to,
                run.id
            );
            self.push_bus(&bus.bus_id, ActivityKind::TravelToStartTerminal, seg, desc);
        }
        if let Some(seg) = &driver.transfer {
            let desc = format!(
                "Transfer {} to {} for run {}",
                seg.from.as_deref().unwrap_or_default(),
                seg.to,
                run.id
            );
            self.push_driver(&driver.driver_id, ActivityKind::TravelToStartTerminal, seg, desc);
        }
        if let Some(seg) = &driver.mandatory_break {
            let desc = format!("Mandatory break at {}", seg.to);
            self.push_driver(&driver.driver_id, ActivityKind::MandatoryBreak, seg, desc);
        }

        let service = format!("Route {}", run.id);
        self.push_bus(&bus.bus_id, ActivityKind::RouteService, &bus.service, service.clone());
        self.push_driver(&driver.driver_id, ActivityKind::RouteService, &driver.service, service);

        if let Some(seg) = &bus.return_to_depot {
            let desc = format!("Return to depot {}", seg.to);
            self.push_bus(&bus.bus_id, ActivityKind::TravelToDepot, seg, desc);
        }
        if let Some(seg) = &bus.charging {
            let desc = format!("Charging at {}", seg.to);
            self.push_bus(&bus.bus_id, ActivityKind::Charging, seg, desc);
        }
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn into_log(self) -> ActivityLog {
        self.log
    }

    fn push_bus(&mut self, bus_id: &str, kind: ActivityKind, seg: &Segment, description: String) {
        self.log.push(ActivityLogEntry::bus(
            bus_id,
            kind,
            (seg.start, seg.end),
            (seg.from.as_deref(), &seg.to),
            seg.charge_km,
            description,
        ));
    }

    fn push_driver(&mut self, driver_id: &str, kind: ActivityKind, seg: &Segment, description: String) {
        self.log.push(ActivityLogEntry::driver(
            driver_id,
            kind,
            (seg.start, seg.end),
            (seg.from.as_deref(), &seg.to),
            description,
        ));
    }
}
