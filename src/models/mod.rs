//! Transit domain models.
//!
//! Reference data (stops, route templates, buses, drivers), the runs to be
//! scheduled, and the artifacts a solve produces (activity log, solution).
//!
//! # Domain Mappings
//!
//! | u-transit | Scheduling term | Notes |
//! |-----------|-----------------|-------|
//! | Run | Task | One departure of a route template |
//! | Bus | Primary resource | Range-limited, returns to its depot |
//! | Driver | Human resource | Bound by driving-time rules |
//! | ActivityLogEntry | Assignment interval | One per state transition |
//! | ScheduleSolution | Schedule | Runs + score + activity log |

mod activity;
mod bus;
mod driver;
mod route;
mod run;
mod solution;
mod stop;

pub use activity::{ActivityKind, ActivityLog, ActivityLogEntry, EntityKind};
pub use bus::Bus;
pub use driver::Driver;
pub use route::{RouteTemplate, Timetable};
pub use run::Run;
pub use solution::ScheduleSolution;
pub use stop::{Stop, StopKind};
