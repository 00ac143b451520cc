//! Day-schedule builder for electric bus fleets.
//!
//! Assigns a day's timetabled runs to range-limited electric buses and to
//! drivers bound by hours-of-service rules, producing a feasible schedule,
//! a per-entity activity timeline, and a score.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Stop`, `RouteTemplate`, `Run`, `Bus`,
//!   `Driver`, `ActivityLog`, `ScheduleSolution`
//! - **`catalog`**: `CatalogProvider` contract, in-memory `Catalog`, JSON loader
//! - **`config`**: `EngineConfig` with fleet, crew and scoring parameters
//! - **`tracker`**: Per-solve bus and driver state (readiness, commit)
//! - **`dispatching`**: Rule chain ranking feasible buses
//! - **`scheduler`**: `AssignmentEngine`, activity logging, scoring
//! - **`validation`**: Catalog integrity checks (duplicate IDs, stop refs)
//!
//! # Example
//!
//! ```
//! use jiff::civil::time;
//! use u_transit::catalog::Catalog;
//! use u_transit::models::{Bus, Driver, RouteTemplate, Stop};
//! use u_transit::scheduler::AssignmentEngine;
//!
//! let catalog = Catalog::new()
//!     .with_stop(Stop::depot("D1", "Main Depot", 10))
//!     .with_stop(Stop::terminal("T1", "North"))
//!     .with_stop(Stop::terminal("T2", "South"))
//!     .with_route(RouteTemplate::new("R1", "T1", "T2", 18, 45))
//!     .with_bus(Bus::new("B1", "D1", 250))
//!     .with_driver(Driver::new("DR1", "Ana"))
//!     .with_timetable("R1", &[time(7, 0, 0, 0), time(9, 0, 0, 0)]);
//!
//! let solution = AssignmentEngine::default().solve(&catalog);
//! assert_eq!(solution.unassigned_run_count, 0);
//! assert_eq!(solution.buses_used_count, 1);
//! assert_eq!(
//!     solution.score_explanation,
//!     "0 unassigned runs (penalty: 0). 1 buses used (penalty: -100)."
//! );
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Desaulniers & Hickman (2007), "Public Transit", Handbooks in OR & MS 14

pub mod catalog;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod time;
pub mod tracker;
pub mod validation;

pub use catalog::{Catalog, CatalogProvider};
pub use config::EngineConfig;
pub use error::{TransitError, TransitResult};
pub use models::ScheduleSolution;
pub use scheduler::{AssignmentEngine, ScheduleService};
