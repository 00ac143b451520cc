//! Catalog-bound scheduling entry point.

use super::AssignmentEngine;
use crate::catalog::CatalogProvider;
use crate::config::EngineConfig;
use crate::models::ScheduleSolution;

/// An assignment engine bound to one catalog provider.
///
/// `solve()` takes fresh snapshots from the provider on every call, so a
/// provider backed by live data yields a schedule for its current state.
///
/// # Example
///
/// ```
/// use jiff::civil::time;
/// use u_transit::catalog::Catalog;
/// use u_transit::config::EngineConfig;
/// use u_transit::models::{Bus, Driver, RouteTemplate};
/// use u_transit::scheduler::ScheduleService;
///
/// let catalog = Catalog::new()
///     .with_route(RouteTemplate::new("R1", "T1", "T2", 18, 45))
///     .with_bus(Bus::new("B1", "D1", 250))
///     .with_timetable("R1", &[time(8, 0, 0, 0)]);
///
/// let service = ScheduleService::new(catalog, EngineConfig::default());
/// let solution = service.solve();
/// assert_eq!(solution.unassigned_run_count, 1);
/// assert_eq!(solution.score, -1000);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleService<C> {
    catalog: C,
    engine: AssignmentEngine,
}

impl<C: CatalogProvider> ScheduleService<C> {
    /// Binds a catalog to an engine built from `config`.
    pub fn new(catalog: C, config: EngineConfig) -> Self {
        Self::with_engine(catalog, AssignmentEngine::new(config))
    }

    /// Binds a catalog to a preconfigured engine.
    pub fn with_engine(catalog: C, engine: AssignmentEngine) -> Self {
        Self { catalog, engine }
    }

    /// Schedules every run of the bound catalog.
    pub fn solve(&self) -> ScheduleSolution {
        self.engine.solve(&self.catalog)
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn engine(&self) -> &AssignmentEngine {
        &self.engine
    }

    pub fn into_catalog(self) -> C {
        self.catalog
    }
}
