//! Per-solve simulation state for buses and drivers.
//!
//! A solve owns one [`FleetTracker`] and one [`CrewTracker`], built fresh
//! from catalog snapshots. Records live in an arena indexed by stable
//! integer handles ([`BusIdx`], [`DriverIdx`]), sorted by entity id so that
//! every scan over them runs in the same order on every solve.
//!
//! Trackers answer two kinds of questions:
//! - **readiness**: can this bus/driver take this run, and when is it ready?
//!   (read-only, no side effects)
//! - **commit**: apply an accepted run and return a transition describing
//!   every interval that occurred, for the activity log.

mod crew;
mod fleet;

pub use crew::{CrewTracker, DriverIdx, DriverReadiness, DriverRecord, DriverTransition};
pub use fleet::{BusIdx, BusReadiness, BusRecord, BusTransition, FleetTracker};

use jiff::civil::Time;

/// A deadhead movement: how long it takes and how far it goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Leg {
    pub minutes: u32,
    pub km: u32,
}

impl Leg {
    /// No movement.
    pub const NONE: Leg = Leg { minutes: 0, km: 0 };

    #[inline]
    pub fn is_none(&self) -> bool {
        *self == Leg::NONE
    }
}

/// One interval that occurred during a commit.
///
/// `from` is `None` only for drivers whose position was unknown.
/// `charge_km` is `(start, end)` for bus intervals and `None` for drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: Time,
    pub end: Time,
    pub from: Option<String>,
    pub to: String,
    pub charge_km: Option<(u32, u32)>,
}
