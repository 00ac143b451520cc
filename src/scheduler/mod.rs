//! Greedy run assignment and scoring.
//!
//! # Algorithm
//!
//! [`AssignmentEngine`] makes one pass over the day's runs in departure
//! order. Each run gets the best feasible bus (ranked by a
//! [`RuleEngine`](crate::dispatching::RuleEngine)) and the first feasible
//! driver, or nothing at all. Accepted runs update the fleet and crew
//! trackers and append to the activity log.
//!
//! # Score
//!
//! [`ScoreBreakdown`] penalizes unassigned runs and distinct buses used.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Desaulniers & Hickman (2007), "Public Transit", Handbooks in OR & MS 14

mod engine;
mod logger;
mod score;
mod sequencer;
mod service;

pub use engine::{AssignmentEngine, SolveOutcome};
pub use logger::ActivityLogger;
pub use score::ScoreBreakdown;
pub use sequencer::sequence_runs;
pub use service::ScheduleService;
