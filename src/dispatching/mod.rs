//! Dispatching rules for choosing among feasible buses.
//!
//! When several buses can serve a run, a [`RuleEngine`] ranks them by
//! evaluating [`CandidateRule`]s in sequence, consulting the next rule only
//! on ties, and finally breaking remaining ties by bus id.
//!
//! # Usage
//!
//! ```
//! use u_transit::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! // The standard chain: reuse buses already on the road, earliest first.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PreferUsed)
//!     .with_rule(rules::EarliestAvailable)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! assert_eq!(engine.rule_names(), vec!["PREFER_USED", "EARLIEST_AVAILABLE"]);
//! ```
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod candidate;
mod engine;
pub mod rules;

pub use candidate::BusCandidate;
pub use engine::{RuleEngine, TieBreaker};

use std::fmt::Debug;

/// Score returned by a candidate rule.
///
/// **Lower score = preferred.** Integer scores keep comparisons exact.
pub type RuleScore = i64;

/// A rule that scores one feasible bus for the run at hand.
pub trait CandidateRule: Send + Sync + Debug {
    /// Rule name (e.g., "PREFER_USED").
    fn name(&self) -> &'static str;

    /// Scores a candidate; lower = preferred.
    fn evaluate(&self, candidate: &BusCandidate<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
