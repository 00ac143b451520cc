//! Rule engine for ranking feasible buses.
//!
//! Rules are applied in sequence: the first rule that distinguishes two
//! candidates decides their order; later rules only break ties. A final
//! tie-breaker makes the ranking total.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, BusCandidate, CandidateRule, RuleScore};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order.
    #[default]
    None,
    /// Deterministic by bus ID (lexicographic).
    ById,
}

/// A composable rule chain for bus selection.
///
/// # Example
/// ```
/// use u_transit::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::standard().with_rule(rules::LeastApproach);
/// assert_eq!(engine.rule_names().len(), 3);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn CandidateRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::None,
        }
    }

    /// The standard chain: used before fresh, earliest available, then id.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::PreferUsed)
            .with_rule(rules::EarliestAvailable)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Indices into `candidates`, best first. Stable on full ties.
    pub fn sort_indices(&self, candidates: &[BusCandidate<'_>]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&candidates[a], &candidates[b]));
        indices
    }

    /// Index of the best candidate; the first one on a full tie.
    pub fn select_best(&self, candidates: &[BusCandidate<'_>]) -> Option<usize> {
        (0..candidates.len()).min_by(|&a, &b| self.compare(&candidates[a], &candidates[b]))
    }

    /// Scores from each rule, in chain order.
    pub fn evaluate(&self, candidate: &BusCandidate<'_>) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(candidate)).collect()
    }

    fn compare(&self, a: &BusCandidate<'_>, b: &BusCandidate<'_>) -> Ordering {
        for rule in &self.rules {
            let ordering = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        match self.tie_breaker {
            TieBreaker::None => Ordering::Equal,
            TieBreaker::ById => a.bus_id.cmp(b.bus_id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
