//! Lookup run metrics.
//!
//! Every run records one `StrategyTrace` per strategy in cascade order, up to
//! and including the one that hit. Strategies after a hit are not traced
//! because they never ran.

use super::strategy::Strategy;
use serde::Serialize;
use std::time::Duration;

/// What happened to a strategy during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyOutcome {
    /// Switched off by the caller's `StrategyMask`.
    Disabled,
    /// The input's shape rules the strategy out (length or digit checks).
    NotApplicable,
    /// Ran to completion without a hit.
    Miss,
    /// Produced the result.
    Hit,
}

/// Trace of one strategy within a run.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyTrace {
    pub strategy: Strategy,
    pub outcome: StrategyOutcome,
    /// Index/catalog membership tests or suffix comparisons performed.
    pub probes: usize,
    #[serde(skip)]
    pub duration: Duration,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    pub strategies: Vec<StrategyTrace>,
}
