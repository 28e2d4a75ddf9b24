use crate::engine::{CatalogSnapshot, Resolution, Resolver, Strategy, StrategyMask, StrategyTrace};
use crate::Record;
use serde::ser::{Serialize, Serializer};
use std::time::Duration;

/// Options that affect resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Strategies allowed to run. Defaults to all five, in cascade order.
    pub strategies: StrategyMask,
}

impl Options {
    /// Options with `strategy` switched off.
    pub fn without(mut self, strategy: Strategy) -> Self {
        self.strategies.remove(strategy.mask());
        self
    }
}

/// Outcome of resolving one identifier.
///
/// `NotFound` is an ordinary answer ("we looked and it is not in the catalog"),
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found { record: Record, strategy: Strategy },
    NotFound { number: String },
}

impl MatchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            MatchResult::Found { record, .. } => Some(record),
            MatchResult::NotFound { .. } => None,
        }
    }

    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            MatchResult::Found { strategy, .. } => Some(*strategy),
            MatchResult::NotFound { .. } => None,
        }
    }
}

#[derive(serde::Serialize)]
struct FoundWire<'a> {
    found: bool,
    #[serde(flatten)]
    record: &'a Record,
    strategy: Strategy,
}

#[derive(serde::Serialize)]
struct NotFoundWire<'a> {
    found: bool,
    number: &'a str,
}

/// Serialized as the record's fields merged with `"found": true`, or as
/// `{"found": false, "number": <normalized input>}`.
impl Serialize for MatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MatchResult::Found { record, strategy } => {
                FoundWire { found: true, record, strategy: *strategy }.serialize(serializer)
            }
            MatchResult::NotFound { number } => NotFoundWire { found: false, number }.serialize(serializer),
        }
    }
}

/// A record some strategy could resolve an identifier to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Candidate {
    pub strategy: Strategy,
    pub record: Record,
}

/// Per-run details returned by [`lookup_verbose_with`].
#[derive(Debug, Clone)]
pub struct LookupDetails {
    /// Input after whitespace removal.
    pub normalized: String,
    /// Total time spent in the cascade.
    pub total: Duration,
    /// One entry per strategy that was considered, in cascade order.
    pub strategies: Vec<StrategyTrace>,
}

impl LookupDetails {
    pub fn probes(&self) -> usize {
        self.strategies.iter().map(|t| t.probes).sum()
    }
}

/// Result from [`lookup_verbose_with`].
#[derive(Debug, Clone)]
pub struct LookupVerbose {
    pub result: MatchResult,
    pub details: LookupDetails,
}

/// Resolve `input` against `snapshot` with every strategy enabled.
///
/// # Example
/// ```
/// use simlookup::{CatalogSnapshot, Record, lookup};
///
/// let snapshot = CatalogSnapshot::build(vec![
///     Record::new("8954318224056426839").with_linea("1127067248"),
/// ]);
/// assert!(lookup(&snapshot, "056426839").is_found());
/// assert!(!lookup(&snapshot, "0000000000").is_found());
/// ```
pub fn lookup(snapshot: &CatalogSnapshot, input: &str) -> MatchResult {
    lookup_with(snapshot, input, &Options::default())
}

/// Resolve `input` against `snapshot` using `options`.
///
/// Never fails: any input that no enabled strategy resolves is reported as
/// [`MatchResult::NotFound`] carrying the normalized input.
pub fn lookup_with(snapshot: &CatalogSnapshot, input: &str, options: &Options) -> MatchResult {
    let resolution = Resolver::new(snapshot, input).run(options.strategies);
    resolution_to_result(resolution)
}

/// Like [`lookup_with`], also returning which strategies ran and what each cost.
pub fn lookup_verbose_with(snapshot: &CatalogSnapshot, input: &str, options: &Options) -> LookupVerbose {
    let resolution = Resolver::new(snapshot, input).run(options.strategies);
    let details = LookupDetails {
        normalized: resolution.normalized.clone(),
        total: resolution.metrics.total,
        strategies: resolution.metrics.strategies.clone(),
    };

    LookupVerbose { result: resolution_to_result(resolution), details }
}

/// Every distinct record any enabled strategy could resolve `input` to.
///
/// [`lookup_with`] keeps the first of these; this is for callers that want to
/// disambiguate a fragment themselves. Empty when nothing matches.
pub fn candidates(snapshot: &CatalogSnapshot, input: &str, options: &Options) -> Vec<Candidate> {
    Resolver::new(snapshot, input)
        .all_hits(options.strategies)
        .into_iter()
        .map(|(strategy, record)| Candidate { strategy, record: record.clone() })
        .collect()
}

fn resolution_to_result(resolution: Resolution<'_>) -> MatchResult {
    match resolution.hit {
        Some((strategy, record)) => MatchResult::Found { record: record.clone(), strategy },
        None => MatchResult::NotFound { number: resolution.normalized },
    }
}
