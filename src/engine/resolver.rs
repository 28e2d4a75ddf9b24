//! The resolution cascade.
//!
//! A `Resolver` owns the normalized input and borrows one snapshot. Each
//! strategy is exposed as a lazy iterator of catalog hits, so the same code
//! serves both the first-hit lookup (`run`: take one hit, stop) and the
//! all-candidates variant (`all_hits`: drain every strategy).
//!
//! ```text
//! Strategy        gate                  probes
//! ─────────────── ───────────────────── ──────────────────────────────────────
//! ExactSerie      none                  catalog[input]
//! ExactLinea      none                  by_linea[input]
//! PrefixSuffix    ^[0-9]{7,11}$         catalog[P+input], catalog[P+input+"0"],
//!                                       catalog[P+input[1..]] if input starts "0"
//!                                       for every prefix P
//! SuffixScan      7+ chars              every serie ends_with(last9 | last9+"0")
//! LineaNoLeading  none                  by_linea[input.trim_start("0")]
//! ```

use super::catalog::CatalogSnapshot;
use super::metrics::{RunMetrics, StrategyOutcome, StrategyTrace};
use super::normalize::normalize;
use super::strategy::{Strategy, StrategyMask};
use crate::Record;
use std::cell::Cell;
use std::time::Instant;

/// Minimum input length, in characters, for the suffix scan.
const SUFFIX_SCAN_MIN_LEN: usize = 7;
/// Number of trailing characters compared by the suffix scan.
const SUFFIX_SCAN_LEN: usize = 9;

type Hits<'s, 'a> = Box<dyn Iterator<Item = &'a Record> + 's>;

/// Outcome of a single cascade run.
#[derive(Debug, Clone)]
pub(crate) struct Resolution<'a> {
    /// Normalized input the strategies compared against.
    pub normalized: String,
    /// Winning strategy and record, if any strategy hit.
    pub hit: Option<(Strategy, &'a Record)>,
    pub metrics: RunMetrics,
}

/// Runs the cascade for one input against one snapshot.
#[derive(Debug)]
pub(crate) struct Resolver<'a> {
    snapshot: &'a CatalogSnapshot,
    input: String,
}

impl<'a> Resolver<'a> {
    pub fn new(snapshot: &'a CatalogSnapshot, raw: &str) -> Self {
        Resolver { snapshot, input: normalize(raw) }
    }

    /// Whether the input's shape allows `strategy` to run at all.
    pub fn applies(&self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::PrefixSuffix => regex!(r"^[0-9]{7,11}$").is_match(&self.input),
            Strategy::SuffixScan => self.input.chars().count() >= SUFFIX_SCAN_MIN_LEN,
            Strategy::ExactSerie | Strategy::ExactLinea | Strategy::LineaNoLeadingZeros => true,
        }
    }

    /// Lazily yield every record `strategy` reaches, in its enumeration order.
    ///
    /// `probes` is bumped once per membership test or suffix comparison as the
    /// iterator is driven, so a caller that stops after the first hit only pays
    /// for the probes it actually made.
    pub fn hits<'s>(&'s self, strategy: Strategy, probes: &'s Cell<usize>) -> Hits<'s, 'a> {
        if !self.applies(strategy) {
            return Box::new(std::iter::empty());
        }

        let snapshot = self.snapshot;
        let bump = move || probes.set(probes.get() + 1);

        match strategy {
            Strategy::ExactSerie => {
                bump();
                Box::new(snapshot.get(&self.input).into_iter())
            }
            Strategy::ExactLinea => {
                bump();
                Box::new(snapshot.by_linea(&self.input).into_iter())
            }
            Strategy::PrefixSuffix => {
                let fragment = self.input.as_str();
                Box::new(
                    snapshot
                        .prefixes()
                        .flat_map(move |prefix| reconstructions(prefix, fragment))
                        .filter_map(move |serie| {
                            bump();
                            snapshot.get(&serie)
                        }),
                )
            }
            Strategy::SuffixScan => {
                let suffix = trailing_chars(&self.input, SUFFIX_SCAN_LEN);
                let padded = format!("{suffix}0");
                Box::new(snapshot.records().filter(move |record| {
                    bump();
                    record.serie.ends_with(suffix) || record.serie.ends_with(padded.as_str())
                }))
            }
            Strategy::LineaNoLeadingZeros => {
                bump();
                Box::new(snapshot.by_linea(self.input.trim_start_matches('0')).into_iter())
            }
        }
    }

    /// Run the enabled strategies in order and stop at the first hit.
    pub fn run(&self, enabled: StrategyMask) -> Resolution<'a> {
        let started = Instant::now();
        let mut metrics = RunMetrics::default();
        let mut hit = None;

        for strategy in Strategy::ALL {
            let strategy_started = Instant::now();
            let probes = Cell::new(0);

            let (outcome, record) = if !enabled.contains(strategy.mask()) {
                (StrategyOutcome::Disabled, None)
            } else if !self.applies(strategy) {
                (StrategyOutcome::NotApplicable, None)
            } else {
                match self.hits(strategy, &probes).next() {
                    Some(record) => (StrategyOutcome::Hit, Some(record)),
                    None => (StrategyOutcome::Miss, None),
                }
            };

            tracing::debug!(input = %self.input, %strategy, ?outcome, probes = probes.get(), "strategy evaluated");
            metrics.strategies.push(StrategyTrace {
                strategy,
                outcome,
                probes: probes.get(),
                duration: strategy_started.elapsed(),
            });

            if let Some(record) = record {
                hit = Some((strategy, record));
                break;
            }
        }

        metrics.total = started.elapsed();
        Resolution { normalized: self.input.clone(), hit, metrics }
    }

    /// Every distinct record any enabled strategy reaches, tagged with the
    /// first strategy that reached it, in cascade then enumeration order.
    ///
    /// The first element is always the record [`run`](Self::run) would return.
    pub fn all_hits(&self, enabled: StrategyMask) -> Vec<(Strategy, &'a Record)> {
        let probes = Cell::new(0);
        let mut out: Vec<(Strategy, &'a Record)> = Vec::new();

        for strategy in Strategy::ALL.into_iter().filter(|s| enabled.contains(s.mask())) {
            for record in self.hits(strategy, &probes) {
                if !out.iter().any(|(_, seen)| seen.serie == record.serie) {
                    out.push((strategy, record));
                }
            }
        }

        tracing::debug!(input = %self.input, candidates = out.len(), probes = probes.get(), "all strategies drained");
        out
    }
}

/// Full serials a bare suffix could stand for under `prefix`, in probe order.
///
/// The trailing `"0"` form covers the separate digit some labels print after
/// the suffix; the stripped form covers a duplicated leading zero.
fn reconstructions(prefix: &str, fragment: &str) -> impl Iterator<Item = String> + use<> {
    let stripped = fragment.strip_prefix('0').map(|rest| format!("{prefix}{rest}"));
    [Some(format!("{prefix}{fragment}")), Some(format!("{prefix}{fragment}0")), stripped].into_iter().flatten()
}

/// The last `n` characters of `s` (all of `s` if it is shorter).
fn trailing_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((start, _)) if n > 0 => &s[start..],
        Some(_) => "",
        None => s,
    }
}
