//! Catalog snapshot and resolution engine.
//!
//! Resolving an identifier is a fixed cascade over one immutable snapshot:
//!
//! ```text
//! records ── CatalogSnapshot::build ──┬─ catalog     serie -> Record (source order)
//!            (catalog.rs)             ├─ by_linea    linea -> Record
//!                                     └─ prefixes    first 10 digits, first-seen order
//!                                               │
//! input ── normalize (normalize.rs) ──────────┐ │
//!                                             v v
//!                                 Resolver::run (resolver.rs)
//!                                   1. exact serie
//!                                   2. exact línea
//!                                   3. prefix + suffix reconstruction
//!                                   4. suffix scan over the catalog
//!                                   5. línea without leading zeros
//!                                             │
//!                                             v
//!                                 first hit ─▶ Resolution
//! ```
//!
//! Strategies are ordered cheapest and most specific first, so a well formed
//! serial or línea never pays for the whole-catalog scan in strategy 4.
//!
//! ## Responsibilities by module
//!
//! - `catalog.rs`: builds the three lookup structures together, exactly once.
//! - `normalize.rs`: whitespace removal, the only normalization applied.
//! - `strategy.rs`: strategy identifiers and the `StrategyMask` used to
//!   enable or disable them.
//! - `resolver.rs`: the cascade itself, plus the all-candidates variant.
//! - `metrics.rs`: per-strategy traces collected during a run.
//! - `store.rs`: atomically swappable holder for the live snapshot.
//!
//! ## Ordering
//!
//! Strategies 3 and 4 return the first structural hit in enumeration order.
//! Both orders are fixed at build time (prefix first-seen order, catalog source
//! order), so results are deterministic for a given snapshot, but when several
//! records could satisfy the same fragment the winner depends on that order.
//! `Resolver::all_hits` lists every record a fragment could denote.

#[path = "engine/catalog.rs"]
mod catalog;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/resolver.rs"]
mod resolver;
#[path = "engine/store.rs"]
mod store;
#[path = "engine/strategy.rs"]
mod strategy;

pub use catalog::{CatalogSnapshot, CatalogStats, PREFIX_LEN};
pub use metrics::{StrategyOutcome, StrategyTrace};
pub use normalize::normalize;
pub(crate) use resolver::{Resolution, Resolver};
pub use store::SnapshotStore;
pub use strategy::{Strategy, StrategyMask};
