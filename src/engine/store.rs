//! Live snapshot holder.
//!
//! Serving layers keep one `SnapshotStore` and resolve every request against
//! whatever snapshot is current when the request starts. A reload builds a new
//! `CatalogSnapshot` off to the side and swaps it in with [`SnapshotStore::replace`];
//! in-flight lookups keep the `Arc` they loaded and finish against the old one.

use super::catalog::CatalogSnapshot;
use crate::api::{self, Candidate, LookupVerbose, MatchResult, Options};
use arc_swap::ArcSwap;
use std::sync::Arc;

#[derive(Debug)]
pub struct SnapshotStore {
    current: ArcSwap<CatalogSnapshot>,
}

impl SnapshotStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        SnapshotStore { current: ArcSwap::from_pointee(snapshot) }
    }

    /// The snapshot currently being served.
    pub fn load(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// Atomically make `snapshot` current and return the one it replaced.
    pub fn replace(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let stats = snapshot.stats();
        let previous = self.current.swap(Arc::new(snapshot));
        tracing::info!(
            records = stats.records,
            previous_records = previous.len(),
            "catalog snapshot replaced"
        );
        previous
    }

    pub fn lookup(&self, input: &str, options: &Options) -> MatchResult {
        api::lookup_with(&self.current.load(), input, options)
    }

    pub fn lookup_verbose(&self, input: &str, options: &Options) -> LookupVerbose {
        api::lookup_verbose_with(&self.current.load(), input, options)
    }

    pub fn candidates(&self, input: &str, options: &Options) -> Vec<Candidate> {
        api::candidates(&self.current.load(), input, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use std::thread;

    fn snapshot(serie: &str, estado: &str) -> CatalogSnapshot {
        CatalogSnapshot::build(vec![Record::new(serie).with_linea("1127067248").with_estado(estado)])
    }

    #[test]
    fn replace_swaps_the_served_snapshot() {
        let store = SnapshotStore::new(snapshot("8954318224056426839", "ASIGNADA"));
        let options = Options::default();

        let before = store.lookup("1127067248", &options);
        assert_eq!(before.record().and_then(|r| r.estado.as_deref()), Some("ASIGNADA"));

        let previous = store.replace(snapshot("8954318224056426839", "BLOQUEADA"));
        assert_eq!(previous.len(), 1);

        let after = store.lookup("1127067248", &options);
        assert_eq!(after.record().and_then(|r| r.estado.as_deref()), Some("BLOQUEADA"));
    }

    #[test]
    fn loaded_snapshot_outlives_a_replace() {
        let store = SnapshotStore::new(snapshot("8954318224056426839", "ASIGNADA"));
        let held = store.load();
        store.replace(CatalogSnapshot::build(Vec::new()));

        assert_eq!(held.len(), 1);
        assert!(store.load().is_empty());
        assert!(!store.lookup("8954318224056426839", &Options::default()).is_found());
    }

    #[test]
    fn concurrent_readers_always_see_a_complete_snapshot() {
        let store = Arc::new(SnapshotStore::new(snapshot("8954318224056426839", "v0")));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let options = Options::default();
                    for _ in 0..500 {
                        // Serie and línea always come from the same snapshot,
                        // so both lookups must agree within one loaded Arc.
                        let snap = store.load();
                        let by_serie = api::lookup_with(&snap, "8954318224056426839", &options);
                        let by_linea = api::lookup_with(&snap, "1127067248", &options);
                        assert!(by_serie.is_found());
                        assert_eq!(by_serie.record(), by_linea.record());
                    }
                })
            })
            .collect();

        for version in 1..50 {
            store.replace(snapshot("8954318224056426839", &format!("v{version}")));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
