//! Memoization of simulation results.

use crate::core::errors::SimulationError;
use crate::protocols::{Outcome, Protocol};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::trace;

/// Every input that influences a run's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub protocol: Protocol,
    pub num_qubits: usize,
    pub seed: u64,
}

/// Thread-safe cache of seeded simulation results.
///
/// Only seeded runs are stored; an unseeded run is not reproducible and is
/// always recomputed. Concurrent requests for one key compute and store a
/// single result.
#[derive(Debug, Default)]
pub struct SimulationCache {
    entries: DashMap<CacheKey, Arc<Outcome>>,
}

impl SimulationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for the request, running the simulation on a miss.
    pub fn get_or_run(
        &self,
        protocol: Protocol,
        num_qubits: usize,
        seed: Option<u64>,
    ) -> Result<Arc<Outcome>, SimulationError> {
        let Some(seed) = seed else {
            return protocol.run(num_qubits, None).map(Arc::new);
        };

        let key = CacheKey {
            protocol,
            num_qubits,
            seed,
        };

        if let Some(hit) = self.entries.get(&key) {
            trace!(?key, "cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        // The entry lock is held while the simulation runs so racing callers
        // observe the first stored result.
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => Ok(Arc::clone(occupied.get())),
            Entry::Vacant(vacant) => {
                trace!(?key, "cache miss");
                let outcome = Arc::new(protocol.run(num_qubits, Some(seed))?);
                vacant.insert(Arc::clone(&outcome));
                Ok(outcome)
            }
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Outcome>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn repeated_requests_share_one_entry() {
        let cache = SimulationCache::new();
        let a = cache.get_or_run(Protocol::Bb84, 10, Some(42)).unwrap();
        let b = cache.get_or_run(Protocol::Bb84, 10, Some(42)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_seeds_never_share_an_entry() {
        let cache = SimulationCache::new();
        for seed in 0..10 {
            cache.get_or_run(Protocol::Bb84, 20, Some(seed)).unwrap();
        }
        assert_eq!(cache.len(), 10);

        let first = cache
            .get(&CacheKey {
                protocol: Protocol::Bb84,
                num_qubits: 20,
                seed: 0,
            })
            .unwrap();
        let second = cache
            .get(&CacheKey {
                protocol: Protocol::Bb84,
                num_qubits: 20,
                seed: 1,
            })
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_ne!(*first, *second);
    }

    #[test]
    fn protocol_and_size_are_part_of_the_key() {
        let cache = SimulationCache::new();
        let bb84 = cache.get_or_run(Protocol::Bb84, 10, Some(1)).unwrap();
        let e91 = cache.get_or_run(Protocol::E91, 10, Some(1)).unwrap();
        let larger = cache.get_or_run(Protocol::Bb84, 11, Some(1)).unwrap();
        assert_eq!(bb84.protocol(), Protocol::Bb84);
        assert_eq!(e91.protocol(), Protocol::E91);
        assert!(!Arc::ptr_eq(&bb84, &larger));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn unseeded_runs_are_not_cached() {
        let cache = SimulationCache::new();
        cache.get_or_run(Protocol::E91, 10, None).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = SimulationCache::new();
        assert_eq!(
            cache.get_or_run(Protocol::Bb84, 0, Some(3)).unwrap_err(),
            SimulationError::InvalidQubitCount(0)
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_requests_store_one_result() {
        let cache = Arc::new(SimulationCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_run(Protocol::Bb84, 30, Some(7)).unwrap())
            })
            .collect();

        let results: Vec<Arc<Outcome>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(cache.len(), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = SimulationCache::new();
        cache.get_or_run(Protocol::E91, 10, Some(5)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
