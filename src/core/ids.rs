//! Integer id allocation with recycling
//!
//! Every entity kind owns one [`IdAllocator`]. Ids start at 1 and grow
//! monotonically; ids freed by deletion are handed out again before the
//! counter advances, and ids claimed explicitly through an upsert are skipped
//! when the counter reaches them.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct AllocatorState {
    next_candidate: i64,
    available: BTreeSet<i64>,
    used: BTreeSet<i64>,
}

impl AllocatorState {
    fn new() -> Self {
        Self {
            next_candidate: 1,
            available: BTreeSet::new(),
            used: BTreeSet::new(),
        }
    }
}

/// Thread-safe id allocator for one entity kind
///
/// Each public method runs as a single critical section, so two concurrent
/// creates can never be handed the same id.
#[derive(Debug)]
pub struct IdAllocator {
    state: Mutex<AllocatorState>,
}

impl IdAllocator {
    /// Create an allocator whose first fresh id is 1
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AllocatorState::new()),
        }
    }

    // A poisoned lock only means another thread panicked mid-call; the sets
    // are still structurally valid.
    fn lock(&self) -> MutexGuard<'_, AllocatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue an id for a new entity
    ///
    /// Recycled ids are preferred. Callers must not rely on the order in
    /// which recycled ids come back.
    pub fn next_id(&self) -> i64 {
        let mut state = self.lock();

        if let Some(id) = state.available.pop_first() {
            // A recycled id above the counter was claimed explicitly once;
            // keep it reserved so the counter does not issue it a second time.
            if id >= state.next_candidate {
                state.used.insert(id);
            }
            return id;
        }

        loop {
            let candidate = state.next_candidate;
            if !state.used.remove(&candidate) {
                break;
            }
            state.next_candidate += 1;
        }

        let id = state.next_candidate;
        state.next_candidate += 1;
        id
    }

    /// Reserve an id chosen by the client (upsert through PUT)
    pub fn mark_id_used(&self, id: i64) {
        let mut state = self.lock();
        state.available.remove(&id);
        state.used.insert(id);
    }

    /// Return an id to the pool after its entity was deleted
    pub fn mark_id_available(&self, id: i64) {
        let mut state = self.lock();
        state.used.remove(&id);
        state.available.insert(id);
    }

    /// Forget everything and start again from 1
    pub fn reset(&self) {
        let mut state = self.lock();
        state.available.clear();
        state.used.clear();
        state.next_candidate = 1;
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_fresh_ids_are_sequential_from_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_no_double_allocation() {
        let ids = IdAllocator::new();
        let issued: HashSet<i64> = (0..500).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 500);
    }

    #[test]
    fn test_freed_id_is_reused_before_fresh_ones() {
        let ids = IdAllocator::new();
        let first = ids.next_id();
        let _second = ids.next_id();

        ids.mark_id_available(first);
        assert_eq!(ids.next_id(), first);

        // Pool is empty again, counter continues
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_reuse_draws_from_available_set() {
        let ids = IdAllocator::new();
        for _ in 0..5 {
            ids.next_id();
        }
        ids.mark_id_available(2);
        ids.mark_id_available(4);

        let reused: HashSet<i64> = [ids.next_id(), ids.next_id()].into_iter().collect();
        assert_eq!(reused, HashSet::from([2, 4]));
        assert_eq!(ids.next_id(), 6);
    }

    #[test]
    fn test_used_ids_are_skipped() {
        let ids = IdAllocator::new();
        ids.mark_id_used(2);
        ids.mark_id_used(3);

        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 4);
        assert_eq!(ids.next_id(), 5);
    }

    #[test]
    fn test_mark_used_removes_from_available() {
        let ids = IdAllocator::new();
        let id = ids.next_id();
        ids.mark_id_available(id);
        ids.mark_id_used(id);

        // The freed id was claimed again, so a fresh one comes out
        assert_ne!(ids.next_id(), id);
    }

    #[test]
    fn test_explicit_id_freed_and_reissued_is_not_issued_twice() {
        let ids = IdAllocator::new();
        ids.mark_id_used(3);
        ids.mark_id_available(3);

        // Recycled first
        assert_eq!(ids.next_id(), 3);

        let rest: Vec<i64> = (0..3).map(|_| ids.next_id()).collect();
        assert_eq!(rest, vec![1, 2, 4]);
    }

    #[test]
    fn test_reset_starts_over() {
        let ids = IdAllocator::new();
        ids.next_id();
        ids.next_id();
        ids.mark_id_available(1);
        ids.mark_id_used(7);

        ids.reset();

        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        let ids = Arc::new(IdAllocator::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..200).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id), "id {} issued twice", id);
            }
        }
        assert_eq!(all.len(), 1600);
    }
}
