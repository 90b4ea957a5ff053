//! The history table: 64x64x4 move-ordering counters.

use std::sync::atomic::{AtomicU64, Ordering};

use roque_core::Action;

const PROMOTIONS: usize = 4;
const LEN: usize = 64 * 64 * PROMOTIONS;

/// Counters indexed by `(from, to, promotion)` crediting moves that were
/// selected as best or caused a cutoff.
///
/// Shared between the turn driver and the ponder worker. Counters are
/// advisory ordering hints, so relaxed atomics suffice and concurrent
/// updates are benign.
pub struct HistoryTable {
    counters: Box<[AtomicU64]>,
}

impl HistoryTable {
    /// Create a zeroed table.
    pub fn new() -> HistoryTable {
        let counters = (0..LEN).map(|_| AtomicU64::new(0)).collect();
        HistoryTable { counters }
    }

    #[inline]
    fn index(action: &Action) -> usize {
        (action.from.index() * 64 + action.to.index()) * PROMOTIONS + action.promotion_index()
    }

    /// Credit an action with one count.
    #[inline]
    pub fn record(&self, action: &Action) {
        let _ = self.counters[Self::index(action)].fetch_add(1, Ordering::Relaxed);
    }

    /// Read an action's current count.
    #[inline]
    pub fn count(&self, action: &Action) -> u64 {
        self.counters[Self::index(action)].load(Ordering::Relaxed)
    }

    /// Zero every counter. Done at the start of each pondering session,
    /// since the table does not track which piece moved.
    pub fn reset(&self) {
        for counter in &self.counters {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for HistoryTable {
    fn default() -> HistoryTable {
        HistoryTable::new()
    }
}
