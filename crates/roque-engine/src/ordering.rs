//! Move ordering: history counts descending, random tiebreak.

use roque_core::Action;

use crate::history::HistoryTable;

/// Orders a node's move list before children are searched.
///
/// History counters are read once per list, so the order stays stable even
/// as counters change mid-search. The fixed mode keeps the generator's
/// lexicographic `(from, to, promotion)` order for reproducible tests.
pub struct MoveOrder<'a> {
    history: &'a HistoryTable,
    rng: &'a mut fastrand::Rng,
    fixed: bool,
}

impl<'a> MoveOrder<'a> {
    /// Create an ordering pass over the given history table and RNG.
    pub fn new(history: &'a HistoryTable, rng: &'a mut fastrand::Rng, fixed: bool) -> Self {
        MoveOrder { history, rng, fixed }
    }

    /// Sort `actions` by `(history count desc, random tiebreak desc)`,
    /// or leave the lexicographic order untouched in fixed mode.
    pub fn order(&mut self, actions: &mut [Action]) {
        if self.fixed {
            return;
        }
        let mut keyed: Vec<(u64, u64, Action)> = actions
            .iter()
            .map(|a| (self.history.count(a), self.rng.u64(..), *a))
            .collect();
        keyed.sort_by(|x, y| (y.0, y.1).cmp(&(x.0, x.1)));
        for (dst, (_, _, action)) in actions.iter_mut().zip(keyed) {
            *dst = action;
        }
    }
}
