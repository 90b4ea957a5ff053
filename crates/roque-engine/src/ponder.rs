//! Pondering: background search on the opponent's clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use roque_core::Board;

use crate::config::Config;
use crate::error::{EngineError, Interrupt};
use crate::history::HistoryTable;
use crate::search::{RecentMoves, Search};
use crate::time::TimeBudget;

/// The stop signal a search polls at the same points as the time check.
///
/// Signals only for a live ponder worker: `running && !should_continue`.
/// The main turn search holds the same handle, for which `running` is
/// always false by the time it runs.
#[derive(Clone)]
pub struct StopHandle {
    should_continue: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// A handle that never signals and never reports pondering.
    pub fn inert() -> StopHandle {
        StopHandle {
            should_continue: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Raise `Stopped` once the worker has been told to wind down.
    #[inline]
    pub fn check(&self) -> Result<(), Interrupt> {
        if self.running.load(Ordering::Acquire) && !self.should_continue.load(Ordering::Acquire) {
            Err(Interrupt::Stopped)
        } else {
            Ok(())
        }
    }

    /// Whether a ponder worker is live; a pondering search never returns a
    /// move on its own.
    #[inline]
    pub fn is_pondering(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Owns the background worker that searches during the opponent's turn.
///
/// At most one worker runs at a time. The main thread owns the shared
/// position between `stop()` and `start()`; the worker searches a private
/// copy with the side to move swapped, so the only structure shared with
/// the main thread is the history table.
pub struct Ponder {
    should_continue: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Ponder {
    /// Create an idle ponder owner.
    pub fn new() -> Ponder {
        Ponder {
            should_continue: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// A stop handle observing this owner's worker.
    pub fn handle(&self) -> StopHandle {
        StopHandle {
            should_continue: Arc::clone(&self.should_continue),
            running: Arc::clone(&self.running),
        }
    }

    /// Launch the worker on the position after our move, thinking as the
    /// opponent. No-op unless pondering (and the history table it feeds)
    /// is enabled.
    pub fn start(&mut self, board: &Board, history: Arc<HistoryTable>, config: &Config) {
        if !(config.pondering && config.history_table) {
            return;
        }
        debug_assert!(self.worker.is_none(), "ponder worker already running");

        // Snapshot the settings with depth and time limits lifted so the
        // worker deepens until told to stop.
        let mut worker_config = config.clone();
        worker_config.max_depth_limit = 0;
        worker_config.seconds_limit = 0.0;

        // The table does not distinguish whose counters it holds; start the
        // session clean.
        history.reset();

        let mut position = *board;
        position.set_side_to_move(position.side_to_move().flip());

        self.should_continue.store(true, Ordering::Release);
        self.running.store(true, Ordering::Release);
        let handle = self.handle();

        debug!("start pondering");
        self.worker = Some(std::thread::spawn(move || {
            // A fresh budget never fires: pondering is bounded only by the
            // stop signal.
            let timer = TimeBudget::new();
            let rng = match worker_config.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let mut recent = RecentMoves::new();
            let mut search = Search::new(&worker_config, &history, &timer, handle, rng);
            match search.run(&position, &mut recent) {
                Err(EngineError::Stopped) => {}
                Err(error) => warn!(%error, "pondering aborted"),
                Ok(action) => warn!(%action, "pondering returned unexpectedly"),
            }
        }));
    }

    /// Signal the worker and join it. Safe to call when idle.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.should_continue.store(false, Ordering::Release);
            if worker.join().is_err() {
                warn!("ponder worker panicked");
            }
            self.running.store(false, Ordering::Release);
            debug!("stop pondering");
        }
    }
}

impl Default for Ponder {
    fn default() -> Ponder {
        Ponder::new()
    }
}

impl Drop for Ponder {
    fn drop(&mut self) {
        self.stop();
    }
}
