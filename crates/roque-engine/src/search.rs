//! Iterative-deepening negamax with alpha-beta and quiescence.

use std::collections::VecDeque;

use tracing::debug;

use roque_core::{Action, Board, Terminal};

use crate::config::{Config, Heuristic};
use crate::error::{EngineError, Interrupt};
use crate::history::HistoryTable;
use crate::node::Node;
use crate::ordering::MoveOrder;
use crate::ponder::StopHandle;
use crate::score::Score;
use crate::time::TimeBudget;

/// The last two moves this side played, consulted by the root to sidestep a
/// two-move repetition.
#[derive(Debug, Default)]
pub struct RecentMoves(VecDeque<Action>);

impl RecentMoves {
    /// Create an empty memory.
    pub fn new() -> RecentMoves {
        RecentMoves(VecDeque::with_capacity(3))
    }

    /// Record a played move, keeping only the most recent two.
    pub fn record(&mut self, action: Action) {
        self.0.push_front(action);
        self.0.truncate(2);
    }

    /// The move played two plies ago, once two moves have been recorded.
    pub fn two_plies_ago(&self) -> Option<Action> {
        if self.0.len() >= 2 {
            self.0.back().copied()
        } else {
            None
        }
    }
}

// Why the root routine could not finish an iteration.
enum RootAbort {
    Interrupt(Interrupt),
    Terminal(Terminal),
    NoChildren,
}

/// One search over one position, under one configuration.
pub struct Search<'a> {
    config: &'a Config,
    history: &'a HistoryTable,
    timer: &'a TimeBudget,
    stop: StopHandle,
    rng: fastrand::Rng,
    depth_limit: u32,
}

impl<'a> Search<'a> {
    /// Assemble a search over explicit collaborators.
    pub fn new(
        config: &'a Config,
        history: &'a HistoryTable,
        timer: &'a TimeBudget,
        stop: StopHandle,
        rng: fastrand::Rng,
    ) -> Search<'a> {
        Search {
            config,
            history,
            timer,
            stop,
            rng,
            depth_limit: 0,
        }
    }

    /// Iterative deepening: search depth 1, 2, 3, ... and return the best
    /// action from the last completed iteration.
    ///
    /// Terminates on a mating score at the root, the configured depth
    /// ceiling, or the deadline. While pondering, deepening continues until
    /// the stop signal arrives.
    pub fn run(&mut self, board: &Board, recent: &mut RecentMoves) -> Result<Action, EngineError> {
        let mut best: Option<(Score, Action)> = None;
        let mut depth = 1u32;
        loop {
            self.depth_limit = depth;
            let root = Node::root(*board);
            let mut out_of_time = false;

            match self.root_value(&root, recent) {
                Ok((score, action)) => {
                    debug!(depth, %score, %action, "completed iteration");
                    if !self.config.even_depths_only || depth % 2 == 0 || score >= Score::TERMINAL
                    {
                        best = Some((score, action));
                    }
                }
                Err(RootAbort::Interrupt(Interrupt::OutOfTime)) => {
                    if depth > self.config.min_depth_limit && best.is_some() {
                        debug!(
                            depth,
                            elapsed = self.timer.elapsed(),
                            "out of time, keeping the previous depth's action"
                        );
                        out_of_time = true;
                    } else {
                        return Err(EngineError::OutOfTimeBeforeFloor);
                    }
                }
                Err(RootAbort::Interrupt(Interrupt::Stopped)) => return Err(EngineError::Stopped),
                Err(RootAbort::Terminal(terminal)) => {
                    return Err(EngineError::Terminal(terminal));
                }
                Err(RootAbort::NoChildren) => return Err(EngineError::NoAction),
            }

            if !self.stop.is_pondering() {
                let done = out_of_time
                    || best.is_some_and(|(score, _)| score >= Score::TERMINAL)
                    || (self.config.max_depth_limit > 0 && depth >= self.config.max_depth_limit);
                if done {
                    let (_, action) = best.ok_or(EngineError::NoAction)?;
                    recent.record(action);
                    return Ok(action);
                }
            }
            depth += 1;
        }
    }

    // The root ply: like `value`, plus the repetition guard and an early
    // exit once a mating line is confirmed.
    fn root_value(
        &mut self,
        root: &Node,
        recent: &RecentMoves,
    ) -> Result<(Score, Action), RootAbort> {
        let children = self.successors(root).map_err(RootAbort::Terminal)?;
        self.quit_early().map_err(RootAbort::Interrupt)?;

        let mut alpha = -Score::INFINITY;
        let beta = Score::INFINITY;
        let avoid = recent.two_plies_ago();
        let mut best: Option<(Score, usize)> = None;

        for (i, child) in children.iter().enumerate() {
            if children.len() >= 2
                && let Some(avoid) = avoid
                && child.action == Some(avoid)
            {
                debug!(action = %avoid, "skipping the repetition candidate");
                continue;
            }

            let value = -self
                .value(child, -beta, -alpha)
                .map_err(RootAbort::Interrupt)?;
            if best.is_none_or(|(b, _)| value > b) {
                best = Some((value, i));
            }

            if !self.stop.is_pondering() && value >= Score::TERMINAL {
                break;
            }

            if self.config.alpha_beta {
                if value >= beta {
                    if best.map(|(b, _)| b) != Some(value) {
                        self.credit(child);
                    }
                    break;
                }
                if value > alpha {
                    alpha = value;
                }
            }
        }

        let (score, index) = best.ok_or(RootAbort::NoChildren)?;
        let chosen = &children[index];
        self.credit(chosen);
        let action = chosen.action.expect("non-root nodes carry an action");
        Ok((score, action))
    }

    // Negamax with alpha-beta: the returned score is from the perspective
    // of the side to move at `node`.
    fn value(&mut self, node: &Node, mut alpha: Score, beta: Score) -> Result<Score, Interrupt> {
        if self.at_depth_limit(node) {
            return Ok(self.leaf(node));
        }

        let children = match self.successors(node) {
            Ok(children) => children,
            // No legal reply: checkmate and stalemate are both a loss for
            // the side to move.
            Err(_) => return Ok(-Score::TERMINAL),
        };
        self.quit_early()?;
        if children.is_empty() {
            // Every child failed structurally; score the branch as very bad
            // for whoever walked into it.
            return Ok(-Score::ERROR);
        }

        let mut best: Option<Score> = None;
        let mut best_index = 0;

        for (i, child) in children.iter().enumerate() {
            let value = -self.value(child, -beta, -alpha)?;
            if best.is_none_or(|b| value > b) {
                best = Some(value);
                best_index = i;
            }

            if self.config.alpha_beta {
                if value >= beta {
                    if best != Some(value) {
                        self.credit(child);
                    }
                    break;
                }
                if value > alpha {
                    alpha = value;
                }
            }
        }

        self.credit(&children[best_index]);
        Ok(best.expect("children is non-empty"))
    }

    fn successors(&mut self, node: &Node) -> Result<Vec<Node>, Terminal> {
        let mut order = MoveOrder::new(self.history, &mut self.rng, self.config.fixed_order);
        node.successors(&mut order)
    }

    // Deadline and stop checks, suppressed while the depth floor holds.
    fn quit_early(&self) -> Result<(), Interrupt> {
        if self.depth_limit > self.config.min_depth_limit {
            self.timer.check()?;
        }
        self.stop.check()
    }

    // The depth limit, stretched through non-quiescent lines by the
    // quiescence allowance.
    fn at_depth_limit(&self, node: &Node) -> bool {
        (node.depth >= self.depth_limit && node.quiescent())
            || node.depth >= self.depth_limit + self.config.quiescent
    }

    fn leaf(&self, node: &Node) -> Score {
        let root_view = match self.config.heuristic {
            Heuristic::Material => Score::uniform(node.material_delta),
            Heuristic::MaterialMobility => Score::new(node.material_delta, node.moves_delta),
        };
        if node.depth % 2 == 0 { root_view } else { -root_view }
    }

    fn credit(&self, node: &Node) {
        if self.config.history_table
            && let Some(action) = node.action
        {
            self.history.record(&action);
        }
    }
}
