//! The turn driver: one FEN and clock in, one action out.

use std::sync::Arc;

use tracing::{debug, info, trace};

use roque_core::{generate, Action, Board};

use crate::config::Config;
use crate::error::EngineError;
use crate::history::HistoryTable;
use crate::ponder::Ponder;
use crate::search::{RecentMoves, Search};
use crate::time::TimeBudget;

/// Orchestrates one turn end to end: stop pondering, refresh the position,
/// restart the clock, pick a move, apply it, and ponder the result.
pub struct TurnDriver {
    config: Config,
    board: Board,
    history: Arc<HistoryTable>,
    timer: TimeBudget,
    ponder: Ponder,
    recent: RecentMoves,
    rng: fastrand::Rng,
}

impl TurnDriver {
    /// Validate the configuration and assemble an idle driver.
    pub fn new(config: Config) -> Result<TurnDriver, EngineError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Ok(TurnDriver {
            config,
            board: Board::starting_position(),
            history: Arc::new(HistoryTable::new()),
            timer: TimeBudget::new(),
            ponder: Ponder::new(),
            recent: RecentMoves::new(),
            rng,
        })
    }

    /// The current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play one turn from the given position and remaining clock.
    ///
    /// The returned action has already been applied to the driver's board,
    /// and the ponder worker (if enabled) is thinking about the reply.
    pub fn take_turn(&mut self, fen: &str, remaining_seconds: f64) -> Result<Action, EngineError> {
        self.ponder.stop();

        self.board = fen.parse()?;
        trace!("position\n{}", self.board.pretty());
        debug!(position = %self.board, remaining_seconds, "taking turn");

        self.timer.restart(remaining_seconds, &mut self.config);

        let mut action = if self.config.random {
            self.random_action()?
        } else {
            self.search_action()?
        };
        let gain = self.board.apply(&mut action)?;

        self.ponder
            .start(&self.board, Arc::clone(&self.history), &self.config);

        info!(
            action = %action,
            gain,
            elapsed = self.timer.elapsed(),
            "chose action"
        );
        Ok(action)
    }

    /// Stop the ponder worker; call before dropping the driver at exit.
    pub fn shutdown(&mut self) {
        self.ponder.stop();
    }

    fn search_action(&mut self) -> Result<Action, EngineError> {
        // Fork the RNG so each turn's stream is reproducible from the seed.
        let rng = fastrand::Rng::with_seed(self.rng.u64(..));
        let mut search = Search::new(
            &self.config,
            &self.history,
            &self.timer,
            self.ponder.handle(),
            rng,
        );
        search.run(&self.board, &mut self.recent)
    }

    fn random_action(&mut self) -> Result<Action, EngineError> {
        let actions = generate(&self.board).map_err(EngineError::Terminal)?;
        Ok(actions[self.rng.usize(..actions.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::TurnDriver;
    use crate::config::Config;
    use crate::error::EngineError;
    use roque_core::{Color, Terminal};

    fn quick_config() -> Config {
        Config {
            seconds_limit: 5.0,
            max_depth_limit: 2,
            seed: Some(7),
            ..Config::default()
        }
    }

    #[test]
    fn takes_a_turn_and_applies_the_move() {
        let mut driver = TurnDriver::new(quick_config()).unwrap();
        let action = driver
            .take_turn("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 300.0)
            .unwrap();
        // The driver's board reflects the applied move.
        assert_eq!(driver.board().side_to_move(), Color::Black);
        assert_eq!(driver.board().piece_at(action.from), None);
        assert!(driver.board().piece_at(action.to).is_some());
    }

    #[test]
    fn random_mode_yields_a_legal_move() {
        let config = Config { random: true, ..quick_config() };
        let mut driver = TurnDriver::new(config).unwrap();
        let action = driver
            .take_turn("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 300.0)
            .unwrap();
        assert!(driver.board().piece_at(action.to).is_some());
    }

    #[test]
    fn terminal_positions_surface_as_errors() {
        let mut driver = TurnDriver::new(quick_config()).unwrap();
        let mated = driver.take_turn("7k/6Q1/5K2/8/8/8/8/8 b - -", 10.0);
        assert!(matches!(
            mated,
            Err(EngineError::Terminal(Terminal::Checkmate))
        ));

        let stalemated = driver.take_turn("k7/2K5/1Q6/8/8/8/8/8 b - -", 10.0);
        assert!(matches!(
            stalemated,
            Err(EngineError::Terminal(Terminal::Stalemate))
        ));
    }

    #[test]
    fn bad_fen_surfaces_as_fen_error() {
        let mut driver = TurnDriver::new(quick_config()).unwrap();
        let result = driver.take_turn("not a fen", 10.0);
        assert!(matches!(result, Err(EngineError::Fen(_))));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = Config { seconds_limit: -2.0, ..Config::default() };
        assert!(matches!(
            TurnDriver::new(config),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn consecutive_turns_reuse_the_driver() {
        let mut driver = TurnDriver::new(quick_config()).unwrap();
        let first = driver
            .take_turn("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 300.0)
            .unwrap();
        // Feed back a plausible continuation as the next turn's FEN.
        let second = driver
            .take_turn("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 290.0)
            .unwrap();
        let _ = (first, second);
    }
}
