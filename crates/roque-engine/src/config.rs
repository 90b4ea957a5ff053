//! Engine configuration.

use tracing::Level;

/// Diagnostic volume, mapped to a tracing level by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Silent,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// The maximum tracing level this verbosity admits.
    pub fn level(self) -> Level {
        match self {
            Verbosity::Silent => Level::ERROR,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
            Verbosity::VeryVerbose => Level::TRACE,
        }
    }
}

/// Which leaf heuristic the search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Material delta only.
    Material,
    /// Material delta first, mobility delta second.
    MaterialMobility,
}

/// All engine options.
///
/// Stable for the duration of a turn; the ponder worker snapshots a copy
/// with depth and time limits lifted.
#[derive(Debug, Clone)]
pub struct Config {
    /// Diagnostic volume.
    pub verbosity: Verbosity,
    /// Ignore the search and play a uniformly random legal move.
    pub random: bool,
    /// Enable alpha-beta pruning.
    pub alpha_beta: bool,
    /// Enable history-table ordering updates.
    pub history_table: bool,
    /// Search on the opponent's clock.
    pub pondering: bool,
    /// Fixed per-turn budget in seconds; negative selects fractional
    /// allocation by game phase.
    pub seconds_limit: f64,
    /// Extra plies allowed past the depth limit through non-quiescent lines.
    pub quiescent: u32,
    /// Depth at or below which the time check is suppressed.
    pub min_depth_limit: u32,
    /// Hard iterative-deepening ceiling; zero means unlimited.
    pub max_depth_limit: u32,
    /// Leaf heuristic selection.
    pub heuristic: Heuristic,
    /// Accept the root's best move only from even completed depths, unless
    /// a terminal score appears.
    pub even_depths_only: bool,
    /// Keep the generator's lexicographic move order (reproducible tests).
    pub fixed_order: bool,
    /// RNG seed override; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            verbosity: Verbosity::Normal,
            random: false,
            alpha_beta: true,
            history_table: true,
            pondering: false,
            seconds_limit: -1.0,
            quiescent: 2,
            min_depth_limit: 2,
            max_depth_limit: 0,
            heuristic: Heuristic::MaterialMobility,
            even_depths_only: true,
            fixed_order: false,
            seed: None,
        }
    }
}

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The seconds limit is below the `-1` fractional sentinel.
    #[error("seconds limit {0} is below the -1 fractional sentinel")]
    SecondsLimitTooNegative(f64),
    /// Neither a time budget nor a depth ceiling bounds the search.
    #[error("a zero seconds limit requires a max depth limit")]
    UnboundedSearch,
}

impl Config {
    /// Reject configurations that would misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seconds_limit < -1.0 {
            return Err(ConfigError::SecondsLimitTooNegative(self.seconds_limit));
        }
        if self.seconds_limit == 0.0 && self.max_depth_limit == 0 {
            return Err(ConfigError::UnboundedSearch);
        }
        Ok(())
    }
}
