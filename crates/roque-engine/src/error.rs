//! Engine error types and search-unwinding signals.

use roque_core::{ApplyError, FenError, Terminal};

use crate::config::ConfigError;

/// A signal that unwinds an in-progress search.
///
/// Replaces the control-flow role exceptions play in exception-based
/// designs: the recursion returns this as an `Err` and the iterative
/// deepening loop decides what survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// The per-turn deadline fired past the depth floor.
    OutOfTime,
    /// An external stop was requested (ponder shutdown).
    Stopped,
}

/// Errors surfaced by the turn driver and search.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The deadline fired before the depth floor was cleared.
    #[error("ran out of time before finding any action")]
    OutOfTimeBeforeFloor,
    /// The position has no legal action at all.
    #[error("expected at least one legal action, position is {0:?}")]
    Terminal(Terminal),
    /// The search was stopped externally before choosing an action.
    #[error("search stopped before choosing an action")]
    Stopped,
    /// No completed iteration yielded an action to play.
    #[error("no completed iteration produced an action")]
    NoAction,
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The incoming FEN failed to parse.
    #[error(transparent)]
    Fen(#[from] FenError),
    /// Applying the chosen action failed structurally.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}
