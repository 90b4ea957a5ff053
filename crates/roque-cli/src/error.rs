//! Front-end error types.

use roque_engine::EngineError;

/// Errors surfaced by the command-line front-end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The positional arguments are missing or malformed.
    #[error("usage: roque <fen> <remaining_seconds>")]
    Usage,
    /// The remaining-seconds argument did not parse as a number.
    #[error("invalid remaining seconds: {0:?}")]
    BadSeconds(String),
    /// An environment option did not parse.
    #[error("invalid {name} setting: {value:?}")]
    BadSetting {
        /// The environment variable name.
        name: &'static str,
        /// The unparseable value.
        value: String,
    },
    /// The engine failed to produce a move.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
