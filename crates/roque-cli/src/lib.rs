//! Command-line front-end: `roque <fen> <remaining_seconds>`.
//!
//! The chosen move goes to stdout in `<from><to>[promotion]` form; all
//! diagnostics go to stderr via tracing.

mod args;
mod env;
mod error;
mod session;

pub use args::Invocation;
pub use env::config_from_env;
pub use error::CliError;
pub use session::run_turn;

/// Parse arguments, read options from the environment, and play one turn.
///
/// Returns the rendered move text for stdout.
pub fn run<I>(args: I) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    let invocation = Invocation::from_args(args)?;
    let config = config_from_env()?;
    run_turn(&invocation, config)
}
