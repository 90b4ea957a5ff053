//! Running one turn through the engine.

use tracing::debug;

use roque_engine::{Config, TurnDriver};

use crate::args::Invocation;
use crate::error::CliError;

/// Play one turn and render the chosen move in the external format.
///
/// The ponder worker is shut down before returning so the process can exit
/// without leaving a thread behind.
pub fn run_turn(invocation: &Invocation, config: Config) -> Result<String, CliError> {
    let mut driver = TurnDriver::new(config)?;
    let result = driver.take_turn(&invocation.fen, invocation.remaining_seconds);
    driver.shutdown();
    let action = result?;
    debug!(action = %action, "turn complete");
    Ok(action.to_string())
}

#[cfg(test)]
mod tests {
    use super::run_turn;
    use crate::args::Invocation;
    use crate::error::CliError;
    use roque_engine::Config;

    fn quick_config() -> Config {
        Config {
            seconds_limit: 5.0,
            max_depth_limit: 2,
            seed: Some(3),
            ..Config::default()
        }
    }

    #[test]
    fn renders_a_move_for_the_starting_position() {
        let invocation = Invocation {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            remaining_seconds: 300.0,
        };
        let rendered = run_turn(&invocation, quick_config()).unwrap();
        // <from><to>, optionally a promotion word.
        assert!(rendered.len() >= 4);
        assert!(rendered.is_char_boundary(4));
    }

    #[test]
    fn renders_a_promotion_with_its_full_name() {
        let invocation = Invocation {
            fen: "4k3/P7/8/8/8/8/8/4K3 w - -".to_string(),
            remaining_seconds: 300.0,
        };
        let rendered = run_turn(&invocation, quick_config()).unwrap();
        // Promoting is worth +8; the search must take it, and render the
        // target spelled out.
        assert_eq!(rendered, "a7a8Queen");
    }

    #[test]
    fn terminal_positions_are_engine_errors() {
        let invocation = Invocation {
            fen: "7k/6Q1/5K2/8/8/8/8/8 b - -".to_string(),
            remaining_seconds: 10.0,
        };
        assert!(matches!(
            run_turn(&invocation, quick_config()),
            Err(CliError::Engine(_))
        ));
    }
}
