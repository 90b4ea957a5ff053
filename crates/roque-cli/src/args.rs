//! Positional argument parsing: `<fen> <remaining_seconds>`.

use crate::error::CliError;

/// A single-turn invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The position to move from.
    pub fen: String,
    /// Seconds left on our clock.
    pub remaining_seconds: f64,
}

impl Invocation {
    /// Parse the two positional arguments (binary name already stripped).
    pub fn from_args<I>(mut args: I) -> Result<Invocation, CliError>
    where
        I: Iterator<Item = String>,
    {
        let fen = args.next().ok_or(CliError::Usage)?;
        let seconds = args.next().ok_or(CliError::Usage)?;
        if args.next().is_some() {
            return Err(CliError::Usage);
        }
        let remaining_seconds = seconds
            .parse::<f64>()
            .map_err(|_| CliError::BadSeconds(seconds.clone()))?;
        if !remaining_seconds.is_finite() || remaining_seconds < 0.0 {
            return Err(CliError::BadSeconds(seconds));
        }
        Ok(Invocation { fen, remaining_seconds })
    }
}

#[cfg(test)]
mod tests {
    use super::Invocation;
    use crate::error::CliError;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_fen_and_seconds() {
        let invocation = Invocation::from_args(args(&[
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "300",
        ]))
        .unwrap();
        assert!(invocation.fen.starts_with("rnbqkbnr"));
        assert_eq!(invocation.remaining_seconds, 300.0);
    }

    #[test]
    fn missing_arguments_are_usage_errors() {
        assert!(matches!(
            Invocation::from_args(args(&[])),
            Err(CliError::Usage)
        ));
        assert!(matches!(
            Invocation::from_args(args(&["fen only"])),
            Err(CliError::Usage)
        ));
        assert!(matches!(
            Invocation::from_args(args(&["fen", "10", "extra"])),
            Err(CliError::Usage)
        ));
    }

    #[test]
    fn bad_seconds_are_rejected() {
        assert!(matches!(
            Invocation::from_args(args(&["fen", "soon"])),
            Err(CliError::BadSeconds(_))
        ));
        assert!(matches!(
            Invocation::from_args(args(&["fen", "-5"])),
            Err(CliError::BadSeconds(_))
        ));
    }
}
