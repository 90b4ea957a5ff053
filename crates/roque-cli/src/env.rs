//! Engine options read from `ROQUE_*` environment variables.

use std::env;

use roque_engine::{Config, Heuristic, Verbosity};

use crate::error::CliError;

fn read(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn read_bool(name: &'static str, default: bool) -> Result<bool, CliError> {
    match read(name).as_deref() {
        None => Ok(default),
        Some("0") => Ok(false),
        Some("1") => Ok(true),
        Some(other) => Err(CliError::BadSetting { name, value: other.to_string() }),
    }
}

fn read_u32(name: &'static str, default: u32) -> Result<u32, CliError> {
    match read(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| CliError::BadSetting { name, value }),
    }
}

fn read_f64(name: &'static str, default: f64) -> Result<f64, CliError> {
    match read(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| CliError::BadSetting { name, value }),
    }
}

/// Assemble a [`Config`] from the environment, falling back to defaults.
///
/// Recognized variables: `ROQUE_VERBOSE` (0/1/2, unset = normal),
/// `ROQUE_RANDOM`, `ROQUE_ALPHA_BETA`, `ROQUE_HISTORY_TABLE`,
/// `ROQUE_PONDERING`, `ROQUE_EVEN_DEPTHS_ONLY` (0/1),
/// `ROQUE_SECONDS_LIMIT`, `ROQUE_QUIESCENT`, `ROQUE_MIN_DEPTH`,
/// `ROQUE_MAX_DEPTH`, `ROQUE_WHICH_AI` (1 = material, 2 = material +
/// mobility), and `ROQUE_SEED`.
pub fn config_from_env() -> Result<Config, CliError> {
    let defaults = Config::default();
    let mut config = Config {
        random: read_bool("ROQUE_RANDOM", defaults.random)?,
        alpha_beta: read_bool("ROQUE_ALPHA_BETA", defaults.alpha_beta)?,
        history_table: read_bool("ROQUE_HISTORY_TABLE", defaults.history_table)?,
        pondering: read_bool("ROQUE_PONDERING", defaults.pondering)?,
        even_depths_only: read_bool("ROQUE_EVEN_DEPTHS_ONLY", defaults.even_depths_only)?,
        seconds_limit: read_f64("ROQUE_SECONDS_LIMIT", defaults.seconds_limit)?,
        quiescent: read_u32("ROQUE_QUIESCENT", defaults.quiescent)?,
        min_depth_limit: read_u32("ROQUE_MIN_DEPTH", defaults.min_depth_limit)?,
        max_depth_limit: read_u32("ROQUE_MAX_DEPTH", defaults.max_depth_limit)?,
        ..defaults
    };

    config.verbosity = match read("ROQUE_VERBOSE").as_deref() {
        None => Verbosity::Normal,
        Some("0") => Verbosity::Silent,
        Some("1") => Verbosity::Verbose,
        Some("2") => Verbosity::VeryVerbose,
        Some(other) => {
            return Err(CliError::BadSetting {
                name: "ROQUE_VERBOSE",
                value: other.to_string(),
            });
        }
    };

    config.heuristic = match read_u32("ROQUE_WHICH_AI", 2)? {
        1 => Heuristic::Material,
        2 => Heuristic::MaterialMobility,
        other => {
            return Err(CliError::BadSetting {
                name: "ROQUE_WHICH_AI",
                value: other.to_string(),
            });
        }
    };

    config.seed = match read("ROQUE_SEED") {
        None => None,
        Some(value) => Some(value.parse().map_err(|_| CliError::BadSetting {
            name: "ROQUE_SEED",
            value,
        })?),
    };

    Ok(config)
}
