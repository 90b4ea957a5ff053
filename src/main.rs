use anyhow::Result;
use tracing::debug;

fn main() -> Result<()> {
    // Level selection wants the config, so read the environment before
    // installing the subscriber.
    let config = roque_cli::config_from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.verbosity.level())
        .with_writer(std::io::stderr)
        .init();
    debug!("roque starting");

    let invocation = roque_cli::Invocation::from_args(std::env::args().skip(1))?;
    let action = roque_cli::run_turn(&invocation, config)?;
    println!("{action}");
    Ok(())
}
