use std::error::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PLANNER_LOG";

/// Installs the global subscriber, writing to stderr.
///
/// `PLANNER_LOG` takes an `EnvFilter` directive; without it the level is `warn`,
/// or `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
