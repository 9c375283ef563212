//! Logger initialisation.

use log::LevelFilter;

/// Map a `-v` count to a level: 0 is `info`, 1 `debug`, 2 or more `trace`.
#[must_use]
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger` as the global logger.
///
/// `RUST_LOG` wins when set; otherwise the level comes from `verbosity`.
/// Calling this again after a logger is installed does nothing.
pub fn init(verbosity: u8) {
    let default = level_for(verbosity).to_string().to_lowercase();
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_micros()
        .try_init();
    if result.is_err() {
        log::trace!("logger already initialised");
    }
}
