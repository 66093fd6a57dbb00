//! Logging initialization

/// Initialize env_logger.
///
/// The default filter is `info`, or `debug` when `verbose` is set.
/// `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
