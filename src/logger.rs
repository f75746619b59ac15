use log::LevelFilter;

/// Initialize env_logger at the given level.
///
/// `RUST_LOG` still takes precedence, so per-module overrides keep working.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
