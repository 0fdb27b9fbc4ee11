use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// Honors `RUST_LOG` overrides. Timestamps and targets are dropped so log
/// lines interleave cleanly with the render progress bar.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
