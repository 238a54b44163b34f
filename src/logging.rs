use env_logger::{Builder, Target};
use log::LevelFilter;

/// Maps the number of `-v` flags to a log level
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize stderr logging; `RUST_LOG` takes precedence over `-v`
pub fn init_logging(verbose: u8) {
    let level = level_for(verbose);
    let _ = Builder::new()
        .target(Target::Stderr)
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();
    log::debug!("logging initialized with level: {level:?}");
}
