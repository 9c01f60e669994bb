//! Logger setup for the command line tool

use log::LevelFilter;

/// Initialize `env_logger` at INFO, overridable through `RUST_LOG`
pub fn init_logger() {
    init_logger_with_level(LevelFilter::Info);
}

/// Initialize `env_logger` with `level` as the default filter.
/// Lines look like `[timestamp LEVEL module] message`.
pub fn init_logger_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("dacwave"),
                record.args()
            )
        })
        .try_init();
}
