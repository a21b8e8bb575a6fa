/// File logging.
///
/// The renderer owns the terminal (raw mode + alternate screen), so log
/// records go to a file only. Failure to open the file is not fatal: the
/// game runs without a logger and says so on stderr.

use std::fs::OpenOptions;

use crate::config::LogConfig;

pub fn init(cfg: &LogConfig) {
    if cfg.level == log::LevelFilter::Off {
        return;
    }
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = match OpenOptions::new().create(true).append(true).open(&cfg.file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", cfg.file.display());
            return;
        }
    };
    if let Err(e) = simplelog::WriteLogger::init(cfg.level, config, file) {
        eprintln!("Warning: logger already initialized: {e}");
    }
}
