use crate::settings::DrillConfig;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// Terminal gets warnings and errors only, the log file gets everything from the configured level.
pub fn init_logging(config: &DrillConfig) -> Result<(), log::SetLoggerError> {
    let level = config.log_level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level.min(LevelFilter::Warn),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    match File::create(&config.log_file) {
        Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
        Err(e) => eprintln!("log file '{}' is not available: {}", config.log_file, e),
    }
    CombinedLogger::init(loggers)
}
