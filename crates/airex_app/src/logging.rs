//! Logging initialization for airex_app.
//!
//! Writes logs to `./airex.log` in the current working directory and/or the
//! terminal, selected through the `AIREX_LOG` environment variable.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./airex.log";

/// Where the demo writes its log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    File,
    /// Colored output; warnings and errors go to stderr, the rest to stdout.
    Terminal,
    Both,
}

impl LogDestination {
    /// Reads `AIREX_LOG` (`file`, `terminal`, `both`); terminal otherwise.
    pub fn from_env() -> Self {
        match std::env::var("AIREX_LOG").as_deref().map(str::trim) {
            Ok("file") => LogDestination::File,
            Ok("both") => LogDestination::Both,
            _ => LogDestination::Terminal,
        }
    }
}

/// Installs the global logger. Debug builds log at debug level.
///
/// If the log file cannot be created, `File` logs nowhere and `Both` falls
/// back to the terminal alone.
pub fn initialize(destination: LogDestination) {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("airex: cannot create {LOG_FILE}: {err}"),
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}
