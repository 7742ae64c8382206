//! Stderr logger for the `log` facade
//!
//! The level comes from `--log-level`, falling back to the `XLCOMPARE_LOG`
//! environment variable and then to `warn`. Below `debug`, records from other
//! crates are dropped so warnings stay about the comparison itself.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable consulted when no level is given explicitly
pub const LOG_ENV: &str = "XLCOMPARE_LOG";

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (self.level >= LevelFilter::Debug || metadata.target().starts_with("xlcompare"))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Resolve the effective level from an explicit setting or the environment
pub fn resolve_level(explicit: Option<LevelFilter>) -> LevelFilter {
    explicit
        .or_else(|| {
            std::env::var(LOG_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
        })
        .unwrap_or(LevelFilter::Warn)
}

/// Install the stderr logger; fails if a logger is already set
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
