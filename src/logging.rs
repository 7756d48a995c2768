//! Console logging for the WIMS client.
//!
//! The fetch loop reports every request URL, per-page item counts,
//! non-200 statuses, and final totals. Output goes to the console;
//! a log file can be attached for long backfill runs.
//!
//! Logging works without initialization — messages fall back to plain
//! console output — so library callers see the fetch loop's status
//! reporting even if they never touch this module.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    fn log(&self, level: LogLevel, sub_area: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        console_output(level, sub_area, message);

        if let Some(ref path) = self.log_file {
            let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
            let scope = sub_area.map(|s| format!(" [{}]", s)).unwrap_or_default();
            let entry = format!("{} {}{}: {}", timestamp, level, scope, message);
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

fn console_output(level: LogLevel, sub_area: Option<&str>, message: &str) {
    let scope = sub_area.map(|s| format!(" [{}]", s)).unwrap_or_default();
    match level {
        LogLevel::Error => eprintln!("ERROR{}: {}", scope, message),
        LogLevel::Warning => eprintln!("WARN{}: {}", scope, message),
        LogLevel::Info => match sub_area {
            Some(s) => println!("[{}] {}", s, message),
            None => println!("{}", message),
        },
        LogLevel::Debug => println!("[DEBUG]{} {}", scope, message),
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    let logger = Logger {
        min_level,
        log_file: log_file.map(String::from),
    };
    *LOGGER.lock().unwrap() = Some(logger);
}

fn log(level: LogLevel, sub_area: Option<&str>, message: &str) {
    match LOGGER.lock().unwrap().as_ref() {
        Some(logger) => logger.log(level, sub_area, message),
        // Uninitialized: plain console output, debug suppressed
        None if level > LogLevel::Debug => console_output(level, sub_area, message),
        None => {}
    }
}

/// Log a general informational message.
pub fn info(sub_area: Option<&str>, message: &str) {
    log(LogLevel::Info, sub_area, message);
}

/// Log a warning message.
pub fn warn(sub_area: Option<&str>, message: &str) {
    log(LogLevel::Warning, sub_area, message);
}

/// Log an error message.
pub fn error(sub_area: Option<&str>, message: &str) {
    log(LogLevel::Error, sub_area, message);
}

/// Log a debug message.
pub fn debug(sub_area: Option<&str>, message: &str) {
    log(LogLevel::Debug, sub_area, message);
}
