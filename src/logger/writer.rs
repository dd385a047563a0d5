//! Log writer module
//!
//! Thread-safe log output to files or stdout/stderr. A single writer is
//! created at startup and handed to the server state, so every request
//! writes through the same explicitly owned handle.
//!
//! The access target carries request lines only. Lifecycle, warning and
//! error messages share the server log target and are filtered by level.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

/// Server log verbosity, least verbose first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            // Nothing is logged below info
            "info" | "debug" | "trace" => Ok(Self::Info),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
        })
    }
}

/// Log output target
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
    /// Drop every line
    #[cfg(test)]
    Discard,
}

/// Thread-safe log writer
pub struct LogWriter {
    /// Access log target
    access: LogTarget,
    /// Server log target (errors, warnings, lifecycle)
    error: LogTarget,
    /// Most verbose server log level written
    level: LogLevel,
}

impl LogWriter {
    /// Create a new log writer with optional file paths
    ///
    /// Missing paths fall back to stdout (access) and stderr (error).
    pub fn new(
        access_log_file: Option<&str>,
        error_log_file: Option<&str>,
        level: LogLevel,
    ) -> io::Result<Self> {
        let access = match access_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };

        let error = match error_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            access,
            error,
            level,
        })
    }

    /// Writer that swallows everything, for tests
    #[cfg(test)]
    pub const fn discard() -> Self {
        Self {
            access: LogTarget::Discard,
            error: LogTarget::Discard,
            level: LogLevel::Info,
        }
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        write_to_target(&self.access, message);
    }

    /// Write to error log; never filtered
    pub fn write_error(&self, message: &str) {
        write_to_target(&self.error, message);
    }

    /// Write a warning unless the level is `error`
    pub fn write_warning(&self, message: &str) {
        if self.enabled(LogLevel::Warn) {
            write_to_target(&self.error, message);
        }
    }

    /// Write an informational message when the level is `info`
    pub fn write_info(&self, message: &str) {
        if self.enabled(LogLevel::Info) {
            write_to_target(&self.error, message);
        }
    }

    /// Flush file targets before the writer is released
    pub fn flush(&self) {
        for target in [&self.access, &self.error] {
            if let LogTarget::File(file) = target {
                if let Ok(mut f) = file.lock() {
                    let _ = f.flush();
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Write message to log target
fn write_to_target(target: &LogTarget, message: &str) {
    match target {
        LogTarget::Stdout => {
            println!("{message}");
        }
        LogTarget::Stderr => {
            eprintln!("{message}");
        }
        LogTarget::File(file) => {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{message}");
            }
        }
        #[cfg(test)]
        LogTarget::Discard => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("conninfo-{name}-{}", std::process::id()))
    }

    #[test]
    fn test_file_targets_receive_lines() {
        let dir = temp_log_dir("writer");
        let access = dir.join("logs/access.log");
        let error = dir.join("logs/error.log");

        let writer = LogWriter::new(access.to_str(), error.to_str(), LogLevel::Info).unwrap();
        writer.write_access("GET / from 127.0.0.1");
        writer.write_error("[WARN] lookup failed");
        writer.flush();

        let access_text = std::fs::read_to_string(&access).unwrap();
        let error_text = std::fs::read_to_string(&error).unwrap();
        assert!(access_text.contains("GET / from 127.0.0.1"));
        assert!(!access_text.contains("lookup failed"));
        assert!(error_text.contains("[WARN] lookup failed"));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_append_keeps_previous_lines() {
        let dir = temp_log_dir("append");
        let access = dir.join("access.log");

        {
            let writer = LogWriter::new(access.to_str(), None, LogLevel::Info).unwrap();
            writer.write_access("first");
        }
        {
            let writer = LogWriter::new(access.to_str(), None, LogLevel::Info).unwrap();
            writer.write_access("second");
        }

        let text = std::fs::read_to_string(&access).unwrap();
        assert_eq!(text, "first\nsecond\n");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_info_goes_to_server_log_not_access_log() {
        let dir = temp_log_dir("info-target");
        let access = dir.join("access.log");
        let error = dir.join("error.log");

        let writer = LogWriter::new(access.to_str(), error.to_str(), LogLevel::Info).unwrap();
        writer.write_info("Server stopped.");
        writer.flush();

        assert_eq!(std::fs::read_to_string(&access).unwrap(), "");
        assert_eq!(std::fs::read_to_string(&error).unwrap(), "Server stopped.\n");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_level_filters_server_log() {
        let dir = temp_log_dir("levels");
        let access = dir.join("access.log");
        let warn_log = dir.join("warn.log");
        let error_log = dir.join("error.log");

        let warn = LogWriter::new(access.to_str(), warn_log.to_str(), LogLevel::Warn).unwrap();
        warn.write_info("banner");
        warn.write_warning("[WARN] slow lookup");
        warn.write_error("[ERROR] bind failed");
        warn.write_access("GET / HTTP/1.1");
        warn.flush();

        let error = LogWriter::new(None, error_log.to_str(), LogLevel::Error).unwrap();
        error.write_info("banner");
        error.write_warning("[WARN] slow lookup");
        error.write_error("[ERROR] bind failed");
        error.flush();

        assert_eq!(
            std::fs::read_to_string(&warn_log).unwrap(),
            "[WARN] slow lookup\n[ERROR] bind failed\n"
        );
        assert_eq!(std::fs::read_to_string(&error_log).unwrap(), "[ERROR] bind failed\n");
        assert_eq!(std::fs::read_to_string(&access).unwrap(), "GET / HTTP/1.1\n");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
