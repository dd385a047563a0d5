//! Logger module
//!
//! Provides logging utilities for the diagnostic server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging, filtered by `logging.level`
//! - File-based logging support
//!
//! Every function writes through a caller-supplied [`LogWriter`]; there is
//! no process-global logger.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use writer::{LogLevel, LogWriter};

/// Open the log targets named in configuration
pub fn init(config: &Config) -> std::io::Result<LogWriter> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    LogWriter::new(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        level,
    )
}

pub fn log_server_start(log: &LogWriter, addr: &SocketAddr, config: &Config) {
    let port = addr.port();
    log.write_info("╔══════════════════════════════════════════╗");
    log.write_info("║    Connection Info Server Running!       ║");
    log.write_info("╚══════════════════════════════════════════╝");
    log.write_info(&format!("Listening on: http://{addr}"));
    log.write_info(&format!("  Local:   http://localhost:{port}"));
    log.write_info(&format!("  Local:   http://127.0.0.1:{port}"));
    log.write_info(&format!("  Network: http://<your-ip>:{port}"));
    log.write_info(&format!("Log level: {}", log.level()));
    if let Some(workers) = config.server.workers {
        log.write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log.write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log.write_info(&format!("Error log: {path}"));
    }
    log.write_info(&format!(
        "Public IP lookup: {} (timeout {}s)",
        config.lookup.url, config.lookup.timeout_secs
    ));
    log.write_info("Press Ctrl+C to stop the server\n");
}

pub fn log_server_stopped(log: &LogWriter) {
    log.write_info("\nServer stopped.");
}

pub fn log_connection_error(log: &LogWriter, err: &impl std::fmt::Debug) {
    log.write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(log: &LogWriter, message: &str) {
    log.write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(log: &LogWriter, message: &str) {
    log.write_warning(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(log: &LogWriter, entry: &AccessLogEntry, format: &str) {
    log.write_access(&entry.format(format));
}
