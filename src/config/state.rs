// Application state module
// Owns the per-process resources shared by every connection

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::host::HostInfo;
use crate::logger::writer::LogWriter;
use crate::lookup::PublicIpLookup;

/// Application state
///
/// Built once in `main` after the listener is bound and dropped when the
/// server loop returns.
pub struct AppState {
    pub config: Config,
    /// Hostname and resolved local IP of this machine
    pub host: HostInfo,
    /// Port the listener actually bound to
    pub server_port: u16,
    /// Public IP collaborator used by the /network page
    pub lookup: Arc<dyn PublicIpLookup>,
    /// Access and error log output
    pub log: Arc<LogWriter>,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(
        config: Config,
        host: HostInfo,
        server_port: u16,
        lookup: Arc<dyn PublicIpLookup>,
        log: Arc<LogWriter>,
    ) -> Self {
        Self {
            config,
            host,
            server_port,
            lookup,
            log,
            active_connections: AtomicUsize::new(0),
        }
    }

    /// Whether per-request access lines are written
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
