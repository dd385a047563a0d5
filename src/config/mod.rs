// Configuration module entry point
// Loads layered configuration and holds per-process shared state

mod state;
mod types;

use std::net::SocketAddr;

use crate::logger::writer::LogLevel;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LookupConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "conninfo";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources are layered as defaults, optional file, `CONNINFO_*`
    /// environment variables, then the command line port.
    pub fn load_from(
        config_path: &str,
        port_override: Option<u16>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CONNINFO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("lookup.url", "https://api.ipify.org")?
            .set_default("lookup.timeout_secs", 5)?;

        if let Some(port) = port_override {
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, at runtime construction
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        self.logging
            .level
            .parse::<LogLevel>()
            .map_err(config::ConfigError::Message)?;
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = &self.server.host;
        let port = self.server.port;
        // IPv6 literals need brackets before a port can be appended
        let addr = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        addr.parse().map_err(|e| format!("Invalid address: {e}"))
    }
}
