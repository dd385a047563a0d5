use std::sync::Arc;

mod config;
mod handler;
mod host;
mod http;
mod logger;
mod lookup;
mod server;

use logger::writer::LogWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port = parse_port_arg(std::env::args().nth(1).as_deref())?;
    let cfg = config::Config::load_from(config::DEFAULT_CONFIG_FILE, port)?;
    let log = Arc::new(logger::init(&cfg)?);

    // Build the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        log.write_info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        log.write_info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, log))
}

async fn async_main(
    cfg: config::Config,
    log: Arc<LogWriter>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr).map_err(|e| {
        logger::log_error(&log, &format!("Failed to bind {addr}: {e}"));
        e
    })?;
    let bound_addr = listener.local_addr()?;

    let host = host::HostInfo::discover().await;
    let lookup = Arc::new(lookup::HttpPublicIpLookup::new(&cfg.lookup)?);

    logger::log_server_start(&log, &bound_addr, &cfg);
    log.write_info(&format!(
        "[HOST] {} ({})\n",
        host.hostname, host.server_ip
    ));

    let state = Arc::new(config::AppState::new(
        cfg,
        host,
        bound_addr.port(),
        lookup,
        Arc::clone(&log),
    ));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals), Arc::clone(&log));

    server::start_server_loop(listener, state, Arc::clone(&signals.shutdown)).await
}

/// Parse the optional positional port argument
fn parse_port_arg(arg: Option<&str>) -> Result<Option<u16>, String> {
    arg.map(|s| {
        s.parse::<u16>()
            .map_err(|e| format!("Invalid port argument '{s}': {e}"))
    })
    .transpose()
}
