// Server loop module
// Accepts connections until shutdown is requested, then releases the listener

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop
///
/// Returns `Ok(())` once `shutdown` is notified. The listener is dropped on
/// return; connections already being served finish in their own tasks.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&state.log, &format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                drop(listener);
                logger::log_server_stopped(&state.log);
                state.log.flush();
                return Ok(());
            }
        }
    }
}
