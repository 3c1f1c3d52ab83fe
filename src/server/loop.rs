// Server loop module
// Accepts connections until shutdown is requested

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Per-server options for the accept loop
#[derive(Debug, Clone, Copy)]
pub struct ServerLoopConfig {
    pub keep_alive: bool,
}

/// Accept connections on `listener` until `shutdown` resolves.
///
/// Must run inside a `LocalSet`: every connection is a `spawn_local` task.
/// Accept errors are logged and the loop keeps going.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    config: ServerLoopConfig,
    shutdown: impl Future<Output = ()>,
) {
    let mut shutdown = std::pin::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state), config.keep_alive);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger::log_server_stop();
                break;
            }
        }
    }
}
