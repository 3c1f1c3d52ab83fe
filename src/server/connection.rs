// Connection handling module
// Serves one accepted TCP connection as an HTTP/1.1 session

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single connection in a task on the current `LocalSet`.
///
/// Requests on the connection are handled one after another; concurrency
/// comes from many connections sharing the thread. No timeout is applied.
pub fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    keep_alive: bool,
) {
    logger::log_connection_accepted(&peer_addr);

    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&state), peer_addr)
        });

        if let Err(err) = http1::Builder::new()
            .keep_alive(keep_alive)
            .serve_connection(io, service)
            .await
        {
            logger::log_connection_error(&err);
        }
    });
}
