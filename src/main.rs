use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod error;
mod fs;
mod handler;
mod http;
mod logger;
mod server;

use config::{AppState, Config};
use fs::PathResolver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the only argument
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    logger::init(&cfg)?;

    // Captured once; every request is resolved against this directory
    let root = cfg.resolve_root().map_err(|e| {
        format!("Cannot serve root directory '{}': {e}", cfg.server.root)
    })?;

    // Single-threaded runtime: connections are interleaved on one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg, root))
}

async fn async_main(cfg: Config, root: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::bind_listener(addr)?;

    let state = Arc::new(AppState::new(PathResolver::new(&root), &cfg.logging));
    logger::log_server_start(&addr, state.resolver.base(), &cfg);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    let loop_config = server::ServerLoopConfig {
        keep_alive: cfg.server.keep_alive,
    };

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            loop_config,
            async move { signals.wait().await },
        ))
        .await;

    Ok(())
}
