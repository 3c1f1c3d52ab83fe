// Application state module
// Per-server values shared by every connection task

use super::types::LoggingConfig;
use crate::fs::PathResolver;

/// Application state
///
/// Each server instance owns its own base directory through `resolver`, so
/// several instances can run side by side.
pub struct AppState {
    pub resolver: PathResolver,
    pub access_log: bool,
    pub access_log_format: String,
}

impl AppState {
    pub fn new(resolver: PathResolver, logging: &LoggingConfig) -> Self {
        Self {
            resolver,
            access_log: logging.access_log,
            access_log_format: logging.access_log_format.clone(),
        }
    }
}
