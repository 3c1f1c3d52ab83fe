// Configuration module entry point
// Loads layered configuration and resolves the served root directory

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig};

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "dirserve";

/// Environment variable prefix, e.g. `DIRSERVE_SERVER__PORT=9000`
const ENV_PREFIX: &str = "DIRSERVE";

impl Config {
    /// Load configuration from the default file name
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given file path (extension optional).
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("server.keep_alive", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Canonical path of the served directory.
    ///
    /// Fails when the directory does not exist or is not a directory.
    pub fn resolve_root(&self) -> std::io::Result<PathBuf> {
        let root = std::fs::canonicalize(&self.server.root)?;
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Root is not a directory: {}", root.display()),
            ));
        }
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that read or write `DIRSERVE_*` variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_without_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cfg = Config::load_from("does-not-exist/dirserve-test").unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.root, ".");
        assert!(cfg.server.keep_alive);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\nroot = \"/srv\"\n\n[logging]\naccess_log_format = \"json\"\n",
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.root, "/srv");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.access_log_format, "json");
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.toml");
        std::fs::write(&path, "[server]\nport = 9090\nkeep_alive = true\n").unwrap();

        std::env::set_var("DIRSERVE_SERVER__PORT", "9001");
        std::env::set_var("DIRSERVE_SERVER__KEEP_ALIVE", "false");
        let from_file = Config::load_from(path.to_str().unwrap());
        let without_file = Config::load_from("does-not-exist/dirserve-test");
        std::env::remove_var("DIRSERVE_SERVER__PORT");
        std::env::remove_var("DIRSERVE_SERVER__KEEP_ALIVE");

        let cfg = from_file.unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert!(!cfg.server.keep_alive);

        let cfg = without_file.unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert!(!cfg.server.keep_alive);
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );

        let mut bad = Config::default();
        bad.server.host = "not a host".to_string();
        assert!(bad.get_socket_addr().is_err());
    }

    #[test]
    fn test_resolve_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.server.root = dir.path().to_string_lossy().into_owned();
        assert_eq!(
            cfg.resolve_root().unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );

        cfg.server.root = dir.path().join("missing").to_string_lossy().into_owned();
        assert!(cfg.resolve_root().is_err());

        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        cfg.server.root = file.to_string_lossy().into_owned();
        assert!(cfg.resolve_root().is_err());
    }
}
