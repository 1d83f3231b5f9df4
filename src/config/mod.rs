// Configuration module entry point
// Loads the responder configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ResponderConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `MOCK_INTROSPECT__SERVER__PORT=80`
pub const ENV_PREFIX: &str = "MOCK_INTROSPECT";

impl Config {
    /// Load configuration from the given file path (extension optional; a
    /// missing file is fine), with `MOCK_INTROSPECT__*` environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(config_path, ENV_PREFIX)
    }

    fn load_layered(config_path: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("responder.route", "/oauth2/introspect")?
            .set_default("responder.payload_file", "/app/introspect.json")?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 30)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, at runtime construction
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.performance.header_read_timeout == 0 {
            return Err(config::ConfigError::Message(
                "performance.header_read_timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "mock-introspect-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("this-config-does-not-exist").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.responder.route, "/oauth2/introspect");
        assert!(!cfg.logging.access_log);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_config(
            "overrides",
            r#"
[server]
host = "127.0.0.1"
port = 9090
workers = 2

[responder]
route = "/introspect"
payload_file = "fixtures/active.json"

[logging]
access_log = true
access_log_format = "json"

[performance]
max_connections = 64
"#,
        );

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.responder.route, "/introspect");
        assert_eq!(cfg.responder.payload_file, "fixtures/active.json");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "json");
        assert_eq!(cfg.performance.max_connections, Some(64));
        // Untouched keys keep their defaults
        assert!(cfg.performance.keep_alive);
        assert_eq!(cfg.performance.header_read_timeout, 30);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        // Own prefix so the process-wide environment cannot leak into other tests
        const PREFIX: &str = "MOCK_INTROSPECT_ENV_TEST";
        std::env::set_var("MOCK_INTROSPECT_ENV_TEST__SERVER__PORT", "81");
        std::env::set_var(
            "MOCK_INTROSPECT_ENV_TEST__RESPONDER__PAYLOAD_FILE",
            "/tmp/introspect-env.json",
        );

        let cfg = Config::load_layered("this-config-does-not-exist", PREFIX);
        std::env::remove_var("MOCK_INTROSPECT_ENV_TEST__SERVER__PORT");
        std::env::remove_var("MOCK_INTROSPECT_ENV_TEST__RESPONDER__PAYLOAD_FILE");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.server.port, 81);
        assert_eq!(cfg.responder.payload_file, "/tmp/introspect-env.json");
        assert_eq!(cfg.responder.route, "/oauth2/introspect");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let path = temp_config(
            "zero-workers",
            r#"
[server]
workers = 0
"#,
        );

        let result = Config::load_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("server.workers"), "{err}");
    }

    #[test]
    fn test_zero_header_read_timeout_rejected() {
        let mut cfg = Config::default();
        cfg.performance.header_read_timeout = 0;
        assert!(cfg.validate().is_err());

        cfg.performance.header_read_timeout = 1;
        cfg.server.workers = Some(1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_get_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:0".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
