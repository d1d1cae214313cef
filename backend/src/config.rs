// Configuration module
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main server configuration, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    pub graph: GraphSettings,
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// Optional log file; console-only when absent.
    #[serde(default)]
    pub log_file: Option<String>,
}

/// Where the served graph comes from: the schema description and the seed
/// data document.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphSettings {
    pub schema_path: String,
    pub data_path: String,
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("cannot read configuration from {}", path.as_ref().display()))?;
        toml::from_str(&content)
            .with_context(|| format!("cannot parse configuration from {}", path.as_ref().display()))
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_to_console: true,
            log_file: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4567
}

fn default_workers() -> usize {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [graph]
            schema_path = "demos/schema.json"
            data_path = "demos/data.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 4567);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.graph.schema_path, "demos/schema.json");
    }

    #[test]
    fn overrides_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            workers = 8

            [logging]
            level = "debug"
            format = "json"

            [graph]
            schema_path = "s.json"
            data_path = "d.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.server.workers, 8);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn missing_file_is_a_contextual_error() {
        let err = ServerConfig::from_file("definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }
}
