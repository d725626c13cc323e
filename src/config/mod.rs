//! Configuration management
//!
//! This module handles loading and parsing configuration for the contract generator.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults. The result is
//! built once at startup and handed to the components that need it; nothing
//! below `main` reads the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generation service configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Generation service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API credential for the generation service
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the chat completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported documents are written to (must already exist)
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    /// Append a random suffix to export filenames
    #[serde(default)]
    pub unique_filenames: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            unique_filenames: false,
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - APICONTRACT_SERVER_HOST
    /// - APICONTRACT_SERVER_PORT
    /// - APICONTRACT_GENERATION_API_KEY (falls back to OPENAI_API_KEY)
    /// - APICONTRACT_GENERATION_BASE_URL
    /// - APICONTRACT_GENERATION_MODEL
    /// - APICONTRACT_EXPORT_DIR
    /// - APICONTRACT_EXPORT_UNIQUE_FILENAMES
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("APICONTRACT_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("APICONTRACT_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }

        // Generation configuration
        if let Ok(api_key) = std::env::var("APICONTRACT_GENERATION_API_KEY") {
            self.generation.api_key = api_key;
        } else if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.generation.api_key = api_key;
        }
        if let Ok(base_url) = std::env::var("APICONTRACT_GENERATION_BASE_URL") {
            self.generation.base_url = base_url;
        }
        if let Ok(model) = std::env::var("APICONTRACT_GENERATION_MODEL") {
            self.generation.model = model;
        }

        // Export configuration
        if let Ok(dir) = std::env::var("APICONTRACT_EXPORT_DIR") {
            self.export.dir = PathBuf::from(dir);
        }
        if let Ok(unique) = std::env::var("APICONTRACT_EXPORT_UNIQUE_FILENAMES") {
            if let Ok(unique) = unique.parse::<bool>() {
                self.export.unique_filenames = unique;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENV_KEYS: [&str; 8] = [
        "APICONTRACT_SERVER_HOST",
        "APICONTRACT_SERVER_PORT",
        "APICONTRACT_GENERATION_API_KEY",
        "APICONTRACT_GENERATION_BASE_URL",
        "APICONTRACT_GENERATION_MODEL",
        "APICONTRACT_EXPORT_DIR",
        "APICONTRACT_EXPORT_UNIQUE_FILENAMES",
        "OPENAI_API_KEY",
    ];

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.api_key, "");
        assert_eq!(config.generation.base_url, "https://api.openai.com/v1");
        assert_eq!(config.generation.model, "gpt-4");
        assert_eq!(config.export.dir, PathBuf::from("exports"));
        assert!(!config.export.unique_filenames);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.model, "gpt-4");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "generation:\n  model: gpt-4o-mini\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(config.generation.base_url, "https://api.openai.com/v1");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.export.dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"
server:
  host: "127.0.0.1"
  port: 9000
generation:
  api_key: "sk-test"
  base_url: "http://localhost:11434/v1"
  model: "llama3"
export:
  dir: "/tmp/contracts"
  unique_filenames: true
"#).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.generation.api_key, "sk-test");
        assert_eq!(config.generation.base_url, "http://localhost:11434/v1");
        assert_eq!(config.generation.model, "llama3");
        assert_eq!(config.export.dir, PathBuf::from("/tmp/contracts"));
        assert!(config.export.unique_filenames);
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_load_malformed_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  host: [invalid yaml").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GenerationConfig {
            api_key: "sk-secret".to_string(),
            ..GenerationConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_env_override_server_and_export() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\n").unwrap();

        std::env::set_var("APICONTRACT_SERVER_HOST", "192.168.1.1");
        std::env::set_var("APICONTRACT_SERVER_PORT", "4000");
        std::env::set_var("APICONTRACT_EXPORT_DIR", "/var/exports");
        std::env::set_var("APICONTRACT_EXPORT_UNIQUE_FILENAMES", "true");

        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.export.dir, PathBuf::from("/var/exports"));
        assert!(config.export.unique_filenames);

        clear_env();
    }

    #[test]
    fn test_env_openai_key_used_as_credential() {
        let _guard = lock_env();
        clear_env();

        std::env::set_var("OPENAI_API_KEY", "sk-from-openai-var");
        let config = Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();
        assert_eq!(config.generation.api_key, "sk-from-openai-var");

        std::env::set_var("APICONTRACT_GENERATION_API_KEY", "sk-specific");
        let config = Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();
        assert_eq!(config.generation.api_key, "sk-specific");

        clear_env();
    }

    #[test]
    fn test_env_override_generation() {
        let _guard = lock_env();
        clear_env();

        std::env::set_var("APICONTRACT_GENERATION_BASE_URL", "http://127.0.0.1:9999/v1");
        std::env::set_var("APICONTRACT_GENERATION_MODEL", "gpt-4o");

        let config = Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();
        assert_eq!(config.generation.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.generation.model, "gpt-4o");

        clear_env();
    }

    #[test]
    fn test_env_override_invalid_values_ignored() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\nexport:\n  unique_filenames: false\n").unwrap();

        std::env::set_var("APICONTRACT_SERVER_PORT", "not_a_number");
        std::env::set_var("APICONTRACT_EXPORT_UNIQUE_FILENAMES", "sometimes");

        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(!config.export.unique_filenames);

        clear_env();
    }
}

/// Property-based tests for configuration parsing
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn valid_config_strategy() -> impl Strategy<Value = Config> {
        (
            "[a-z0-9.]{1,20}",
            1u16..65535,
            "[a-zA-Z0-9-]{0,30}",
            "https?://[a-z]{3,10}\\.[a-z]{2,4}/v1",
            "[a-z0-9.-]{1,20}",
            "[a-z_/]{1,20}",
            any::<bool>(),
        )
            .prop_map(|(host, port, api_key, base_url, model, dir, unique_filenames)| Config {
                server: ServerConfig { host, port },
                generation: GenerationConfig {
                    api_key,
                    base_url,
                    model,
                },
                export: ExportConfig {
                    dir: PathBuf::from(dir),
                    unique_filenames,
                },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn property_config_roundtrip(config in valid_config_strategy()) {
            let _guard = lock_env();

            let yaml = serde_yaml::to_string(&config).unwrap();
            let mut file = tempfile::NamedTempFile::new().unwrap();
            std::io::Write::write_all(&mut file, yaml.as_bytes()).unwrap();

            let loaded = Config::load(file.path()).unwrap();

            prop_assert_eq!(loaded.server.host, config.server.host);
            prop_assert_eq!(loaded.server.port, config.server.port);
            prop_assert_eq!(loaded.generation.api_key, config.generation.api_key);
            prop_assert_eq!(loaded.generation.base_url, config.generation.base_url);
            prop_assert_eq!(loaded.generation.model, config.generation.model);
            prop_assert_eq!(loaded.export.dir, config.export.dir);
            prop_assert_eq!(loaded.export.unique_filenames, config.export.unique_filenames);
        }

        #[test]
        fn property_missing_file_complete_defaults(suffix in "[a-z]{5,10}") {
            let path = PathBuf::from(format!("nonexistent_{}.yml", suffix));
            let config = Config::load(&path).unwrap();
            prop_assert_eq!(config.server.port, 8080);
            prop_assert_eq!(config.generation.model, "gpt-4");
            prop_assert_eq!(config.export.dir, PathBuf::from("exports"));
        }
    }
}
