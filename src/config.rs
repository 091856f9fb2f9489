//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export STORAGE_BACKEND="file"
//! export STORAGE_FILE="data/urls.json"
//! export LISTEN="0.0.0.0:3000"
//! ```
//!
//! ## Optional Variables
//!
//! - `STORAGE_BACKEND` - `memory` or `file` (default: `memory`)
//! - `STORAGE_FILE` - Snapshot path for the file backend (default: `data/urls.json`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public prefix of short links (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where URL records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; records vanish on restart.
    Memory,
    /// JSON snapshot file rewritten atomically on every mutation.
    File,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => anyhow::bail!("STORAGE_BACKEND must be 'memory' or 'file', got '{other}'"),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    /// Snapshot location, only read when `storage_backend` is `File`.
    pub storage_file: PathBuf,
    pub listen_addr: String,
    /// Public prefix used to build `short_url` values in API responses.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORAGE_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self> {
        let storage_backend = env::var("STORAGE_BACKEND")
            .map(|v| v.parse::<StorageBackend>())
            .unwrap_or(Ok(StorageBackend::Memory))?;

        let storage_file = env::var("STORAGE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/urls.json"));

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            storage_backend,
            storage_file,
            listen_addr,
            base_url,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `storage_file` is empty while the file backend is selected
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.storage_backend == StorageBackend::File
            && self.storage_file.as_os_str().is_empty()
        {
            anyhow::bail!("STORAGE_FILE must be set when STORAGE_BACKEND is 'file'");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);

        match self.storage_backend {
            StorageBackend::Memory => tracing::info!("  Storage: memory"),
            StorageBackend::File => {
                tracing::info!("  Storage: file ({})", self.storage_file.display())
            }
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "STORAGE_BACKEND",
        "STORAGE_FILE",
        "LISTEN",
        "BASE_URL",
        "RUST_LOG",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially via #[serial]
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            storage_backend: StorageBackend::Memory,
            storage_file: PathBuf::from("data/urls.json"),
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!(
            "memory".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert_eq!(
            " FILE ".parse::<StorageBackend>().unwrap(),
            StorageBackend::File
        );
        assert!("postgres".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();
        config.base_url = "s.example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://s.example.com".to_string();
        config.storage_backend = StorageBackend::File;
        config.storage_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.storage_file, PathBuf::from("data/urls.json"));
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_file_backend_from_env() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial]
        unsafe {
            env::set_var("STORAGE_BACKEND", "file");
            env::set_var("STORAGE_FILE", "/var/lib/snaplink/urls.json");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.storage_backend, StorageBackend::File);
        assert_eq!(
            config.storage_file,
            PathBuf::from("/var/lib/snaplink/urls.json")
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_backend_is_rejected() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial]
        unsafe {
            env::set_var("STORAGE_BACKEND", "redis");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
