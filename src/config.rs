//! Configuration loading
//!
//! Resolution priority: environment variable, then TOML config file, then
//! compiled default. The config file path itself comes from the first
//! command-line argument, the `DENTAMAP_CONFIG` variable, or `dentamap.toml`
//! in the working directory when present.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface the HTTP server binds to
    pub bind_address: String,
    pub port: u16,
    /// Externally-facing API base URL, handed to the UI pages
    pub public_api_url: String,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The single email permitted to perform mutating operations
    pub admin_email: String,
    /// Identity provider token-verification endpoint
    pub verify_url: String,
    /// Service-account credentials file for the identity provider
    pub credentials_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Object-storage upload endpoint
    pub upload_url: String,
    pub api_key: String,
    /// Width of the bounded fan-out during bulk image ingestion
    pub ingest_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".into(),
            port: 4000,
            public_api_url: "http://localhost:4000/api".into(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            images: ImageConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dentamap.db"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: String::new(),
            verify_url: String::new(),
            credentials_path: PathBuf::from("service-account.json"),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            upload_url: String::new(),
            api_key: String::new(),
            ingest_concurrency: 4,
        }
    }
}

impl Config {
    /// Load configuration from `cli_path` (when given) or the default
    /// locations, then apply environment overrides.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(cli_path) {
            Some(path) => {
                info!("Loading config from {}", path.display());
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            None => {
                info!("No config file found, using defaults");
                Config::default()
            }
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("DENTAMAP_BIND_ADDRESS") {
            self.bind_address = value;
        }
        if let Ok(value) = std::env::var("DENTAMAP_PORT") {
            self.port = value.parse().context("DENTAMAP_PORT is not a port number")?;
        }
        if let Ok(value) = std::env::var("DENTAMAP_PUBLIC_API_URL") {
            self.public_api_url = value;
        }
        if let Ok(value) = std::env::var("DENTAMAP_DATABASE_PATH") {
            self.database.path = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("DENTAMAP_ADMIN_EMAIL") {
            self.auth.admin_email = value;
        }
        if let Ok(value) = std::env::var("DENTAMAP_VERIFY_URL") {
            self.auth.verify_url = value;
        }
        if let Ok(value) = std::env::var("DENTAMAP_CREDENTIALS_PATH") {
            self.auth.credentials_path = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("DENTAMAP_UPLOAD_URL") {
            self.images.upload_url = value;
        }
        if let Ok(value) = std::env::var("DENTAMAP_UPLOAD_API_KEY") {
            self.images.api_key = value;
        }
        if let Ok(value) = std::env::var("DENTAMAP_INGEST_CONCURRENCY") {
            self.images.ingest_concurrency = value
                .parse()
                .context("DENTAMAP_INGEST_CONCURRENCY is not a number")?;
        }

        Ok(())
    }
}

fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("DENTAMAP_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from("dentamap.toml");
    local.exists().then_some(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.images.ingest_concurrency, 4);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            port = 8080

            [auth]
            admin_email = "admin@example.com"

            [images]
            ingest_concurrency = 2
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.admin_email, "admin@example.com");
        assert_eq!(config.images.ingest_concurrency, 2);
        // untouched sections keep defaults
        assert_eq!(config.bind_address, "127.0.0.1");
    }
}
