//! Configuration loading and types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use netlify_client::ClientConfig;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "NETLIFY_DEPLOY_CONFIG";

/// Environment variable holding the access token
pub const TOKEN_ENV: &str = "NETLIFY_AUTH_TOKEN";

const CONFIG_FILE: &str = "netlify-deploy.toml";

/// Top-level configuration for netlify-deploy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ClientConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not a valid config
    pub fn from_toml(content: &str) -> eyre::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit path, the environment, or default paths
    ///
    /// Returns `None` when no config file is found.
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn resolve(explicit: Option<&Path>) -> eyre::Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(&PathBuf::from(path)).map(Some);
        }

        let paths = [
            Some(PathBuf::from(CONFIG_FILE)),
            dirs::config_dir().map(|p| p.join("netlify-deploy").join(CONFIG_FILE)),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                return Self::load(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Client config with the token override applied
    ///
    /// A token passed on the command line wins over `NETLIFY_AUTH_TOKEN`,
    /// which wins over the file.
    #[must_use]
    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        let token = token.or_else(|| std::env::var(TOKEN_ENV).ok());
        match token {
            Some(token) => self.api.clone().with_access_token(token),
            None => self.api.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api, ClientConfig::default());
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [api]
            scheme = "http"
            host = "localhost:8080"
            version = "/api/v1/"
            access_token = "from-file"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.scheme(), "http");
        assert_eq!(config.api.host(), "localhost:8080");
        assert!(config.api.has_token());
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_explicit_token_overrides_file() {
        let config = Config::from_toml("[api]\naccess_token = \"from-file\"").unwrap();
        let client_config = config.client_config(Some("from-flag".to_string()));
        assert_eq!(
            client_config,
            ClientConfig::default().with_access_token("from-flag")
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("[api\nhost = ").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::resolve(Some(Path::new("/nonexistent/netlify-deploy.toml")));
        assert!(result.is_err());
    }
}
