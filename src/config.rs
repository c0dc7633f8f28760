use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact configuration
    pub artifacts: ArtifactConfig,

    /// Helpdesk API configuration
    pub helpdesk: HelpdeskConfig,

    /// Identity directory configuration
    pub directory: DirectoryConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: TRIAGE_)
            .add_source(
                config::Environment::with_prefix("TRIAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Where the trained model and encoder artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory containing the six serialized artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
}

impl ArtifactConfig {
    pub fn nb_classification_path(&self) -> PathBuf {
        self.model_dir.join("nb_classifier_classification.bin")
    }

    pub fn rf_classification_path(&self) -> PathBuf {
        self.model_dir.join("rf_classifier_classification.bin")
    }

    pub fn nb_category_path(&self) -> PathBuf {
        self.model_dir.join("nb_classifier_category.bin")
    }

    pub fn rf_category_path(&self) -> PathBuf {
        self.model_dir.join("rf_classifier_category.bin")
    }

    pub fn classification_encoder_path(&self) -> PathBuf {
        self.model_dir.join("classification_encoder.bin")
    }

    pub fn category_encoder_path(&self) -> PathBuf {
        self.model_dir.join("category_encoder.bin")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpdeskConfig {
    /// Helpdesk API base URL (ticket retrieval)
    pub base_url: String,

    /// OAuth accounts base URL (token refresh)
    pub accounts_url: String,

    /// Organization identifier sent with every ticket request
    pub org_id: String,

    /// OAuth client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// OAuth refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Identity directory base URL
    pub base_url: String,

    /// User search endpoint path
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Bearer API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub json_logs: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("./data/models")
}

fn default_search_path() -> String {
    "/private/user/v1/search".to_string()
}

fn default_log_level() -> String {
    "helpdesk_triage=info,tower_http=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let artifacts = ArtifactConfig {
            model_dir: PathBuf::from("/var/lib/triage"),
        };

        assert_eq!(
            artifacts.nb_classification_path(),
            PathBuf::from("/var/lib/triage/nb_classifier_classification.bin")
        );
        assert_eq!(
            artifacts.category_encoder_path(),
            PathBuf::from("/var/lib/triage/category_encoder.bin")
        );
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.artifacts.model_dir, PathBuf::from("./data/models"));
    }
}
