//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Attachment storage configuration.
    pub storage: StorageSettings,
}

/// Attachment storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: `"s3"` or `"fs"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Bucket name (S3) .
    #[serde(default)]
    pub bucket: String,
    /// Endpoint URL (S3-compatible providers).
    #[serde(default)]
    pub endpoint: String,
    /// Region (S3).
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key id (S3).
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key (S3).
    #[serde(default)]
    pub secret_access_key: String,
    /// Root directory for the local filesystem backend.
    #[serde(default = "default_fs_root")]
    pub fs_root: String,
    /// Public base URL prepended to storage keys when building bill
    /// attachment URLs.
    #[serde(default)]
    pub public_base_url: String,
}

fn default_backend() -> String {
    "fs".to_string()
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_fs_root() -> String {
    "./data/attachments".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SCRAPTALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
