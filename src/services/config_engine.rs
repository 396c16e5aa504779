// Translator Config Engine
// Loads and saves the client configuration as a JSON file at the platform
// config path, then applies environment overrides.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::platform;
use crate::types::config::ClientConfig;
use crate::types::errors::ConfigError;

pub const ENV_API_URL: &str = "TRANSLATOR_API_URL";
pub const ENV_DB_PATH: &str = "TRANSLATOR_DB_PATH";
pub const ENV_LOG: &str = "TRANSLATOR_LOG";

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<ClientConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &ClientConfig;
    fn get_config_path(&self) -> &str;
}

/// Config engine persisting [`ClientConfig`] as JSON on disk.
pub struct ConfigEngine {
    config_path: String,
    config: ClientConfig,
}

impl ConfigEngine {
    /// Creates a new ConfigEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `config.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            config: ClientConfig::default(),
        }
    }

    /// Applies overrides from `lookup` (the process environment in
    /// [`ConfigEngine::apply_env_overrides`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.config.api_base_url = url;
        }
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.is_empty()) {
            self.config.storage_path = Some(path);
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.config.log_filter = filter;
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }
}

/// Rejects values the client cannot run with.
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    let url = &config.api_base_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::invalid(
            "api_base_url",
            format!("must start with http:// or https://, got '{}'", url),
        ));
    }
    if config.quiet_period_ms == 0 {
        return Err(ConfigError::invalid("quiet_period_ms", "must be positive"));
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::invalid("request_timeout_secs", "must be positive"));
    }
    Ok(())
}

impl ConfigEngineTrait for ConfigEngine {
    /// Loads the config file. On first run (no file) the defaults are used and
    /// written out; failing to write them is only logged.
    /// A malformed file is an error, as is a value failing [`validate`].
    /// Environment overrides are applied on top.
    fn load(&mut self) -> Result<ClientConfig, ConfigError> {
        let path = Path::new(&self.config_path);

        if path.exists() {
            let content = fs::read_to_string(path)?;
            self.config = serde_json::from_str(&content)?;
        } else {
            debug!("Config file not found, writing defaults: {}", self.config_path);
            self.config = ClientConfig::default();
            // Written before env overrides so they never end up in the file.
            if let Err(e) = self.save() {
                warn!("Could not write default config to {}: {}", self.config_path, e);
            }
        }

        self.apply_env_overrides();
        validate(&self.config)?;
        Ok(self.config.clone())
    }

    /// Writes the current config, creating parent directories as needed.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn get_config(&self) -> &ClientConfig {
        &self.config
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
