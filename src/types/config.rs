use serde::{Deserialize, Serialize};

use crate::managers::input_coordinator::QUIET_PERIOD;
use crate::platform;

/// Client configuration, stored as JSON in the platform config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the server exposing `/api/languages` and `/api/translate`.
    pub api_base_url: String,
    /// Quiet period before an auto-translation fires.
    pub quiet_period_ms: u64,
    pub request_timeout_secs: u64,
    /// SQLite file holding the local storage table. `None` uses the data dir.
    pub storage_path: Option<String>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            quiet_period_ms: QUIET_PERIOD.as_millis() as u64,
            request_timeout_secs: 30,
            storage_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Resolved path of the storage database.
    pub fn resolved_storage_path(&self) -> String {
        match &self.storage_path {
            Some(path) => path.clone(),
            None => platform::get_data_dir()
                .join("translator.db")
                .to_string_lossy()
                .to_string(),
        }
    }
}
