use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

use crate::domain::configuration::ConfigurationSet;

const DEFAULT_CONFIG_PATH: &str = "Diagnostics";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// `GOOGLE_*` and `SHEETS_DIAG_*` variables, with the prefix stripped and the
/// name lowercased by `config`.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: Option<String>,
    pub client_email: Option<String>,
    pub client_id: Option<String>,
    pub cert_url: Option<String>,
    pub sheet_name: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub log_file: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("configuration", &self.configuration_set())
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .finish()
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl AppConfig {
    /// Loads from the optional file at `CONFIG_PATH` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path, None)
    }

    /// Same as [`AppConfig::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_from(
        config_path: &str,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("GOOGLE").source(env.clone()))
            .add_source(Environment::with_prefix("SHEETS_DIAG").source(env))
            .build()?
            .try_deserialize()
    }

    pub fn configuration_set(&self) -> ConfigurationSet {
        ConfigurationSet {
            project_id: self.project_id.clone(),
            private_key_id: self.private_key_id.clone(),
            private_key: self.private_key.clone(),
            client_email: self.client_email.clone(),
            client_id: self.client_id.clone(),
            cert_url: self.cert_url.clone(),
            sheet_name: self.sheet_name.clone(),
        }
    }
}
