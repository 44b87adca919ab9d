//! Configuration models loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the JSON API server.
pub struct ApiServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the server-rendered front end.
pub struct WebServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the API server, e.g. `http://127.0.0.1:8081`.
    pub api_url: String,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
}

fn default_api_timeout_secs() -> u64 {
    10
}

/// Loads `section` of `config/default.yaml`, overlaid by `config/{APP_ENV}.yaml`
/// and `APP_`-prefixed environment variables (`APP_API__PORT=9000`).
pub fn load_settings<T: DeserializeOwned>(section: &str) -> Result<T, ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.get::<T>(section)
}
