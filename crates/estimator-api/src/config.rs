//! Service configuration

use anyhow::Result;
use serde::Deserialize;

/// Estimator service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Instance name attached to structured logs
    #[serde(default = "default_instance")]
    pub instance: String,

    /// HTTP port for the estimate, health and metrics endpoints
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Clamp out-of-range input fields before estimating
    #[serde(default = "default_clamp_inputs")]
    pub clamp_inputs: bool,
}

fn default_instance() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "resource-estimator".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_clamp_inputs() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            instance: default_instance(),
            api_port: default_api_port(),
            clamp_inputs: default_clamp_inputs(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from `ESTIMATOR_*` environment variables
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("ESTIMATOR").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }
}
