use serde::Deserialize;

use crate::error::CatalogError;

const DEFAULT_BASE_URL: &str = "https://classes.cornell.edu/api/2.0";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Catalog client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    pub fn from_toml(input: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig =
            toml::from_str(input).map_err(|e| CatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.base_url.is_empty() {
            return Err(CatalogError::Config("base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CatalogError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
