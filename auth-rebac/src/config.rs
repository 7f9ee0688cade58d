use crate::error::{AuthzError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `REBAC_MAX_BATCH_SIZE=50`
pub const ENV_PREFIX: &str = "REBAC";

/// Runtime limits applied by the authorization engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Budget for a single store call when the caller gives no deadline
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Largest number of transactions accepted in one check
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_max_batch_size() -> usize {
    100
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: default_store_timeout_ms(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl AuthzConfig {
    /// Load from an optional file, then `REBAC_` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: AuthzConfig = builder
            .add_source(env.prefix_separator("_").try_parsing(true))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| AuthzError::InvalidConfig(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_timeout_ms == 0 {
            return Err(AuthzError::InvalidConfig(
                "store_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_batch_size == 0 {
            return Err(AuthzError::InvalidConfig(
                "max_batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
