#[cfg(feature = "cli")]
pub mod cli;
pub mod theme;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_PLANS_PATH: &str = "./plans.json";
pub const DEFAULT_DELAY_MS: u64 = 2000;
const MAX_DELAY_MS: u64 = 60_000;

/// Where to load plans from and how long to wait first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Deployment root the plan path is resolved against.
    pub base_url: String,
    pub plans_path: String,
    pub delay_ms: u64,
    pub timeout_seconds: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            plans_path: DEFAULT_PLANS_PATH.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
            timeout_seconds: None,
        }
    }
}

impl ConfigProvider for LoaderConfig {
    /// Resolved like a browser resolves a relative link, so a base URL
    /// without a trailing slash drops its last segment.
    fn plans_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&self.plans_path)?)
    }

    fn load_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.base_url)?;
        validation::validate_relative_path("source.plans_path", &self.plans_path)?;
        validation::validate_range("loader.delay_ms", self.delay_ms, 0, MAX_DELAY_MS)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}
