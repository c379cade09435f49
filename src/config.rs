use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::session::SessionConfig;

const CONFIG_FILE: &str = "amazon_scraper";
const ENV_PREFIX: &str = "AMAZON_SCRAPER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub accept_language: String,
    pub accept: String,
    pub request_timeout_seconds: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub max_batch_advisory: usize,
    pub output_prefix: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/106.0.0.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8".to_string(),
            request_timeout_seconds: 25,
            delay_min_ms: 2000,
            delay_max_ms: 3000,
            max_batch_advisory: 50,
            output_prefix: "amazon_products".to_string(),
            log_filter: "amazon_scraper=info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then an optional `amazon_scraper.{toml,json,yaml}` in the
    /// working directory, then `AMAZON_SCRAPER_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// `load` with an explicit config file stem (extension is probed).
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::with_name(file_stem).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize::<Config>()
            .context("Invalid configuration")?;

        Ok(config.sanitized())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            delay_min: Duration::from_millis(self.delay_min_ms),
            delay_max: Duration::from_millis(self.delay_max_ms),
            max_batch_advisory: self.max_batch_advisory,
        }
    }

    // An inverted delay window is treated as a fixed pause at the lower bound.
    fn sanitized(mut self) -> Self {
        if self.delay_max_ms < self.delay_min_ms {
            self.delay_max_ms = self.delay_min_ms;
        }
        self
    }
}
