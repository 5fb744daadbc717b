//! Runtime settings.
//!
//! Settings come from three layers, highest priority first:
//! 1. Command-line flags / environment variables (see [`crate::cli::Cli`])
//! 2. An optional YAML file passed with `--config`
//! 3. Built-in defaults
//!
//! ```yaml
//! base_url: https://www.backloggd.com
//! user_agent: my-bot/1.0
//! timeout_secs: 15
//! ```

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.backloggd.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for reaching the site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Site root; user and review URLs are built from it.
    pub base_url: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse settings from YAML. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Apply command-line and environment overrides.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(user_agent) = &cli.user_agent {
            self.user_agent = user_agent.clone();
        }
        if let Some(timeout_secs) = cli.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// Build settings from the CLI, reading the YAML file it names, if any.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub async fn load(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let base = match &cli.config {
            Some(path) => {
                let yaml = fs::read_to_string(path).await?;
                let settings = Self::from_yaml(&yaml)?;
                info!(%path, "Loaded settings file");
                settings
            }
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }
}
