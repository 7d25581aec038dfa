//! Command-line arguments shared by the server binaries.

use std::path::PathBuf;

use clap::Args;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, ServiceConfig};

#[derive(Debug, Clone, Default, Args)]
pub struct ServerArgs {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Override `model.path`.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override `model.load_delay_ms`.
    #[arg(long)]
    pub load_delay_ms: Option<u64>,
}

impl ServerArgs {
    /// Load the config file (if any), apply overrides, validate the result.
    pub fn resolve(&self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if let Some(delay) = self.load_delay_ms {
            config.model.load_delay_ms = delay;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
