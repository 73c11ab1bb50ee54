//! Tool configuration.
//!
//! The configuration file controls two things: which top-level ranges the
//! planner searches, and the bounds applied to suggestion requests before
//! they reach the planner. Every section has defaults, so the tool runs
//! without any configuration file at all.

use std::fs::File;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cidr::{AddressBlock, AddressPool};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pool configuration: {0}")]
    InvalidPool(String),

    #[error("Invalid suggestion limits: {0}")]
    InvalidLimits(String),

    #[error("Request outside configured limits: {0}")]
    RequestOutOfBounds(String),
}

/// Pool section: the ranges searched for free blocks, in precedence order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
    pub ranges: Vec<String>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            ranges: vec![
                "10.0.0.0/8".to_string(),
                "172.16.0.0/12".to_string(),
                "192.168.0.0/16".to_string(),
            ],
        }
    }
}

/// Bounds applied to suggestion requests at the CLI boundary.
///
/// The planner itself accepts any structurally valid request; these limits
/// keep interactive use inside sizes that make operational sense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestLimits {
    /// Coarsest block a request may ask for
    pub min_prefix_len: u8,
    /// Finest block a request may ask for
    pub max_prefix_len: u8,
    /// Largest subnet count a request may ask for
    pub max_subnet_count: u32,
}

impl Default for SuggestLimits {
    fn default() -> Self {
        Self {
            min_prefix_len: 8,
            max_prefix_len: 30,
            max_subnet_count: 256,
        }
    }
}

impl SuggestLimits {
    /// Check a request against the configured bounds.
    pub fn check(&self, prefix_len: u8, count: u32) -> Result<(), ConfigError> {
        if prefix_len < self.min_prefix_len || prefix_len > self.max_prefix_len {
            return Err(ConfigError::RequestOutOfBounds(format!(
                "prefix length /{} is outside the allowed /{}..=/{} range",
                prefix_len, self.min_prefix_len, self.max_prefix_len
            )));
        }
        if count == 0 || count > self.max_subnet_count {
            return Err(ConfigError::RequestOutOfBounds(format!(
                "subnet count {} is outside the allowed 1..={} range",
                count, self.max_subnet_count
            )));
        }
        Ok(())
    }
}

/// Tool configuration, all sections optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub suggest: SuggestLimits,
}

impl Config {
    /// Parse and validate the search pool this configuration describes.
    pub fn build_pool(&self) -> Result<AddressPool, ConfigError> {
        let mut ranges = Vec::with_capacity(self.pool.ranges.len());
        for text in &self.pool.ranges {
            let block: AddressBlock = text
                .parse()
                .map_err(|e| ConfigError::InvalidPool(format!("range '{text}': {e}")))?;
            ranges.push(block);
        }
        AddressPool::new(ranges).map_err(|e| ConfigError::InvalidPool(e.to_string()))
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_pool()?;

        if self.suggest.max_prefix_len > 32 {
            return Err(ConfigError::InvalidLimits(format!(
                "max_prefix_len /{} exceeds /32",
                self.suggest.max_prefix_len
            )));
        }
        if self.suggest.min_prefix_len > self.suggest.max_prefix_len {
            return Err(ConfigError::InvalidLimits(format!(
                "min_prefix_len /{} is finer than max_prefix_len /{}",
                self.suggest.min_prefix_len, self.suggest.max_prefix_len
            )));
        }
        if self.suggest.max_subnet_count == 0 {
            return Err(ConfigError::InvalidLimits(
                "max_subnet_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load and validate configuration from a YAML file, or fall back to the
/// defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> color_eyre::Result<Config> {
    let config = match path {
        Some(config_path) => {
            info!("Loading configuration from: {}", config_path.display());
            let file = File::open(config_path)?;
            serde_yaml::from_reader(file)?
        }
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}
