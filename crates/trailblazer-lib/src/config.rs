//! Search configuration.
//!
//! Configuration can be loaded from a JSON file ([`SearchConfig::from_path`])
//! or from environment variables ([`SearchConfig::from_env`]). Every field has
//! a default, so partial files are accepted.
//!
//! # Environment Variables
//!
//! - `TRAILBLAZER_ALGORITHM`: default algorithm (`bfs`, `dijkstra`, `a-star`, `alternative`)
//! - `TRAILBLAZER_MIN_DIFFERENCE`: minimum share of new nodes an alternative
//!   route must contain, between `0.0` and `1.0`

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::routing::RouteAlgorithm;

const ENV_ALGORITHM: &str = "TRAILBLAZER_ALGORITHM";
const ENV_MIN_DIFFERENCE: &str = "TRAILBLAZER_MIN_DIFFERENCE";

/// Tuning for the alternative route search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlternativeConfig {
    /// Minimum fraction of an alternative's nodes that must be absent from
    /// the primary route. `0.0` accepts any alternative.
    pub min_difference: f64,
}

impl AlternativeConfig {
    /// Conventional threshold for a "sufficiently different" alternative.
    pub const SUFFICIENT_DIFFERENCE: f64 = 0.2;

    /// Configuration requiring [`Self::SUFFICIENT_DIFFERENCE`].
    pub fn sufficiently_different() -> Self {
        Self {
            min_difference: Self::SUFFICIENT_DIFFERENCE,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_difference) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "min_difference must be between 0 and 1, got {}",
                    self.min_difference
                ),
            });
        }
        Ok(())
    }
}

/// Top-level search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Algorithm used when a caller does not pick one.
    pub default_algorithm: RouteAlgorithm,
    pub alternative: AlternativeConfig,
}

impl SearchConfig {
    /// Load configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded search configuration");
        Ok(config)
    }

    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ALGORITHM) {
            config.default_algorithm = value.parse()?;
        }

        if let Some(value) = lookup(ENV_MIN_DIFFERENCE) {
            config.alternative.min_difference =
                value.trim().parse().map_err(|_| Error::InvalidConfig {
                    message: format!("{ENV_MIN_DIFFERENCE} is not a number: {value}"),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.alternative.validate()
    }
}
