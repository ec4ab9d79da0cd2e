//! Configuration for building a selector.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error};

/// Configuration for creating a [`crate::WeightedStepSelector`].
///
/// # Examples
///
/// ```
/// use movepool::SelectorConfig;
///
/// let config = SelectorConfig::new()
///     .with_seed(42)
///     .with_unresolved_warning(false);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Warn when a selector is dropped with a draw still pending
    pub warn_on_unresolved: bool,
}

impl SelectorConfig {
    /// Create a configuration with default values:
    /// - Seed: None (non-deterministic)
    /// - Unresolved draw warning: enabled
    pub fn new() -> Self {
        Self {
            seed: None,
            warn_on_unresolved: true,
        }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the warning for unresolved draws on drop.
    pub fn with_unresolved_warning(mut self, enabled: bool) -> Self {
        self.warn_on_unresolved = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::new()
    }
}
