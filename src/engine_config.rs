use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::text_segmenter::DEFAULT_MAX_CUE_LENGTH;

/// Engine configuration module
/// This module handles the engine configuration including loading,
/// validating and serializing configuration settings.
/// Represents the engine configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Target maximum punctuation-stripped length per cue
    #[serde(default = "default_max_cue_length")]
    pub max_cue_length: usize,
}

fn default_max_cue_length() -> usize {
    DEFAULT_MAX_CUE_LENGTH
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_cue_length: DEFAULT_MAX_CUE_LENGTH,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.max_cue_length == 0 {
            return Err(anyhow!("max_cue_length must be at least 1"));
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).context("Failed to parse engine configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize engine configuration")
    }
}
