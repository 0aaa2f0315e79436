// SPDX-License-Identifier: MIT

//! Engine configuration.
//!
//! An explicit struct handed to [`crate::Orchestrator::new`]; there is no
//! global configuration singleton. Hosts can build it in code or load it
//! from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use triage_services::LlmConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Node-transition budget per run. Bounds the reanalyze loop; a run
    /// exceeding this is failed rather than allowed to cycle forever.
    pub max_transitions: u32,
    /// Per-step timeout for external calls (context collection, analysis,
    /// action invocations), in milliseconds. Expiry is a step failure, not
    /// a crash.
    pub step_timeout_ms: u64,
    /// Analysis model settings (used by the LLM adapter).
    pub analysis: LlmConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            max_transitions: 50,
            step_timeout_ms: 30_000,
            analysis: LlmConfig::default(),
        }
    }
}

impl TriageConfig {
    pub fn step_timeout(&self) -> Duration {
        Duration::from_millis(self.step_timeout_ms)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from a TOML file, then fill the analysis API key from the
    /// environment if the file left it blank.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&raw)?;
        config.analysis = config.analysis.with_env_key();
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
