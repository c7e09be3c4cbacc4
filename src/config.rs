// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::AnalysisConfig;
use crate::extractors::{ExtractionConfig, LabelPolicy};
use crate::utils::error::ConfigError;

/// Environment variable consulted for the label policy when no flag is given.
pub const LABEL_POLICY_ENV: &str = "FUND_LABEL_POLICY";

/// Top-level configuration document. Missing sections keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub extraction: ExtractionConfig,
}

impl AppConfig {
    /// Loads a JSON config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Applies the label policy from the command line, falling back to
    /// `FUND_LABEL_POLICY`. Neither set leaves the configured policy alone.
    pub fn resolve_label_policy(&mut self, flag: Option<&str>) -> Result<(), ConfigError> {
        let env_value = std::env::var(LABEL_POLICY_ENV).ok();
        let source = flag.or(env_value.as_deref());
        if let Some(raw) = source {
            let policy: LabelPolicy = raw.parse()?;
            tracing::debug!("Using label policy {:?}", policy);
            self.extraction.label_policy = policy;
        }
        Ok(())
    }
}
