// src/extractors/mod.rs
pub mod asset_allocation;
pub mod lines;
pub mod performance;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::reports::{AssetClassName, ExtractedDocument, ReportData, ReportType};
use crate::utils::error::ConfigError;

// Re-export key extraction types for convenience
pub use asset_allocation::AssetAllocationExtractor;
pub use performance::PerformanceExtractor;

/// One extractor per report layout.
pub trait ReportExtractor: Send + Sync {
    fn report_type(&self) -> ReportType;

    /// Extracts whatever fields can be found. Misses become `None` fields,
    /// never errors.
    fn extract(&self, document: &ExtractedDocument) -> ReportData;
}

/// Which line wins when a label repeats inside one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    FirstMatchWins,
    #[default]
    LastMatchWins,
}

impl FromStr for LabelPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "first_match_wins" => Ok(LabelPolicy::FirstMatchWins),
            "last" | "last_match_wins" => Ok(LabelPolicy::LastMatchWins),
            other => Err(ConfigError::LabelPolicy(other.to_string())),
        }
    }
}

/// Layout assumptions shared by the extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionConfig {
    pub label_policy: LabelPolicy,
    /// Column order of the allocation report's TOTAL row. The i-th dollar
    /// and percentage tokens are assigned to the i-th column.
    pub allocation_columns: Vec<AssetClassName>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            label_policy: LabelPolicy::default(),
            allocation_columns: AssetClassName::REPORT_COLUMNS.to_vec(),
        }
    }
}
