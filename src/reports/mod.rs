// src/reports/mod.rs
pub mod document;
pub mod models;
pub mod registry;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export key report types for convenience
pub use document::{ExtractedDocument, Page};
pub use models::{
    AssetAllocationReport, AssetClass, AssetClassName, Holding, PerformanceReport, Provenance,
    ReportData, ReportPeriod, SinceDateReturn, TimeWeightedReturns,
};
pub use registry::{
    Identification, ParsedReport, ReportDefinition, ReportRegistry, ReportTypeInfo,
};
pub use validation::ReportValidation;

/// The report layouts this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    AssetAllocation,
    Performance,
}

impl ReportType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportType::AssetAllocation => "asset_allocation",
            ReportType::Performance => "performance",
        }
    }

    /// Human readable report name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            ReportType::AssetAllocation => "Asset Allocation Report",
            ReportType::Performance => "Investment Movement and Returns Report",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
