// src/fund/model.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{
    AnalysisStatus, Benchmark, BenchmarkComparison, Classification, Insight,
};
use crate::reports::{AssetAllocationReport, PerformanceReport, ReportData, ReportType};

/// The report pair a fund model is derived from. Raw payloads normalize
/// through the report models' serde aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundReports {
    #[serde(alias = "allocation")]
    pub asset_allocation: Option<AssetAllocationReport>,
    #[serde(alias = "performanceReport")]
    pub performance: Option<PerformanceReport>,
}

impl FundReports {
    /// Replaces the report of the same type wholesale.
    pub fn apply(&mut self, report: ReportData) {
        match report {
            ReportData::AssetAllocation(allocation) => self.asset_allocation = Some(allocation),
            ReportData::Performance(performance) => self.performance = Some(performance),
        }
    }

    pub fn has(&self, report_type: ReportType) -> bool {
        match report_type {
            ReportType::AssetAllocation => self.asset_allocation.is_some(),
            ReportType::Performance => self.performance.is_some(),
        }
    }
}

/// Aggregate root for one fund. Every derived field is recomputed from the
/// current report pair whenever a report changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundModel {
    pub fund_id: String,
    pub last_updated: DateTime<Utc>,
    pub asset_allocation: Option<AssetAllocationReport>,
    pub performance: Option<PerformanceReport>,
    pub classification: Classification,
    pub benchmark: Benchmark,
    pub benchmark_comparison: Option<BenchmarkComparison>,
    pub performance_score: Option<u8>,
    pub derived_insights: Vec<Insight>,
    pub analysis_status: AnalysisStatus,
    pub analysis_message: String,
}

impl FundModel {
    /// Splits the model back into its source reports.
    pub fn into_reports(self) -> (String, FundReports) {
        (
            self.fund_id,
            FundReports {
                asset_allocation: self.asset_allocation,
                performance: self.performance,
            },
        )
    }

    pub fn has_asset_allocation(&self) -> bool {
        self.asset_allocation.is_some()
    }

    pub fn has_performance(&self) -> bool {
        self.performance.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.analysis_status == AnalysisStatus::Complete
    }
}
