// src/fund/builder.rs
use chrono::Utc;

use super::model::{FundModel, FundReports};
use crate::analysis::FundAnalyzer;
use crate::reports::{ReportData, ReportType};
use crate::utils::error::ReportError;

/// Builds and updates fund models. Every operation re-runs the full analysis
/// over the resulting report pair.
#[derive(Debug, Clone, Default)]
pub struct FundModelBuilder {
    analyzer: FundAnalyzer,
}

impl FundModelBuilder {
    pub fn new(analyzer: FundAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &FundAnalyzer {
        &self.analyzer
    }

    /// Builds a model from scratch. A fund id is generated when none is given.
    pub fn create_fund_model(&self, fund_id: Option<String>, reports: FundReports) -> FundModel {
        let fund_id = fund_id.unwrap_or_else(|| generate_fund_id(&reports));
        tracing::info!(
            "Creating fund model {} (allocation: {}, performance: {})",
            fund_id,
            reports.asset_allocation.is_some(),
            reports.performance.is_some()
        );
        self.assemble(fund_id, reports)
    }

    /// Merges one report into an existing model, replacing any report of the
    /// same type. The fund id is preserved.
    pub fn update_fund_model(&self, existing: FundModel, report: ReportData) -> FundModel {
        let (fund_id, mut reports) = existing.into_reports();
        tracing::info!("Updating fund model {} with {} report", fund_id, report.report_type());
        reports.apply(report);
        self.assemble(fund_id, reports)
    }

    /// Like [`update_fund_model`](Self::update_fund_model), taking a raw JSON
    /// payload that is normalized for `report_type` first.
    pub fn update_fund_model_json(
        &self,
        existing: FundModel,
        report_type: ReportType,
        data: serde_json::Value,
    ) -> Result<FundModel, ReportError> {
        let report = ReportData::from_json(report_type, data)?;
        Ok(self.update_fund_model(existing, report))
    }

    /// A model with no reports: unknown classification, partial status.
    pub fn create_empty_fund_model(&self, fund_id: Option<String>) -> FundModel {
        self.create_fund_model(fund_id, FundReports::default())
    }

    fn assemble(&self, fund_id: String, reports: FundReports) -> FundModel {
        let analysis = self
            .analyzer
            .analyze(reports.asset_allocation.as_ref(), reports.performance.as_ref());

        FundModel {
            fund_id,
            last_updated: Utc::now(),
            asset_allocation: reports.asset_allocation,
            performance: reports.performance,
            classification: analysis.classification,
            benchmark: analysis.benchmark,
            benchmark_comparison: analysis.benchmark_comparison,
            performance_score: analysis.performance_score,
            derived_insights: analysis.insights,
            analysis_status: analysis.status,
            analysis_message: analysis.message,
        }
    }
}

/// `fund_<millis>_<hash>`, where the hash covers the serialized reports.
/// Traceable, not collision resistant.
pub fn generate_fund_id(reports: &FundReports) -> String {
    let serialized = serde_json::to_string(reports).unwrap_or_default();
    format!(
        "fund_{}_{:x}",
        Utc::now().timestamp_millis(),
        content_hash(&serialized)
    )
}

/// 32-bit multiplicative string hash (`h = h * 31 + unit`, wrapping) over
/// UTF-16 code units.
pub fn content_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)))
}
