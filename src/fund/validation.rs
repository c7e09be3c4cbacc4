// src/fund/validation.rs
use serde::{Deserialize, Serialize};

use super::model::FundModel;
use crate::reports::validation::{validate_asset_allocation_report, validate_performance_report};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub has_asset_allocation: bool,
    pub has_performance: bool,
    pub is_complete: bool,
}

/// Checks a fund model for internal consistency. Problems inside the reports
/// themselves are reported as warnings prefixed with the report name.
pub fn validate_fund_model(fund: &FundModel) -> FundValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if fund.fund_id.trim().is_empty() {
        errors.push("Fund id is empty".to_string());
    }
    if let Some(score) = fund.performance_score.filter(|s| *s > 100) {
        errors.push(format!("Performance score {} is outside 0-100", score));
    }
    if fund.is_complete() && !(fund.has_asset_allocation() && fund.has_performance()) {
        errors.push("Analysis is marked complete but a report is missing".to_string());
    }
    if fund.performance.is_none() && fund.benchmark_comparison.is_some() {
        errors.push("Benchmark comparison present without a performance report".to_string());
    }

    match &fund.asset_allocation {
        Some(allocation) => {
            let report = validate_asset_allocation_report(allocation);
            warnings.extend(
                report
                    .errors
                    .into_iter()
                    .chain(report.warnings)
                    .map(|w| format!("Asset allocation: {}", w)),
            );
            if !fund.classification.is_known() {
                warnings.push("Asset allocation present but the fund could not be classified".to_string());
            }
        }
        None => warnings.push("No asset allocation report".to_string()),
    }

    match &fund.performance {
        Some(performance) => {
            let report = validate_performance_report(performance);
            warnings.extend(
                report
                    .errors
                    .into_iter()
                    .chain(report.warnings)
                    .map(|w| format!("Performance: {}", w)),
            );
        }
        None => warnings.push("No performance report".to_string()),
    }

    FundValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
        has_asset_allocation: fund.has_asset_allocation(),
        has_performance: fund.has_performance(),
        is_complete: fund.is_complete(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisStatus;
    use crate::fund::FundModelBuilder;
    use crate::reports::{PerformanceReport, TimeWeightedReturns};

    #[test]
    fn test_empty_fund_is_valid_but_incomplete() {
        let fund = FundModelBuilder::default().create_empty_fund_model(Some("fund_1".to_string()));
        let validation = validate_fund_model(&fund);
        assert!(validation.valid);
        assert!(!validation.has_asset_allocation);
        assert!(!validation.has_performance);
        assert!(!validation.is_complete);
        assert_eq!(validation.warnings.len(), 2);
    }

    #[test]
    fn test_inconsistent_model_is_invalid() {
        let mut fund = FundModelBuilder::default().create_empty_fund_model(Some(" ".to_string()));
        fund.analysis_status = AnalysisStatus::Complete;
        fund.performance_score = Some(120);
        let validation = validate_fund_model(&fund);
        assert!(!validation.valid);
        assert_eq!(validation.errors.len(), 3);
    }

    #[test]
    fn test_report_problems_become_prefixed_warnings() {
        let builder = FundModelBuilder::default();
        let fund = builder.create_empty_fund_model(Some("fund_1".to_string()));
        let fund = builder.update_fund_model(
            fund,
            crate::reports::ReportData::Performance(PerformanceReport {
                twr: TimeWeightedReturns {
                    one_year: Some(5.0),
                    ..Default::default()
                },
                ..Default::default()
            }),
        );
        let validation = validate_fund_model(&fund);
        assert!(validation.valid);
        assert!(validation.has_performance);
        assert!(validation.warnings.iter().any(|w| w.starts_with("Performance: ")));
    }
}
