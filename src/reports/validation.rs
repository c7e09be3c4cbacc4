// src/reports/validation.rs
//! Post-extraction checks. Extraction never fails on a missed label; the
//! misses surface here as warnings instead.

use serde::{Deserialize, Serialize};

use super::models::{AssetAllocationReport, PerformanceReport};

/// Tolerance in dollars for arithmetic cross-checks between extracted figures.
const DOLLAR_TOLERANCE: f64 = 1.0;
/// Tolerance in percentage points for the asset class percentage total.
const PERCENT_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ReportValidation {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

pub fn validate_asset_allocation_report(report: &AssetAllocationReport) -> ReportValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if report.asset_classes.is_empty() {
        errors.push("No asset classes extracted (TOTAL row missing or empty)".to_string());
    }
    if report.total_value.is_none() {
        errors.push("Total portfolio value could not be determined".to_string());
    }
    if report.as_at_date.is_none() {
        warnings.push("Report date ('as at') not found".to_string());
    }

    if let Some(total) = report.total_value {
        let class_total = report.asset_class_total();
        if (class_total - total).abs() > DOLLAR_TOLERANCE {
            warnings.push(format!(
                "Asset class values sum to {:.2} but total value is {:.2}",
                class_total, total
            ));
        }
    }

    let percents: Vec<f64> = report.asset_classes.iter().filter_map(|c| c.percent).collect();
    if !percents.is_empty() {
        let percent_total: f64 = percents.iter().sum();
        if (percent_total - 100.0).abs() > PERCENT_TOLERANCE {
            warnings.push(format!(
                "Asset class percentages sum to {:.2}%, expected 100%",
                percent_total
            ));
        }
    }

    for class in &report.asset_classes {
        if class.value.is_none() {
            warnings.push(format!("No dollar value extracted for {}", class.name));
        }
    }

    if report.holdings_count != report.holdings.len() {
        warnings.push(format!(
            "Holdings count {} does not match {} listed holdings",
            report.holdings_count,
            report.holdings.len()
        ));
    }

    ReportValidation::from_parts(errors, warnings)
}

pub fn validate_performance_report(report: &PerformanceReport) -> ReportValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !report.is_meaningful() {
        errors.push("No performance figures extracted".to_string());
    }

    if report.period.from.is_none() || report.period.to.is_none() {
        warnings.push("Reporting period not found".to_string());
    }
    if report.starting_market_value.is_none() {
        warnings.push("Starting market value not found".to_string());
    }
    if report.ending_market_value.is_none() {
        warnings.push("Ending market value not found".to_string());
    }
    if report.twr.one_year.is_none() {
        warnings.push("One year time-weighted return not found".to_string());
    }
    if report.dollar_return().is_none() {
        warnings.push("Dollar return not found".to_string());
    }

    if let (Some(start), Some(movement), Some(end)) = (
        report.starting_market_value,
        report.movement_in_value,
        report.ending_market_value,
    ) {
        let expected = start + movement;
        if (expected - end).abs() > DOLLAR_TOLERANCE {
            warnings.push(format!(
                "Ending market value {:.2} differs from starting value plus movement ({:.2})",
                end, expected
            ));
        }
    }

    if let (Some(before), Some(expenses), Some(after)) = (
        report.dollar_return_before_expenses,
        report.investment_expenses,
        report.dollar_return_after_expenses,
    ) {
        // Expenses are printed either signed or as a positive deduction
        let matches_signed = (before + expenses - after).abs() <= DOLLAR_TOLERANCE;
        let matches_unsigned = (before - expenses.abs() - after).abs() <= DOLLAR_TOLERANCE;
        if !matches_signed && !matches_unsigned {
            warnings.push(format!(
                "Return after expenses {:.2} does not reconcile with {:.2} before expenses and {:.2} expenses",
                after, before, expenses
            ));
        }
    }

    ReportValidation::from_parts(errors, warnings)
}
