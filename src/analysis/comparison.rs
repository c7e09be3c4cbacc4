// src/analysis/comparison.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use super::benchmark::Benchmark;
use super::config::StatusThresholds;
use crate::reports::PerformanceReport;

// Absorbs binary floating point error in differences of two-decimal returns
const THRESHOLD_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    StrongOutperformance,
    SlightOutperformance,
    Inline,
    SlightUnderperformance,
    StrongUnderperformance,
}

impl ComparisonStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::StrongOutperformance => "strong_outperformance",
            ComparisonStatus::SlightOutperformance => "slight_outperformance",
            ComparisonStatus::Inline => "inline",
            ComparisonStatus::SlightUnderperformance => "slight_underperformance",
            ComparisonStatus::StrongUnderperformance => "strong_underperformance",
        }
    }

    pub const fn is_strong(&self) -> bool {
        matches!(
            self,
            ComparisonStatus::StrongOutperformance | ComparisonStatus::StrongUnderperformance
        )
    }

    /// Status for a difference in percentage points. Bounds are inclusive up
    /// to float noise, so 12.95 - 8.5 lands on the same side as 4.45.
    pub fn from_difference(difference: f64, thresholds: &StatusThresholds) -> Self {
        let at_least = |bound: f64| difference >= bound - THRESHOLD_EPSILON;
        if at_least(thresholds.strong_outperformance) {
            ComparisonStatus::StrongOutperformance
        } else if at_least(thresholds.slight_outperformance) {
            ComparisonStatus::SlightOutperformance
        } else if at_least(thresholds.inline) {
            ComparisonStatus::Inline
        } else if at_least(thresholds.slight_underperformance) {
            ComparisonStatus::SlightUnderperformance
        } else {
            ComparisonStatus::StrongUnderperformance
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonComparison {
    pub fund_return: f64,
    pub benchmark_return: f64,
    pub difference: f64,
    pub status: ComparisonStatus,
}

impl HorizonComparison {
    /// `None` unless both operands are present. The status is decided on the
    /// unrounded difference.
    pub fn between(
        fund_return: Option<f64>,
        benchmark_return: Option<f64>,
        thresholds: &StatusThresholds,
    ) -> Option<Self> {
        let (fund_return, benchmark_return) = (fund_return?, benchmark_return?);
        let difference = fund_return - benchmark_return;
        Some(Self {
            fund_return,
            benchmark_return,
            difference,
            status: ComparisonStatus::from_difference(difference, thresholds),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub one_year: Option<HorizonComparison>,
    pub three_years: Option<HorizonComparison>,
    pub since_inception: Option<HorizonComparison>,
}

/// Compares the fund's TWRs to a benchmark. `None` without a performance report.
pub fn compare_to_benchmark(
    performance: Option<&PerformanceReport>,
    benchmark: &Benchmark,
    thresholds: &StatusThresholds,
) -> Option<BenchmarkComparison> {
    let performance = performance?;
    let twr = &performance.twr;
    let returns = &benchmark.returns;

    Some(BenchmarkComparison {
        one_year: HorizonComparison::between(twr.one_year, returns.one_year, thresholds),
        three_years: HorizonComparison::between(twr.three_years, returns.three_years, thresholds),
        since_inception: HorizonComparison::between(
            twr.since_start,
            returns.since_inception,
            thresholds,
        ),
    })
}
