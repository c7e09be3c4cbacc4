// src/analysis/mod.rs
pub mod benchmark;
pub mod classification;
pub mod comparison;
pub mod config;
pub mod insights;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::reports::{AssetAllocationReport, AssetClass, PerformanceReport};

// Re-export key analysis types for convenience
pub use benchmark::{Benchmark, BenchmarkReturns, BenchmarkSet};
pub use classification::{Classification, FundClassification};
pub use comparison::{BenchmarkComparison, ComparisonStatus, HorizonComparison};
pub use config::AnalysisConfig;
pub use insights::{Importance, Insight, InsightContext, InsightType};

pub const COMPLETE_ANALYSIS_MESSAGE: &str = "Analysis complete.";
pub const PARTIAL_ANALYSIS_MESSAGE: &str =
    "Partial analysis. Upload both an Asset Allocation report and a Performance report for a complete analysis.";

/// Rounds half-up to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    #[default]
    Partial,
}

/// Everything derived from an allocation/performance report pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundAnalysis {
    pub classification: Classification,
    pub benchmark: Benchmark,
    pub benchmark_comparison: Option<BenchmarkComparison>,
    pub performance_score: Option<u8>,
    pub insights: Vec<Insight>,
    pub status: AnalysisStatus,
    pub message: String,
}

/// Classification, benchmark comparison, scoring and insights over injected
/// reference data.
#[derive(Debug, Clone, Default)]
pub struct FundAnalyzer {
    config: AnalysisConfig,
}

impl FundAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn classify_fund(&self, asset_classes: &[AssetClass]) -> Classification {
        classification::classify_fund(asset_classes, &self.config)
    }

    pub fn classify_allocation(&self, allocation: Option<&AssetAllocationReport>) -> Classification {
        allocation
            .map(|a| self.classify_fund(&a.asset_classes))
            .unwrap_or_else(Classification::unknown)
    }

    pub fn benchmark_for(&self, classification: FundClassification) -> &Benchmark {
        self.config.benchmarks.for_classification(classification)
    }

    pub fn compare_to_benchmark(
        &self,
        performance: Option<&PerformanceReport>,
        benchmark: &Benchmark,
    ) -> Option<BenchmarkComparison> {
        comparison::compare_to_benchmark(performance, benchmark, &self.config.status)
    }

    pub fn calculate_performance_score(
        &self,
        performance: Option<&PerformanceReport>,
        comparison: Option<&BenchmarkComparison>,
    ) -> Option<u8> {
        scoring::calculate_performance_score(performance, comparison, &self.config.scoring)
    }

    pub fn generate_insights(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        insights::generate_insights(ctx, &self.config.concentration)
    }

    /// Runs the full analysis over whichever reports are present.
    pub fn analyze(
        &self,
        allocation: Option<&AssetAllocationReport>,
        performance: Option<&PerformanceReport>,
    ) -> FundAnalysis {
        let classification = self.classify_allocation(allocation);
        let benchmark = self.benchmark_for(classification.classification).clone();
        let benchmark_comparison = self.compare_to_benchmark(performance, &benchmark);
        let performance_score =
            self.calculate_performance_score(performance, benchmark_comparison.as_ref());
        let insights = self.generate_insights(&InsightContext {
            allocation,
            performance,
            classification: &classification,
            benchmark: &benchmark,
            comparison: benchmark_comparison.as_ref(),
        });

        let complete = allocation.is_some_and(AssetAllocationReport::is_meaningful)
            && performance.is_some_and(PerformanceReport::is_meaningful);
        let (status, message) = if complete {
            (AnalysisStatus::Complete, COMPLETE_ANALYSIS_MESSAGE)
        } else {
            (AnalysisStatus::Partial, PARTIAL_ANALYSIS_MESSAGE)
        };

        tracing::info!(
            "Analysis {:?}: classification {}, score {:?}, {} insights",
            status,
            classification.classification,
            performance_score,
            insights.len()
        );

        FundAnalysis {
            classification,
            benchmark,
            benchmark_comparison,
            performance_score,
            insights,
            status,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{AssetClassName, Provenance, TimeWeightedReturns};

    fn allocation(growth: f64, defensive: f64) -> AssetAllocationReport {
        let asset_classes = vec![
            AssetClass {
                name: AssetClassName::AustralianEquities,
                value: Some(growth),
                percent: None,
                source: Provenance::TotalRow,
            },
            AssetClass {
                name: AssetClassName::Cash,
                value: Some(defensive),
                percent: None,
                source: Provenance::TotalRow,
            },
        ];
        AssetAllocationReport {
            total_value: Some(growth + defensive),
            asset_classes,
            ..Default::default()
        }
    }

    fn performance(one_year: f64) -> PerformanceReport {
        PerformanceReport {
            twr: TimeWeightedReturns {
                one_year: Some(one_year),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(12.25), 12.3);
        assert_eq!(round_to_tenth(12.24), 12.2);
        assert_eq!(round_to_tenth(59.99999), 60.0);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn test_empty_analysis_is_partial_unknown() {
        let analysis = FundAnalyzer::default().analyze(None, None);
        assert_eq!(analysis.status, AnalysisStatus::Partial);
        assert_eq!(analysis.message, PARTIAL_ANALYSIS_MESSAGE);
        assert_eq!(analysis.classification.classification, FundClassification::Unknown);
        assert_eq!(analysis.benchmark.name, "Balanced Benchmark");
        assert!(analysis.benchmark_comparison.is_none());
        assert!(analysis.performance_score.is_none());
        assert_eq!(analysis.insights.len(), 1);
    }

    #[test]
    fn test_complete_analysis() {
        let alloc = allocation(80.0, 20.0);
        let perf = performance(15.0);
        let analysis = FundAnalyzer::default().analyze(Some(&alloc), Some(&perf));
        assert_eq!(analysis.status, AnalysisStatus::Complete);
        assert_eq!(analysis.classification.classification, FundClassification::Growth);
        assert_eq!(analysis.benchmark.name, "Growth Benchmark");
        let one_year = analysis.benchmark_comparison.unwrap().one_year.unwrap();
        assert_eq!(one_year.status, ComparisonStatus::StrongOutperformance);
        // 50 + clamp(2.9 * 5) + 15
        assert_eq!(analysis.performance_score, Some(80));
    }

    #[test]
    fn test_trivial_reports_stay_partial() {
        let empty_alloc = AssetAllocationReport::default();
        let perf = performance(5.0);
        let analysis = FundAnalyzer::default().analyze(Some(&empty_alloc), Some(&perf));
        assert_eq!(analysis.status, AnalysisStatus::Partial);

        let alloc = allocation(50.0, 50.0);
        let empty_perf = PerformanceReport::default();
        let analysis = FundAnalyzer::default().analyze(Some(&alloc), Some(&empty_perf));
        assert_eq!(analysis.status, AnalysisStatus::Partial);
    }
}
