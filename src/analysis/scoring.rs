// src/analysis/scoring.rs
//! Informational 0-100 performance score. Not a regulatory metric.

use super::comparison::BenchmarkComparison;
use super::config::ScoringConfig;
use crate::reports::PerformanceReport;

/// Scores a fund from its one-year benchmark difference and one-year TWR.
///
/// Returns `None` when either the performance report or the benchmark
/// comparison is absent.
pub fn calculate_performance_score(
    performance: Option<&PerformanceReport>,
    comparison: Option<&BenchmarkComparison>,
    config: &ScoringConfig,
) -> Option<u8> {
    let (performance, comparison) = (performance?, comparison?);
    let mut score = config.base;

    if let Some(one_year) = &comparison.one_year {
        score += (one_year.difference * config.difference_weight)
            .clamp(-config.difference_cap, config.difference_cap);
    }

    if let Some(one_year_return) = performance.twr.one_year {
        let band = config
            .return_bands
            .iter()
            .find(|band| one_year_return >= band.min_return);
        if let Some(band) = band {
            score += band.points;
        } else if one_year_return < 0.0 {
            score += config.negative_return_points;
        }
    }

    let score = score.clamp(0.0, 100.0).round() as u8;
    tracing::debug!("Performance score: {}", score);
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::comparison::{ComparisonStatus, HorizonComparison};
    use crate::reports::TimeWeightedReturns;

    fn performance(one_year: Option<f64>) -> PerformanceReport {
        PerformanceReport {
            twr: TimeWeightedReturns {
                one_year,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn comparison(difference: Option<f64>) -> BenchmarkComparison {
        BenchmarkComparison {
            one_year: difference.map(|difference| HorizonComparison {
                fund_return: 0.0,
                benchmark_return: 0.0,
                difference,
                status: ComparisonStatus::Inline,
            }),
            ..Default::default()
        }
    }

    fn score(one_year: Option<f64>, difference: Option<f64>) -> Option<u8> {
        calculate_performance_score(
            Some(&performance(one_year)),
            Some(&comparison(difference)),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_absent_inputs() {
        let config = ScoringConfig::default();
        assert_eq!(calculate_performance_score(None, None, &config), None);
        assert_eq!(
            calculate_performance_score(Some(&performance(Some(10.0))), None, &config),
            None
        );
        assert_eq!(
            calculate_performance_score(None, Some(&comparison(Some(1.0))), &config),
            None
        );
    }

    #[test]
    fn test_documented_example() {
        // 50 + clamp(3.0 * 5) + 15
        assert_eq!(score(Some(20.0), Some(3.0)), Some(80));
    }

    #[test]
    fn test_bands_are_exclusive() {
        assert_eq!(score(Some(15.0), None), Some(65));
        assert_eq!(score(Some(8.0), None), Some(60));
        assert_eq!(score(Some(4.0), None), Some(55));
        assert_eq!(score(Some(2.0), None), Some(50));
        assert_eq!(score(Some(-0.1), None), Some(40));
        assert_eq!(score(None, None), Some(50));
    }

    #[test]
    fn test_difference_is_capped() {
        assert_eq!(score(Some(30.0), Some(20.0)), Some(90));
        assert_eq!(score(Some(-20.0), Some(-20.0)), Some(15));
    }

    #[test]
    fn test_final_clamp() {
        let config = ScoringConfig {
            base: 95.0,
            ..Default::default()
        };
        let result = calculate_performance_score(
            Some(&performance(Some(20.0))),
            Some(&comparison(Some(5.0))),
            &config,
        );
        assert_eq!(result, Some(100));
    }
}
