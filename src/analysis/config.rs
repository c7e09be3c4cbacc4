// src/analysis/config.rs
//! Thresholds, class sets and reference data used by the analysis engine.
//! Injected into `FundAnalyzer` so callers can substitute alternate tables.

use serde::{Deserialize, Serialize};

use super::benchmark::BenchmarkSet;
use crate::reports::AssetClassName;

/// Growth-percentage boundaries between classification tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationThresholds {
    /// Growth percentage strictly below this is defensive.
    pub defensive_below: f64,
    /// Growth percentage strictly above this is growth.
    pub growth_above: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            defensive_below: 30.0,
            growth_above: 70.0,
        }
    }
}

/// Lower bounds (inclusive, percentage points) of each comparison status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusThresholds {
    pub strong_outperformance: f64,
    pub slight_outperformance: f64,
    pub inline: f64,
    pub slight_underperformance: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            strong_outperformance: 2.0,
            slight_outperformance: 0.5,
            inline: -0.5,
            slight_underperformance: -2.0,
        }
    }
}

/// Points added when the one-year TWR is at least `min_return`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBand {
    pub min_return: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub base: f64,
    pub difference_weight: f64,
    pub difference_cap: f64,
    /// Evaluated in order; the first matching band applies.
    pub return_bands: Vec<ReturnBand>,
    pub negative_return_points: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: 50.0,
            difference_weight: 5.0,
            difference_cap: 25.0,
            return_bands: vec![
                ReturnBand { min_return: 15.0, points: 15.0 },
                ReturnBand { min_return: 8.0, points: 10.0 },
                ReturnBand { min_return: 4.0, points: 5.0 },
            ],
            negative_return_points: -10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationConfig {
    pub top_holdings: usize,
    pub threshold_percent: f64,
}

impl Default for ConcentrationConfig {
    fn default() -> Self {
        Self {
            top_holdings: 5,
            threshold_percent: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    pub growth_classes: Vec<AssetClassName>,
    pub defensive_classes: Vec<AssetClassName>,
    pub classification: ClassificationThresholds,
    pub status: StatusThresholds,
    pub scoring: ScoringConfig,
    pub concentration: ConcentrationConfig,
    pub benchmarks: BenchmarkSet,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            growth_classes: vec![
                AssetClassName::AustralianEquities,
                AssetClassName::InternationalEquities,
                AssetClassName::ListedProperty,
            ],
            defensive_classes: vec![AssetClassName::AustralianFixedInterest, AssetClassName::Cash],
            classification: ClassificationThresholds::default(),
            status: StatusThresholds::default(),
            scoring: ScoringConfig::default(),
            concentration: ConcentrationConfig::default(),
            benchmarks: BenchmarkSet::default(),
        }
    }
}
