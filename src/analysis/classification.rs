// src/analysis/classification.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::AnalysisConfig;
use super::round_to_tenth;
use crate::reports::AssetClass;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundClassification {
    Defensive,
    Balanced,
    Growth,
    #[default]
    Unknown,
}

impl FundClassification {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FundClassification::Defensive => "defensive",
            FundClassification::Balanced => "balanced",
            FundClassification::Growth => "growth",
            FundClassification::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FundClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub classification: FundClassification,
    pub growth_percent: f64,
    pub defensive_percent: f64,
    pub other_percent: f64,
}

impl Classification {
    /// No usable allocation data. Distinct from any real tier.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.classification != FundClassification::Unknown
    }
}

/// Value-weighted classification of an asset class breakdown.
///
/// Percentages are rounded half-up to one decimal place and the tier
/// thresholds are compared against the rounded growth percentage, so the
/// reported figure and the tier always agree. This departs from comparing
/// the raw share on purpose: a raw 29.96% growth rounds to 30.0 and is
/// balanced, not defensive.
pub fn classify_fund(asset_classes: &[AssetClass], config: &AnalysisConfig) -> Classification {
    let total: f64 = asset_classes.iter().filter_map(|c| c.value).sum();
    if asset_classes.is_empty() || total <= 0.0 {
        tracing::debug!("Classification unknown: {} classes, total {}", asset_classes.len(), total);
        return Classification::unknown();
    }

    let sum_of = |set: &[crate::reports::AssetClassName]| -> f64 {
        asset_classes
            .iter()
            .filter(|c| set.contains(&c.name))
            .filter_map(|c| c.value)
            .sum()
    };

    let growth_percent = round_to_tenth(sum_of(&config.growth_classes) / total * 100.0);
    let defensive_percent = round_to_tenth(sum_of(&config.defensive_classes) / total * 100.0);
    let other_percent = round_to_tenth((100.0 - growth_percent - defensive_percent).max(0.0));

    let thresholds = &config.classification;
    let classification = if growth_percent < thresholds.defensive_below {
        FundClassification::Defensive
    } else if growth_percent > thresholds.growth_above {
        FundClassification::Growth
    } else {
        FundClassification::Balanced
    };

    tracing::debug!(
        "Classified as {} (growth {}%, defensive {}%, other {}%)",
        classification,
        growth_percent,
        defensive_percent,
        other_percent
    );

    Classification {
        classification,
        growth_percent,
        defensive_percent,
        other_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{AssetClassName, Provenance};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn class(name: AssetClassName, value: f64) -> AssetClass {
        AssetClass {
            name,
            value: Some(value),
            percent: None,
            source: Provenance::TotalRow,
        }
    }

    fn growth_split(growth: f64) -> Vec<AssetClass> {
        vec![
            class(AssetClassName::AustralianEquities, growth),
            class(AssetClassName::Cash, 100.0 - growth),
        ]
    }

    fn classify(classes: &[AssetClass]) -> Classification {
        classify_fund(classes, &AnalysisConfig::default())
    }

    #[test]
    fn test_empty_and_zero_total_are_unknown() {
        assert_eq!(classify(&[]), Classification::unknown());
        assert_eq!(classify(&[class(AssetClassName::Cash, 0.0)]), Classification::unknown());
        assert_eq!(
            classify(&[class(AssetClassName::Cash, 10.0), class(AssetClassName::Other, -20.0)]),
            Classification::unknown()
        );
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify(&growth_split(30.0)).classification, FundClassification::Balanced);
        assert_eq!(classify(&growth_split(70.0)).classification, FundClassification::Balanced);
        assert_eq!(classify(&growth_split(29.9)).classification, FundClassification::Defensive);
        assert_eq!(classify(&growth_split(70.1)).classification, FundClassification::Growth);
        // Rounds to 30.0 before the tier is decided
        let rounded_up = classify(&growth_split(29.96));
        assert_abs_diff_eq!(rounded_up.growth_percent, 30.0);
        assert_eq!(rounded_up.classification, FundClassification::Balanced);
        // Rounds to 70.0
        assert_eq!(classify(&growth_split(70.04)).classification, FundClassification::Balanced);
    }

    #[test]
    fn test_value_weighted_percentages() {
        let classes = vec![
            class(AssetClassName::AustralianEquities, 600_000.0),
            class(AssetClassName::AustralianFixedInterest, 400_000.0),
        ];
        let result = classify(&classes);
        assert_eq!(result.classification, FundClassification::Balanced);
        assert_abs_diff_eq!(result.growth_percent, 60.0);
        assert_abs_diff_eq!(result.defensive_percent, 40.0);
        assert_abs_diff_eq!(result.other_percent, 0.0);
    }

    #[test]
    fn test_other_and_unknown_count_as_other() {
        let classes = vec![
            class(AssetClassName::InternationalEquities, 1.0),
            class(AssetClassName::Cash, 1.0),
            class(AssetClassName::Other, 1.0),
        ];
        let result = classify(&classes);
        assert_abs_diff_eq!(result.growth_percent, 33.3);
        assert_abs_diff_eq!(result.defensive_percent, 33.3);
        assert_abs_diff_eq!(result.other_percent, 33.4, epsilon = 1e-9);
    }

    #[test]
    fn test_rounds_half_up() {
        // 2/3 of growth -> 66.666.. -> 66.7
        let classes = vec![
            class(AssetClassName::ListedProperty, 2.0),
            class(AssetClassName::Cash, 1.0),
        ];
        let result = classify(&classes);
        assert_abs_diff_eq!(result.growth_percent, 66.7);
        assert_abs_diff_eq!(result.defensive_percent, 33.3);
    }

    #[test]
    fn test_injected_thresholds() {
        let mut config = AnalysisConfig::default();
        config.classification.growth_above = 50.0;
        let result = classify_fund(&growth_split(60.0), &config);
        assert_eq!(result.classification, FundClassification::Growth);
    }

    proptest! {
        #[test]
        fn prop_percentages_sum_to_hundred(values in proptest::collection::vec(0.0f64..1_000_000.0, 7)) {
            let classes: Vec<AssetClass> = AssetClassName::REPORT_COLUMNS
                .iter()
                .zip(values.iter())
                .map(|(&name, &value)| class(name, value))
                .collect();
            let total: f64 = values.iter().sum();
            let result = classify(&classes);
            if total > 0.0 {
                let sum = result.growth_percent + result.defensive_percent + result.other_percent;
                prop_assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "sum was {}", sum);
                prop_assert!(result.other_percent >= 0.0);
                prop_assert!(result.is_known());
            } else {
                prop_assert_eq!(result, Classification::unknown());
            }
        }
    }
}
