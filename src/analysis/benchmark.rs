// src/analysis/benchmark.rs
use serde::{Deserialize, Serialize};

use super::classification::FundClassification;

/// Benchmark returns in percent per annum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenchmarkReturns {
    pub one_year: Option<f64>,
    pub three_years: Option<f64>,
    pub five_years: Option<f64>,
    pub since_inception: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub name: String,
    pub description: String,
    pub composition: String,
    pub returns: BenchmarkReturns,
    pub risk_level: String,
    pub volatility: String,
}

impl Benchmark {
    pub fn defensive() -> Self {
        Self {
            name: "Defensive Benchmark".to_string(),
            description: "Capital-stable diversified index mix for funds holding under 30% growth assets"
                .to_string(),
            composition: "25% growth / 75% defensive".to_string(),
            returns: BenchmarkReturns {
                one_year: Some(5.2),
                three_years: Some(3.1),
                five_years: Some(3.8),
                since_inception: Some(4.6),
            },
            risk_level: "Low".to_string(),
            volatility: "Low".to_string(),
        }
    }

    pub fn balanced() -> Self {
        Self {
            name: "Balanced Benchmark".to_string(),
            description: "Diversified index mix for funds holding 30% to 70% growth assets"
                .to_string(),
            composition: "50% growth / 50% defensive".to_string(),
            returns: BenchmarkReturns {
                one_year: Some(8.5),
                three_years: Some(5.4),
                five_years: Some(6.1),
                since_inception: Some(6.8),
            },
            risk_level: "Medium".to_string(),
            volatility: "Moderate".to_string(),
        }
    }

    pub fn growth() -> Self {
        Self {
            name: "Growth Benchmark".to_string(),
            description: "Equity-heavy diversified index mix for funds holding over 70% growth assets"
                .to_string(),
            composition: "85% growth / 15% defensive".to_string(),
            returns: BenchmarkReturns {
                one_year: Some(12.1),
                three_years: Some(7.6),
                five_years: Some(8.4),
                since_inception: Some(8.9),
            },
            risk_level: "High".to_string(),
            volatility: "High".to_string(),
        }
    }
}

/// One benchmark per classification tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSet {
    pub defensive: Benchmark,
    pub balanced: Benchmark,
    pub growth: Benchmark,
}

impl BenchmarkSet {
    /// Benchmark for a classification. `Unknown` uses the balanced benchmark.
    pub fn for_classification(&self, classification: FundClassification) -> &Benchmark {
        match classification {
            FundClassification::Defensive => &self.defensive,
            FundClassification::Growth => &self.growth,
            FundClassification::Balanced | FundClassification::Unknown => &self.balanced,
        }
    }
}

impl Default for BenchmarkSet {
    fn default() -> Self {
        Self {
            defensive: Benchmark::defensive(),
            balanced: Benchmark::balanced(),
            growth: Benchmark::growth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_falls_back_to_balanced() {
        let set = BenchmarkSet::default();
        assert_eq!(set.for_classification(FundClassification::Unknown).name, "Balanced Benchmark");
        assert_eq!(set.for_classification(FundClassification::Growth).name, "Growth Benchmark");
        assert_eq!(set.for_classification(FundClassification::Defensive).name, "Defensive Benchmark");
    }

    #[test]
    fn test_balanced_one_year() {
        assert_eq!(Benchmark::balanced().returns.one_year, Some(8.5));
    }
}
