// src/reports/models.rs
//! Structured data extracted from the two report layouts.
//!
//! Every field that may be missing from a report is an `Option`. Deserialization
//! accepts the alternate key names host applications have used for the same
//! figures (e.g. `startingValue` for `startingMarketValue`) so raw payloads
//! normalize into one schema.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ReportType;
use crate::utils::values::parse_date;

/// Accepts any date string `parse_date` understands; unparseable values become `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

// --- Asset Allocation ---

/// Asset class columns of the allocation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClassName {
    #[serde(rename = "Australian Equities")]
    AustralianEquities,
    #[serde(rename = "Australian Fixed Interest")]
    AustralianFixedInterest,
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "International Equities")]
    InternationalEquities,
    #[serde(rename = "Listed Property")]
    ListedProperty,
    #[serde(rename = "Other")]
    Other,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl AssetClassName {
    /// Column order of the TOTAL row in the allocation report.
    pub const REPORT_COLUMNS: [AssetClassName; 7] = [
        AssetClassName::AustralianEquities,
        AssetClassName::AustralianFixedInterest,
        AssetClassName::Cash,
        AssetClassName::InternationalEquities,
        AssetClassName::ListedProperty,
        AssetClassName::Other,
        AssetClassName::Unknown,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            AssetClassName::AustralianEquities => "Australian Equities",
            AssetClassName::AustralianFixedInterest => "Australian Fixed Interest",
            AssetClassName::Cash => "Cash",
            AssetClassName::InternationalEquities => "International Equities",
            AssetClassName::ListedProperty => "Listed Property",
            AssetClassName::Other => "Other",
            AssetClassName::Unknown => "Unknown",
        }
    }

    /// Case-insensitive lookup by printed label.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::REPORT_COLUMNS
            .iter()
            .copied()
            .find(|name| name.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for AssetClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an asset class figure came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Read from the TOTAL row of an allocation report.
    TotalRow,
    /// Supplied by a host as structured data.
    #[default]
    Imported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClass {
    pub name: AssetClassName,
    #[serde(default, alias = "amount", alias = "marketValue")]
    pub value: Option<f64>,
    #[serde(default, alias = "percentage", alias = "weight")]
    pub percent: Option<f64>,
    #[serde(default)]
    pub source: Provenance,
}

/// An individual holding row listed above the TOTAL row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(alias = "description")]
    pub name: String,
    #[serde(alias = "marketValue")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetAllocationReport {
    #[serde(alias = "date", alias = "asAt", deserialize_with = "lenient_date")]
    pub as_at_date: Option<NaiveDate>,
    #[serde(alias = "totalPortfolioValue", alias = "total")]
    pub total_value: Option<f64>,
    #[serde(alias = "allocations", alias = "assetAllocation")]
    pub asset_classes: Vec<AssetClass>,
    pub holdings: Vec<Holding>,
    pub holdings_count: usize,
}

impl AssetAllocationReport {
    /// Sum of all asset class values, treating missing values as zero.
    pub fn asset_class_total(&self) -> f64 {
        self.asset_classes.iter().filter_map(|c| c.value).sum()
    }

    /// A report with at least one valued asset class and a positive total.
    pub fn is_meaningful(&self) -> bool {
        !self.asset_classes.is_empty() && self.asset_class_total() > 0.0
    }
}

// --- Performance ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportPeriod {
    #[serde(alias = "start", alias = "startDate", deserialize_with = "lenient_date")]
    pub from: Option<NaiveDate>,
    #[serde(alias = "end", alias = "endDate", deserialize_with = "lenient_date")]
    pub to: Option<NaiveDate>,
}

/// A "Since DD/MM/YYYY" TWR column paired with its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinceDateReturn {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    pub label: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Time-weighted returns in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeWeightedReturns {
    #[serde(alias = "1year", alias = "oneYr")]
    pub one_year: Option<f64>,
    #[serde(alias = "3years", alias = "threeYear")]
    pub three_years: Option<f64>,
    #[serde(alias = "5years", alias = "fiveYear")]
    pub five_years: Option<f64>,
    #[serde(alias = "sinceInception")]
    pub since_start: Option<f64>,
    pub since_period_start: Option<f64>,
    pub since_dates: Vec<SinceDateReturn>,
}

impl TimeWeightedReturns {
    pub fn has_any(&self) -> bool {
        self.one_year.is_some()
            || self.three_years.is_some()
            || self.five_years.is_some()
            || self.since_start.is_some()
            || self.since_period_start.is_some()
    }
}

/// Line items of the "Movement in Value" section other than the totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementBreakdown {
    #[serde(alias = "netAdditionWithdrawal", alias = "netAdditions")]
    pub net_additions_withdrawals: Option<f64>,
    pub realised_gains: Option<f64>,
    pub investment_income: Option<f64>,
    pub other: Option<f64>,
}

/// Line items of the "Portfolio Return" section other than the totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnBreakdown {
    pub realised_gains: Option<f64>,
    pub investment_income: Option<f64>,
    pub credits: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceReport {
    pub period: ReportPeriod,
    #[serde(alias = "startingValue", alias = "openingValue")]
    pub starting_market_value: Option<f64>,
    #[serde(alias = "endingValue", alias = "closingValue")]
    pub ending_market_value: Option<f64>,
    #[serde(alias = "changeInValue", alias = "totalMovement")]
    pub movement_in_value: Option<f64>,
    #[serde(alias = "totalBeforeExpenses", alias = "returnBeforeExpenses")]
    pub dollar_return_before_expenses: Option<f64>,
    #[serde(alias = "totalAfterExpenses", alias = "returnAfterExpenses", alias = "dollarReturn")]
    pub dollar_return_after_expenses: Option<f64>,
    #[serde(alias = "expenses")]
    pub investment_expenses: Option<f64>,
    pub movement: MovementBreakdown,
    pub returns: ReturnBreakdown,
    #[serde(alias = "timeWeightedReturns", alias = "returnsTwr")]
    pub twr: TimeWeightedReturns,
}

impl PerformanceReport {
    /// Preferred dollar return figure: after expenses, else before.
    pub fn dollar_return(&self) -> Option<f64> {
        self.dollar_return_after_expenses
            .or(self.dollar_return_before_expenses)
    }

    /// True when at least one dollar figure or TWR was extracted.
    pub fn is_meaningful(&self) -> bool {
        self.starting_market_value.is_some()
            || self.ending_market_value.is_some()
            || self.movement_in_value.is_some()
            || self.dollar_return().is_some()
            || self.twr.has_any()
    }
}

/// Output of one extractor, tagged by report type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reportType", content = "data", rename_all = "snake_case")]
pub enum ReportData {
    AssetAllocation(AssetAllocationReport),
    Performance(PerformanceReport),
}

impl ReportData {
    pub fn report_type(&self) -> ReportType {
        match self {
            ReportData::AssetAllocation(_) => ReportType::AssetAllocation,
            ReportData::Performance(_) => ReportType::Performance,
        }
    }

    /// Normalizes a raw JSON payload for the given report type.
    pub fn from_json(
        report_type: ReportType,
        value: serde_json::Value,
    ) -> Result<Self, crate::utils::error::ReportError> {
        let invalid = |source| crate::utils::error::ReportError::InvalidData {
            report_type,
            source,
        };
        match report_type {
            ReportType::AssetAllocation => serde_json::from_value(value)
                .map(ReportData::AssetAllocation)
                .map_err(invalid),
            ReportType::Performance => serde_json::from_value(value)
                .map(ReportData::Performance)
                .map_err(invalid),
        }
    }
}
