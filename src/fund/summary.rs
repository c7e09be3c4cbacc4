// src/fund/summary.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::model::FundModel;
use crate::analysis::{AnalysisStatus, ComparisonStatus, FundClassification, Importance};

/// Flat, display-oriented projection of a fund model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    pub fund_id: String,
    pub last_updated: DateTime<Utc>,
    pub analysis_status: AnalysisStatus,
    pub analysis_message: String,

    pub classification: FundClassification,
    pub growth_percent: f64,
    pub defensive_percent: f64,
    pub other_percent: f64,
    pub benchmark_name: String,

    pub as_at_date: Option<NaiveDate>,
    pub total_value: Option<f64>,
    pub holdings_count: usize,

    pub period_from: Option<NaiveDate>,
    pub period_to: Option<NaiveDate>,
    pub starting_market_value: Option<f64>,
    pub ending_market_value: Option<f64>,
    pub dollar_return: Option<f64>,
    pub one_year_return: Option<f64>,
    pub three_year_return: Option<f64>,
    pub since_inception_return: Option<f64>,

    pub benchmark_one_year_return: Option<f64>,
    pub one_year_difference: Option<f64>,
    pub one_year_status: Option<ComparisonStatus>,
    pub performance_score: Option<u8>,

    pub insight_count: usize,
    pub key_insights: Vec<String>,
}

pub fn fund_summary(fund: &FundModel) -> FundSummary {
    let allocation = fund.asset_allocation.as_ref();
    let performance = fund.performance.as_ref();
    let one_year = fund
        .benchmark_comparison
        .as_ref()
        .and_then(|c| c.one_year.as_ref());

    FundSummary {
        fund_id: fund.fund_id.clone(),
        last_updated: fund.last_updated,
        analysis_status: fund.analysis_status,
        analysis_message: fund.analysis_message.clone(),

        classification: fund.classification.classification,
        growth_percent: fund.classification.growth_percent,
        defensive_percent: fund.classification.defensive_percent,
        other_percent: fund.classification.other_percent,
        benchmark_name: fund.benchmark.name.clone(),

        as_at_date: allocation.and_then(|a| a.as_at_date),
        total_value: allocation.and_then(|a| a.total_value),
        holdings_count: allocation.map_or(0, |a| a.holdings_count),

        period_from: performance.and_then(|p| p.period.from),
        period_to: performance.and_then(|p| p.period.to),
        starting_market_value: performance.and_then(|p| p.starting_market_value),
        ending_market_value: performance.and_then(|p| p.ending_market_value),
        dollar_return: performance.and_then(|p| p.dollar_return()),
        one_year_return: performance.and_then(|p| p.twr.one_year),
        three_year_return: performance.and_then(|p| p.twr.three_years),
        since_inception_return: performance.and_then(|p| p.twr.since_start),

        benchmark_one_year_return: one_year.map(|c| c.benchmark_return),
        one_year_difference: one_year.map(|c| c.difference),
        one_year_status: one_year.map(|c| c.status),
        performance_score: fund.performance_score,

        insight_count: fund.derived_insights.len(),
        key_insights: fund
            .derived_insights
            .iter()
            .filter(|i| i.importance == Importance::High)
            .map(|i| i.title.clone())
            .collect(),
    }
}
