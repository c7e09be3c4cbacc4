// src/analysis/insights.rs
use serde::{Deserialize, Serialize};

use super::benchmark::Benchmark;
use super::classification::Classification;
use super::comparison::BenchmarkComparison;
use super::config::ConcentrationConfig;
use crate::reports::{AssetAllocationReport, PerformanceReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    DataMissing,
    Classification,
    BenchmarkComparison,
    ConcentrationRisk,
    DollarReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub importance: Importance,
}

/// Inputs for insight generation.
pub struct InsightContext<'a> {
    pub allocation: Option<&'a AssetAllocationReport>,
    pub performance: Option<&'a PerformanceReport>,
    pub classification: &'a Classification,
    pub benchmark: &'a Benchmark,
    pub comparison: Option<&'a BenchmarkComparison>,
}

/// Builds insights in fixed priority order. Insights whose trigger does not
/// hold are omitted.
pub fn generate_insights(ctx: &InsightContext<'_>, concentration: &ConcentrationConfig) -> Vec<Insight> {
    let mut insights = Vec::new();

    if ctx.allocation.is_none() {
        insights.push(Insight {
            insight_type: InsightType::DataMissing,
            title: "Asset allocation missing".to_string(),
            description: "Upload an Asset Allocation report to classify the fund's risk profile."
                .to_string(),
            importance: Importance::High,
        });
    }

    if ctx.classification.is_known() {
        let c = ctx.classification;
        insights.push(Insight {
            insight_type: InsightType::Classification,
            title: format!("{} fund", capitalize(c.classification.as_str())),
            description: format!(
                "{:.1}% growth assets, {:.1}% defensive assets and {:.1}% other. Compared against the {}.",
                c.growth_percent, c.defensive_percent, c.other_percent, ctx.benchmark.name
            ),
            importance: Importance::Medium,
        });
    }

    if let Some(one_year) = ctx.comparison.and_then(|c| c.one_year.as_ref()) {
        let direction = if one_year.difference >= 0.0 { "ahead of" } else { "behind" };
        insights.push(Insight {
            insight_type: InsightType::BenchmarkComparison,
            title: "One year return vs benchmark".to_string(),
            description: format!(
                "One year return of {:.2}% is {:.2} percentage points {} the {} ({:.2}%).",
                one_year.fund_return,
                one_year.difference.abs(),
                direction,
                ctx.benchmark.name,
                one_year.benchmark_return
            ),
            importance: if one_year.status.is_strong() {
                Importance::High
            } else {
                Importance::Medium
            },
        });
    }

    if let Some(insight) = ctx
        .allocation
        .and_then(|allocation| concentration_insight(allocation, concentration))
    {
        insights.push(insight);
    }

    if let Some(performance) = ctx.performance {
        let figure = performance
            .dollar_return_after_expenses
            .map(|v| (v, "after expenses"))
            .or_else(|| performance.dollar_return_before_expenses.map(|v| (v, "before expenses")));
        if let Some((value, basis)) = figure {
            insights.push(Insight {
                insight_type: InsightType::DollarReturn,
                title: format!("Dollar return {}", basis),
                description: format!("The fund returned {} {} over the period.", format_dollars(value), basis),
                importance: if value < 0.0 {
                    Importance::High
                } else {
                    Importance::Medium
                },
            });
        }
    }

    insights
}

/// Share of total value held in the largest holdings, in percent.
pub fn top_holdings_share(allocation: &AssetAllocationReport, top: usize) -> Option<f64> {
    if allocation.holdings.is_empty() {
        return None;
    }
    let holdings_total: f64 = allocation.holdings.iter().map(|h| h.value).sum();
    let total = allocation
        .total_value
        .filter(|v| *v > 0.0)
        .unwrap_or(holdings_total);
    if total <= 0.0 {
        return None;
    }

    let mut values: Vec<f64> = allocation.holdings.iter().map(|h| h.value).collect();
    values.sort_by(|a, b| b.total_cmp(a));
    let top_sum: f64 = values.iter().take(top).sum();
    Some(top_sum / total * 100.0)
}

fn concentration_insight(allocation: &AssetAllocationReport, config: &ConcentrationConfig) -> Option<Insight> {
    let share = top_holdings_share(allocation, config.top_holdings)?;
    if share <= config.threshold_percent {
        return None;
    }
    Some(Insight {
        insight_type: InsightType::ConcentrationRisk,
        title: "Concentrated holdings".to_string(),
        description: format!(
            "The top {} holdings make up {:.1}% of the portfolio (threshold {:.0}%).",
            config.top_holdings, share, config.threshold_percent
        ),
        importance: Importance::Medium,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "$1,234.56" / "-$1,234.56"
pub fn format_dollars(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
