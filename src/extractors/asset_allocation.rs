// src/extractors/asset_allocation.rs
//! Asset Allocation report extraction.
//!
//! The TOTAL row is the single source of truth for the asset class
//! breakdown. Its dollar and percentage tokens are assigned to the
//! configured columns by position, so a report whose column order differs
//! from `ExtractionConfig::allocation_columns` will be misread.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{ExtractionConfig, ReportExtractor};
use crate::reports::{
    AssetAllocationReport, AssetClass, AssetClassName, ExtractedDocument, Holding, Provenance,
    ReportData, ReportType,
};
use crate::utils::values::{parse_currency, parse_date, parse_percentage};

// "As at 30 June 2024" is tried before "As at 30/06/2024"
static AS_AT_DATE_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)as\s+at\s+(\d{1,2}\s+[A-Za-z]+\.?,?\s+\d{4})",
        r"(?i)as\s+at\s+(\d{1,2}/\d{1,2}/\d{4})",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

// Any decimal figure, optionally signed, dollar-prefixed, parenthesized or percent-suffixed
static FIGURE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?-?\$?\d[\d,]*\.\d+\)?%?").expect("Failed to compile FIGURE_TOKEN_RE")
});

// Dollar amounts carry exactly two decimals
static DOLLAR_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?-?\$?\d[\d,]*\.\d{2}\)?$").expect("Failed to compile DOLLAR_TOKEN_RE")
});

/// Dollar and percentage tokens of one line, each in left-to-right order.
#[derive(Debug, Default, PartialEq)]
struct RowFigures {
    dollars: Vec<f64>,
    percents: Vec<f64>,
    /// Byte offset of the first figure token, if any.
    first_token_at: Option<usize>,
}

fn row_figures(line: &str) -> RowFigures {
    let mut figures = RowFigures::default();

    for token in FIGURE_TOKEN_RE.find_iter(line) {
        let text = token.as_str();
        if text.ends_with('%') {
            let negative = text.starts_with('(');
            let cleaned = text.trim_matches(|c: char| c == '(' || c == ')');
            if let Some(value) = parse_percentage(cleaned) {
                figures.percents.push(if negative { -value } else { value });
                figures.first_token_at.get_or_insert(token.start());
            }
        } else if DOLLAR_TOKEN_RE.is_match(text) {
            if let Some(value) = parse_currency(text) {
                figures.dollars.push(value);
                figures.first_token_at.get_or_insert(token.start());
            }
        }
    }

    figures
}

pub fn extract_as_at_date(text: &str) -> Option<NaiveDate> {
    AS_AT_DATE_RE
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| parse_date(&caps[1]))
}

fn is_total_row(line: &str) -> bool {
    line.trim().to_lowercase().starts_with("total")
}

pub struct AssetAllocationExtractor {
    config: ExtractionConfig,
}

impl AssetAllocationExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn extract_report(&self, document: &ExtractedDocument) -> AssetAllocationReport {
        let as_at_date = extract_as_at_date(&document.text());
        let lines = document.all_lines();

        let Some(total_idx) = lines.iter().position(|l| is_total_row(l)) else {
            tracing::warn!("No TOTAL row found in asset allocation report");
            return AssetAllocationReport {
                as_at_date,
                ..Default::default()
            };
        };
        tracing::debug!("TOTAL row at line {}: '{}'", total_idx, lines[total_idx].trim());

        let asset_classes = self.asset_classes_from_total_row(lines[total_idx]);
        let total_value = asset_classes
            .iter()
            .filter_map(|c| c.value)
            .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v));
        let holdings = extract_holdings(&lines[..total_idx]);

        tracing::info!(
            "Extracted {} asset classes and {} holdings (total {:?})",
            asset_classes.len(),
            holdings.len(),
            total_value
        );

        AssetAllocationReport {
            as_at_date,
            total_value,
            asset_classes,
            holdings_count: holdings.len(),
            holdings,
        }
    }

    fn asset_classes_from_total_row(&self, line: &str) -> Vec<AssetClass> {
        let figures = row_figures(line);
        if figures.dollars.len() > self.config.allocation_columns.len()
            || figures.percents.len() > self.config.allocation_columns.len()
        {
            tracing::warn!(
                "TOTAL row has {} dollar and {} percent tokens for {} columns; extra tokens ignored",
                figures.dollars.len(),
                figures.percents.len(),
                self.config.allocation_columns.len()
            );
        }

        self.config
            .allocation_columns
            .iter()
            .enumerate()
            .filter_map(|(idx, &name)| {
                let value = figures.dollars.get(idx).copied();
                let percent = figures.percents.get(idx).copied();
                if value.is_none() && percent.is_none() {
                    return None;
                }
                Some(AssetClass {
                    name,
                    value,
                    percent,
                    source: Provenance::TotalRow,
                })
            })
            .collect()
    }
}

/// Holding rows above the TOTAL row: a name followed by at least one dollar
/// figure. Asset class sub-total rows are skipped so they are not counted twice.
fn extract_holdings(lines: &[&str]) -> Vec<Holding> {
    lines
        .iter()
        .filter_map(|line| {
            let figures = row_figures(line);
            let first = figures.first_token_at?;
            if figures.dollars.is_empty() {
                return None;
            }
            let name = line[..first].trim().trim_end_matches(['$', '(']).trim();
            let lower = name.to_lowercase();
            if name.is_empty()
                || lower.starts_with("sub-total")
                || lower.starts_with("subtotal")
                || AssetClassName::from_label(name).is_some()
            {
                return None;
            }
            Some(Holding {
                name: name.to_string(),
                value: figures.dollars.iter().sum(),
            })
        })
        .collect()
}

impl ReportExtractor for AssetAllocationExtractor {
    fn report_type(&self) -> ReportType {
        ReportType::AssetAllocation
    }

    fn extract(&self, document: &ExtractedDocument) -> ReportData {
        ReportData::AssetAllocation(self.extract_report(document))
    }
}
