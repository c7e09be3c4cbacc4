// src/extractors/performance.rs
//! Investment Movement and Returns report extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lines::{find_section, scan_labeled_values, LabelRule};
use super::{ExtractionConfig, ReportExtractor};
use crate::reports::models::{MovementBreakdown, ReturnBreakdown};
use crate::reports::{
    ExtractedDocument, PerformanceReport, ReportData, ReportPeriod, ReportType,
    SinceDateReturn, TimeWeightedReturns,
};
use crate::utils::values::{parse_date, parse_percentage};

// Month-name form is tried before the slash form
static PERIOD_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)for\s+the\s+period\s+from\s+(\d{1,2}\s+[A-Za-z]+\.?,?\s+\d{4})\s+to\s+(\d{1,2}\s+[A-Za-z]+\.?,?\s+\d{4})",
        r"(?i)for\s+the\s+period\s+from\s+(\d{1,2}/\d{1,2}/\d{4})\s+to\s+(\d{1,2}/\d{1,2}/\d{4})",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static TWR_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-?\d+\.\d+%").expect("Failed to compile TWR_VALUE_RE")
});

static SINCE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)since\s+(\d{1,2}/\d{1,2}/\d{4})").expect("Failed to compile SINCE_DATE_RE")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MovementField {
    StartingMarketValue,
    EndingMarketValue,
    MovementInValue,
    NetAdditionsWithdrawals,
    RealisedGains,
    InvestmentIncome,
    Other,
}

// Rule order matters: a line is assigned to the first rule it matches.
const MOVEMENT_RULES: [LabelRule<MovementField>; 7] = [
    LabelRule::new(MovementField::StartingMarketValue, &["starting market value"]),
    LabelRule::new(MovementField::EndingMarketValue, &["ending market value"]),
    LabelRule::new(MovementField::MovementInValue, &["movement in value"]),
    LabelRule::new(MovementField::NetAdditionsWithdrawals, &["net addition", "withdrawal"]),
    LabelRule::new(MovementField::RealisedGains, &["realised gains", "realized gains"]),
    LabelRule::new(MovementField::InvestmentIncome, &["investment income"]),
    LabelRule::new(MovementField::Other, &["other"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ReturnField {
    TotalBeforeExpenses,
    TotalAfterExpenses,
    InvestmentExpenses,
    Credits,
    RealisedGains,
    InvestmentIncome,
}

const RETURN_RULES: [LabelRule<ReturnField>; 6] = [
    LabelRule::new(ReturnField::TotalBeforeExpenses, &["before expenses"]),
    LabelRule::new(ReturnField::TotalAfterExpenses, &["after expenses"]),
    LabelRule::new(ReturnField::InvestmentExpenses, &["expenses"]),
    LabelRule::new(ReturnField::Credits, &["credits"]).excluding(&["excluding"]),
    LabelRule::new(ReturnField::RealisedGains, &["realised gains", "realized gains"]),
    LabelRule::new(ReturnField::InvestmentIncome, &["investment income"]),
];

pub fn extract_period(text: &str) -> ReportPeriod {
    let Some(caps) = PERIOD_RE.iter().find_map(|re| re.captures(text)) else {
        tracing::warn!("Reporting period not found");
        return ReportPeriod::default();
    };
    ReportPeriod {
        from: parse_date(&caps[1]),
        to: parse_date(&caps[2]),
    }
}

/// Extracts the TWR row. Tokens after the "TWR" label are read left to
/// right; a lone `-` occupies a position without a value.
pub fn extract_twr(lines: &[&str]) -> TimeWeightedReturns {
    let mut header: Option<&str> = None;
    let mut row: Option<String> = None;

    for line in lines {
        let lower = line.to_lowercase();
        if lower.contains("investment return before expenses") && lower.contains("twr") {
            row = Some(lower);
            break;
        }
        if lower.contains("1 year") || lower.contains("3 year") {
            header = Some(*line);
        }
    }

    let Some(row) = row else {
        tracing::warn!("TWR row not found");
        return TimeWeightedReturns::default();
    };

    let after_label = row
        .find("twr")
        .map(|idx| &row[idx + "twr".len()..])
        .unwrap_or(row.as_str());

    let mut tokens: Vec<Option<f64>> = Vec::new();
    for word in after_label.split_whitespace() {
        let word = word.trim_matches(|c: char| c == '(' || c == ')');
        if word == "-" {
            tokens.push(None);
            continue;
        }
        tokens.extend(
            TWR_VALUE_RE
                .find_iter(word)
                .map(|m| parse_percentage(m.as_str())),
        );
    }
    tracing::debug!("TWR tokens: {:?}", tokens);

    let token = |idx: usize| tokens.get(idx).copied().flatten();

    let since_dates = header
        .map(|h| {
            SINCE_DATE_RE
                .captures_iter(h)
                .enumerate()
                .map(|(offset, caps)| SinceDateReturn {
                    date: parse_date(&caps[1]),
                    label: caps[0].trim().to_string(),
                    value: token(2 + offset),
                })
                .collect()
        })
        .unwrap_or_default();

    TimeWeightedReturns {
        one_year: token(0),
        three_years: token(1),
        five_years: None,
        since_start: token(2),
        since_period_start: token(3),
        since_dates,
    }
}

pub struct PerformanceExtractor {
    config: ExtractionConfig,
}

impl PerformanceExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn extract_report(&self, document: &ExtractedDocument) -> PerformanceReport {
        let period = extract_period(&document.text());
        let lines = document.all_lines();
        let policy = self.config.label_policy;

        let movement = find_section(
            &lines,
            |l| l.contains("movement in value") && !l.contains("portfolio"),
            |l| l.contains("portfolio value versus") || l.contains("portfolio return"),
        )
        .map(|section| scan_labeled_values(section, &MOVEMENT_RULES, policy))
        .unwrap_or_else(|| {
            tracing::warn!("Movement in Value section not found");
            Default::default()
        });

        let returns = find_section(
            &lines,
            |l| l.contains("portfolio return") && !l.contains("investment return"),
            |l| {
                l.contains("return over time")
                    || l.contains("1 year")
                    || l.contains("investment return before expenses")
            },
        )
        .map(|section| scan_labeled_values(section, &RETURN_RULES, policy))
        .unwrap_or_else(|| {
            tracing::warn!("Portfolio Return section not found");
            Default::default()
        });

        let twr = extract_twr(&lines);

        let report = PerformanceReport {
            period,
            starting_market_value: movement.get(&MovementField::StartingMarketValue).copied(),
            ending_market_value: movement.get(&MovementField::EndingMarketValue).copied(),
            movement_in_value: movement.get(&MovementField::MovementInValue).copied(),
            dollar_return_before_expenses: returns.get(&ReturnField::TotalBeforeExpenses).copied(),
            dollar_return_after_expenses: returns.get(&ReturnField::TotalAfterExpenses).copied(),
            investment_expenses: returns.get(&ReturnField::InvestmentExpenses).copied(),
            movement: MovementBreakdown {
                net_additions_withdrawals: movement
                    .get(&MovementField::NetAdditionsWithdrawals)
                    .copied(),
                realised_gains: movement.get(&MovementField::RealisedGains).copied(),
                investment_income: movement.get(&MovementField::InvestmentIncome).copied(),
                other: movement.get(&MovementField::Other).copied(),
            },
            returns: ReturnBreakdown {
                realised_gains: returns.get(&ReturnField::RealisedGains).copied(),
                investment_income: returns.get(&ReturnField::InvestmentIncome).copied(),
                credits: returns.get(&ReturnField::Credits).copied(),
            },
            twr,
        };

        tracing::info!(
            "Extracted performance report: ending value {:?}, 1y TWR {:?}",
            report.ending_market_value,
            report.twr.one_year
        );
        report
    }
}

impl ReportExtractor for PerformanceExtractor {
    fn report_type(&self) -> ReportType {
        ReportType::Performance
    }

    fn extract(&self, document: &ExtractedDocument) -> ReportData {
        ReportData::Performance(self.extract_report(document))
    }
}
