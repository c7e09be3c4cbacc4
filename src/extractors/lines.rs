// src/extractors/lines.rs
//! Line-scanning helpers shared by the extractors: section boundaries and
//! labeled trailing values.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::hash::Hash;

use super::LabelPolicy;
use crate::utils::values::parse_currency;

// Currency amount with exactly two decimals anchored at line end, e.g.
// "$1,234.56", "(1,234.56)", "-12.00"
static TRAILING_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\(?-?\$?-?\d[\d,]*\.\d{2}\)?)\s*$").expect("Failed to compile TRAILING_AMOUNT_RE")
});

/// Currency value printed at the end of a line.
pub fn trailing_amount(line: &str) -> Option<f64> {
    TRAILING_AMOUNT_RE
        .captures(line)
        .and_then(|caps| parse_currency(&caps[1]))
}

/// Lines from the first line accepted by `is_start` (inclusive) up to the
/// first later line accepted by `is_end` (exclusive). Predicates receive
/// lower-cased text. Without an end marker the section runs to the last line.
pub fn find_section<'a, 'l>(
    lines: &'l [&'a str],
    is_start: impl Fn(&str) -> bool,
    is_end: impl Fn(&str) -> bool,
) -> Option<&'l [&'a str]> {
    let start = lines.iter().position(|l| is_start(&l.to_lowercase()))?;
    let end = lines[start + 1..]
        .iter()
        .position(|l| is_end(&l.to_lowercase()))
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());
    tracing::trace!("Section spans lines {}..{}", start, end);
    Some(&lines[start..end])
}

/// Maps a line to a field when it contains one of `any_of` and none of `none_of`.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule<F> {
    pub field: F,
    pub any_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
}

impl<F: Copy> LabelRule<F> {
    pub const fn new(field: F, any_of: &'static [&'static str]) -> Self {
        Self {
            field,
            any_of,
            none_of: &[],
        }
    }

    pub const fn excluding(mut self, none_of: &'static [&'static str]) -> Self {
        self.none_of = none_of;
        self
    }

    fn matches(&self, lower_line: &str) -> bool {
        self.any_of.iter().any(|k| lower_line.contains(k))
            && !self.none_of.iter().any(|k| lower_line.contains(k))
    }
}

/// Collects labeled trailing values from a section.
///
/// Each line is assigned to the first rule it matches, so rule order
/// resolves overlapping keywords. Lines without a trailing value never
/// overwrite a previously found value.
pub fn scan_labeled_values<F>(
    section: &[&str],
    rules: &[LabelRule<F>],
    policy: LabelPolicy,
) -> HashMap<F, f64>
where
    F: Copy + Eq + Hash + std::fmt::Debug,
{
    let mut values = HashMap::new();

    for line in section {
        let lower = line.to_lowercase();
        let Some(rule) = rules.iter().find(|r| r.matches(&lower)) else {
            continue;
        };
        let Some(value) = trailing_amount(line) else {
            tracing::trace!("Label {:?} matched without a trailing value: '{}'", rule.field, line.trim());
            continue;
        };

        match policy {
            LabelPolicy::FirstMatchWins => {
                values.entry(rule.field).or_insert(value);
            }
            LabelPolicy::LastMatchWins => {
                if let Some(previous) = values.insert(rule.field, value) {
                    tracing::debug!(
                        "Label {:?} repeated; {} replaces {}",
                        rule.field,
                        value,
                        previous
                    );
                }
            }
        }
    }

    values
}
