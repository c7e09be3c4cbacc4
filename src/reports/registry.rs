// src/reports/registry.rs
//! Report type registry: fingerprint identification and parser dispatch.

use serde::{Deserialize, Serialize};

use super::document::ExtractedDocument;
use super::models::ReportData;
use super::validation::{
    validate_asset_allocation_report, validate_performance_report, ReportValidation,
};
use super::ReportType;
use crate::extractors::{
    AssetAllocationExtractor, ExtractionConfig, PerformanceExtractor, ReportExtractor,
};
use crate::utils::error::ReportError;

/// Fingerprint phrases and eligibility rule for one report layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub report_type: ReportType,
    pub name: String,
    pub description: String,
    /// Lower-case substring patterns.
    pub fingerprints: Vec<String>,
    pub min_match_count: usize,
}

impl ReportDefinition {
    pub fn new(
        report_type: ReportType,
        description: &str,
        fingerprints: &[&str],
        min_match_count: usize,
    ) -> Self {
        Self {
            report_type,
            name: report_type.display_name().to_string(),
            description: description.to_string(),
            fingerprints: fingerprints.iter().map(|f| f.to_lowercase()).collect(),
            min_match_count,
        }
    }

    pub fn asset_allocation() -> Self {
        Self::new(
            ReportType::AssetAllocation,
            "Asset class breakdown of the fund as at a single date",
            &[
                "asset allocation",
                "australian equities",
                "australian fixed interest",
                "international equities",
                "listed property",
                "asset class",
                "investment code",
                "portfolio valuation",
                "total market value",
            ],
            3,
        )
    }

    pub fn performance() -> Self {
        Self::new(
            ReportType::Performance,
            "Movement in value, dollar returns and time-weighted returns for a period",
            &[
                "investment movement and returns",
                "movement in value",
                "starting market value",
                "ending market value",
                "portfolio return",
                "investment return before expenses",
                "twr",
                "for the period from",
            ],
            3,
        )
    }

    /// Fingerprints found in already lower-cased text.
    pub fn matched_fingerprints<'a>(&'a self, lower_text: &str) -> Vec<&'a str> {
        self.fingerprints
            .iter()
            .filter(|f| lower_text.contains(f.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Verdict of the fingerprint matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub confidence: f64,
    pub name: String,
    pub match_count: usize,
    pub total_fingerprints: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    pub report_type: ReportType,
    pub report_name: String,
    pub confidence: f64,
    pub data: ReportData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTypeInfo {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub name: String,
    pub description: String,
    pub fingerprint_count: usize,
    pub min_match_count: usize,
}

/// Registered report layouts and their extractors.
///
/// Definitions are consulted in registration order, which decides ties in
/// identification confidence.
pub struct ReportRegistry {
    definitions: Vec<ReportDefinition>,
    extractors: Vec<Box<dyn ReportExtractor>>,
}

impl ReportRegistry {
    /// Registry with the given definitions and no extractors.
    pub fn new(definitions: Vec<ReportDefinition>) -> Self {
        Self {
            definitions,
            extractors: Vec::new(),
        }
    }

    /// Both known layouts with their extractors.
    pub fn standard(config: &ExtractionConfig) -> Self {
        Self::new(vec![
            ReportDefinition::asset_allocation(),
            ReportDefinition::performance(),
        ])
        .with_extractor(Box::new(AssetAllocationExtractor::new(config.clone())))
        .with_extractor(Box::new(PerformanceExtractor::new(config.clone())))
    }

    pub fn with_extractor(mut self, extractor: Box<dyn ReportExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn definitions(&self) -> &[ReportDefinition] {
        &self.definitions
    }

    /// Identifies the report layout of `text`.
    ///
    /// A layout is eligible when at least `min_match_count` of its
    /// fingerprints occur in the text. The eligible layout with the strictly
    /// highest confidence wins; on equal confidence the earlier registered
    /// layout is kept.
    pub fn identify_report_type(&self, text: &str) -> Option<Identification> {
        let lower_text = text.to_lowercase();
        let mut best: Option<Identification> = None;

        for definition in &self.definitions {
            let total = definition.fingerprints.len();
            if total == 0 {
                continue;
            }
            let match_count = definition.matched_fingerprints(&lower_text).len();
            let confidence = match_count as f64 / total as f64 * 100.0;
            tracing::debug!(
                "Fingerprint check for {}: {}/{} matched ({:.1}%)",
                definition.report_type,
                match_count,
                total,
                confidence
            );

            if match_count < definition.min_match_count {
                continue;
            }
            if best.as_ref().map_or(true, |b| confidence > b.confidence) {
                best = Some(Identification {
                    report_type: definition.report_type,
                    confidence,
                    name: definition.name.clone(),
                    match_count,
                    total_fingerprints: total,
                });
            }
        }

        match &best {
            Some(id) => tracing::info!(
                "Identified report as {} ({:.1}% confidence)",
                id.report_type,
                id.confidence
            ),
            None => tracing::warn!("No registered report type matched the document"),
        }
        best
    }

    /// Identifies and extracts a document.
    pub fn parse_report(&self, document: &ExtractedDocument) -> Result<ParsedReport, ReportError> {
        let text = document.text();
        let identification = self
            .identify_report_type(&text)
            .ok_or(ReportError::Unidentified(text.len()))?;

        let extractor = self
            .extractors
            .iter()
            .find(|e| e.report_type() == identification.report_type)
            .ok_or(ReportError::NoParser(identification.report_type))?;

        let data = extractor.extract(document);
        tracing::info!("Extracted {} report", identification.report_type);

        Ok(ParsedReport {
            report_type: identification.report_type,
            report_name: identification.name,
            confidence: identification.confidence,
            data,
        })
    }

    pub fn supported_report_types(&self) -> Vec<ReportTypeInfo> {
        self.definitions
            .iter()
            .map(|d| ReportTypeInfo {
                report_type: d.report_type,
                name: d.name.clone(),
                description: d.description.clone(),
                fingerprint_count: d.fingerprints.len(),
                min_match_count: d.min_match_count,
            })
            .collect()
    }

    /// Validates extracted data against the expectations of `report_type`.
    pub fn validate_report(&self, report: &ReportData, report_type: ReportType) -> ReportValidation {
        if report.report_type() != report_type {
            return ReportValidation {
                valid: false,
                errors: vec![format!(
                    "Expected {} data but got {} data",
                    report_type,
                    report.report_type()
                )],
                warnings: Vec::new(),
            };
        }

        match report {
            ReportData::AssetAllocation(allocation) => validate_asset_allocation_report(allocation),
            ReportData::Performance(performance) => validate_performance_report(performance),
        }
    }

    /// Per-layout list of matched fingerprints, for diagnostics.
    pub fn fingerprint_matches(&self, text: &str) -> Vec<(ReportType, Vec<String>)> {
        let lower_text = text.to_lowercase();
        self.definitions
            .iter()
            .map(|d| {
                let matched = d
                    .matched_fingerprints(&lower_text)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (d.report_type, matched)
            })
            .collect()
    }
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::standard(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALLOCATION_TEXT: &str = "ASSET ALLOCATION\n\
        Australian Equities Australian Fixed Interest International Equities Listed Property\n\
        TOTAL $600,000.00 60.00% $400,000.00 40.00%";

    #[test]
    fn test_identify_five_of_nine() {
        let registry = ReportRegistry::default();
        let id = registry.identify_report_type(ALLOCATION_TEXT).unwrap();
        assert_eq!(id.report_type, ReportType::AssetAllocation);
        assert_eq!(id.match_count, 5);
        assert_eq!(id.total_fingerprints, 9);
        assert_relative_eq!(id.confidence, 55.555, epsilon = 0.01);
    }

    #[test]
    fn test_identify_performance() {
        let text = "Investment Movement and Returns\nFor the period from 1 July 2023 to 30 June 2024\n\
            Movement in Value\nStarting market value $1.00\nPortfolio Return";
        let id = ReportRegistry::default().identify_report_type(text).unwrap();
        assert_eq!(id.report_type, ReportType::Performance);
        assert_eq!(id.match_count, 5);
    }

    #[test]
    fn test_identify_below_minimum_is_none() {
        let registry = ReportRegistry::default();
        assert!(registry.identify_report_type("asset allocation and twr").is_none());
        assert!(registry.identify_report_type("").is_none());
    }

    #[test]
    fn test_identify_tie_keeps_first_registered() {
        let first = ReportDefinition::new(ReportType::Performance, "", &["alpha", "beta"], 1);
        let second = ReportDefinition::new(ReportType::AssetAllocation, "", &["alpha", "gamma"], 1);
        let text = "alpha only";

        let registry = ReportRegistry::new(vec![first.clone(), second.clone()]);
        assert_eq!(
            registry.identify_report_type(text).unwrap().report_type,
            ReportType::Performance
        );

        let reversed = ReportRegistry::new(vec![second, first]);
        assert_eq!(
            reversed.identify_report_type(text).unwrap().report_type,
            ReportType::AssetAllocation
        );
    }

    #[test]
    fn test_identify_is_case_insensitive() {
        let definition = ReportDefinition::new(ReportType::Performance, "", &["Movement In Value"], 1);
        let registry = ReportRegistry::new(vec![definition]);
        assert!(registry.identify_report_type("MOVEMENT IN VALUE").is_some());
    }

    #[test]
    fn test_parse_report_unidentified() {
        let doc = ExtractedDocument::from_text("a grocery list");
        let err = ReportRegistry::default().parse_report(&doc).unwrap_err();
        assert!(matches!(err, ReportError::Unidentified(_)));
    }

    #[test]
    fn test_parse_report_without_parser() {
        let registry = ReportRegistry::new(vec![ReportDefinition::asset_allocation()]);
        let doc = ExtractedDocument::from_text(ALLOCATION_TEXT);
        let err = registry.parse_report(&doc).unwrap_err();
        assert!(matches!(err, ReportError::NoParser(ReportType::AssetAllocation)));
    }

    #[test]
    fn test_parse_report_dispatches() {
        let doc = ExtractedDocument::from_text(ALLOCATION_TEXT);
        let parsed = ReportRegistry::default().parse_report(&doc).unwrap();
        assert_eq!(parsed.report_type, ReportType::AssetAllocation);
        assert_eq!(parsed.report_name, "Asset Allocation Report");
        let ReportData::AssetAllocation(report) = parsed.data else {
            panic!("expected allocation data");
        };
        assert_eq!(report.total_value, Some(1_000_000.0));
    }

    #[test]
    fn test_validate_report_type_mismatch() {
        let registry = ReportRegistry::default();
        let data = ReportData::Performance(Default::default());
        let result = registry.validate_report(&data, ReportType::AssetAllocation);
        assert!(!result.valid);
    }

    #[test]
    fn test_supported_report_types() {
        let types = ReportRegistry::default().supported_report_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].fingerprint_count, 9);
        assert_eq!(types[1].fingerprint_count, 8);
    }
}
