// tests/end_to_end.rs
//! Documents in, fund model out, through the public API only.

use approx::assert_abs_diff_eq;
use fund_analyzer::analysis::{AnalysisStatus, ComparisonStatus, FundClassification, Importance, InsightType};
use fund_analyzer::fund::fund_summary;
use fund_analyzer::reports::ReportData;
use fund_analyzer::utils::error::ReportError;
use fund_analyzer::{
    validate_fund_model, ExtractedDocument, FundModelBuilder, FundReports, ReportRegistry, ReportType,
};

const ALLOCATION_TEXT: &str = "Portfolio Valuation\n\
    Asset Allocation as at 30 June 2024\n\
    Asset Class Australian Equities Australian Fixed Interest\n\
    TOTAL $600,000.00 60.00% $400,000.00 40.00%\n";

const PERFORMANCE_TEXT: &str = "Investment Movement and Returns\n\
    For the period from 1 July 2023 to 30 June 2024\n\
    Movement in Value\n\
    Starting market value $950,000.00\n\
    Net addition/withdrawal (20,000.00)\n\
    Realised gains 10,000.00\n\
    Investment income 30,000.00\n\
    Other 30,000.00\n\
    Movement in value 50,000.00\n\
    Ending market value $1,000,000.00\n\
    Portfolio Return\n\
    Realised gains 10,000.00\n\
    Investment income 30,000.00\n\
    Total before expenses 120,000.00\n\
    Investment expenses (7,000.00)\n\
    Total after expenses 113,000.00\n\
    Return over time\n\
    1 Year 3 Years Since 01/07/2015 Since 01/07/2023\n\
    Investment return before expenses (TWR) 12.95% 8.10% 7.25% -\n";

fn parse(registry: &ReportRegistry, text: &str) -> ReportData {
    registry
        .parse_report(&ExtractedDocument::from_text(text))
        .expect("document should parse")
        .data
}

#[test]
fn allocation_report_classifies_as_balanced() {
    let registry = ReportRegistry::default();
    let identification = registry.identify_report_type(ALLOCATION_TEXT).unwrap();
    assert_eq!(identification.report_type, ReportType::AssetAllocation);
    assert_eq!(identification.match_count, 5);
    assert_abs_diff_eq!(identification.confidence, 55.56, epsilon = 0.01);

    let performance_hits = registry
        .fingerprint_matches(ALLOCATION_TEXT)
        .into_iter()
        .find(|(report_type, _)| *report_type == ReportType::Performance)
        .map(|(_, matched)| matched)
        .unwrap();
    assert!(performance_hits.is_empty(), "unexpected matches: {:?}", performance_hits);

    let builder = FundModelBuilder::default();
    let fund = builder.create_empty_fund_model(Some("fund_a".to_string()));
    let fund = builder.update_fund_model(fund, parse(&registry, ALLOCATION_TEXT));

    let allocation = fund.asset_allocation.as_ref().unwrap();
    assert_eq!(allocation.total_value, Some(1_000_000.0));
    assert_eq!(fund.classification.classification, FundClassification::Balanced);
    assert_abs_diff_eq!(fund.classification.growth_percent, 60.0);
    assert_abs_diff_eq!(fund.classification.defensive_percent, 40.0);
    assert_abs_diff_eq!(fund.classification.other_percent, 0.0);
    assert_eq!(fund.benchmark.name, "Balanced Benchmark");
    assert_eq!(fund.analysis_status, AnalysisStatus::Partial);
}

#[test]
fn strong_outperformance_raises_high_insight() {
    let registry = ReportRegistry::default();
    let builder = FundModelBuilder::default();

    let mut fund = builder.create_empty_fund_model(Some("fund_b".to_string()));
    for text in [ALLOCATION_TEXT, PERFORMANCE_TEXT] {
        fund = builder.update_fund_model(fund, parse(&registry, text));
    }

    let one_year = fund
        .benchmark_comparison
        .as_ref()
        .and_then(|c| c.one_year.as_ref())
        .unwrap();
    assert_abs_diff_eq!(one_year.fund_return, 12.95);
    assert_abs_diff_eq!(one_year.benchmark_return, 8.5);
    assert_abs_diff_eq!(one_year.difference, 4.45, epsilon = 1e-9);
    assert_eq!(one_year.status, ComparisonStatus::StrongOutperformance);

    let insight = fund
        .derived_insights
        .iter()
        .find(|i| i.insight_type == InsightType::BenchmarkComparison)
        .unwrap();
    assert_eq!(insight.importance, Importance::High);

    // 50 + 22.25 + 10
    assert_eq!(fund.performance_score, Some(82));
    assert_eq!(fund.analysis_status, AnalysisStatus::Complete);

    let validation = validate_fund_model(&fund);
    assert!(validation.valid);
    assert!(validation.is_complete);

    let summary = fund_summary(&fund);
    assert_eq!(summary.one_year_status, Some(ComparisonStatus::StrongOutperformance));
    assert_eq!(summary.dollar_return, Some(113_000.0));
}

#[test]
fn sequential_updates_match_single_create() {
    let registry = ReportRegistry::default();
    let builder = FundModelBuilder::default();
    let allocation = parse(&registry, ALLOCATION_TEXT);
    let performance = parse(&registry, PERFORMANCE_TEXT);

    let empty = builder.create_empty_fund_model(Some("fund_c".to_string()));
    let sequential = builder.update_fund_model(empty, allocation.clone());
    let sequential = builder.update_fund_model(sequential, performance.clone());

    let mut reports = FundReports::default();
    reports.apply(allocation);
    reports.apply(performance);
    let mut direct = builder.create_fund_model(Some("fund_c".to_string()), reports);

    direct.last_updated = sequential.last_updated;
    assert_eq!(sequential, direct);
}

#[test]
fn unrecognized_document_is_rejected() {
    let registry = ReportRegistry::default();
    let document = ExtractedDocument::from_text("Quarterly newsletter\nNothing to see here");
    assert!(registry.identify_report_type(&document.text()).is_none());
    assert!(matches!(
        registry.parse_report(&document),
        Err(ReportError::Unidentified(_))
    ));
}

#[test]
fn json_document_input() {
    let json = serde_json::json!({
        "fullText": "",
        "pages": [
            {
                "pageNumber": 1,
                "lines": ALLOCATION_TEXT.lines().collect::<Vec<_>>(),
                "rawText": ALLOCATION_TEXT
            }
        ]
    });
    let document: ExtractedDocument = serde_json::from_value(json).unwrap();
    let parsed = ReportRegistry::default().parse_report(&document).unwrap();
    assert_eq!(parsed.report_type, ReportType::AssetAllocation);
    match parsed.data {
        ReportData::AssetAllocation(report) => assert_eq!(report.asset_classes.len(), 2),
        other => panic!("unexpected report: {:?}", other),
    }
}

#[test]
fn json_document_without_page_text_uses_full_text() {
    let json = serde_json::json!({
        "fullText": ALLOCATION_TEXT,
        "pages": [{"pageNumber": 1}]
    });
    let document: ExtractedDocument = serde_json::from_value(json).unwrap();
    let parsed = ReportRegistry::default().parse_report(&document).unwrap();
    match parsed.data {
        ReportData::AssetAllocation(report) => {
            assert_eq!(report.total_value, Some(1_000_000.0));
            assert_eq!(report.asset_classes.len(), 2);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}
