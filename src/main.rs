// src/main.rs
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use fund_analyzer::fund::generate_fund_id;
use fund_analyzer::storage::StorageManager;
use fund_analyzer::utils::{self, match_debug};
use fund_analyzer::{
    fund_summary, validate_fund_model, AppConfig, AppError, ExtractedDocument, FundAnalyzer,
    FundModelBuilder, FundReports, ReportData, ReportRegistry,
};

/// Command Line Interface for the fund report analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report file to ingest (.json extracted document or plain .txt); repeatable
    #[arg(short, long = "report", required = true)]
    reports: Vec<PathBuf>,

    /// Fund id to use (generated from the report contents if omitted)
    #[arg(short, long)]
    fund_id: Option<String>,

    /// Output directory for the fund exports
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// JSON configuration file with `analysis` and `extraction` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which line wins when a label repeats: first or last (env: FUND_LABEL_POLICY)
    #[arg(long)]
    label_policy: Option<String>,

    /// Debug mode - save fingerprint match reports for each document
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting processing for args: {:?}", args);

    // 2. Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.resolve_label_policy(args.label_policy.as_deref())?;

    // 3. Initialize storage, registry and builder
    let storage = StorageManager::new(&args.output_dir)?;
    let registry = ReportRegistry::standard(&config.extraction);
    let builder = FundModelBuilder::new(FundAnalyzer::new(config.analysis.clone()));

    // 4. Identify and parse each document
    let mut parsed: Vec<ReportData> = Vec::new();
    let mut debug_reports: Vec<(String, String)> = Vec::new();
    let mut failure_count = 0;

    for path in &args.reports {
        tracing::info!("Processing report: {}", path.display());

        let document = match load_document(path) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                failure_count += 1;
                continue;
            }
        };

        if args.debug {
            let name = path.display().to_string();
            debug_reports.push((
                name.clone(),
                match_debug::render_match_report(&name, &document.text(), &registry),
            ));
        }

        match registry.parse_report(&document) {
            Ok(report) => {
                tracing::info!(
                    "Parsed {} ({:.1}% confidence)",
                    report.report_name,
                    report.confidence
                );
                let validation = registry.validate_report(&report.data, report.report_type);
                for error in &validation.errors {
                    tracing::warn!("{}: {}", path.display(), error);
                }
                for warning in &validation.warnings {
                    tracing::warn!("{}: {}", path.display(), warning);
                }
                parsed.push(report.data);
            }
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", path.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Parsing finished. Success: {}, Failures: {}", parsed.len(), failure_count);

    if parsed.is_empty() && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to parse any of {} report files",
            failure_count
        )));
    }

    // 5. Merge the reports one at a time into a single fund model
    let fund_id = args.fund_id.clone().unwrap_or_else(|| {
        let mut reports = FundReports::default();
        for report in &parsed {
            reports.apply(report.clone());
        }
        generate_fund_id(&reports)
    });

    let mut fund = builder.create_empty_fund_model(Some(fund_id));
    for report in parsed {
        fund = builder.update_fund_model(fund, report);
    }

    let validation = validate_fund_model(&fund);
    for warning in &validation.warnings {
        tracing::warn!("Fund {}: {}", fund.fund_id, warning);
    }
    for error in &validation.errors {
        tracing::error!("Fund {}: {}", fund.fund_id, error);
    }

    // 6. Export
    let summary = fund_summary(&fund);
    storage.save_fund_model(&fund)?;
    storage.save_fund_summary(&summary)?;

    for (name, contents) in &debug_reports {
        if let Err(e) = storage.save_debug_report(&fund.fund_id, name, contents) {
            tracing::warn!("Failed to save debug report for {}: {}", name, e);
        }
    }

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| AppError::Processing(format!("Failed to serialize summary: {}", e)))?;
    println!("{}", json);

    tracing::info!(
        "Fund {} analysis {:?}: {}",
        fund.fund_id,
        fund.analysis_status,
        fund.analysis_message
    );

    Ok(())
}

/// Reads an extracted-document JSON file, or any other file as plain text.
fn load_document(path: &Path) -> Result<ExtractedDocument, AppError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| AppError::Input {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    } else {
        Ok(ExtractedDocument::from_text(&content))
    }
}
