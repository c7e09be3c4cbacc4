// src/lib.rs
//! Identification, extraction and analysis of investment fund reports.
//!
//! Text reports are identified by fingerprint phrases, parsed into typed
//! allocation and performance reports, and merged into a [`FundModel`] that
//! carries a risk classification, a benchmark comparison, a performance score
//! and ordered insights.

pub mod analysis;
pub mod config;
pub mod extractors;
pub mod fund;
pub mod reports;
pub mod storage;
pub mod utils;

pub use analysis::{AnalysisConfig, FundAnalyzer};
pub use config::AppConfig;
pub use extractors::{ExtractionConfig, LabelPolicy};
pub use fund::{fund_summary, validate_fund_model, FundModel, FundModelBuilder, FundReports};
pub use reports::{ExtractedDocument, ReportData, ReportRegistry, ReportType};
pub use utils::AppError;
