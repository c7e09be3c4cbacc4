// src/fund/mod.rs
pub mod builder;
pub mod model;
pub mod summary;
pub mod validation;

// Re-export key fund types for convenience
pub use builder::{content_hash, generate_fund_id, FundModelBuilder};
pub use model::{FundModel, FundReports};
pub use summary::{fund_summary, FundSummary};
pub use validation::{validate_fund_model, FundValidation};
