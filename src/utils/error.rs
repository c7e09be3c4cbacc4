// src/utils/error.rs
use thiserror::Error;

use crate::reports::ReportType;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not identify report type ({0} characters of text inspected)")]
    Unidentified(usize),

    #[error("No parser registered for report type: {0}")]
    NoParser(ReportType),

    #[error("Invalid {report_type} report data: {source}")]
    InvalidData {
        report_type: ReportType,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid label policy '{0}' (expected 'first' or 'last')")]
    LabelPolicy(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Report processing failed: {0}")]
    Report(#[from] ReportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid input document {path}: {message}")]
    Input { path: String, message: String },

    #[error("Data processing failed: {0}")]
    Processing(String),
}
