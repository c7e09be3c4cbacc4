// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod match_debug;
pub mod values;

pub use error::AppError; // Re-export main error type for convenience
pub use values::{parse_currency, parse_date, parse_percentage};
