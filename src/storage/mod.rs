// src/storage/mod.rs
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fund::{FundModel, FundSummary};
use crate::utils::error::StorageError;

/// Writes fund exports under `<base_dir>/<fund_id>/`.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn fund_dir(&self, fund_id: &str) -> PathBuf {
        self.base_dir.join(fund_id)
    }

    /// Saves the full fund model as `fund_model.json`
    pub fn save_fund_model(&self, fund: &FundModel) -> Result<PathBuf, StorageError> {
        let path = self.fund_dir(&fund.fund_id).join("fund_model.json");
        write_json(&path, fund)?;
        tracing::info!("Saved fund model to {}", path.display());
        Ok(path)
    }

    /// Saves the flattened summary as `summary.json`
    pub fn save_fund_summary(&self, summary: &FundSummary) -> Result<PathBuf, StorageError> {
        let path = self.fund_dir(&summary.fund_id).join("summary.json");
        write_json(&path, summary)?;
        tracing::info!("Saved fund summary to {}", path.display());
        Ok(path)
    }

    /// Saves a debug text file under `<fund_id>/debug/`
    pub fn save_debug_report(
        &self,
        fund_id: &str,
        name: &str,
        contents: &str,
    ) -> Result<PathBuf, StorageError> {
        let dir = self.fund_dir(fund_id).join("debug");
        fs::create_dir_all(&dir).map_err(StorageError::IoError)?;

        let path = dir.join(format!("{}.matches.txt", sanitize_file_stem(name)));
        fs::write(&path, contents).map_err(StorageError::IoError)?;

        tracing::info!("Saved debug report to {}", path.display());
        Ok(path)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(StorageError::IoError)?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    fs::write(path, json).map_err(StorageError::IoError)
}

/// File stem of `name` with anything outside `[A-Za-z0-9._-]` replaced.
fn sanitize_file_stem(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fund::{fund_summary, FundModelBuilder};
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("reports/Q4 allocation.txt"), "Q4_allocation");
        assert_eq!(sanitize_file_stem("perf-2024.json"), "perf-2024");
    }

    #[test]
    fn test_save_fund_exports() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("output");
        let storage = StorageManager::new(&dir).unwrap();
        assert!(dir.exists());
        let fund = FundModelBuilder::default().create_empty_fund_model(Some("fund_test".to_string()));

        let model_path = storage.save_fund_model(&fund).unwrap();
        let summary_path = storage.save_fund_summary(&fund_summary(&fund)).unwrap();
        let debug_path = storage.save_debug_report("fund_test", "a b.txt", "report").unwrap();

        assert_eq!(model_path, dir.join("fund_test").join("fund_model.json"));
        assert_eq!(summary_path, dir.join("fund_test").join("summary.json"));
        assert_eq!(debug_path, dir.join("fund_test").join("debug").join("a_b.matches.txt"));

        let restored: FundModel =
            serde_json::from_str(&fs::read_to_string(&model_path).unwrap()).unwrap();
        assert_eq!(restored, fund);
    }
}
