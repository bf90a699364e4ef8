//! ADP Service
//! Stateless entry point that loads, cleans and converts the dataset.

use crate::data::{read_adp_csv, to_records, AdpProcessor, AdpRecord, LoaderError, ProcessorError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum AdpError {
    #[error("CSV file not found")]
    NotFound,
    #[error("{0}")]
    Processing(String),
}

impl From<LoaderError> for AdpError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::NotFound(_) => AdpError::NotFound,
            other => AdpError::Processing(other.to_string()),
        }
    }
}

impl From<ProcessorError> for AdpError {
    fn from(err: ProcessorError) -> Self {
        AdpError::Processing(err.to_string())
    }
}

/// Reads the ADP dataset from a fixed path on every call.
#[derive(Debug, Clone)]
pub struct AdpService {
    data_path: PathBuf,
}

impl AdpService {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load the dataset fresh and return one record per source row.
    pub fn load(&self) -> Result<Vec<AdpRecord>, AdpError> {
        let raw = read_adp_csv(&self.data_path)?;
        let df = AdpProcessor::prepare(raw)?;
        let records = to_records(&df)?;

        tracing::debug!(
            rows = records.len(),
            columns = df.width(),
            "adp records ready"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Cell;
    use std::io::Write;
    use tempfile::TempDir;

    fn service_with(body: &str) -> (TempDir, AdpService) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("half_ppr_adp.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        (dir, AdpService::new(path))
    }

    #[test]
    fn test_load_returns_every_row() {
        let (_dir, service) = service_with(
            "Player,Team,Notes,ESPN Half,Average\n\
             Bijan Robinson,ATL,,1,2.5\n\
             Ja'Marr Chase,CIN,,5,3\n\
             Puka Nacua,,,9,10.5\n",
        );

        let records = service.load().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            records.iter().map(|r| r.espn_savings).collect::<Vec<_>>(),
            vec![Some(-1.5), Some(2.0), Some(-1.5)]
        );
        assert!(records.iter().all(|r| r.get("Notes").is_none()));
        assert_eq!(records[2].get("Team"), Some(&Cell::Text(String::new())));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let service = AdpService::new(dir.path().join("missing.csv"));

        let err = service.load().unwrap_err();
        assert!(matches!(err, AdpError::NotFound));
        assert_eq!(err.to_string(), "CSV file not found");
    }

    #[test]
    fn test_load_missing_required_column() {
        let (_dir, service) = service_with("Player,Average\nA,2.5\n");

        match service.load() {
            Err(AdpError::Processing(msg)) => assert!(msg.contains("ESPN Half")),
            other => panic!("expected processing error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_header_only_file() {
        let (_dir, service) = service_with("Player,ESPN Half,Average\n");

        let records = service.load().unwrap();
        assert!(records.is_empty());
    }
}
