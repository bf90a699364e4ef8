//! CSV Data Loader Module
//! Reads the ADP dataset from disk into a Polars DataFrame.

use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to open CSV: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Load the ADP CSV at `path`.
///
/// Column types are inferred over the whole file, and a cell that does not
/// parse as its column's type fails the load rather than becoming null.
/// The file handle is owned by the reader and released when this returns,
/// whether parsing succeeded or not.
pub fn read_adp_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoaderError::NotFound(path.to_path_buf()),
        _ => LoaderError::Io(e),
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(file)
        .finish()?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded adp csv"
    );
    Ok(df)
}
