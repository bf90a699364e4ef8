//! Data Processor Module
//! Cleans the raw ADP table and derives the savings column.

use polars::prelude::*;
use thiserror::Error;

/// ESPN half-PPR draft slot column.
pub const ESPN_HALF_COL: &str = "ESPN Half";
/// Consensus average draft slot column.
pub const AVERAGE_COL: &str = "Average";
/// Derived column: how many slots later ESPN drafts a player than consensus.
pub const SAVINGS_COL: &str = "ESPN_SAVINGS";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("required column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn { column: String, dtype: String },
    #[error("row {0} exceeds the maximum rank")]
    RankOverflow(usize),
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles cleaning and column derivation for the ADP table.
pub struct AdpProcessor;

impl AdpProcessor {
    /// Run every cleaning step in order: drop empty columns, fill text
    /// nulls, derive savings.
    pub fn prepare(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let df = Self::drop_empty_columns(df)?;
        let df = Self::fill_text_nulls(df)?;
        Self::derive_savings(df)
    }

    /// Drop columns where every row is null.
    ///
    /// A table without rows keeps all of its columns.
    pub fn drop_empty_columns(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let height = df.height();
        if height == 0 {
            return Ok(df);
        }

        let kept: Vec<Column> = df
            .get_columns()
            .iter()
            .filter(|c| c.null_count() < height)
            .cloned()
            .collect();

        if kept.len() == df.width() {
            return Ok(df);
        }

        let dropped = df.width() - kept.len();
        tracing::debug!(dropped, "dropped empty columns");
        Ok(DataFrame::new(kept)?)
    }

    /// Replace nulls in string columns with `""`. Numeric nulls are left
    /// alone and serialize as JSON null.
    pub fn fill_text_nulls(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let fills: Vec<Expr> = df
            .get_columns()
            .iter()
            .filter(|c| c.dtype() == &DataType::String && c.null_count() > 0)
            .map(|c| col(c.name().clone()).fill_null(lit("")))
            .collect();

        if fills.is_empty() {
            return Ok(df);
        }

        Ok(df.lazy().with_columns(fills).collect()?)
    }

    /// Add `ESPN_SAVINGS = "ESPN Half" - "Average"`, row-wise.
    ///
    /// Null where either side is null.
    pub fn derive_savings(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        for name in [ESPN_HALF_COL, AVERAGE_COL] {
            let column = df
                .column(name)
                .map_err(|_| ProcessorError::MissingColumn(name.to_string()))?;
            // A header-only file infers every column as text
            if df.height() > 0 && !is_numeric(column.dtype()) {
                return Err(ProcessorError::NonNumericColumn {
                    column: name.to_string(),
                    dtype: column.dtype().to_string(),
                });
            }
        }

        let savings = (col(ESPN_HALF_COL).cast(DataType::Float64)
            - col(AVERAGE_COL).cast(DataType::Float64))
        .alias(SAVINGS_COL);

        Ok(df.lazy().with_column(savings).collect()?)
    }
}
