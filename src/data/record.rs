//! Record Module
//! Turns the processed ADP table into ordered, JSON-safe records.

use super::processor::{ProcessorError, SAVINGS_COL};
use polars::prelude::*;
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Output key for the 1-based source row position.
pub const RANK_KEY: &str = "rank";

/// A single passthrough value from the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<Cell>),
    Map(Vec<(String, Cell)>),
}

impl Cell {
    /// Replace every non-finite float, at any depth, with `Null`.
    pub fn scrub_nan(&mut self) {
        match self {
            Cell::Float(v) if !v.is_finite() => *self = Cell::Null,
            Cell::List(items) => items.iter_mut().for_each(Cell::scrub_nan),
            Cell::Map(entries) => entries.iter_mut().for_each(|(_, v)| v.scrub_nan()),
            _ => {}
        }
    }
}

impl From<AnyValue<'_>> for Cell {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Cell::Null,
            AnyValue::Boolean(b) => Cell::Bool(b),
            AnyValue::Int32(v) => Cell::Int(v.into()),
            AnyValue::Int64(v) => Cell::Int(v),
            AnyValue::UInt32(v) => Cell::UInt(v.into()),
            AnyValue::UInt64(v) => Cell::UInt(v),
            AnyValue::Float32(v) => Cell::Float(v.into()),
            AnyValue::Float64(v) => Cell::Float(v),
            AnyValue::String(s) => Cell::Text(s.to_string()),
            AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
            AnyValue::List(series) => Cell::List(
                (0..series.len())
                    .filter_map(|i| series.get(i).ok())
                    .map(Cell::from)
                    .collect(),
            ),
            // Borrowed struct rows own their field values once made static
            value @ AnyValue::Struct(..) => Cell::from(value.into_static()),
            AnyValue::StructOwned(payload) => {
                let (values, fields) = *payload;
                Cell::Map(
                    fields
                        .iter()
                        .zip(values)
                        .map(|(field, v)| (field.name().to_string(), Cell::from(v)))
                        .collect(),
                )
            }
            other => Cell::Text(other.to_string().trim_matches('"').to_string()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_none(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Int(v) => serializer.serialize_i64(*v),
            Cell::UInt(v) => serializer.serialize_u64(*v),
            Cell::Float(v) => serializer.serialize_f64(*v),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::List(items) => serializer.collect_seq(items),
            Cell::Map(entries) => serializer.collect_map(entries.iter().map(|(k, v)| (k, v))),
        }
    }
}

/// One row of the ADP dataset.
///
/// Serializes as a JSON object: passthrough columns in source order, then
/// `rank`, then `ESPN_SAVINGS`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdpRecord {
    pub fields: Vec<(String, Cell)>,
    pub rank: u32,
    pub espn_savings: Option<f64>,
}

impl AdpRecord {
    /// Look up a passthrough column by name.
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    pub fn scrub_nan(&mut self) {
        self.fields.iter_mut().for_each(|(_, cell)| cell.scrub_nan());
        self.espn_savings = self.espn_savings.filter(|v| v.is_finite());
    }
}

impl Serialize for AdpRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for (name, cell) in &self.fields {
            map.serialize_entry(name, cell)?;
        }
        map.serialize_entry(RANK_KEY, &self.rank)?;
        map.serialize_entry(SAVINGS_COL, &self.espn_savings)?;
        map.end()
    }
}

/// 1-based rank for a 0-based row index.
fn rank_for(row: usize) -> Result<u32, ProcessorError> {
    u32::try_from(row)
        .ok()
        .and_then(|r| r.checked_add(1))
        .ok_or(ProcessorError::RankOverflow(row))
}

/// Convert a processed table into records, one per row, in row order.
///
/// `rank` comes from row position, never from column content. Every
/// record is NaN-scrubbed before it is returned.
pub fn to_records(df: &DataFrame) -> Result<Vec<AdpRecord>, ProcessorError> {
    let savings = df
        .column(SAVINGS_COL)
        .map_err(|_| ProcessorError::MissingColumn(SAVINGS_COL.to_string()))?
        .f64()?;

    let passthrough: Vec<(String, &Column)> = df
        .get_columns()
        .iter()
        .filter(|c| !matches!(c.name().as_str(), RANK_KEY | SAVINGS_COL))
        .map(|c| (c.name().to_string(), c))
        .collect();

    // Indexed parallel iterators collect back in source order
    (0..df.height())
        .into_par_iter()
        .map(|row| -> Result<AdpRecord, ProcessorError> {
            let fields = passthrough
                .iter()
                .map(|(name, column)| Ok((name.clone(), Cell::from(column.get(row)?))))
                .collect::<PolarsResult<Vec<_>>>()?;

            let mut record = AdpRecord {
                fields,
                rank: rank_for(row)?,
                espn_savings: savings.get(row),
            };
            record.scrub_nan();
            Ok(record)
        })
        .collect()
}
