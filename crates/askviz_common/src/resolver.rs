//! Response normalization and chart-type resolution.

use serde_json::Value;

use crate::chart::ChartType;
use crate::error::QueryError;
use crate::response::{DataShape, RawResponse, Record};

/// A backend response reduced to chart-ready form
///
/// Always holds at least one record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    pub records: Vec<Record>,
    pub chart_type: ChartType,
}

/// Reduce a raw backend response to a normalized result or a classified error
///
/// Pure and synchronous. Never panics; a well-formed-but-empty or malformed
/// payload always comes back as a [`QueryError`] value.
pub fn resolve(raw: Option<&RawResponse>, question: &str) -> Result<NormalizedResult, QueryError> {
    if question.trim().is_empty() {
        return Err(QueryError::EmptyQuestion);
    }

    let raw = match raw {
        Some(raw) => raw,
        None => return Err(QueryError::NoData),
    };
    let data = match raw.data.as_ref() {
        None | Some(Value::Null) => return Err(QueryError::NoData),
        Some(data) => data,
    };

    let records = match DataShape::classify(data) {
        DataShape::Records(records) if records.is_empty() => return Err(QueryError::NoResults),
        DataShape::Records(records) => records,
        DataShape::Table { rows, .. } if rows.is_empty() => return Err(QueryError::NoResults),
        DataShape::Table { columns, rows } => zip_table(&columns, rows),
        DataShape::Malformed => return Err(QueryError::InvalidFormat),
    };

    Ok(NormalizedResult {
        records,
        chart_type: chart_type_for(raw),
    })
}

/// Build one record per row, zipping column names with cells in index order
///
/// Ragged rows zip to the shorter length: extra cells are dropped, missing
/// cells leave the field absent.
fn zip_table(columns: &[String], rows: Vec<Vec<Value>>) -> Vec<Record> {
    rows.into_iter()
        .map(|row| columns.iter().cloned().zip(row).collect())
        .collect()
}

/// First present wins: the suggestion, then the legacy field, then the default
fn chart_type_for(raw: &RawResponse) -> ChartType {
    let suggested = raw
        .chart_suggestion
        .as_ref()
        .and_then(|s| ChartType::parse_lenient(s.chart_type.as_deref()));
    let legacy = ChartType::parse_lenient(raw.chart_type.as_deref());

    suggested.or(legacy).unwrap_or_default()
}
