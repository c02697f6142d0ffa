//! Backend response payloads prior to normalization.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::chart::ChartSuggestion;

/// One row of chart-ready data, field name to scalar value
///
/// The first record's keys define the schema of a result; later records are
/// trusted to match and are not re-validated.
pub type Record = Map<String, Value>;

/// Backend payload as received from `POST /ask`
///
/// Every field is optional so that decoding never rejects a response the
/// resolver could still classify. The `data` field is polymorphic and is
/// classified by [`DataShape::classify`] after decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub chart_suggestion: Option<ChartSuggestion>,
    /// Legacy top-level chart type, kept for backward compatibility
    #[serde(default, rename = "chartType")]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// Shape of the `data` field, classified once before any branch-specific work
///
/// Interpretation never mixes branches: a payload is wholly modern, wholly
/// legacy, or malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum DataShape {
    /// Modern shape: a flat array of records
    Records(Vec<Record>),
    /// Legacy shape: parallel column/row arrays
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// Present but neither recognized shape
    Malformed,
}

impl DataShape {
    /// Classify a `data` value into exactly one shape
    pub fn classify(data: &Value) -> Self {
        match data {
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(map) => records.push(map.clone()),
                        _ => return Self::Malformed,
                    }
                }
                Self::Records(records)
            }
            Value::Object(map) => {
                let columns = match map.get("columns") {
                    Some(Value::Array(cols)) => {
                        let mut names = Vec::with_capacity(cols.len());
                        for col in cols {
                            match col {
                                Value::String(name) => names.push(name.clone()),
                                _ => return Self::Malformed,
                            }
                        }
                        names
                    }
                    _ => return Self::Malformed,
                };
                let rows = match map.get("rows") {
                    Some(Value::Array(rows)) => {
                        let mut out = Vec::with_capacity(rows.len());
                        for row in rows {
                            match row {
                                Value::Array(cells) => out.push(cells.clone()),
                                _ => return Self::Malformed,
                            }
                        }
                        out
                    }
                    _ => return Self::Malformed,
                };
                Self::Table { columns, rows }
            }
            _ => Self::Malformed,
        }
    }
}
