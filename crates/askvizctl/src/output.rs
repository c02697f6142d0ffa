//! Terminal rendering of normalized results and errors.
//!
//! ASCII-only table output; colors are applied only in the display wrappers
//! so the formatting itself stays testable.

use anyhow::Result;
use askviz_common::{ChartType, NormalizedResult, QueryError};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Format a normalized result as an aligned table
///
/// The header comes from the first record's keys; fields absent from a
/// record render as empty cells.
pub fn format_table(result: &NormalizedResult) -> String {
    let headers: Vec<&str> = match result.records.first() {
        Some(first) => first.keys().map(String::as_str).collect(),
        None => return String::new(),
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(result.records.len());
    for record in &result.records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
        rows.push(row);
    }

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let dash_refs: Vec<&str> = dashes.iter().map(String::as_str).collect();
    push_row(&mut out, &dash_refs, &widths);
    for row in &rows {
        let cell_refs: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut out, &cell_refs, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        if i + 1 < cells.len() {
            line.push_str(&format!("{:width$}", cell, width = widths[i]));
        } else {
            line.push_str(cell);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render a scalar cell: strings raw, null empty, everything else as JSON
fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Encode the normalized result as a JSON object for scripting
pub fn render_json(result: &NormalizedResult, chart_type: ChartType) -> Result<String> {
    let payload = json!({
        "chart_type": chart_type,
        "records": result.records,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print a result table with a chart-type footer
pub fn display_result(result: &NormalizedResult, chart_type: ChartType) {
    println!();
    print!("{}", format_table(result));
    println!();
    println!(
        "{}",
        format!("{} chart * {} row(s)", chart_type, result.records.len()).dimmed()
    );
    println!();
}

/// Print a classified error in the standard form
pub fn display_error(err: &QueryError) {
    eprintln!();
    eprintln!("[ERROR] {}", err.to_string().red());
    eprintln!();
}
