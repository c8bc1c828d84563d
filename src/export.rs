//! Tidy-record CSV serialization and export file writing.
//!
//! The wire format is fixed: header `column,type,metric,value`, null values
//! as empty cells, fields quoted only when they contain a comma, double
//! quote, or newline (inner quotes doubled), rows joined with `\n` and no
//! trailing newline. The file writer prefixes a UTF-8 BOM for spreadsheet
//! compatibility.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::reshape::TidyRecord;

pub const EXPORT_HEADER: [&str; 4] = ["column", "type", "metric", "value"];

const BOM: &str = "\u{FEFF}";

pub fn to_csv(records: &[TidyRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(
        EXPORT_HEADER
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        let cells = [
            record.column.clone(),
            record.inferred_type.clone(),
            record.metric.clone(),
            record.value.as_display(),
        ];
        rows.push(
            cells
                .iter()
                .map(|cell| escape_field(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    rows.join("\n")
}

pub fn write_export(path: &Path, records: &[TidyRecord]) -> Result<()> {
    let body = to_csv(records);
    fs::write(path, format!("{BOM}{body}"))
        .with_context(|| format!("Writing statistics export to {path:?}"))
}

/// Default export path beside the input: `<stem>_stats.csv`.
pub fn default_export_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("profile");
    input.with_file_name(format!("{stem}_stats.csv"))
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
