//! In-memory relation loaded from delimited text.
//!
//! This plays the role the analytical engine plays in a database-backed
//! profiler: it owns the loaded table, the null-token handling, and the
//! `describe()` surface the rest of the pipeline consumes. Every profiling
//! run loads a fresh relation; nothing is mutated after load.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;

use crate::{
    data::{Value, parse_typed_value},
    error::ProfileError,
    io_utils,
    schema::{ColumnMeta, ColumnType, infer_column_types},
};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    pub null_token: String,
    /// Maximum rows to load; 0 means all.
    pub limit: usize,
}

#[derive(Debug)]
pub struct Column {
    pub meta: ColumnMeta,
    pub datatype: ColumnType,
    pub values: Vec<Option<Value>>,
}

#[derive(Debug)]
pub struct Relation {
    columns: Vec<Column>,
    row_count: usize,
}

impl Relation {
    /// Loads delimited text with a header row, infers column types, and
    /// parses every cell into its typed form. The configured null token and
    /// empty cells load as null. Any parse failure aborts the load.
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, options.delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, options.encoding)
            .map_err(|err| ProfileError::Parse(format!("{err:#}")))?;
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ProfileError::Parse("Input has no header row".to_string()).into());
        }

        let mut cells: Vec<Vec<Option<String>>> = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            if options.limit > 0 && row_idx >= options.limit {
                break;
            }
            let record = record
                .map_err(|err| ProfileError::Parse(format!("Row {}: {err}", row_idx + 2)))?;
            let decoded = io_utils::decode_record(&record, options.encoding)
                .map_err(|err| ProfileError::Parse(format!("Row {}: {err:#}", row_idx + 2)))?;
            let row = decoded
                .into_iter()
                .map(|field| {
                    let trimmed = field.trim().to_string();
                    if trimmed.is_empty() || trimmed == options.null_token {
                        None
                    } else {
                        Some(trimmed)
                    }
                })
                .collect();
            cells.push(row);
        }

        let datatypes = infer_column_types(headers.len(), &cells);
        debug!(
            "Inferred types for {} column(s) over {} row(s)",
            headers.len(),
            cells.len()
        );

        let mut columns = Vec::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            let datatype = datatypes[idx].clone();
            let mut values = Vec::with_capacity(cells.len());
            for row in &cells {
                let typed = match row.get(idx).and_then(|cell| cell.as_deref()) {
                    Some(raw) => Some(
                        parse_typed_value(raw, &datatype)
                            .with_context(|| format!("Column '{name}'"))?,
                    ),
                    None => None,
                };
                values.push(typed);
            }
            columns.push(Column {
                meta: ColumnMeta {
                    name: name.clone(),
                    declared_type: datatype.to_string(),
                },
                datatype,
                values,
            });
        }

        Ok(Self {
            columns,
            row_count: cells.len(),
        })
    }

    /// Ordered column metadata, the `DESCRIBE` surface of the relation.
    pub fn describe(&self) -> Vec<ColumnMeta> {
        self.columns.iter().map(|col| col.meta.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.meta.name == name)
    }
}
