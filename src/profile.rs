//! Orchestration of one profiling run.
//!
//! A [`ProfileSession`] owns the relation loaded for one input file and runs
//! the stages in order: describe, classify, numerical aggregate, per-column
//! categorical stats, reshape. Sessions are created fresh per run and never
//! mutated; a second run builds a second session.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{error, info, warn};

use crate::{
    classify,
    cli::ProfileArgs,
    export, io_utils,
    relation::{LoadOptions, Relation},
    reshape::{self, TidyRecord},
    schema::ColumnMeta,
    stats, table,
};

#[derive(Debug)]
pub struct ProfileReport {
    pub schema: Vec<ColumnMeta>,
    pub records: Vec<TidyRecord>,
    /// Set when the numerical aggregate failed and its stage degraded to
    /// empty. Categorical records are still present.
    pub numerical_failed: bool,
}

#[derive(Debug)]
pub struct ProfileSession {
    relation: Relation,
}

impl ProfileSession {
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        let relation = Relation::load(path, options)?;
        Ok(Self { relation })
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn run(&self) -> ProfileReport {
        let schema = self.relation.describe();
        let (numerical_cols, categorical_cols) = classify::partition(&schema);
        info!(
            "Classified {} numerical and {} categorical column(s)",
            numerical_cols.len(),
            categorical_cols.len()
        );

        let mut numerical_failed = false;
        let numerical = if numerical_cols.is_empty() {
            BTreeMap::new()
        } else {
            match stats::numerical_summary(&self.relation, &numerical_cols) {
                Ok(results) => results,
                Err(err) => {
                    error!("Numerical statistics failed: {err:#}");
                    numerical_failed = true;
                    BTreeMap::new()
                }
            }
        };

        let mut categorical = Vec::with_capacity(categorical_cols.len());
        for name in &categorical_cols {
            match stats::categorical_summary(&self.relation, name) {
                Ok(summary) => categorical.push(summary),
                Err(err) => {
                    warn!("Categorical statistics for '{name}' failed: {err:#}");
                    categorical.push(stats::error_marker(name));
                }
            }
        }

        let records = reshape::reshape(&schema, &numerical, &categorical);
        ProfileReport {
            schema,
            records,
            numerical_failed,
        }
    }
}

pub fn execute(args: &ProfileArgs) -> Result<()> {
    let export_path = resolve_export_path(args)?;

    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let options = LoadOptions {
        delimiter,
        encoding,
        null_token: args.null_token.clone(),
        limit: args.limit,
    };

    info!("Loading '{}'", args.input.display());
    let session = ProfileSession::load(&args.input, &options)?;
    info!(
        "Loaded {} row(s); computing statistics",
        session.relation().row_count()
    );
    let report = session.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
    } else {
        render_report(&report);
    }

    if let Some(path) = export_path {
        export::write_export(&path, &report.records)?;
        info!(
            "Wrote {} record(s) to {:?}",
            report.records.len(),
            path
        );
    }

    info!("Profiling complete");
    Ok(())
}

fn render_report(report: &ProfileReport) {
    let schema_headers = vec!["column_name".to_string(), "column_type".to_string()];
    let schema_rows = report
        .schema
        .iter()
        .map(|meta| vec![meta.name.clone(), meta.declared_type.clone()])
        .collect::<Vec<_>>();
    table::print_table(&schema_headers, &schema_rows);
    println!();

    if report.records.is_empty() {
        println!("No statistics produced.");
        return;
    }
    let stat_headers = export::EXPORT_HEADER
        .iter()
        .map(|h| (*h).to_string())
        .collect::<Vec<_>>();
    let stat_rows = report
        .records
        .iter()
        .map(|record| {
            vec![
                record.column.clone(),
                record.inferred_type.clone(),
                record.metric.clone(),
                record.value.as_display(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&stat_headers, &stat_rows);
}

fn resolve_export_path(args: &ProfileArgs) -> Result<Option<PathBuf>> {
    if let Some(path) = &args.output {
        return Ok(Some(path.clone()));
    }
    if args.export {
        if io_utils::is_dash(&args.input) {
            return Err(anyhow!(
                "--export needs a file input to derive a name; use -o with stdin"
            ));
        }
        return Ok(Some(export::default_export_path(&args.input)));
    }
    Ok(None)
}
