//! Flattening raw statistics into tidy records.
//!
//! One record per (column, metric) pair, the unit of rendering and export.
//! Numerical keys split by popping the last underscore token as the metric
//! key; the remainder is the column name. Column names may themselves
//! contain underscores, so a key like `score_null_count` splits to metric
//! `count` under column `score_null`. That rule is kept exactly as the
//! flat-key format documents it.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{
    schema::ColumnMeta,
    stats::{CategoricalSummary, StatValue},
};

/// Type shown for a column the schema does not know about.
pub const UNKNOWN_TYPE: &str = "unknown";

const QUANTILE_LABELS: [&str; 3] = [
    "25th Percentile",
    "50th Percentile (Median)",
    "75th Percentile",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRecord {
    pub column: String,
    #[serde(rename = "type")]
    pub inferred_type: String,
    pub metric: String,
    pub value: StatValue,
}

fn numerical_metric_label(key: &str) -> String {
    match key {
        "count" => "Count (non-NULL)".to_string(),
        "null_count" => "NULL Count".to_string(),
        "mean" => "Mean".to_string(),
        "std" => "Std Dev (sample)".to_string(),
        "min" => "Min".to_string(),
        "max" => "Max".to_string(),
        other => other.to_string(),
    }
}

fn categorical_field_label(key: &str) -> String {
    match key {
        "total_count" => "Total Count (incl. NULL)".to_string(),
        "non_null_count" => "Non-NULL Count".to_string(),
        "unique_values" => "Unique Values (non-NULL)".to_string(),
        "mode" => "Most Frequent Value (Mode)".to_string(),
        "mode_frequency" => "Mode Frequency".to_string(),
        other => other.to_string(),
    }
}

/// Pops the last underscore-delimited token as the metric key. Keys without
/// an underscore carry no column name and are skipped by the caller.
fn split_stat_key(key: &str) -> Option<(&str, &str)> {
    let idx = key.rfind('_')?;
    Some((&key[..idx], &key[idx + 1..]))
}

pub fn reshape(
    schema: &[ColumnMeta],
    numerical: &BTreeMap<String, StatValue>,
    categorical: &[CategoricalSummary],
) -> Vec<TidyRecord> {
    let types: HashMap<&str, &str> = schema
        .iter()
        .map(|meta| (meta.name.as_str(), meta.declared_type.as_str()))
        .collect();
    let type_of = |column: &str| -> String {
        types
            .get(column)
            .map(|t| (*t).to_string())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    };

    let mut records = Vec::new();

    for (key, value) in numerical {
        let Some((column, metric_key)) = split_stat_key(key) else {
            continue;
        };
        let inferred_type = type_of(column);
        if metric_key == "quantiles" {
            // Expand the triple; a null triple (zero rows) emits nothing.
            if let StatValue::Quantiles(quantiles) = value
                && quantiles.len() == 3
            {
                for (label, quantile) in QUANTILE_LABELS.iter().zip(quantiles) {
                    records.push(TidyRecord {
                        column: column.to_string(),
                        inferred_type: inferred_type.clone(),
                        metric: (*label).to_string(),
                        value: StatValue::Float(*quantile),
                    });
                }
            }
        } else {
            records.push(TidyRecord {
                column: column.to_string(),
                inferred_type,
                metric: numerical_metric_label(metric_key),
                value: value.clone(),
            });
        }
    }

    for summary in categorical {
        let inferred_type = type_of(&summary.column);
        let fields = [
            ("total_count", &summary.total_count),
            ("non_null_count", &summary.non_null_count),
            ("unique_values", &summary.unique_values),
            ("mode", &summary.mode),
            ("mode_frequency", &summary.mode_frequency),
        ];
        for (key, value) in fields {
            records.push(TidyRecord {
                column: summary.column.clone(),
                inferred_type: inferred_type.clone(),
                metric: categorical_field_label(key),
                value: value.clone(),
            });
        }
    }

    // Stable: records with equal keys keep their emission order.
    records.sort_by(|a, b| {
        a.column
            .cmp(&b.column)
            .then_with(|| a.metric.cmp(&b.metric))
    });
    records
}
