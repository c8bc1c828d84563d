//! Statistic computation over a loaded relation.
//!
//! Two sub-protocols run after classification. The numerical pass is a
//! single batched aggregate across all numerical columns; if it fails the
//! whole numerical result degrades to empty. The categorical pass runs one
//! column at a time; a failing column degrades to an error marker without
//! touching its neighbours.

use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use itertools::Itertools;
use serde::Serialize;

use crate::{data::Value, error::ProfileError, relation::Relation};

pub const ERROR_MARKER: &str = "Error";

/// Scalar result of one statistic. `Quantiles` only appears in the raw
/// numerical map; the reshaper expands it before anything renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Quantiles(Vec<f64>),
}

impl StatValue {
    pub fn is_null(&self) -> bool {
        matches!(self, StatValue::Null)
    }

    pub fn as_display(&self) -> String {
        match self {
            StatValue::Null => String::new(),
            StatValue::Integer(i) => i.to_string(),
            StatValue::Float(f) => format_number(*f),
            StatValue::Text(s) => s.clone(),
            StatValue::Quantiles(values) => values
                .iter()
                .map(|v| format_number(*v))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Integer(i) => StatValue::Integer(*i),
            Value::Float(f) => StatValue::Float(*f),
            other => StatValue::Text(other.as_display()),
        }
    }
}

/// Raw numerical results: one batched pass over every numerical column,
/// keyed `"<column>_<metric>"` with metrics `count`, `null_count`, `mean`,
/// `std`, `min`, `max`, and the `quantiles` triple. Mean and standard
/// deviation are floating point even for integer columns.
pub fn numerical_summary(
    relation: &Relation,
    columns: &[String],
) -> Result<BTreeMap<String, StatValue>> {
    let total_rows = relation.row_count();
    let mut results = BTreeMap::new();
    for name in columns {
        let column = relation.column(name).ok_or_else(|| ProfileError::Aggregate(
            format!("column '{name}' is not present in the loaded relation"),
        ))?;

        let mut numeric = Vec::new();
        let mut min: Option<&Value> = None;
        let mut max: Option<&Value> = None;
        for value in column.values.iter().flatten() {
            let metric = value.as_f64().ok_or_else(|| {
                ProfileError::Aggregate(format!(
                    "value '{value}' in column '{name}' cannot be coerced to a numeric metric"
                ))
            })?;
            if min.is_none_or(|current| metric < current.as_f64().unwrap_or(f64::INFINITY)) {
                min = Some(value);
            }
            if max.is_none_or(|current| metric > current.as_f64().unwrap_or(f64::NEG_INFINITY)) {
                max = Some(value);
            }
            numeric.push(metric);
        }

        let count = numeric.len();
        let null_count = total_rows.saturating_sub(count);
        results.insert(
            format!("{name}_count"),
            StatValue::Integer(count as i64),
        );
        results.insert(
            format!("{name}_null_count"),
            StatValue::Integer(null_count as i64),
        );
        results.insert(
            format!("{name}_mean"),
            mean(&numeric).map_or(StatValue::Null, StatValue::Float),
        );
        results.insert(
            format!("{name}_std"),
            sample_std_dev(&numeric).map_or(StatValue::Null, StatValue::Float),
        );
        results.insert(
            format!("{name}_min"),
            min.map_or(StatValue::Null, StatValue::from_value),
        );
        results.insert(
            format!("{name}_max"),
            max.map_or(StatValue::Null, StatValue::from_value),
        );
        results.insert(
            format!("{name}_quantiles"),
            quantile_triple(&mut numeric).map_or(StatValue::Null, |q| {
                StatValue::Quantiles(q.to_vec())
            }),
        );
    }
    Ok(results)
}

/// Raw categorical results for one column: the five named stat fields the
/// reshaper flattens. Mode ignores nulls and breaks frequency ties by
/// ascending value order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub total_count: StatValue,
    pub non_null_count: StatValue,
    pub unique_values: StatValue,
    pub mode: StatValue,
    pub mode_frequency: StatValue,
}

pub fn categorical_summary(relation: &Relation, name: &str) -> Result<CategoricalSummary> {
    let column = relation.column(name).ok_or_else(|| ProfileError::Column {
        column: name.to_string(),
        reason: "column is not present in the loaded relation".to_string(),
    })?;

    let total_count = relation.row_count();
    let rendered: Vec<String> = column
        .values
        .iter()
        .flatten()
        .map(Value::as_display)
        .collect();
    let non_null_count = rendered.len();
    let unique_values = rendered.iter().collect::<HashSet<_>>().len();

    let mut frequencies = rendered.iter().counts().into_iter().collect::<Vec<_>>();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let (mode, mode_frequency) = match frequencies.first() {
        Some((value, count)) => (StatValue::Text((*value).clone()), *count as i64),
        None => (StatValue::Null, 0),
    };

    Ok(CategoricalSummary {
        column: name.to_string(),
        total_count: StatValue::Integer(total_count as i64),
        non_null_count: StatValue::Integer(non_null_count as i64),
        unique_values: StatValue::Integer(unique_values as i64),
        mode,
        mode_frequency: StatValue::Integer(mode_frequency),
    })
}

/// Replacement summary when a column's computation fails: all five fields
/// carry the error marker so the failure is visible in the output.
pub fn error_marker(name: &str) -> CategoricalSummary {
    let marker = StatValue::Text(ERROR_MARKER.to_string());
    CategoricalSummary {
        column: name.to_string(),
        total_count: marker.clone(),
        non_null_count: marker.clone(),
        unique_values: marker.clone(),
        mode: marker.clone(),
        mode_frequency: marker,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_squared_deviations = values
        .iter()
        .map(|value| {
            let deviation = value - mean;
            deviation * deviation
        })
        .sum::<f64>();
    Some((sum_squared_deviations / (values.len() as f64 - 1.0)).sqrt())
}

/// 25th/50th/75th percentile via linear interpolation over sorted values.
fn quantile_triple(values: &mut [f64]) -> Option<[f64; 3]> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    Some([
        quantile_sorted(values, 0.25),
        quantile_sorted(values, 0.50),
        quantile_sorted(values, 0.75),
    ])
}

fn quantile_sorted(sorted: &[f64], fraction: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * fraction;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
