//! Column type model and type inference.
//!
//! Declared types use engine-style upper-case names (`BIGINT`, `DOUBLE`,
//! `DECIMAL(p,s)`, `VARCHAR`, ...) so the classifier and any externally
//! supplied type strings share one vocabulary. Inference scans every loaded
//! cell, eliminating candidate types per column, and resolves the survivors
//! by priority.

use std::fmt;

use serde::Serialize;

use crate::data::{
    parse_bool, parse_decimal_literal, parse_naive_date, parse_naive_datetime, parse_naive_time,
};

const DECIMAL_MAX_PRECISION: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalSpec {
    pub precision: u32,
    pub scale: u32,
}

impl DecimalSpec {
    pub fn new(precision: u32, scale: u32) -> Self {
        let precision = precision.clamp(1, DECIMAL_MAX_PRECISION);
        let scale = scale.min(precision);
        Self { precision, scale }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    BigInt,
    Double,
    Decimal(DecimalSpec),
    Date,
    Timestamp,
    Time,
    Uuid,
    Varchar,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => write!(f, "BOOLEAN"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::Decimal(spec) => write!(f, "DECIMAL({},{})", spec.precision, spec.scale),
            ColumnType::Date => write!(f, "DATE"),
            ColumnType::Timestamp => write!(f, "TIMESTAMP"),
            ColumnType::Time => write!(f, "TIME"),
            ColumnType::Uuid => write!(f, "UUID"),
            ColumnType::Varchar => write!(f, "VARCHAR"),
        }
    }
}

/// One schema entry, produced once per loaded file in declaration order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnMeta {
    #[serde(rename = "column_name")]
    pub name: String,
    #[serde(rename = "column_type")]
    pub declared_type: String,
}

/// Per-column candidate tracker. Starts with every type possible and drops
/// candidates as values rule them out.
#[derive(Debug)]
pub struct TypeCandidates {
    boolean: bool,
    integer: bool,
    decimal: bool,
    double: bool,
    date: bool,
    timestamp: bool,
    time: bool,
    uuid: bool,
    max_precision: u32,
    max_scale: u32,
    saw_value: bool,
}

impl Default for TypeCandidates {
    fn default() -> Self {
        Self {
            boolean: true,
            integer: true,
            decimal: true,
            double: true,
            date: true,
            timestamp: true,
            time: true,
            uuid: true,
            max_precision: 0,
            max_scale: 0,
            saw_value: false,
        }
    }
}

impl TypeCandidates {
    pub fn observe(&mut self, raw: &str) {
        self.saw_value = true;
        if self.boolean && parse_bool(raw).is_err() {
            self.boolean = false;
        }
        if self.integer && raw.parse::<i64>().is_err() {
            self.integer = false;
        }
        if self.decimal {
            match parse_decimal_literal(raw) {
                Ok(decimal) => {
                    let scale = decimal.scale();
                    let digits = decimal.mantissa().unsigned_abs().to_string().len() as u32;
                    self.max_scale = self.max_scale.max(scale);
                    self.max_precision = self.max_precision.max(digits.max(scale));
                }
                Err(_) => self.decimal = false,
            }
        }
        if self.double && raw.parse::<f64>().is_err() {
            self.double = false;
        }
        if self.date && parse_naive_date(raw).is_err() {
            self.date = false;
        }
        if self.timestamp && parse_naive_datetime(raw).is_err() {
            self.timestamp = false;
        }
        if self.time && parse_naive_time(raw).is_err() {
            self.time = false;
        }
        if self.uuid && uuid::Uuid::parse_str(raw).is_err() {
            self.uuid = false;
        }
    }

    pub fn resolve(&self) -> ColumnType {
        if !self.saw_value {
            return ColumnType::Varchar;
        }
        if self.boolean {
            return ColumnType::Boolean;
        }
        if self.integer {
            return ColumnType::BigInt;
        }
        if self.decimal && self.max_precision <= DECIMAL_MAX_PRECISION {
            return ColumnType::Decimal(DecimalSpec::new(self.max_precision, self.max_scale));
        }
        if self.double {
            return ColumnType::Double;
        }
        if self.date {
            return ColumnType::Date;
        }
        if self.time {
            return ColumnType::Time;
        }
        if self.timestamp {
            return ColumnType::Timestamp;
        }
        if self.uuid {
            return ColumnType::Uuid;
        }
        ColumnType::Varchar
    }
}

/// Infers one column type per header from the non-null raw cells of that
/// column. `cells` is row-major; absent or null cells must already be `None`.
pub fn infer_column_types(field_count: usize, cells: &[Vec<Option<String>>]) -> Vec<ColumnType> {
    let mut candidates: Vec<TypeCandidates> = (0..field_count)
        .map(|_| TypeCandidates::default())
        .collect();
    for row in cells {
        for (idx, cell) in row.iter().enumerate().take(field_count) {
            if let Some(raw) = cell {
                candidates[idx].observe(raw);
            }
        }
    }
    candidates.iter().map(TypeCandidates::resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe_all(values: &[&str]) -> ColumnType {
        let mut candidates = TypeCandidates::default();
        for value in values {
            candidates.observe(value);
        }
        candidates.resolve()
    }

    #[test]
    fn integers_resolve_to_bigint() {
        assert_eq!(observe_all(&["1", "-42", "90"]), ColumnType::BigInt);
    }

    #[test]
    fn fractions_resolve_to_decimal_with_observed_scale() {
        assert_eq!(
            observe_all(&["1.50", "2.25"]),
            ColumnType::Decimal(DecimalSpec::new(3, 2))
        );
    }

    #[test]
    fn exponent_notation_resolves_to_double() {
        assert_eq!(observe_all(&["1e3", "2.5"]), ColumnType::Double);
    }

    #[test]
    fn mixed_values_fall_back_to_varchar() {
        assert_eq!(observe_all(&["1", "Alice"]), ColumnType::Varchar);
    }

    #[test]
    fn empty_column_is_varchar() {
        assert_eq!(TypeCandidates::default().resolve(), ColumnType::Varchar);
    }

    #[test]
    fn temporal_values_resolve_by_shape() {
        assert_eq!(observe_all(&["2024-01-31"]), ColumnType::Date);
        assert_eq!(observe_all(&["2024-01-31 08:15:00"]), ColumnType::Timestamp);
        assert_eq!(observe_all(&["08:15:00"]), ColumnType::Time);
    }
}
