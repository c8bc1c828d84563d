//! Typed cell values and literal parsing.

use std::fmt;

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::schema::ColumnType;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Uuid(Uuid),
    Text(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{f:.0}")
                } else {
                    f.to_string()
                }
            }
            Value::Decimal(d) => d.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Time(t) => t.format("%H:%M:%S").to_string(),
            Value::Uuid(u) => u.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Numeric view used by the aggregate pass. Only the numeric variants
    /// coerce; anything else is a caller error.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn parse_bool(value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(anyhow!("Failed to parse '{value}' as boolean"))
    }
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as timestamp"))
}

pub fn parse_naive_time(value: &str) -> Result<NaiveTime> {
    const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
    for fmt in TIME_FORMATS {
        if let Ok(parsed) = NaiveTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as time"))
}

/// Parses a plain decimal literal: optional sign, digits, optional fraction.
/// Exponent notation is deliberately rejected so those values stay DOUBLE.
pub fn parse_decimal_literal(value: &str) -> Result<Decimal> {
    if value.contains(['e', 'E']) {
        return Err(anyhow!("Exponent notation is not a decimal literal"));
    }
    value
        .parse::<Decimal>()
        .map_err(|err| anyhow!("Failed to parse '{value}' as decimal: {err}"))
}

pub fn parse_typed_value(raw: &str, datatype: &ColumnType) -> Result<Value> {
    match datatype {
        ColumnType::Boolean => parse_bool(raw).map(Value::Boolean),
        ColumnType::BigInt => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|err| anyhow!("Failed to parse '{raw}' as integer: {err}")),
        ColumnType::Double => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|err| anyhow!("Failed to parse '{raw}' as double: {err}")),
        ColumnType::Decimal(_) => parse_decimal_literal(raw).map(Value::Decimal),
        ColumnType::Date => parse_naive_date(raw).map(Value::Date),
        ColumnType::Timestamp => parse_naive_datetime(raw).map(Value::DateTime),
        ColumnType::Time => parse_naive_time(raw).map(Value::Time),
        ColumnType::Uuid => Uuid::parse_str(raw)
            .map(Value::Uuid)
            .map_err(|err| anyhow!("Failed to parse '{raw}' as UUID: {err}")),
        ColumnType::Varchar => Ok(Value::Text(raw.to_string())),
    }
}
