//! Table-driven column classification.
//!
//! Partitions declared column types into numerical and categorical sets. The
//! lookup is by base type name: parenthesized parameters are stripped first
//! (`DECIMAL(10,2)` -> `DECIMAL`), then angle-bracketed element types
//! (`LIST<INT>` -> `LIST`). Unknown base names classify as neither and are
//! excluded from statistics. Classification is total and never fails.

use crate::schema::ColumnMeta;

pub const NUMERIC_TYPES: &[&str] = &[
    "BIGINT", "DOUBLE", "DECIMAL", "FLOAT", "INTEGER", "SMALLINT", "TINYINT", "UBIGINT",
    "UINTEGER", "USMALLINT", "UTINYINT", "HUGEINT",
];

pub const CATEGORY_LIKE_TYPES: &[&str] = &[
    "VARCHAR",
    "TEXT",
    "DATE",
    "TIMESTAMP",
    "TIME",
    "BOOLEAN",
    "UUID",
    "INTERVAL",
    "ENUM",
    "LIST",
    "STRUCT",
    "MAP",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    Numerical,
    Categorical,
    Unclassified,
}

/// Strips type parameters down to the bare upper-case base name.
pub fn base_type_name(declared: &str) -> String {
    let mut base = declared
        .split('(')
        .next()
        .unwrap_or(declared)
        .to_uppercase();
    if let Some(idx) = base.find('<') {
        base.truncate(idx);
    }
    base.trim().to_string()
}

pub fn classify(declared: &str) -> ColumnClass {
    let base = base_type_name(declared);
    if NUMERIC_TYPES.contains(&base.as_str()) {
        ColumnClass::Numerical
    } else if CATEGORY_LIKE_TYPES.contains(&base.as_str()) {
        ColumnClass::Categorical
    } else {
        ColumnClass::Unclassified
    }
}

/// Splits a schema into numerical and categorical column names, preserving
/// declaration order. Unclassified columns appear in neither list.
pub fn partition(schema: &[ColumnMeta]) -> (Vec<String>, Vec<String>) {
    let mut numerical = Vec::new();
    let mut categorical = Vec::new();
    for meta in schema {
        match classify(&meta.declared_type) {
            ColumnClass::Numerical => numerical.push(meta.name.clone()),
            ColumnClass::Categorical => categorical.push(meta.name.clone()),
            ColumnClass::Unclassified => {}
        }
    }
    (numerical, categorical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_types_classify_like_their_base() {
        assert_eq!(classify("DECIMAL(10,2)"), ColumnClass::Numerical);
        assert_eq!(classify("VARCHAR(255)"), ColumnClass::Categorical);
    }

    #[test]
    fn container_types_are_categorical_regardless_of_element() {
        assert_eq!(classify("LIST<INT>"), ColumnClass::Categorical);
        assert_eq!(classify("MAP<VARCHAR, DOUBLE>"), ColumnClass::Categorical);
        assert_eq!(classify("STRUCT<a INT, b VARCHAR>"), ColumnClass::Categorical);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(classify("bigint"), ColumnClass::Numerical);
        assert_eq!(classify("boolean"), ColumnClass::Categorical);
    }

    #[test]
    fn unknown_types_are_unclassified() {
        assert_eq!(classify("GEOMETRY"), ColumnClass::Unclassified);
        assert_eq!(classify(""), ColumnClass::Unclassified);
    }
}
