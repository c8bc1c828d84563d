mod common;

use common::TestWorkspace;

use proptest::prelude::*;

use csv_profile::export::{default_export_path, to_csv, write_export};
use csv_profile::reshape::TidyRecord;
use csv_profile::stats::StatValue;

fn record(column: &str, metric: &str, value: StatValue) -> TidyRecord {
    TidyRecord {
        column: column.to_string(),
        inferred_type: "BIGINT".to_string(),
        metric: metric.to_string(),
        value,
    }
}

/// Re-splits exported text with the same quoting rules the exporter uses.
fn resplit(text: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(text.as_bytes());
    reader
        .records()
        .map(|row| {
            row.expect("re-split row")
                .iter()
                .map(|cell| cell.to_string())
                .collect()
        })
        .collect()
}

#[test]
fn header_row_lists_the_field_names_in_order() {
    let csv = to_csv(&[record("score", "Mean", StatValue::Float(80.0))]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "column,type,metric,value");
    assert_eq!(lines[1], "score,BIGINT,Mean,80");
}

#[test]
fn output_has_no_trailing_newline() {
    let csv = to_csv(&[record("score", "Mean", StatValue::Float(80.0))]);
    assert!(!csv.ends_with('\n'));
}

#[test]
fn empty_record_list_exports_an_empty_string() {
    assert_eq!(to_csv(&[]), "");
}

#[test]
fn null_values_become_empty_cells() {
    let csv = to_csv(&[record("score", "Mean", StatValue::Null)]);
    assert!(csv.ends_with("score,BIGINT,Mean,"));
}

#[test]
fn cells_with_separators_are_quoted_and_doubled() {
    let csv = to_csv(&[record(
        "notes, extra",
        "Most \"Frequent\"",
        StatValue::Text("line1\nline2".to_string()),
    )]);
    let rows = resplit(&csv);
    assert_eq!(rows[1][0], "notes, extra");
    assert_eq!(rows[1][2], "Most \"Frequent\"");
    assert_eq!(rows[1][3], "line1\nline2");
}

#[test]
fn export_file_is_bom_prefixed() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("out.csv");
    write_export(&path, &[record("score", "Mean", StatValue::Float(80.0))]).expect("write export");
    let bytes = std::fs::read(&path).expect("read export");
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 body");
    assert!(text.starts_with("column,type,metric,value"));
}

#[test]
fn default_export_name_appends_stats_to_the_stem() {
    let path = default_export_path(std::path::Path::new("data/sales.csv"));
    assert_eq!(path, std::path::PathBuf::from("data/sales_stats.csv"));
}

fn stat_value_strategy() -> impl Strategy<Value = StatValue> {
    prop_oneof![
        Just(StatValue::Null),
        any::<i64>().prop_map(StatValue::Integer),
        (-1.0e12..1.0e12).prop_map(StatValue::Float),
        "[a-zA-Z0-9 ,\"\n_-]{0,24}".prop_map(StatValue::Text),
    ]
}

fn record_strategy() -> impl Strategy<Value = TidyRecord> {
    (
        "[a-zA-Z0-9 ,\"\n_-]{1,16}",
        "[A-Z()<>,0-9]{1,12}",
        "[a-zA-Z0-9 ,\"\n_-]{1,16}",
        stat_value_strategy(),
    )
        .prop_map(|(column, inferred_type, metric, value)| TidyRecord {
            column,
            inferred_type,
            metric,
            value,
        })
}

proptest! {
    #[test]
    fn export_round_trips_cell_strings(
        records in proptest::collection::vec(record_strategy(), 1..12)
    ) {
        let exported = to_csv(&records);
        let rows = resplit(&exported);

        prop_assert_eq!(rows.len(), records.len() + 1);
        prop_assert_eq!(&rows[0], &["column", "type", "metric", "value"]);
        for (row, record) in rows.iter().skip(1).zip(&records) {
            prop_assert_eq!(&row[0], &record.column);
            prop_assert_eq!(&row[1], &record.inferred_type);
            prop_assert_eq!(&row[2], &record.metric);
            prop_assert_eq!(&row[3], &record.value.as_display());
        }
    }
}
