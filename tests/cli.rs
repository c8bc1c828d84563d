mod common;

use common::TestWorkspace;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn csv_profile() -> Command {
    Command::cargo_bin("csv-profile").expect("binary exists")
}

#[test]
fn schema_command_prints_the_inferred_schema_table() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.csv", common::SAMPLE_CSV);
    csv_profile()
        .args(["schema", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("column_name")
                .and(contains("column_type"))
                .and(contains("BIGINT"))
                .and(contains("VARCHAR")),
        );
}

#[test]
fn schema_command_emits_json() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.csv", common::SAMPLE_CSV);
    let output = csv_profile()
        .args(["schema", "-i", path.to_str().unwrap(), "--json"])
        .output()
        .expect("run schema --json");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("schema JSON parses");
    assert_eq!(parsed[0]["column_name"], "id");
    assert_eq!(parsed[0]["column_type"], "BIGINT");
}

#[test]
fn profile_command_prints_schema_and_statistics_tables() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.csv", common::SAMPLE_CSV);
    csv_profile()
        .args(["profile", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("column_name")
                .and(contains("Most Frequent Value (Mode)"))
                .and(contains("Alice"))
                .and(contains("Mean")),
        );
}

#[test]
fn profile_command_emits_sorted_json_records() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.csv", common::SAMPLE_CSV);
    let output = csv_profile()
        .args(["profile", "-i", path.to_str().unwrap(), "--json"])
        .output()
        .expect("run profile --json");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("profile JSON parses");
    let records = parsed.as_array().expect("array of records");
    assert!(!records.is_empty());
    let keys: Vec<(String, String)> = records
        .iter()
        .map(|r| {
            (
                r["column"].as_str().unwrap_or_default().to_string(),
                r["metric"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn profile_output_flag_writes_a_bom_prefixed_export() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.csv", common::SAMPLE_CSV);
    let export = workspace.path().join("out.csv");
    csv_profile()
        .args([
            "profile",
            "-i",
            path.to_str().unwrap(),
            "-o",
            export.to_str().unwrap(),
        ])
        .assert()
        .success();
    let bytes = std::fs::read(&export).expect("read export");
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    let body = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 export");
    assert!(body.starts_with("column,type,metric,value"));
    assert!(body.contains("name,VARCHAR,Most Frequent Value (Mode),Alice"));
}

#[test]
fn profile_export_flag_derives_the_stats_name() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.csv", common::SAMPLE_CSV);
    csv_profile()
        .args(["profile", "-i", path.to_str().unwrap(), "--export"])
        .assert()
        .success();
    assert!(workspace.path().join("people_stats.csv").exists());
}

#[test]
fn malformed_input_fails_with_an_error() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("ragged.csv", "a,b\n1,2\n3\n");
    csv_profile()
        .args(["profile", "-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn missing_input_fails_with_an_error() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("absent.csv");
    csv_profile()
        .args(["schema", "-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn tsv_extension_switches_the_default_delimiter() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("people.tsv", "id\tname\n1\tAlice\n2\tBob\n");
    csv_profile()
        .args(["schema", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("id").and(contains("name")));
}
