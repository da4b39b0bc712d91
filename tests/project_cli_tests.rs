use predicates::prelude::*;

fn recalc() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("recalc").unwrap()
}

#[test]
fn default_projection_prints_totals_and_years() {
    recalc()
        .args(["project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total contributed:      S/ 10,000"))
        .stdout(predicate::str::contains("Accumulated balance"))
        .stdout(predicate::str::contains("12.00%"));
}

#[test]
fn three_segment_scenario_as_json() {
    let output = recalc()
        .args([
            "project",
            "--years",
            "10",
            "--contribution",
            "1000",
            "--segment",
            "1-2:8",
            "--segment",
            "3-5:10",
            "--segment",
            "6-10:12",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ok"], true);
    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    let balance = rows[1]["balance"].as_f64().unwrap();
    assert!((balance - 2246.4).abs() < 1e-6);
}

#[test]
fn gap_between_segments_exits_with_errors() {
    recalc()
        .args([
            "project",
            "--years",
            "10",
            "--segment",
            "1-2:8",
            "--segment",
            "4-10:12",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Fix the following:"))
        .stdout(predicate::str::contains("correlative, with no gaps"));
}

#[test]
fn zero_contribution_is_reported() {
    recalc()
        .args(["project", "--contribution", "0"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "The annual capital must be greater than 0.",
        ));
}

#[test]
fn malformed_segment_flag_is_a_usage_error() {
    recalc()
        .args(["project", "--segment", "1:8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FROM-TO"));
}
