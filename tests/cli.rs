use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn foo_bar_csv(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "foo_bar.csv",
        "foo,bar\n1,a\n2,b\n3,c\n4,d\n5,e\n6,f\n7,g\n",
    )
}

#[test]
fn test_shows_first_rows_by_default() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "\
shape: (5, 2)
┌─────┬─────┐
│ foo ┆ bar │
│ --- ┆ --- │
│ i64 ┆ str │
╞═════╪═════╡
│ 1   ┆ a   │
│ 2   ┆ b   │
│ 3   ┆ c   │
│ 4   ┆ d   │
│ 5   ┆ e   │
└─────┴─────┘
",
        );
}

#[test]
fn test_limit_and_options() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--limit", "2", "--set", "tbl_formatting=ASCII_FULL_CONDENSED"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("shape: (2, 2)\n+-----+-----+\n"))
        .stdout(predicate::str::contains("| 2   | b   |\n+-----+-----+\n"));
}

#[test]
fn test_negative_limit_and_all() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["-n", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("shape: (2, 2)"));

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("│ 7   ┆ g   │"));
}

#[test]
fn test_environment_defaults() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .env("FRAMEFMT_TBL_HIDE_DATAFRAME_SHAPE", "1")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("┌"));
}

#[test]
fn test_json_and_html_formats() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "data.json", r#"[{"x": 1.5, "y": "<b>"}]"#);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dtype\": \"f64\""))
        .stdout(predicate::str::contains("\"shape\""));

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<td>&lt;b&gt;</td>"));
}

#[test]
fn test_compact_json() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--format", "json", "--compact", "-n", "1"])
        .assert()
        .success()
        .stdout(
            "{\"shape\":[1,2],\"columns\":[{\"name\":\"foo\",\"dtype\":\"i64\"},{\"name\":\"bar\",\"dtype\":\"str\"}],\"rows\":[[1,\"a\"]]}\n",
        );
}

#[test]
fn test_invalid_date_format_fails() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--set", "date_format=%Q"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("date_format"));
}

#[test]
fn test_invalid_option_value_fails() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--set", "tbl_cell_alignment=DIAGONAL"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tbl_cell_alignment"))
        .stderr(predicate::str::contains("DIAGONAL"));
}

#[test]
fn test_unknown_option_fails() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .args(["--set", "tbl_colour=red"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown display option: tbl_colour"));
}

#[test]
fn test_options_file() {
    let dir = TempDir::new().unwrap();
    let path = foo_bar_csv(&dir);
    let options = write_file(
        &dir,
        "options.json",
        r#"{"tbl_formatting": "MARKDOWN", "tbl_hide_dataframe_shape": true}"#,
    );

    cargo_bin_cmd!("framefmt")
        .arg(&path)
        .arg("--options")
        .arg(&options)
        .args(["--limit", "1"])
        .assert()
        .success()
        .stdout("| foo (i64) | bar (str) |\n|-----------|-----------|\n| 1         | a         |\n");
}

#[test]
fn test_missing_file_fails() {
    cargo_bin_cmd!("framefmt")
        .arg("does-not-exist.csv")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}
