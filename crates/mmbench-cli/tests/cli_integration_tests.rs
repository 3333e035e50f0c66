// mmbench - Matrix Multiplication Benchmark Analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use mmbench_test::{clean_day_dir, write_day_dir, CLEAN_RAW_CSV, INVALID_RAW_CSV, LEGACY_CSV};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mmbench_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mmbench").expect("Failed to find mmbench binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    mmbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("matrix multiplication benchmark pipeline"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_help_lists_commands() {
    mmbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("store"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_version_output() {
    mmbench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mmbench"));
}

// ===== Validate Tests =====

#[test]
fn test_validate_clean_file() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", CLEAN_RAW_CSV);

    mmbench_cmd()
        .arg("validate")
        .arg("--raw")
        .arg(&raw)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation OK"));
}

#[test]
fn test_validate_invalid_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", INVALID_RAW_CSV);

    mmbench_cmd()
        .arg("validate")
        .arg("--raw")
        .arg(&raw)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("precision"))
        .stderr(predicate::str::contains("error group(s)"));
}

#[test]
fn test_validate_missing_file_exits_two() {
    let dir = TempDir::new().unwrap();

    mmbench_cmd()
        .arg("validate")
        .arg("--raw")
        .arg(dir.path().join("missing.csv"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no such file"));
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", CLEAN_RAW_CSV);

    let output = mmbench_cmd()
        .arg("validate")
        .arg("--raw")
        .arg(&raw)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["fatal_errors"], 0);
    assert!(json["diagnostics"].is_array());
}

#[test]
fn test_validate_unknown_format() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", CLEAN_RAW_CSV);

    mmbench_cmd()
        .arg("validate")
        .arg("--raw")
        .arg(&raw)
        .arg("--format")
        .arg("yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn test_validate_requires_raw_argument() {
    mmbench_cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--raw"));
}

// ===== Ingest Tests =====

#[test]
fn test_ingest_writes_parquet() {
    let root = TempDir::new().unwrap();
    let day = clean_day_dir(root.path(), "2025-01-14").unwrap();

    mmbench_cmd()
        .arg("ingest")
        .arg("--day")
        .arg(&day)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote Parquet"));

    assert!(day.join("raw.parquet").exists());
}

#[test]
fn test_ingest_custom_output() {
    let root = TempDir::new().unwrap();
    let day = clean_day_dir(root.path(), "2025-01-14").unwrap();
    let out = root.path().join("ingested.parquet");

    mmbench_cmd()
        .arg("ingest")
        .arg("--day")
        .arg(&day)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    assert!(out.exists());
    assert!(!day.join("raw.parquet").exists());
}

#[test]
fn test_ingest_without_raw_csv_exits_two() {
    let root = TempDir::new().unwrap();
    let day = root.path().join("2025-01-14");
    fs::create_dir_all(&day).unwrap();

    mmbench_cmd()
        .arg("ingest")
        .arg("--day")
        .arg(&day)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("raw.csv"));
}

#[test]
fn test_ingest_with_validation_errors_still_writes() {
    let root = TempDir::new().unwrap();
    let day = write_day_dir(root.path(), "2025-01-15", INVALID_RAW_CSV, None).unwrap();

    mmbench_cmd()
        .arg("ingest")
        .arg("--day")
        .arg(&day)
        .assert()
        .success()
        .stderr(predicate::str::contains("continuing to write for inspection"));

    assert!(day.join("raw.parquet").exists());
}

// ===== Store Tests =====

#[test]
fn test_store_writes_runs_table() {
    let root = TempDir::new().unwrap();
    let first = clean_day_dir(root.path(), "2025-01-14").unwrap();
    let second = clean_day_dir(root.path(), "2025-01-15").unwrap();
    let out = root.path().join("db");

    mmbench_cmd()
        .arg("store")
        .arg("--days")
        .arg(&first)
        .arg(&second)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-14: 4 rows"))
        .stdout(predicate::str::contains("2025-01-15: 4 rows"));

    assert!(out.join("runs.parquet").exists());
}

#[test]
fn test_store_day_with_validation_errors_is_logged() {
    let root = TempDir::new().unwrap();
    let day = write_day_dir(root.path(), "2025-01-15", INVALID_RAW_CSV, None).unwrap();
    let out = root.path().join("db");

    mmbench_cmd()
        .arg("store")
        .arg("--days")
        .arg(&day)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-15: 1 rows"))
        .stderr(predicate::str::contains("stored for audit"));

    assert!(out.join("runs.parquet").exists());
}

#[test]
fn test_store_missing_day_exits_two() {
    let root = TempDir::new().unwrap();

    mmbench_cmd()
        .arg("store")
        .arg("--days")
        .arg(root.path().join("2025-01-14"))
        .arg("--out")
        .arg(root.path().join("db"))
        .assert()
        .code(2);
}

// ===== Compare Tests =====

#[test]
fn test_compare_writes_tables_and_report() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", CLEAN_RAW_CSV);
    let out = dir.path().join("reports");

    mmbench_cmd()
        .arg("compare")
        .arg(&raw)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("naive: 2 measurements"))
        .stdout(predicate::str::contains("openmp: 2 measurements"))
        .stdout(predicate::str::contains("256x256"));

    for name in [
        "statistics.csv",
        "speedup.csv",
        "best_performers.csv",
        "comparison_report.md",
    ] {
        assert!(out.join(name).exists(), "missing {}", name);
    }

    let speedup = fs::read_to_string(out.join("speedup.csv")).unwrap();
    assert!(speedup.contains("openmp"));
}

#[test]
fn test_compare_logs_validation_errors_and_still_writes() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", INVALID_RAW_CSV);
    let out = dir.path().join("reports");

    mmbench_cmd()
        .arg("compare")
        .arg(&raw)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total rows: 1"))
        .stderr(predicate::str::contains("out-of-range time_s"))
        .stderr(predicate::str::contains("error(s); results include the offending rows"));

    assert!(out.join("statistics.csv").exists());
}

#[test]
fn test_compare_directory_with_legacy_source() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "raw.csv", CLEAN_RAW_CSV);
    write_file(&dir, "legacy.csv", LEGACY_CSV);
    let out = dir.path().join("reports");

    mmbench_cmd()
        .arg("compare")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("mpi: 1 measurements"))
        .stdout(predicate::str::contains("Total rows: 6"));
}

#[test]
fn test_compare_unknown_baseline_warns() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", CLEAN_RAW_CSV);

    mmbench_cmd()
        .arg("compare")
        .arg(&raw)
        .arg("--baseline")
        .arg("cublas")
        .arg("--output-dir")
        .arg(dir.path().join("reports"))
        .assert()
        .success()
        .stdout(predicate::str::contains("no speedups against baseline 'cublas'"));
}

#[test]
fn test_compare_missing_input_exits_two() {
    let dir = TempDir::new().unwrap();

    mmbench_cmd()
        .arg("compare")
        .arg(dir.path().join("nope.csv"))
        .arg("--output-dir")
        .arg(dir.path().join("reports"))
        .assert()
        .code(2);
}

#[test]
fn test_compare_filter_excluding_everything_exits_two() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(&dir, "raw.csv", CLEAN_RAW_CSV);

    mmbench_cmd()
        .arg("compare")
        .arg(&raw)
        .arg("--min-size")
        .arg("4096")
        .arg("--output-dir")
        .arg(dir.path().join("reports"))
        .assert()
        .code(2);
}
