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

//! End-to-end runs over day directories.

use std::fs;
use std::path::PathBuf;

use mmbench::lint::DiagnosticKind;
use mmbench::pipeline::{REPORT_MD, STATISTICS_CSV};
use mmbench::{
    compare, ingest_day, load_sources, store_days, validate_file, CompareConfig, LoadFilters,
    LoaderConfig, Value,
};
use mmbench_test::fixtures;

#[test]
fn ingest_then_compare_parquet_outputs() {
    let root = tempfile::tempdir().unwrap();
    let d1 = fixtures::clean_day_dir(root.path(), "2025-01-14").unwrap();
    let d2 = fixtures::clean_day_dir(root.path(), "2025-01-15").unwrap();
    ingest_day(&d1, None).unwrap();
    ingest_day(&d2, None).unwrap();

    let sources: Vec<PathBuf> = vec![d1.join("raw.parquet"), d2.join("raw.parquet")];
    let out = root.path().join("reports");
    let outcome = compare(&sources, &out, &CompareConfig::default()).unwrap();

    assert_eq!(outcome.load.dataset.len(), 8);
    assert_eq!(outcome.report.statistics.len(), 2);
    assert_eq!(
        outcome.report.statistics.get(0, "time_s_count"),
        Some(&Value::Int(4))
    );
    let md = fs::read_to_string(out.join(REPORT_MD)).unwrap();
    assert!(md.contains("## Speedup vs naive"));
    let stats = fs::read_to_string(out.join(STATISTICS_CSV)).unwrap();
    assert!(stats.starts_with("impl,n,time_s_mean,"));
}

#[test]
fn compare_reports_validation_errors_but_still_writes() {
    let root = tempfile::tempdir().unwrap();
    let raw = root.path().join("raw.csv");
    fs::write(&raw, fixtures::INVALID_RAW_CSV).unwrap();
    let out = root.path().join("reports");

    let outcome = compare(&[raw], &out, &CompareConfig::default()).unwrap();
    assert!(outcome.validation.fatal_errors >= 1);
    assert_eq!(outcome.validation.of_kind(&DiagnosticKind::OutOfRange).count(), 1);
    assert_eq!(outcome.written.len(), 4);
    assert!(out.join(STATISTICS_CSV).exists());
    assert!(out.join(REPORT_MD).exists());
}

#[test]
fn compare_with_filters_and_missing_baseline() {
    let root = tempfile::tempdir().unwrap();
    let raw = root.path().join("raw.csv");
    fs::write(&raw, fixtures::CLEAN_RAW_CSV).unwrap();

    let config = CompareConfig {
        loader: LoaderConfig {
            filters: LoadFilters {
                implementation: Some("openmp".into()),
                ..Default::default()
            },
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = compare(&[raw], &root.path().join("out"), &config).unwrap();
    assert_eq!(outcome.load.dataset.len(), 2);
    assert!(outcome.report.speedups.is_empty());
    assert_eq!(outcome.report.best_performers.len(), 1);
}

#[test]
fn legacy_and_current_sources_combine() {
    let root = tempfile::tempdir().unwrap();
    let raw = root.path().join("raw.csv");
    let legacy = root.path().join("legacy.csv");
    fs::write(&raw, fixtures::CLEAN_RAW_CSV).unwrap();
    fs::write(&legacy, fixtures::LEGACY_CSV).unwrap();

    let report = load_sources(&[raw, legacy], &LoaderConfig::default()).unwrap();
    let impls: Vec<String> = report
        .dataset
        .iter()
        .map(|r| r.get("impl").to_string())
        .collect();
    assert_eq!(impls, vec!["naive", "naive", "openmp", "openmp", "naive", "mpi"]);
}

#[test]
fn validate_file_reports_missing_column() {
    let root = tempfile::tempdir().unwrap();
    let raw = root.path().join("raw.csv");
    fs::write(&raw, fixtures::INVALID_RAW_CSV).unwrap();

    let report = validate_file(&raw, Default::default()).unwrap();
    assert!(report.fatal_errors >= 2);
    assert_eq!(report.of_kind(&DiagnosticKind::MissingColumns).count(), 1);
    assert_eq!(report.of_kind(&DiagnosticKind::OutOfRange).count(), 1);
}

#[test]
fn store_appends_across_invocations() {
    let root = tempfile::tempdir().unwrap();
    let d1 = fixtures::clean_day_dir(root.path(), "2025-01-14").unwrap();
    let d2 = fixtures::clean_day_dir(root.path(), "2025-01-15").unwrap();
    let db = root.path().join("db");

    store_days(&[d1], &db, &Default::default()).unwrap();
    store_days(&[d2], &db, &Default::default()).unwrap();

    let runs = mmbench::parquet::from_parquet(&db.join("runs.parquet")).unwrap();
    assert_eq!(runs.len(), 8);
    let env = mmbench::parquet::from_parquet(&db.join("env.parquet")).unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env.get(1, "day"), Some(&Value::from("2025-01-15")));
}
