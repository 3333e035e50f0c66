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

//! Column vocabulary and the typed measurement record.

use crate::dataset::{Dataset, Row};
use crate::value::Value;

/// Canonical column names.
pub mod columns {
    pub const RUN_ID: &str = "run_id";
    pub const DATETIME_ISO: &str = "datetime_iso";
    pub const HOSTNAME: &str = "hostname";
    pub const ALGO: &str = "algo";
    pub const IMPL: &str = "impl";
    pub const PRECISION: &str = "precision";
    pub const N: &str = "n";
    pub const TRIAL: &str = "trial";
    pub const TIME_S: &str = "time_s";
    pub const GFLOPS: &str = "gflops";
    pub const THREADS: &str = "threads";
    pub const PROCESSES: &str = "processes";
    pub const EXECUTION_TIME_MS: &str = "execution_time_ms";
    pub const DAY: &str = "day";
}

/// Columns every raw measurement table must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    columns::RUN_ID,
    columns::DATETIME_ISO,
    columns::HOSTNAME,
    columns::ALGO,
    columns::IMPL,
    columns::PRECISION,
    columns::N,
    columns::TRIAL,
    columns::TIME_S,
    columns::GFLOPS,
];

/// Legacy column names and the canonical names they map to.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("implementation", columns::IMPL),
    ("matrix_size", columns::N),
    ("time_seconds", columns::TIME_S),
];

/// Floating-point operations of one dense `n x n` multiply.
pub fn flop_count(n: i64) -> f64 {
    let n = n as f64;
    2.0 * n * n * n
}

/// Throughput implied by size and wall time, in GFLOP/s.
///
/// Returns `None` for non-positive times.
pub fn expected_gflops(n: i64, time_s: f64) -> Option<f64> {
    (time_s > 0.0).then(|| flop_count(n) / (time_s * 1e9))
}

/// One benchmark trial with every field typed.
///
/// Unknown or unparsable cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementRecord {
    pub run_id: Option<String>,
    pub datetime_iso: Option<String>,
    pub hostname: Option<String>,
    pub algo: Option<String>,
    pub implementation: Option<String>,
    pub precision: Option<String>,
    pub n: Option<i64>,
    pub trial: Option<i64>,
    pub time_s: Option<f64>,
    pub gflops: Option<f64>,
    pub threads: Option<i64>,
    pub processes: Option<i64>,
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl MeasurementRecord {
    /// Read a record out of a dataset row using lenient coercion.
    pub fn from_row(row: Row<'_>) -> Self {
        Self {
            run_id: text(row.get(columns::RUN_ID)),
            datetime_iso: text(row.get(columns::DATETIME_ISO)),
            hostname: text(row.get(columns::HOSTNAME)),
            algo: text(row.get(columns::ALGO)),
            implementation: text(row.get(columns::IMPL)),
            precision: text(row.get(columns::PRECISION)),
            n: row.get(columns::N).coerce_int(),
            trial: row.get(columns::TRIAL).coerce_int(),
            time_s: row.get(columns::TIME_S).coerce_float(),
            gflops: row.get(columns::GFLOPS).coerce_float(),
            threads: row.get(columns::THREADS).coerce_int(),
            processes: row.get(columns::PROCESSES).coerce_int(),
        }
    }

    /// Throughput implied by this record's size and time.
    pub fn expected_gflops(&self) -> Option<f64> {
        expected_gflops(self.n?, self.time_s?)
    }

    fn into_values(self) -> Vec<Value> {
        vec![
            self.run_id.into(),
            self.datetime_iso.into(),
            self.hostname.into(),
            self.algo.into(),
            self.implementation.into(),
            self.precision.into(),
            self.n.into(),
            self.trial.into(),
            self.time_s.into(),
            self.gflops.into(),
            self.threads.into(),
            self.processes.into(),
        ]
    }

    /// Build a dataset with the canonical columns plus `threads` and `processes`.
    pub fn to_dataset<I>(records: I) -> Dataset
    where
        I: IntoIterator<Item = MeasurementRecord>,
    {
        let mut names: Vec<&str> = REQUIRED_COLUMNS.to_vec();
        names.push(columns::THREADS);
        names.push(columns::PROCESSES);
        let mut ds = Dataset::new(names);
        for record in records {
            ds.add_row(record.into_values());
        }
        ds
    }
}
