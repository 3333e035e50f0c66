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

//! Pre-built measurement datasets.

use super::builders::RunBuilder;
use mmbench_core::{Dataset, MeasurementRecord, Value};

/// Two implementations at two sizes, two trials each; complete, in range and
/// consistent.
///
/// Mean times: naive 0.02 s / 0.1 s, openmp 0.01 s / 0.025 s at n = 256 / 512,
/// so openmp's speedups are 2.0 and 4.0.
pub fn clean_run() -> Dataset {
    RunBuilder::new("r1")
        .threads(8)
        .measure("naive", 256, &[0.02, 0.02])
        .measure("openmp", 256, &[0.01, 0.01])
        .measure("naive", 512, &[0.1, 0.1])
        .measure("openmp", 512, &[0.025, 0.025])
        .build()
}

/// Baseline at 10 ms and an implementation at 2 ms for n = 128, plus a size
/// the baseline never ran.
pub fn speedup_case() -> Dataset {
    RunBuilder::new("r1")
        .measure("naive", 128, &[0.009, 0.011])
        .measure("mpi", 128, &[0.002, 0.002])
        .measure("mpi", 2048, &[0.5])
        .build()
}

/// Throughput of 1.0, 8.5 and 7.9 GFLOP/s at n = 1024.
pub fn best_performer_case() -> Dataset {
    let record = |implementation: &str, gflops: f64| MeasurementRecord {
        run_id: Some("r1".into()),
        implementation: Some(implementation.into()),
        n: Some(1024),
        trial: Some(1),
        gflops: Some(gflops),
        ..Default::default()
    };
    MeasurementRecord::to_dataset(vec![
        record("naive", 1.0),
        record("openmp", 8.5),
        record("mpi", 7.9),
    ])
}

/// `clean_run` with one negative size, one over-long time and one
/// unparsable gflops cell.
pub fn with_range_violations() -> Dataset {
    let mut ds = clean_run();
    ds.set(0, "n", Value::Int(-4));
    ds.set(1, "time_s", Value::Float(90_000.0));
    ds.set(2, "gflops", Value::from("fast"));
    ds
}

/// A run where openmp at n = 256 starts counting trials at 2.
pub fn with_trial_gap() -> Dataset {
    RunBuilder::new("r1")
        .measure("naive", 256, &[0.02])
        .measure_from("openmp", 256, 2, &[0.01, 0.01])
        .build()
}

/// Rows in the legacy vocabulary: `implementation`, `matrix_size` and
/// `execution_time_ms`, without `time_s`.
pub fn legacy_run() -> Dataset {
    let mut ds = Dataset::new(["implementation", "matrix_size", "execution_time_ms", "gflops"]);
    for (implementation, n, ms) in [("naive", 256, 20.0), ("mpi", 256, 5.0)] {
        let gflops = mmbench_core::expected_gflops(n, ms / 1000.0);
        ds.add_row(vec![
            implementation.into(),
            Value::Int(n),
            Value::Float(ms),
            gflops.into(),
        ]);
    }
    ds
}
