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

//! Builders for measurement fixtures.

use mmbench_core::schema::expected_gflops;
use mmbench_core::{Dataset, MeasurementRecord};

/// Builder for a run's worth of consistent measurements.
///
/// Trials are numbered from 1 per `(impl, n)` call and `gflops` is derived
/// from size and time, so the result passes validation unless you break it.
///
/// # Examples
///
/// ```
/// use mmbench_test::fixtures::builders::RunBuilder;
///
/// let ds = RunBuilder::new("r1")
///     .measure("naive", 256, &[0.02, 0.02])
///     .measure("openmp", 256, &[0.01])
///     .build();
///
/// assert_eq!(ds.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RunBuilder {
    run_id: String,
    hostname: String,
    datetime_iso: String,
    algo: String,
    precision: String,
    threads: Option<i64>,
    records: Vec<MeasurementRecord>,
}

impl RunBuilder {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            hostname: "node01".to_string(),
            datetime_iso: "2025-01-14T09:00:00Z".to_string(),
            algo: "gemm".to_string(),
            precision: "fp64".to_string(),
            threads: None,
            records: Vec::new(),
        }
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = precision.into();
        self
    }

    pub fn threads(mut self, threads: i64) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Add one trial per entry of `times`, numbered from 1.
    pub fn measure(self, implementation: &str, n: i64, times: &[f64]) -> Self {
        self.measure_from(implementation, n, 1, times)
    }

    /// Add one trial per entry of `times`, numbered from `first_trial`.
    pub fn measure_from(
        mut self,
        implementation: &str,
        n: i64,
        first_trial: i64,
        times: &[f64],
    ) -> Self {
        for (offset, &time_s) in times.iter().enumerate() {
            self.records.push(MeasurementRecord {
                run_id: Some(self.run_id.clone()),
                datetime_iso: Some(self.datetime_iso.clone()),
                hostname: Some(self.hostname.clone()),
                algo: Some(self.algo.clone()),
                implementation: Some(implementation.to_string()),
                precision: Some(self.precision.clone()),
                n: Some(n),
                trial: Some(first_trial + offset as i64),
                time_s: Some(time_s),
                gflops: expected_gflops(n, time_s),
                threads: self.threads,
                processes: None,
            });
        }
        self
    }

    /// Add a single record as given, without deriving anything.
    pub fn record(mut self, record: MeasurementRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn build(self) -> Dataset {
        MeasurementRecord::to_dataset(self.records)
    }
}
