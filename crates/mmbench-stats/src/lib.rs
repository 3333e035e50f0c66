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

//! Aggregate statistics and speedup analysis for matrix-multiplication
//! benchmark measurements.
//!
//! # Example
//!
//! ```
//! use mmbench_core::{Dataset, Value};
//! use mmbench_stats::{aggregate, speedup, AggregationSpec, GroupKeys, SpeedupConfig};
//!
//! let mut ds = Dataset::new(["impl", "n", "time_s"]);
//! ds.push_row(vec!["naive".into(), Value::Int(256), Value::Float(0.02)]).unwrap();
//! ds.push_row(vec!["openmp".into(), Value::Int(256), Value::Float(0.01)]).unwrap();
//!
//! let stats = aggregate(&ds, GroupKeys::default().as_slice(), &AggregationSpec::default());
//! assert_eq!(stats.len(), 2);
//!
//! let records = speedup(&ds, &SpeedupConfig::default());
//! assert_eq!(records[0].implementation, "openmp");
//! ```

mod aggregate;
mod outliers;
mod report;
mod speedup;

pub use aggregate::{
    aggregate, compute_statistics, group_rows, group_statistics, AggregateStat,
    AggregationSpec, GroupKeys, MetricSpec, Stat, Statistics,
};
pub use outliers::{filter_outliers, DEFAULT_Z_THRESHOLD};
pub use report::{
    export_markdown, markdown_table, render_markdown, ComparisonReport, ReportConfig,
    ReportSection,
};
pub use speedup::{
    best_performers, best_performers_from_aggregates, best_performers_table, mean_times,
    speedup, speedup_pivot, speedup_table, summarize_implementations, BestPerformer,
    ImplementationSummary, SpeedupConfig, SpeedupRecord, DEFAULT_BASELINE,
};
