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

//! Speedup relative to a baseline implementation, and best performers.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use mmbench_core::schema::columns;
use mmbench_core::{Dataset, Row, Value};
use serde::Serialize;
use tracing::{debug, warn};

/// Implementation speedups are measured against unless configured otherwise.
pub const DEFAULT_BASELINE: &str = "naive";

/// Column names and baseline used by the speedup analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedupConfig {
    pub baseline: String,
    pub impl_column: String,
    pub size_column: String,
    pub time_column: String,
    pub throughput_column: String,
}

impl Default for SpeedupConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE.to_string(),
            impl_column: columns::IMPL.to_string(),
            size_column: columns::N.to_string(),
            time_column: columns::TIME_S.to_string(),
            throughput_column: columns::GFLOPS.to_string(),
        }
    }
}

impl SpeedupConfig {
    pub fn with_baseline(mut self, baseline: impl Into<String>) -> Self {
        self.baseline = baseline.into();
        self
    }
}

/// Speedup of one implementation at one size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupRecord {
    pub implementation: String,
    pub matrix_size: i64,
    pub speedup: f64,
}

/// The fastest-throughput measurement at one size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPerformer {
    pub matrix_size: i64,
    pub implementation: String,
    pub gflops: f64,
}

fn implementation_of(row: Row<'_>, column: &str) -> Option<String> {
    match row.get(column) {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Mean of the known time values per implementation and size.
///
/// Implementations are returned in first-occurrence order; sizes ascend.
pub fn mean_times(dataset: &Dataset, config: &SpeedupConfig) -> Vec<(String, BTreeMap<i64, f64>)> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, BTreeMap<i64, (f64, usize)>> = HashMap::new();

    for row in dataset.iter() {
        let Some(implementation) = implementation_of(row, &config.impl_column) else {
            continue;
        };
        let Some(size) = row.get(&config.size_column).coerce_int() else {
            continue;
        };
        let Some(time) = row.get(&config.time_column).coerce_float() else {
            continue;
        };
        let per_size = sums.entry(implementation.clone()).or_insert_with(|| {
            order.push(implementation);
            BTreeMap::new()
        });
        let slot = per_size.entry(size).or_insert((0.0, 0));
        slot.0 += time;
        slot.1 += 1;
    }

    order
        .into_iter()
        .map(|name| {
            let means = sums
                .remove(&name)
                .unwrap_or_default()
                .into_iter()
                .map(|(size, (sum, count))| (size, sum / count as f64))
                .collect();
            (name, means)
        })
        .collect()
}

/// Speedup of every non-baseline implementation at each size the baseline
/// also ran.
///
/// A missing baseline yields an empty result and a warning. Sizes measured
/// on only one side are left out.
///
/// # Examples
///
/// ```
/// use mmbench_core::{Dataset, Value};
/// use mmbench_stats::{speedup, SpeedupConfig};
///
/// let mut ds = Dataset::new(["impl", "n", "time_s"]);
/// ds.push_row(vec!["naive".into(), Value::Int(128), Value::Float(0.01)]).unwrap();
/// ds.push_row(vec!["mpi".into(), Value::Int(128), Value::Float(0.002)]).unwrap();
///
/// let records = speedup(&ds, &SpeedupConfig::default());
/// assert_eq!(records.len(), 1);
/// assert!((records[0].speedup - 5.0).abs() < 1e-9);
/// ```
pub fn speedup(dataset: &Dataset, config: &SpeedupConfig) -> Vec<SpeedupRecord> {
    let means = mean_times(dataset, config);

    let Some((_, baseline)) = means.iter().find(|(name, _)| *name == config.baseline) else {
        warn!(
            baseline = %config.baseline,
            "baseline implementation not found; no speedups computed"
        );
        return Vec::new();
    };

    let mut records = Vec::new();
    for (implementation, per_size) in &means {
        if *implementation == config.baseline {
            continue;
        }
        for (&size, &mean) in per_size {
            let Some(&base) = baseline.get(&size) else {
                continue;
            };
            if mean == 0.0 {
                debug!(%implementation, size, "zero mean time; speedup skipped");
                continue;
            }
            records.push(SpeedupRecord {
                implementation: implementation.clone(),
                matrix_size: size,
                speedup: base / mean,
            });
        }
    }
    records
}

/// Speedup records as a table: `implementation, matrix_size, speedup`.
pub fn speedup_table(records: &[SpeedupRecord]) -> Dataset {
    let mut out = Dataset::new(["implementation", "matrix_size", "speedup"]);
    for r in records {
        out.add_row(vec![
            r.implementation.as_str().into(),
            Value::Int(r.matrix_size),
            Value::Float(r.speedup),
        ]);
    }
    out
}

/// Matrix size by implementation, cells holding the speedup or null.
pub fn speedup_pivot(records: &[SpeedupRecord]) -> Dataset {
    let mut implementations: Vec<&str> = Vec::new();
    for r in records {
        if !implementations.contains(&r.implementation.as_str()) {
            implementations.push(&r.implementation);
        }
    }
    let sizes: BTreeSet<i64> = records.iter().map(|r| r.matrix_size).collect();

    let mut out = Dataset::new(
        std::iter::once("matrix_size").chain(implementations.iter().copied()),
    );
    for size in sizes {
        let mut row = vec![Value::Int(size)];
        for name in &implementations {
            let cell = records
                .iter()
                .find(|r| r.matrix_size == size && r.implementation == *name)
                .map(|r| r.speedup);
            row.push(cell.into());
        }
        out.add_row(row);
    }
    out
}

fn pick_best<I>(candidates: I) -> Vec<BestPerformer>
where
    I: Iterator<Item = (String, i64, f64)>,
{
    let mut best: BTreeMap<i64, BestPerformer> = BTreeMap::new();
    for (implementation, size, gflops) in candidates {
        match best.get(&size) {
            // Strictly greater, so the first of equal rows stays.
            Some(current) if current.gflops >= gflops => {}
            _ => {
                best.insert(
                    size,
                    BestPerformer {
                        matrix_size: size,
                        implementation,
                        gflops,
                    },
                );
            }
        }
    }
    best.into_values().collect()
}

/// The row with the highest throughput at each size, sizes ascending.
///
/// Rows with unknown throughput, size or implementation are ignored.
pub fn best_performers(dataset: &Dataset, config: &SpeedupConfig) -> Vec<BestPerformer> {
    pick_best(dataset.iter().filter_map(|row| {
        Some((
            implementation_of(row, &config.impl_column)?,
            row.get(&config.size_column).coerce_int()?,
            row.get(&config.throughput_column).coerce_float()?,
        ))
    }))
}

/// Like [`best_performers`], but over aggregate rows, ranking by the mean
/// throughput column (`gflops_mean` by default).
pub fn best_performers_from_aggregates(
    aggregates: &Dataset,
    config: &SpeedupConfig,
) -> Vec<BestPerformer> {
    let mean_column = format!("{}_mean", config.throughput_column);
    pick_best(aggregates.iter().filter_map(|row| {
        Some((
            implementation_of(row, &config.impl_column)?,
            row.get(&config.size_column).coerce_int()?,
            row.get(&mean_column).coerce_float()?,
        ))
    }))
}

/// Best performers as a table: `matrix_size, implementation, gflops`.
pub fn best_performers_table(best: &[BestPerformer]) -> Dataset {
    let mut out = Dataset::new(["matrix_size", "implementation", "gflops"]);
    for b in best {
        out.add_row(vec![
            Value::Int(b.matrix_size),
            b.implementation.as_str().into(),
            Value::Float(b.gflops),
        ]);
    }
    out
}

/// Per-implementation measurement count and the sizes it was run at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationSummary {
    pub implementation: String,
    pub measurements: usize,
    pub sizes: Vec<i64>,
}

/// Summarize which implementations were measured, in first-occurrence order.
pub fn summarize_implementations(
    dataset: &Dataset,
    config: &SpeedupConfig,
) -> Vec<ImplementationSummary> {
    let mut out: Vec<ImplementationSummary> = Vec::new();
    let mut sizes: Vec<BTreeSet<i64>> = Vec::new();

    for row in dataset.iter() {
        let Some(implementation) = implementation_of(row, &config.impl_column) else {
            continue;
        };
        let slot = match out.iter().position(|s| s.implementation == implementation) {
            Some(i) => i,
            None => {
                out.push(ImplementationSummary {
                    implementation,
                    measurements: 0,
                    sizes: Vec::new(),
                });
                sizes.push(BTreeSet::new());
                out.len() - 1
            }
        };
        out[slot].measurements += 1;
        if let Some(n) = row.get(&config.size_column).coerce_int() {
            sizes[slot].insert(n);
        }
    }

    for (summary, set) in out.iter_mut().zip(sizes) {
        summary.sizes = set.into_iter().collect();
    }
    out
}
