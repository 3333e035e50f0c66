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

//! Per-group descriptive statistics.
//!
//! Rows are grouped by a set of key columns (by default implementation and
//! matrix size) and each configured metric column is summarized with the
//! requested statistics. The result is a flat table with one row per group
//! and one `<metric>_<stat>` column per requested pair.

use std::collections::HashMap;

use mmbench_core::schema::columns;
use mmbench_core::{Dataset, Value, ValueKey};
use serde::Serialize;

/// Grouping columns for [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKeys(Vec<String>);

impl GroupKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for GroupKeys {
    fn default() -> Self {
        Self::new([columns::IMPL, columns::N])
    }
}

/// A summary statistic over one metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Mean,
    /// Sample standard deviation (n - 1).
    Std,
    Min,
    Max,
    Median,
    /// Number of rows in the group, known or not.
    Count,
}

impl Stat {
    /// Suffix used in output column names.
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Mean => "mean",
            Stat::Std => "std",
            Stat::Min => "min",
            Stat::Max => "max",
            Stat::Median => "median",
            Stat::Count => "count",
        }
    }
}

/// Statistics requested for one metric column.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    pub column: String,
    pub stats: Vec<Stat>,
}

impl MetricSpec {
    pub fn new(column: impl Into<String>, stats: &[Stat]) -> Self {
        Self {
            column: column.into(),
            stats: stats.to_vec(),
        }
    }

    /// Output column name for one of this metric's statistics.
    pub fn output_column(&self, stat: Stat) -> String {
        format!("{}_{}", self.column, stat.name())
    }
}

/// Which metrics to aggregate and how.
///
/// Metrics whose column is absent from the input are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSpec {
    pub metrics: Vec<MetricSpec>,
}

const TIME_STATS: &[Stat] = &[Stat::Mean, Stat::Std, Stat::Min, Stat::Max, Stat::Count];
const THROUGHPUT_STATS: &[Stat] = &[Stat::Mean, Stat::Std, Stat::Max];

impl Default for AggregationSpec {
    fn default() -> Self {
        Self {
            metrics: vec![
                MetricSpec::new(columns::TIME_S, TIME_STATS),
                MetricSpec::new(columns::EXECUTION_TIME_MS, TIME_STATS),
                MetricSpec::new(columns::GFLOPS, THROUGHPUT_STATS),
            ],
        }
    }
}

/// Statistical summary of a sample of known values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub mean: f64,
    /// `None` for a single sample.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub count: usize,
}

/// Computes a statistical summary. Returns `None` for an empty sample.
pub fn compute_statistics(values: &[f64]) -> Option<Statistics> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;

    let std_dev = (count > 1).then(|| {
        let variance = sorted
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    });

    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    Some(Statistics {
        mean,
        std_dev,
        min: sorted[0],
        max: sorted[count - 1],
        median,
        count,
    })
}

/// Statistics for one group of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStat {
    /// Key cell values, taken from the group's first row.
    pub key: Vec<Value>,
    /// Number of input rows in the group.
    pub count: usize,
    /// Per metric, the summary over its known values.
    pub metrics: Vec<(String, Option<Statistics>)>,
}

impl AggregateStat {
    fn value_of(&self, metric: &str, stat: Stat) -> Value {
        if stat == Stat::Count {
            return Value::Int(self.count as i64);
        }
        let summary = self
            .metrics
            .iter()
            .find(|(name, _)| name == metric)
            .and_then(|(_, s)| s.as_ref());
        match (summary, stat) {
            (None, _) => Value::Null,
            (Some(s), Stat::Mean) => Value::Float(s.mean),
            (Some(s), Stat::Std) => s.std_dev.into(),
            (Some(s), Stat::Min) => Value::Float(s.min),
            (Some(s), Stat::Max) => Value::Float(s.max),
            (Some(s), Stat::Median) => Value::Float(s.median),
            (Some(_), Stat::Count) => Value::Int(self.count as i64),
        }
    }
}

/// Row indices per group, in first-occurrence order of the key.
///
/// Null key cells form their own group rather than being dropped.
pub fn group_rows(dataset: &Dataset, keys: &[String]) -> Vec<(Vec<Value>, Vec<usize>)> {
    let mut index: HashMap<Vec<ValueKey>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<Value>, Vec<usize>)> = Vec::new();

    for row in dataset.iter() {
        let cells: Vec<&Value> = keys.iter().map(|k| row.get(k)).collect();
        let identity: Vec<ValueKey> = cells.iter().map(|v| v.key()).collect();
        let slot = *index.entry(identity).or_insert_with(|| {
            groups.push((cells.iter().map(|&v| v.clone()).collect(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.index());
    }

    groups
}

/// Per-group statistics as structured values.
pub fn group_statistics(
    dataset: &Dataset,
    keys: &[String],
    spec: &AggregationSpec,
) -> Vec<AggregateStat> {
    let metrics: Vec<&MetricSpec> = spec
        .metrics
        .iter()
        .filter(|m| dataset.has_column(&m.column))
        .collect();

    group_rows(dataset, keys)
        .into_iter()
        .map(|(key, rows)| {
            let summaries = metrics
                .iter()
                .map(|metric| {
                    let sample: Vec<f64> = rows
                        .iter()
                        .filter_map(|&i| dataset.get(i, &metric.column))
                        .filter_map(Value::coerce_float)
                        .collect();
                    (metric.column.clone(), compute_statistics(&sample))
                })
                .collect();
            AggregateStat {
                key,
                count: rows.len(),
                metrics: summaries,
            }
        })
        .collect()
}

/// Aggregate `dataset` into one row per group.
///
/// # Examples
///
/// ```
/// use mmbench_core::{Dataset, Value};
/// use mmbench_stats::{aggregate, AggregationSpec, GroupKeys};
///
/// let mut ds = Dataset::new(["impl", "n", "time_s"]);
/// ds.push_row(vec!["naive".into(), Value::Int(64), Value::Float(1.0)]).unwrap();
/// ds.push_row(vec!["naive".into(), Value::Int(64), Value::Float(3.0)]).unwrap();
///
/// let stats = aggregate(&ds, GroupKeys::default().as_slice(), &AggregationSpec::default());
/// assert_eq!(stats.len(), 1);
/// assert_eq!(stats.get(0, "time_s_mean"), Some(&Value::Float(2.0)));
/// assert_eq!(stats.get(0, "time_s_count"), Some(&Value::Int(2)));
/// ```
pub fn aggregate(dataset: &Dataset, keys: &[String], spec: &AggregationSpec) -> Dataset {
    let metrics: Vec<&MetricSpec> = spec
        .metrics
        .iter()
        .filter(|m| dataset.has_column(&m.column))
        .collect();

    let mut out_columns: Vec<String> = keys.to_vec();
    for metric in &metrics {
        for &stat in &metric.stats {
            out_columns.push(metric.output_column(stat));
        }
    }
    let mut out = Dataset::new(out_columns);

    for group in group_statistics(dataset, keys, spec) {
        let mut row = group.key.clone();
        for metric in &metrics {
            for &stat in &metric.stats {
                row.push(group.value_of(&metric.column, stat));
            }
        }
        out.add_row(row);
    }

    out
}
