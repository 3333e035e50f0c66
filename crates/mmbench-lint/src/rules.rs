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

//! Validation rules

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use mmbench_core::schema::columns;
use mmbench_core::{expected_gflops, Dataset, Value, ValueKey, REQUIRED_COLUMNS};
use std::collections::BTreeMap;

/// Configuration for a single rule
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    pub enabled: bool,
    /// Whether to treat warnings as errors
    pub error: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            error: false,
        }
    }
}

/// Trait for validation rules
pub trait ValidationRule: Send + Sync {
    /// Rule identifier
    fn id(&self) -> &str;

    /// Rule description
    fn description(&self) -> &str;

    /// Run the rule on a dataset
    fn check(&self, dataset: &Dataset) -> Vec<Diagnostic>;
}

/// How a numeric column is coerced before checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Float,
}

impl NumericKind {
    /// Kind used for a column. `n` and `trial` are integers, the rest floats.
    pub fn of(column: &str) -> Self {
        match column {
            columns::N | columns::TRIAL => Self::Integer,
            _ => Self::Float,
        }
    }

    /// Coerce a cell, `None` meaning unknown.
    pub fn coerce(self, value: &Value) -> Option<f64> {
        match self {
            Self::Integer => value.coerce_int().map(|n| n as f64),
            Self::Float => value.coerce_float(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "number",
        }
    }
}

/// Inclusive accepted range for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRange {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    pub fn new(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            column: column.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Default sanity ranges: sizes up to ten million, times up to one day.
pub fn default_ranges() -> Vec<ColumnRange> {
    vec![
        ColumnRange::new(columns::N, 1.0, 10_000_000.0),
        ColumnRange::new(columns::TIME_S, 0.0, 86_400.0),
        ColumnRange::new(columns::GFLOPS, 0.0, 10_000_000.0),
    ]
}

/// Columns coerced to numbers before checks.
pub const NUMERIC_COLUMNS: &[&str] = &[columns::N, columns::TRIAL, columns::TIME_S, columns::GFLOPS];

fn sample(rows: &[usize], limit: usize) -> Vec<usize> {
    rows.iter().take(limit).copied().collect()
}

/// Rule: required columns present
pub struct RequiredColumnsRule {
    required: Vec<String>,
}

impl RequiredColumnsRule {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for RequiredColumnsRule {
    fn default() -> Self {
        Self::new(REQUIRED_COLUMNS.iter().copied())
    }
}

impl ValidationRule for RequiredColumnsRule {
    fn id(&self) -> &str {
        "required-columns"
    }

    fn description(&self) -> &str {
        "Check that every required measurement column is present"
    }

    fn check(&self, dataset: &Dataset) -> Vec<Diagnostic> {
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|c| !dataset.has_column(c))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }

        vec![Diagnostic::error(
            DiagnosticKind::MissingColumns,
            format!("missing columns: {}", missing.join(", ")),
            self.id(),
        )]
    }
}

/// Rule: numeric columns parse as numbers
pub struct TypeCoercionRule {
    max_rows: usize,
}

impl TypeCoercionRule {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }
}

impl ValidationRule for TypeCoercionRule {
    fn id(&self) -> &str {
        "type-coercion"
    }

    fn description(&self) -> &str {
        "Report non-null cells of numeric columns that cannot be parsed"
    }

    fn check(&self, dataset: &Dataset) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for &column in NUMERIC_COLUMNS {
            let Some(values) = dataset.column(column) else {
                continue;
            };
            let kind = NumericKind::of(column);
            let bad: Vec<usize> = values
                .enumerate()
                .filter(|(_, v)| !v.is_null() && kind.coerce(v).is_none())
                .map(|(idx, _)| idx)
                .collect();

            if !bad.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::Unparsable,
                        format!(
                            "{}: {} value(s) could not be parsed as {}; treated as unknown",
                            column,
                            bad.len(),
                            kind.name()
                        ),
                        self.id(),
                    )
                    .with_column(column)
                    .with_row_count(bad.len())
                    .with_rows(sample(&bad, self.max_rows)),
                );
            }
        }

        diagnostics
    }
}

/// Rule: values within sanity ranges
pub struct ValueRangeRule {
    ranges: Vec<ColumnRange>,
    max_rows: usize,
}

impl ValueRangeRule {
    pub fn new(ranges: Vec<ColumnRange>, max_rows: usize) -> Self {
        Self { ranges, max_rows }
    }
}

impl ValidationRule for ValueRangeRule {
    fn id(&self) -> &str {
        "value-range"
    }

    fn description(&self) -> &str {
        "Check numeric columns against their accepted ranges"
    }

    fn check(&self, dataset: &Dataset) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for range in &self.ranges {
            let Some(values) = dataset.column(&range.column) else {
                continue;
            };
            let kind = NumericKind::of(&range.column);
            let bad: Vec<usize> = values
                .enumerate()
                .filter(|(_, v)| kind.coerce(v).is_some_and(|x| !range.contains(x)))
                .map(|(idx, _)| idx)
                .collect();

            if !bad.is_empty() {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::OutOfRange,
                        format!(
                            "out-of-range {}: {} rows outside [{}, {}]",
                            range.column,
                            bad.len(),
                            range.min,
                            range.max
                        ),
                        self.id(),
                    )
                    .with_column(range.column.clone())
                    .with_row_count(bad.len())
                    .with_rows(sample(&bad, self.max_rows)),
                );
            }
        }

        diagnostics
    }
}

/// Rule: stored throughput matches `2 n^3 / time`
pub struct GflopsConsistencyRule {
    tolerance: f64,
    max_rows: usize,
}

impl GflopsConsistencyRule {
    pub fn new(tolerance: f64, max_rows: usize) -> Self {
        Self {
            tolerance,
            max_rows,
        }
    }
}

impl ValidationRule for GflopsConsistencyRule {
    fn id(&self) -> &str {
        "gflops-consistency"
    }

    fn description(&self) -> &str {
        "Check gflops against the value implied by n and time_s"
    }

    fn check(&self, dataset: &Dataset) -> Vec<Diagnostic> {
        if ![columns::N, columns::TIME_S, columns::GFLOPS]
            .iter()
            .all(|c| dataset.has_column(c))
        {
            return Vec::new();
        }

        let bad: Vec<usize> = dataset
            .iter()
            .filter_map(|row| {
                let n = row.get(columns::N).coerce_int()?;
                let time = row.get(columns::TIME_S).coerce_float()?;
                let gflops = row.get(columns::GFLOPS).coerce_float()?;
                let expected = expected_gflops(n, time)?;
                let mismatch = (gflops - expected).abs() > self.tolerance * expected.abs();
                mismatch.then_some(row.index())
            })
            .collect();

        if bad.is_empty() {
            return Vec::new();
        }

        vec![Diagnostic::warning(
            DiagnosticKind::ThroughputMismatch,
            format!(
                "gflops mismatch beyond {}% for {} rows",
                self.tolerance * 100.0,
                bad.len()
            ),
            self.id(),
        )
        .with_column(columns::GFLOPS)
        .with_row_count(bad.len())
        .with_rows(sample(&bad, self.max_rows))]
    }
}

/// Rule: trials of each (run, implementation, size) group start at 1
pub struct TrialContinuityRule;

impl ValidationRule for TrialContinuityRule {
    fn id(&self) -> &str {
        "trial-continuity"
    }

    fn description(&self) -> &str {
        "Check that trial numbering starts at 1 within each run/impl/n group"
    }

    fn check(&self, dataset: &Dataset) -> Vec<Diagnostic> {
        let key_columns = [columns::RUN_ID, columns::IMPL, columns::N];
        if !key_columns
            .iter()
            .chain(std::iter::once(&columns::TRIAL))
            .all(|c| dataset.has_column(c))
        {
            return Vec::new();
        }

        // Rows with a null group component are not part of any group.
        let mut groups: BTreeMap<Vec<ValueKey>, Option<i64>> = BTreeMap::new();
        for row in dataset.iter() {
            let key: Vec<ValueKey> = key_columns
                .iter()
                .map(|c| match row.get(c).coerce_int() {
                    Some(n) if *c == columns::N => ValueKey::Int(n),
                    _ => row.get(c).key(),
                })
                .collect();
            if key.contains(&ValueKey::Null) {
                continue;
            }
            let trial = row.get(columns::TRIAL).coerce_int();
            let min = groups.entry(key).or_insert(None);
            *min = match (*min, trial) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }

        groups
            .into_iter()
            .filter_map(|(key, min)| {
                let min = min?;
                (min != 1).then(|| {
                    let label: Vec<String> = key.iter().map(|k| k.to_string()).collect();
                    Diagnostic::warning(
                        DiagnosticKind::TrialStart,
                        format!("trials start at {} for ({})", min, label.join(", ")),
                        self.id(),
                    )
                    .with_column(columns::TRIAL)
                })
            })
            .collect()
    }
}

/// Rules in the order they run by default.
pub fn default_rules(
    required: &[String],
    ranges: &[ColumnRange],
    gflops_tolerance: f64,
    max_rows: usize,
) -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(RequiredColumnsRule::new(required.iter().cloned())),
        Box::new(TypeCoercionRule::new(max_rows)),
        Box::new(ValueRangeRule::new(ranges.to_vec(), max_rows)),
        Box::new(GflopsConsistencyRule::new(gflops_tolerance, max_rows)),
        Box::new(TrialContinuityRule),
    ]
}
