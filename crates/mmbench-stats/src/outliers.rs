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

//! Z-score outlier filtering.

use mmbench_core::{Dataset, Value};
use tracing::info;

/// Default z-score cut-off, in standard deviations.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Drop rows whose `column` value lies `threshold` or more population
/// standard deviations from the column mean.
///
/// Rows with an unknown value in `column` are kept. A column with fewer than
/// two known values, or no spread, removes nothing. Returns the number of
/// rows removed.
pub fn filter_outliers(dataset: &mut Dataset, column: &str, threshold: f64) -> usize {
    let known: Vec<f64> = match dataset.column(column) {
        Some(values) => values.filter_map(Value::coerce_float).collect(),
        None => return 0,
    };
    if known.len() < 2 {
        return 0;
    }

    let mean = known.iter().sum::<f64>() / known.len() as f64;
    let variance = known.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / known.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return 0;
    }

    let before = dataset.len();
    dataset.retain(|row| match row.get(column).coerce_float() {
        Some(v) => ((v - mean) / std_dev).abs() < threshold,
        None => true,
    });
    let removed = before - dataset.len();
    if removed > 0 {
        info!(
            column,
            removed,
            total = before,
            "removed {:.1}% of measurements as outliers",
            100.0 * removed as f64 / before as f64
        );
    }
    removed
}
