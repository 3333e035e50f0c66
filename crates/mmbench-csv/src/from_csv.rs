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

//! Read CSV measurement files into datasets.

use crate::error::{CsvError, Result};
use mmbench_core::{Dataset, Value};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Default maximum number of rows read from one source.
///
/// ```
/// # use mmbench_csv::FromCsvConfig;
/// let config = FromCsvConfig::default();
/// assert_eq!(config.max_rows, 10_000_000);
/// ```
pub const DEFAULT_MAX_ROWS: usize = 10_000_000;

/// Cell spellings read as a missing value.
pub const NULL_TOKENS: &[&str] = &["", "~", "null", "NA", "NaN"];

/// Configuration for CSV parsing.
///
/// # Examples
///
/// ```
/// # use mmbench_csv::FromCsvConfig;
/// let tsv = FromCsvConfig {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// assert!(tsv.has_headers);
/// ```
#[derive(Debug, Clone)]
pub struct FromCsvConfig {
    /// Field delimiter character (default: `,`).
    pub delimiter: u8,

    /// Whether the first row contains column headers (default: `true`).
    ///
    /// Without headers, columns are named `column_0`, `column_1`, ...
    pub has_headers: bool,

    /// Whether to trim leading/trailing whitespace from fields (default: `true`).
    pub trim: bool,

    /// Maximum number of rows to parse (default: 10,000,000).
    pub max_rows: usize,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl FromCsvConfig {
    /// Configuration suited to a path, choosing tab delimiters for `.tsv`.
    pub fn for_path(path: &Path) -> Self {
        let is_tsv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        Self {
            delimiter: if is_tsv { b'\t' } else { b',' },
            ..Default::default()
        }
    }
}

/// Parse CSV text into a dataset with default configuration.
///
/// # Examples
///
/// ```
/// use mmbench_core::Value;
/// use mmbench_csv::from_csv;
///
/// let ds = from_csv("impl,n,time_s\nnaive,256,0.01\n").unwrap();
/// assert_eq!(ds.columns(), &["impl", "n", "time_s"]);
/// assert_eq!(ds.get(0, "n"), Some(&Value::Int(256)));
/// ```
pub fn from_csv(csv: &str) -> Result<Dataset> {
    from_csv_with_config(csv, FromCsvConfig::default())
}

/// Parse CSV text into a dataset.
pub fn from_csv_with_config(csv: &str, config: FromCsvConfig) -> Result<Dataset> {
    from_csv_reader_with_config(csv.as_bytes(), config)
}

/// Read a CSV file into a dataset.
pub fn from_csv_path(path: impl AsRef<Path>, config: FromCsvConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    from_csv_reader_with_config(file, config)
        .map_err(|e| e.with_context(format!("in {}", path.display())))
}

/// Parse CSV from any reader with default configuration.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    from_csv_reader_with_config(reader, FromCsvConfig::default())
}

/// Parse CSV from any reader.
pub fn from_csv_reader_with_config<R: Read>(reader: R, config: FromCsvConfig) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .flexible(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let mut columns: Vec<String> = if config.has_headers {
        let headers = csv_reader.headers().map_err(|e| CsvError::ParseError {
            line: 1,
            message: e.to_string(),
        })?;
        validate_headers(headers)?
    } else {
        Vec::new()
    };
    let mut dataset = if config.has_headers {
        Some(Dataset::new(columns.iter().cloned()))
    } else {
        None
    };

    for (record_idx, result) in csv_reader.records().enumerate() {
        if record_idx >= config.max_rows {
            return Err(CsvError::SecurityLimit {
                limit: config.max_rows,
                actual: record_idx + 1,
            });
        }

        let line = record_idx + if config.has_headers { 2 } else { 1 };
        let record = result.map_err(|e| CsvError::ParseError {
            line,
            message: e.to_string(),
        })?;

        let ds = dataset.get_or_insert_with(|| {
            columns = (0..record.len()).map(|i| format!("column_{}", i)).collect();
            Dataset::new(columns.iter().cloned())
        });

        if record.len() != columns.len() {
            return Err(CsvError::WidthMismatch {
                expected: columns.len(),
                actual: record.len(),
                row: record_idx + 1,
            });
        }

        let row: Vec<Value> = record.iter().map(parse_csv_value).collect();
        ds.push_row(row).map_err(|e| CsvError::Other(e.message))?;
    }

    Ok(dataset.unwrap_or_default())
}

fn validate_headers(headers: &csv::StringRecord) -> Result<Vec<String>> {
    if headers.is_empty() || (headers.len() == 1 && headers.get(0).is_some_and(str::is_empty)) {
        return Err(CsvError::InvalidHeader {
            position: 0,
            reason: "no header row".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());
    for (position, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(CsvError::InvalidHeader {
                position,
                reason: "Empty column name".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(CsvError::InvalidHeader {
                position,
                reason: format!("Duplicate column name '{}'", name),
            });
        }
        columns.push(name.to_string());
    }
    Ok(columns)
}

/// Parse a CSV field into a value.
///
/// Type inference rules:
/// - Null tokens (see [`NULL_TOKENS`]) → Null
/// - "true" or "false" → Bool
/// - Integer pattern → Int
/// - Float pattern → Float
/// - Otherwise → String
pub fn parse_csv_value(field: &str) -> Value {
    let trimmed = field.trim();

    if NULL_TOKENS.contains(&trimmed) {
        return Value::Null;
    }

    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Int(n);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::Float(f);
        }
    }

    Value::String(field.to_string())
}
