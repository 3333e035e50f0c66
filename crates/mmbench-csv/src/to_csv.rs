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

//! Write datasets as CSV.

use crate::error::{CsvError, Result};
use mmbench_core::{Dataset, Value};
use std::io::Write;
use std::path::Path;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
    /// Fixed number of decimals for floats (default: shortest round-trip form)
    pub float_precision: Option<usize>,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
            float_precision: None,
        }
    }
}

/// Convert a dataset to a CSV string.
///
/// # Example
/// ```
/// use mmbench_core::{Dataset, Value};
/// use mmbench_csv::to_csv;
///
/// let mut ds = Dataset::new(["impl", "speedup"]);
/// ds.push_row(vec!["mpi".into(), Value::Float(5.0)]).unwrap();
/// assert_eq!(to_csv(&ds).unwrap(), "impl,speedup\nmpi,5.0\n");
/// ```
pub fn to_csv(dataset: &Dataset) -> Result<String> {
    to_csv_with_config(dataset, ToCsvConfig::default())
}

/// Convert a dataset to a CSV string with custom configuration.
pub fn to_csv_with_config(dataset: &Dataset, config: ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(dataset.len() * dataset.columns().len() * 12);
    to_csv_writer_with_config(dataset, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|e| CsvError::Write(format!("invalid UTF-8 in output: {}", e)))
}

/// Write a dataset to a file, creating parent directories as needed.
pub fn to_csv_path(dataset: &Dataset, path: impl AsRef<Path>, config: ToCsvConfig) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    to_csv_writer_with_config(dataset, std::io::BufWriter::new(file), config)
        .map_err(|e| e.with_context(format!("writing {}", path.display())))
}

/// Write a dataset as CSV to any writer.
pub fn to_csv_writer_with_config<W: Write>(
    dataset: &Dataset,
    writer: W,
    config: ToCsvConfig,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(writer);

    if config.include_headers {
        wtr.write_record(dataset.columns())
            .map_err(|e| CsvError::Write(format!("Failed to write CSV header: {}", e)))?;
    }

    for (idx, row) in dataset.rows().iter().enumerate() {
        let record: Vec<String> = row
            .iter()
            .map(|v| value_to_csv_string(v, config.float_precision))
            .collect();
        wtr.write_record(&record)
            .map_err(|e| CsvError::Write(format!("Failed to write CSV record {}: {}", idx, e)))?;
    }

    wtr.flush()
        .map_err(|e| CsvError::Write(format!("Failed to flush CSV writer: {}", e)))?;

    Ok(())
}

fn value_to_csv_string(value: &Value, precision: Option<usize>) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => format_float(*f, precision),
        Value::String(s) => s.clone(),
    }
}

fn format_float(f: f64, precision: Option<usize>) -> String {
    if f.is_nan() {
        return String::new();
    }
    match precision {
        Some(p) => format!("{:.*}", p, f),
        None if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.1}", f),
        None => f.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_csv;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(["impl", "n", "gflops", "note"]);
        ds.push_row(vec![
            "naive".into(),
            Value::Int(64),
            Value::Float(1.25),
            Value::Null,
        ])
        .unwrap();
        ds.push_row(vec![
            "mpi".into(),
            Value::Int(128),
            Value::Float(8.0),
            "a, b".into(),
        ])
        .unwrap();
        ds
    }

    #[test]
    fn test_to_csv_basic() {
        let csv = to_csv(&sample()).unwrap();
        assert_eq!(
            csv,
            "impl,n,gflops,note\nnaive,64,1.25,\nmpi,128,8.0,\"a, b\"\n"
        );
    }

    #[test]
    fn test_to_csv_without_headers() {
        let config = ToCsvConfig {
            include_headers: false,
            ..Default::default()
        };
        let csv = to_csv_with_config(&sample(), config).unwrap();
        assert!(csv.starts_with("naive,"));
    }

    #[test]
    fn test_float_precision() {
        let config = ToCsvConfig {
            float_precision: Some(3),
            ..Default::default()
        };
        let csv = to_csv_with_config(&sample(), config).unwrap();
        assert!(csv.contains("naive,64,1.250,"));
        assert!(csv.contains("mpi,128,8.000,"));
    }

    #[test]
    fn test_nan_written_empty() {
        assert_eq!(format_float(f64::NAN, None), "");
    }

    #[test]
    fn test_written_csv_reads_back() {
        let ds = sample();
        let back = from_csv(&to_csv(&ds).unwrap()).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn test_to_csv_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        to_csv_path(&sample(), &path, ToCsvConfig::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("impl,n,gflops,note\n"));
    }
}
