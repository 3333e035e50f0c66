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

//! Write datasets as Parquet tables.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::metadata::KeyValue;
use parquet::file::properties::{WriterProperties, WriterVersion};
use tracing::debug;

use mmbench_core::{Dataset, MmbenchError, MmbenchResult, Value};

/// Key under which the table name is stored in the file metadata.
pub const TABLE_NAME_KEY: &str = "mmbench:table";

/// Configuration for Parquet writing.
#[derive(Debug, Clone)]
pub struct ToParquetConfig {
    /// Compression algorithm to use.
    pub compression: Compression,
    /// Writer version.
    pub writer_version: WriterVersion,
    /// Table name recorded in the file metadata.
    pub table_name: Option<String>,
}

impl Default for ToParquetConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            writer_version: WriterVersion::PARQUET_2_0,
            table_name: None,
        }
    }
}

/// Write a dataset to a Parquet file.
///
/// # Example
///
/// ```no_run
/// use mmbench_core::Dataset;
/// use mmbench_parquet::to_parquet;
/// use std::path::Path;
///
/// let ds = Dataset::new(["impl", "n"]);
/// to_parquet(&ds, Path::new("raw.parquet")).unwrap();
/// ```
pub fn to_parquet(dataset: &Dataset, path: &Path) -> MmbenchResult<()> {
    to_parquet_with_config(dataset, path, &ToParquetConfig::default())
}

/// Write a dataset to a Parquet file with custom configuration.
///
/// Parent directories are created. The file is only created once encoding
/// has succeeded, so a failed write leaves no partial output.
pub fn to_parquet_with_config(
    dataset: &Dataset,
    path: &Path,
    config: &ToParquetConfig,
) -> MmbenchResult<()> {
    let bytes = to_parquet_bytes_with_config(dataset, config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MmbenchError::from(e).with_path(parent))?;
    }
    std::fs::write(path, bytes).map_err(|e| {
        MmbenchError::io(format!("Failed to write Parquet file: {}", e)).with_path(path)
    })?;
    debug!(path = %path.display(), rows = dataset.len(), "wrote parquet table");
    Ok(())
}

/// Encode a dataset as Parquet bytes.
pub fn to_parquet_bytes(dataset: &Dataset) -> MmbenchResult<Vec<u8>> {
    to_parquet_bytes_with_config(dataset, &ToParquetConfig::default())
}

/// Encode a dataset as Parquet bytes with custom configuration.
pub fn to_parquet_bytes_with_config(
    dataset: &Dataset,
    config: &ToParquetConfig,
) -> MmbenchResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(16 * 1024);

    let schema = build_schema(dataset);
    let record_batch = build_record_batch(dataset, &schema)?;

    let mut props_builder = WriterProperties::builder()
        .set_compression(config.compression)
        .set_writer_version(config.writer_version);
    if let Some(name) = &config.table_name {
        props_builder = props_builder.set_key_value_metadata(Some(vec![KeyValue::new(
            TABLE_NAME_KEY.to_string(),
            name.clone(),
        )]));
    }
    let props = props_builder.build();

    let mut writer = ArrowWriter::try_new(&mut buffer, Arc::clone(&schema), Some(props))
        .map_err(|e| MmbenchError::encoding(format!("Failed to create Parquet writer: {}", e)))?;

    if record_batch.num_rows() > 0 {
        writer
            .write(&record_batch)
            .map_err(|e| MmbenchError::encoding(format!("Failed to write record batch: {}", e)))?;
    }

    writer
        .close()
        .map_err(|e| MmbenchError::encoding(format!("Failed to close Parquet writer: {}", e)))?;

    Ok(buffer)
}

/// Arrow schema for a dataset, one nullable field per column.
fn build_schema(dataset: &Dataset) -> Arc<Schema> {
    let fields: Vec<Field> = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values = dataset.rows().iter().map(|row| &row[idx]);
            Field::new(name, infer_arrow_type(values), true)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Pick the narrowest Arrow type that holds every non-null value of a column.
///
/// Integers mixed with floats widen to `Float64`; any string (or a mix of
/// booleans with numbers) makes the column `Utf8`. All-null columns are `Utf8`.
fn infer_arrow_type<'a>(values: impl Iterator<Item = &'a Value>) -> DataType {
    let (mut bools, mut ints, mut floats, mut other) = (false, false, false, false);
    for value in values {
        match value {
            Value::Null => {}
            Value::Bool(_) => bools = true,
            Value::Int(_) => ints = true,
            Value::Float(_) => floats = true,
            Value::String(_) => other = true,
        }
    }
    match (bools, ints, floats, other) {
        (_, _, _, true) => DataType::Utf8,
        (true, false, false, false) => DataType::Boolean,
        (true, _, _, _) => DataType::Utf8,
        (false, true, false, false) => DataType::Int64,
        (false, _, true, false) => DataType::Float64,
        _ => DataType::Utf8,
    }
}

fn build_record_batch(dataset: &Dataset, schema: &Arc<Schema>) -> MmbenchResult<RecordBatch> {
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| build_array(dataset, idx, field.data_type()))
        .collect();

    RecordBatch::try_new(Arc::clone(schema), columns)
        .map_err(|e| MmbenchError::conversion(format!("Failed to create record batch: {}", e)))
}

fn build_array(dataset: &Dataset, idx: usize, data_type: &DataType) -> ArrayRef {
    let values = dataset.rows().iter().map(|row| &row[idx]);
    match data_type {
        DataType::Boolean => Arc::new(BooleanArray::from(
            values.map(Value::as_bool).collect::<Vec<_>>(),
        )),
        DataType::Int64 => Arc::new(Int64Array::from(
            values.map(Value::as_int).collect::<Vec<_>>(),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(
            values.map(Value::as_float).collect::<Vec<_>>(),
        )),
        _ => {
            let mut builder = StringBuilder::with_capacity(dataset.len(), dataset.len() * 16);
            for value in values {
                match value {
                    Value::Null => builder.append_null(),
                    Value::String(s) => builder.append_value(s),
                    other => builder.append_value(other.to_string()),
                }
            }
            Arc::new(builder.finish())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_parquet_bytes;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(["impl", "n", "time_s", "ok", "mixed"]);
        ds.push_row(vec![
            "naive".into(),
            Value::Int(64),
            Value::Int(1),
            Value::Bool(true),
            Value::Int(3),
        ])
        .unwrap();
        ds.push_row(vec![
            Value::Null,
            Value::Int(128),
            Value::Float(0.5),
            Value::Null,
            "x".into(),
        ])
        .unwrap();
        ds
    }

    #[test]
    fn test_infer_arrow_type() {
        let ints = [Value::Int(1), Value::Null];
        assert_eq!(infer_arrow_type(ints.iter()), DataType::Int64);
        let mixed = [Value::Int(1), Value::Float(2.5)];
        assert_eq!(infer_arrow_type(mixed.iter()), DataType::Float64);
        let nulls = [Value::Null];
        assert_eq!(infer_arrow_type(nulls.iter()), DataType::Utf8);
        let bools = [Value::Bool(true)];
        assert_eq!(infer_arrow_type(bools.iter()), DataType::Boolean);
    }

    #[test]
    fn test_bytes_read_back() {
        let bytes = to_parquet_bytes(&sample()).unwrap();
        let ds = from_parquet_bytes(&bytes).unwrap();
        assert_eq!(ds.columns(), sample().columns());
        assert_eq!(ds.get(0, "impl"), Some(&Value::from("naive")));
        assert!(ds.get(1, "impl").unwrap().is_null());
        assert_eq!(ds.get(0, "time_s"), Some(&Value::Float(1.0)));
        assert_eq!(ds.get(0, "ok"), Some(&Value::Bool(true)));
        assert_eq!(ds.get(0, "mixed"), Some(&Value::from("3")));
    }

    #[test]
    fn test_empty_dataset_writes_schema() {
        let ds = Dataset::new(["day", "hostname"]);
        let back = from_parquet_bytes(&to_parquet_bytes(&ds).unwrap()).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.columns(), &["day", "hostname"]);
    }

    #[test]
    fn test_to_parquet_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store/runs.parquet");
        let config = ToParquetConfig {
            table_name: Some("runs".to_string()),
            ..Default::default()
        };
        to_parquet_with_config(&sample(), &path, &config).unwrap();
        assert!(path.exists());
    }
}
