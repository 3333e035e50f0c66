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

//! Read Parquet files into datasets.
//!
//! Row order is preserved: Parquet row `i` of batch `b` follows every row of
//! batches before `b`. Column types map onto [`Value`] variants; nulls and
//! float `NaN` become [`Value::Null`], and types without a direct mapping
//! (timestamps, dictionaries, ...) are rendered to strings.

use std::path::Path;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeStringArray, StringArray, UInt16Array, UInt32Array,
    UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;

use mmbench_core::{Dataset, MmbenchError, MmbenchResult, Value};

/// Maximum decompressed size read from one file (1 GiB).
pub const MAX_DECOMPRESSED_SIZE: usize = 1024 * 1024 * 1024;

/// Read a Parquet file into a dataset.
///
/// # Example
///
/// ```no_run
/// use mmbench_parquet::from_parquet;
/// use std::path::Path;
///
/// let ds = from_parquet(Path::new("results/2025-01-14/raw.parquet")).unwrap();
/// println!("{} rows", ds.len());
/// ```
pub fn from_parquet(path: &Path) -> MmbenchResult<Dataset> {
    let file = std::fs::File::open(path).map_err(|e| {
        MmbenchError::io(format!("Failed to open Parquet file: {}", e)).with_path(path)
    })?;

    read_parquet(file).map_err(|e| e.with_path(path))
}

/// Read a dataset from in-memory Parquet bytes.
pub fn from_parquet_bytes(bytes: &[u8]) -> MmbenchResult<Dataset> {
    read_parquet(bytes::Bytes::copy_from_slice(bytes))
}

fn read_parquet<R: ChunkReader + 'static>(input: R) -> MmbenchResult<Dataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)
        .map_err(|e| MmbenchError::parse(format!("Failed to create Parquet reader: {}", e)))?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let arrow_reader = builder
        .build()
        .map_err(|e| MmbenchError::parse(format!("Failed to build Parquet reader: {}", e)))?;

    let mut dataset = Dataset::new(columns);
    let mut total_bytes = 0usize;

    for batch_result in arrow_reader {
        let batch = batch_result
            .map_err(|e| MmbenchError::parse(format!("Failed to read record batch: {}", e)))?;

        total_bytes = total_bytes.saturating_add(estimate_batch_size(&batch));
        if total_bytes > MAX_DECOMPRESSED_SIZE {
            return Err(MmbenchError::parse(format!(
                "Decompressed size limit exceeded: {} bytes (max: {} bytes)",
                total_bytes, MAX_DECOMPRESSED_SIZE
            )));
        }

        append_batch(&batch, &mut dataset)?;
    }

    Ok(dataset)
}

fn estimate_batch_size(batch: &RecordBatch) -> usize {
    batch
        .columns()
        .iter()
        .map(|c| c.get_array_memory_size())
        .sum()
}

fn append_batch(batch: &RecordBatch, dataset: &mut Dataset) -> MmbenchResult<()> {
    for row_idx in 0..batch.num_rows() {
        let row = batch
            .columns()
            .iter()
            .map(|column| cell(column, row_idx))
            .collect::<MmbenchResult<Vec<Value>>>()?;
        dataset.push_row(row)?;
    }
    Ok(())
}

fn downcast<T: Array + 'static>(array: &ArrayRef) -> MmbenchResult<&T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        MmbenchError::conversion(format!("Unexpected array layout for {:?}", array.data_type()))
    })
}

fn cell(array: &ArrayRef, idx: usize) -> MmbenchResult<Value> {
    if array.is_null(idx) {
        return Ok(Value::Null);
    }

    let value = match array.data_type() {
        DataType::Boolean => Value::Bool(downcast::<BooleanArray>(array)?.value(idx)),
        DataType::Int8 => Value::Int(downcast::<Int8Array>(array)?.value(idx) as i64),
        DataType::Int16 => Value::Int(downcast::<Int16Array>(array)?.value(idx) as i64),
        DataType::Int32 => Value::Int(downcast::<Int32Array>(array)?.value(idx) as i64),
        DataType::Int64 => Value::Int(downcast::<Int64Array>(array)?.value(idx)),
        DataType::UInt8 => Value::Int(downcast::<UInt8Array>(array)?.value(idx) as i64),
        DataType::UInt16 => Value::Int(downcast::<UInt16Array>(array)?.value(idx) as i64),
        DataType::UInt32 => Value::Int(downcast::<UInt32Array>(array)?.value(idx) as i64),
        DataType::UInt64 => {
            let v = downcast::<UInt64Array>(array)?.value(idx);
            i64::try_from(v)
                .map(Value::Int)
                .unwrap_or(Value::Float(v as f64))
        }
        DataType::Float32 => float(downcast::<Float32Array>(array)?.value(idx) as f64),
        DataType::Float64 => float(downcast::<Float64Array>(array)?.value(idx)),
        DataType::Utf8 => Value::String(downcast::<StringArray>(array)?.value(idx).to_string()),
        DataType::LargeUtf8 => {
            Value::String(downcast::<LargeStringArray>(array)?.value(idx).to_string())
        }
        _ => Value::String(array_value_to_string(array, idx).map_err(|e| {
            MmbenchError::conversion(format!("Unsupported value at row {}: {}", idx, e))
        })?),
    };
    Ok(value)
}

fn float(f: f64) -> Value {
    if f.is_nan() {
        Value::Null
    } else {
        Value::Float(f)
    }
}
