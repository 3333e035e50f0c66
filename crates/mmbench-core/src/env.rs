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

//! Environment descriptor (`env.json`) for one benchmark run.
//!
//! The descriptor is kept as the parsed JSON object so that unknown keys
//! survive into the raw copy. Lookups walk dotted paths (`cpu.model`) and
//! treat a missing or `null` step as an absent value rather than an error.

use std::path::Path;

use serde_json::Map;

use crate::error::{MmbenchError, MmbenchResult};
use crate::value::Value;

/// Flattened descriptor fields as `(column, path)` pairs, in table order.
pub const ENV_TABLE_FIELDS: &[(&str, &str)] = &[
    ("datetime_iso", "datetime_iso"),
    ("hostname", "hostname"),
    ("slurm_job_id", "slurm_job_id"),
    ("cpu_model", "cpu.model"),
    ("gpu_model", "gpu.model"),
    ("gpu_count", "gpu.count"),
    ("memory_gb", "memory_gb"),
    ("compiler_name", "compiler.name"),
    ("compiler_version", "compiler.version"),
    ("blas_vendor", "blas.vendor"),
    ("blas_version", "blas.version"),
    ("cuda_version", "cuda.version"),
    ("mpi_vendor", "mpi.vendor"),
    ("mpi_version", "mpi.version"),
    ("os_name", "os.name"),
    ("os_version", "os.version"),
    ("git_commit", "git_commit"),
];

/// Name of the column holding the serialized descriptor.
pub const ENV_JSON_COLUMN: &str = "env_json";

/// Parsed environment metadata for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentRecord {
    document: Map<String, serde_json::Value>,
}

impl EnvironmentRecord {
    /// Parse a descriptor. The top level must be a JSON object.
    pub fn from_json(input: &str) -> MmbenchResult<Self> {
        let parsed: serde_json::Value = serde_json::from_str(input)?;
        match parsed {
            serde_json::Value::Object(document) => Ok(Self { document }),
            other => Err(MmbenchError::parse(format!(
                "environment descriptor must be a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Load a descriptor from disk.
    ///
    /// A missing file is `Ok(None)`; unreadable or malformed files are errors.
    pub fn load(path: impl AsRef<Path>) -> MmbenchResult<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let text =
            std::fs::read_to_string(path).map_err(|e| MmbenchError::from(e).with_path(path))?;
        Self::from_json(&text).map(Some).map_err(|e| e.with_path(path))
    }

    /// Returns true if the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Look up a dotted path such as `mpi.vendor`.
    pub fn lookup(&self, path: &str) -> Value {
        let mut parts = path.split('.');
        let Some(first) = parts.next() else {
            return Value::Null;
        };
        let mut current = match self.document.get(first) {
            Some(v) => v,
            None => return Value::Null,
        };
        for part in parts {
            current = match current.get(part) {
                Some(v) => v,
                None => return Value::Null,
            };
        }
        json_to_value(current)
    }

    /// The flattened descriptor fields in [`ENV_TABLE_FIELDS`] order.
    pub fn flatten(&self) -> Vec<(&'static str, Value)> {
        ENV_TABLE_FIELDS
            .iter()
            .map(|(column, path)| (*column, self.lookup(path)))
            .collect()
    }

    /// The full document serialized back to compact JSON.
    pub fn raw_json(&self) -> String {
        serde_json::Value::Object(self.document.clone()).to_string()
    }
}

fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        nested => Value::String(nested.to_string()),
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
