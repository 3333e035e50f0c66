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

//! Merge environment metadata into measurement rows.

use tracing::debug;

use crate::dataset::Dataset;
use crate::env::EnvironmentRecord;

/// Columns added by [`enrich_with_env`] and the descriptor paths they read.
pub const ENRICHMENT_FIELDS: &[(&str, &str)] = &[
    ("env_datetime_iso", "datetime_iso"),
    ("env_hostname", "hostname"),
    ("env_cpu_model", "cpu.model"),
    ("env_gpu_model", "gpu.model"),
    ("env_cuda_version", "cuda.version"),
    ("env_mpi_vendor", "mpi.vendor"),
    ("env_mpi_version", "mpi.version"),
];

/// Add `env_*` columns to every row, leaving existing columns untouched.
///
/// Returns the names of the columns that were actually added. With no
/// descriptor, or an empty one, the dataset is left as is.
pub fn enrich_with_env(dataset: &mut Dataset, env: Option<&EnvironmentRecord>) -> Vec<String> {
    let Some(env) = env.filter(|e| !e.is_empty()) else {
        return Vec::new();
    };

    let mut added = Vec::new();
    for (column, path) in ENRICHMENT_FIELDS {
        if dataset.add_column(*column, env.lookup(path)) {
            added.push((*column).to_string());
        }
    }
    debug!(columns = ?added, "enriched dataset with environment fields");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn env() -> EnvironmentRecord {
        EnvironmentRecord::from_json(
            r#"{"hostname": "node07", "cpu": {"model": "Xeon"}, "mpi": {"vendor": "MPICH"}}"#,
        )
        .unwrap()
    }

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(["impl", "n"]);
        ds.push_row(vec!["naive".into(), Value::Int(64)]).unwrap();
        ds.push_row(vec!["mpi".into(), Value::Int(64)]).unwrap();
        ds
    }

    #[test]
    fn test_adds_all_fields() {
        let mut ds = dataset();
        let added = enrich_with_env(&mut ds, Some(&env()));
        assert_eq!(added.len(), 7);
        assert_eq!(ds.get(1, "env_hostname"), Some(&Value::from("node07")));
        assert_eq!(ds.get(0, "env_cpu_model"), Some(&Value::from("Xeon")));
        assert!(ds.get(0, "env_gpu_model").unwrap().is_null());
    }

    #[test]
    fn test_existing_columns_untouched() {
        let mut ds = dataset();
        ds.add_column("env_hostname", Value::from("already"));
        let added = enrich_with_env(&mut ds, Some(&env()));
        assert_eq!(added.len(), 6);
        assert!(!added.contains(&"env_hostname".to_string()));
        assert_eq!(ds.get(0, "env_hostname"), Some(&Value::from("already")));
    }

    #[test]
    fn test_idempotent() {
        let mut once = dataset();
        enrich_with_env(&mut once, Some(&env()));
        let mut twice = once.clone();
        let added = enrich_with_env(&mut twice, Some(&env()));
        assert!(added.is_empty());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_descriptor_leaves_dataset() {
        let mut ds = dataset();
        assert!(enrich_with_env(&mut ds, None).is_empty());
        let empty = EnvironmentRecord::from_json("{}").unwrap();
        assert!(enrich_with_env(&mut ds, Some(&empty)).is_empty());
        assert_eq!(ds, dataset());
    }
}
