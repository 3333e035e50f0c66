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

//! The durable store: a `runs` table of measurements and an `env` table of
//! flattened environment descriptors, one Parquet file each.

use std::path::{Path, PathBuf};

use tracing::info;

use mmbench_core::schema::columns;
use mmbench_core::{
    Dataset, EnvironmentRecord, MmbenchResult, Value, ENV_JSON_COLUMN, ENV_TABLE_FIELDS,
};

use crate::from_parquet::from_parquet;
use crate::to_parquet::{to_parquet_with_config, ToParquetConfig};

/// Name of the measurement table.
pub const RUNS_TABLE: &str = "runs";
/// Name of the environment table.
pub const ENV_TABLE: &str = "env";

/// Tag every row with its day, replacing any existing `day` values.
pub fn tag_day(dataset: &mut Dataset, day: &str) {
    if !dataset.add_column(columns::DAY, Value::from(day)) {
        for idx in 0..dataset.len() {
            dataset.set(idx, columns::DAY, Value::from(day));
        }
    }
}

/// Append-only accumulator for the two store tables.
#[derive(Debug, Clone)]
pub struct Store {
    runs: Dataset,
    env: Dataset,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Empty store with the `env` table columns in place.
    pub fn new() -> Self {
        let mut env_columns = vec![columns::DAY];
        env_columns.extend(ENV_TABLE_FIELDS.iter().map(|(column, _)| *column));
        env_columns.push(ENV_JSON_COLUMN);
        Self {
            runs: Dataset::default(),
            env: Dataset::new(env_columns),
        }
    }

    /// Store seeded with the tables previously written to `dir`.
    ///
    /// Missing table files start empty, so re-running over new days appends.
    pub fn open(dir: &Path) -> MmbenchResult<Self> {
        let mut store = Self::new();
        let runs_path = table_path(dir, RUNS_TABLE);
        if runs_path.exists() {
            store.runs = from_parquet(&runs_path)?;
        }
        let env_path = table_path(dir, ENV_TABLE);
        if env_path.exists() {
            store.env.append(from_parquet(&env_path)?);
        }
        Ok(store)
    }

    /// Append one day's measurements, tagged with `day`.
    pub fn append_runs(&mut self, day: &str, mut measurements: Dataset) {
        tag_day(&mut measurements, day);
        self.runs.append(measurements);
    }

    /// Append one flattened environment row for `day`.
    pub fn append_env(&mut self, day: &str, env: &EnvironmentRecord) -> MmbenchResult<()> {
        let mut row = Vec::with_capacity(ENV_TABLE_FIELDS.len() + 2);
        row.push(Value::from(day));
        row.extend(env.flatten().into_iter().map(|(_, value)| value));
        row.push(Value::String(env.raw_json()));
        self.env.push_row(row)
    }

    /// The accumulated measurement table.
    pub fn runs(&self) -> &Dataset {
        &self.runs
    }

    /// The accumulated environment table.
    pub fn env(&self) -> &Dataset {
        &self.env
    }

    /// Write `runs.parquet` and `env.parquet` into `dir`.
    ///
    /// Returns the paths written.
    pub fn write(&self, dir: &Path, config: &ToParquetConfig) -> MmbenchResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(2);
        for (name, table) in [(RUNS_TABLE, &self.runs), (ENV_TABLE, &self.env)] {
            let path = table_path(dir, name);
            let table_config = ToParquetConfig {
                table_name: Some(name.to_string()),
                ..config.clone()
            };
            to_parquet_with_config(table, &path, &table_config)?;
            info!(table = name, rows = table.len(), path = %path.display(), "wrote store table");
            written.push(path);
        }
        Ok(written)
    }
}

fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{}.parquet", table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(n: i64) -> Dataset {
        let mut ds = Dataset::new(["impl", "n"]);
        ds.push_row(vec!["naive".into(), Value::Int(n)]).unwrap();
        ds
    }

    #[test]
    fn test_tag_day_adds_and_overwrites() {
        let mut ds = measurements(64);
        tag_day(&mut ds, "2025-01-14");
        assert_eq!(ds.get(0, "day"), Some(&Value::from("2025-01-14")));
        tag_day(&mut ds, "2025-01-15");
        assert_eq!(ds.get(0, "day"), Some(&Value::from("2025-01-15")));
        assert_eq!(ds.columns().len(), 3);
    }

    #[test]
    fn test_env_row_layout() {
        let env = EnvironmentRecord::from_json(
            r#"{"hostname": "node01", "gpu": {"count": 2}, "git_commit": "abc123"}"#,
        )
        .unwrap();
        let mut store = Store::new();
        store.append_env("2025-01-14", &env).unwrap();

        let table = store.env();
        assert_eq!(table.columns().len(), 19);
        assert_eq!(table.columns()[0], "day");
        assert_eq!(table.columns()[18], "env_json");
        assert_eq!(table.get(0, "hostname"), Some(&Value::from("node01")));
        assert_eq!(table.get(0, "gpu_count"), Some(&Value::Int(2)));
        assert!(table.get(0, "cpu_model").unwrap().is_null());
        let raw = table.get(0, "env_json").unwrap().as_str().unwrap();
        assert!(raw.contains("abc123"));
    }

    #[test]
    fn test_runs_union_across_days() {
        let mut store = Store::new();
        store.append_runs("d1", measurements(64));
        let mut second = measurements(128);
        second.add_column("threads", Value::Int(8));
        store.append_runs("d2", second);

        let runs = store.runs();
        assert_eq!(runs.len(), 2);
        assert!(runs.get(0, "threads").unwrap().is_null());
        assert_eq!(runs.get(1, "day"), Some(&Value::from("d2")));
    }

    #[test]
    fn test_write_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::new();
        store.append_runs("d1", measurements(64));

        let written = store.write(dir.path(), &ToParquetConfig::default()).unwrap();
        assert_eq!(written.len(), 2);

        let runs = from_parquet(&dir.path().join("runs.parquet")).unwrap();
        assert_eq!(runs.len(), 1);
        let env = from_parquet(&dir.path().join("env.parquet")).unwrap();
        assert!(env.is_empty());
        assert_eq!(env.columns().len(), 19);
    }

    #[test]
    fn test_open_appends_to_existing_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = Store::new();
        first.append_runs("d1", measurements(64));
        first
            .append_env("d1", &EnvironmentRecord::from_json(r#"{"hostname": "a"}"#).unwrap())
            .unwrap();
        first.write(dir.path(), &ToParquetConfig::default()).unwrap();

        let mut second = Store::open(dir.path()).unwrap();
        second.append_runs("d2", measurements(128));
        assert_eq!(second.runs().len(), 2);
        assert_eq!(second.env().len(), 1);
        assert_eq!(second.env().columns().len(), 19);
        assert_eq!(second.runs().get(1, "day"), Some(&Value::from("d2")));
    }

    #[test]
    fn test_open_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.runs().is_empty());
        assert_eq!(store.env().columns().len(), 19);
    }
}
