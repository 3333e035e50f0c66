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

//! Core data model for matrix-multiplication benchmark results.
//!
//! This crate holds the pieces every other stage of the pipeline shares:
//!
//! - [`Dataset`] and [`Value`]: the in-memory measurement table
//! - [`schema`]: canonical column names, required columns and aliases
//! - [`EnvironmentRecord`]: the per-run `env.json` descriptor
//! - [`enrich_with_env`]: merges descriptor fields into measurement rows
//! - [`DuplicatePolicy`]: optional handling of repeated trial rows
//! - [`MmbenchError`]: the error type returned by all pipeline crates
//!
//! # Example
//!
//! ```
//! use mmbench_core::{enrich_with_env, Dataset, EnvironmentRecord, Value};
//!
//! let mut ds = Dataset::new(["impl", "n"]);
//! ds.push_row(vec!["naive".into(), Value::Int(256)]).unwrap();
//!
//! let env = EnvironmentRecord::from_json(r#"{"hostname": "node01"}"#).unwrap();
//! let added = enrich_with_env(&mut ds, Some(&env));
//! assert_eq!(added.len(), 7);
//! assert_eq!(ds.get(0, "env_hostname"), Some(&Value::from("node01")));
//! ```

mod dataset;
mod dedup;
mod enrich;
mod env;
mod error;
pub mod schema;
mod value;

pub use dataset::{Dataset, Row};
pub use dedup::{apply_duplicate_policy, DuplicatePolicy, TRIAL_IDENTITY};
pub use enrich::{enrich_with_env, ENRICHMENT_FIELDS};
pub use env::{EnvironmentRecord, ENV_JSON_COLUMN, ENV_TABLE_FIELDS};
pub use error::{MmbenchError, MmbenchErrorKind, MmbenchResult};
pub use schema::{expected_gflops, MeasurementRecord, COLUMN_ALIASES, REQUIRED_COLUMNS};
pub use value::{Value, ValueKey};
