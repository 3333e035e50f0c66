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

//! # mmbench
//!
//! Ingestion, validation and comparison of matrix-multiplication benchmark
//! results.
//!
//! Raw measurements from several implementations (naive, OpenMP, MPI, CUDA,
//! ...) are loaded from CSV or Parquet, validated, enriched with the run's
//! environment descriptor, and reduced to per-group statistics, speedups
//! against a baseline and best performers per matrix size.
//!
//! ## Quick Start
//!
//! ```rust
//! use mmbench::stats::{aggregate, speedup, AggregationSpec, GroupKeys, SpeedupConfig};
//! use mmbench::{enrich_with_env, lint, EnvironmentRecord};
//!
//! let mut ds = mmbench::csv::from_csv(
//!     "run_id,datetime_iso,hostname,algo,impl,precision,n,trial,time_s,gflops\n\
//!      r1,2025-01-14T09:00:00Z,node01,gemm,naive,fp64,256,1,0.02,1.6777216\n\
//!      r1,2025-01-14T09:00:00Z,node01,gemm,openmp,fp64,256,1,0.01,3.3554432\n",
//! )
//! .unwrap();
//!
//! let report = lint::validate(&ds);
//! assert_eq!(report.fatal_errors, 0);
//!
//! let env = EnvironmentRecord::from_json(r#"{"cpu": {"model": "EPYC"}}"#).unwrap();
//! enrich_with_env(&mut ds, Some(&env));
//!
//! let stats = aggregate(&ds, GroupKeys::default().as_slice(), &AggregationSpec::default());
//! assert_eq!(stats.len(), 2);
//!
//! let records = speedup(&ds, &SpeedupConfig::default());
//! assert!((records[0].speedup - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`csv`]: CSV sources and tables
//! - [`parquet`]: Parquet tables and the durable store
//! - [`lint`]: schema, range and consistency validation
//! - [`stats`]: aggregation, speedup and reports
//! - [`loader`]: multi-source loading
//! - [`pipeline`]: ingest, store and compare operations

pub use mmbench_core::{
    apply_duplicate_policy, enrich_with_env, expected_gflops, schema, Dataset, DuplicatePolicy,
    EnvironmentRecord, MeasurementRecord, MmbenchError, MmbenchErrorKind, MmbenchResult, Row,
    Value, ValueKey, COLUMN_ALIASES, ENRICHMENT_FIELDS, REQUIRED_COLUMNS,
};

mod error_ext;
pub use error_ext::MmbenchResultExt;

pub mod loader;
pub mod pipeline;

pub use loader::{load_sources, LoadFilters, LoadReport, LoaderConfig};
pub use pipeline::{compare, ingest_day, store_days, validate_file, CompareConfig};

pub mod csv {
    //! CSV sources and tables
    pub use mmbench_csv::{
        from_csv, from_csv_path, from_csv_with_config, to_csv, to_csv_path, to_csv_with_config,
        CsvError, FromCsvConfig, ToCsvConfig,
    };
}

pub mod parquet {
    //! Parquet tables and the durable store
    pub use mmbench_parquet::{
        from_parquet, to_parquet, to_parquet_with_config, Store, ToParquetConfig, ENV_TABLE,
        RUNS_TABLE,
    };
}

pub mod lint {
    //! Validation
    pub use mmbench_lint::{
        validate, validate_with_config, Diagnostic, DiagnosticKind, Severity, ValidationConfig,
        ValidationReport, ValidationRule, Validator,
    };
}

pub mod stats {
    //! Aggregation, speedup and reports
    pub use mmbench_stats::*;
}
