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

//! CSV reading and writing for benchmark measurement tables.
//!
//! Raw benchmark output lands as `raw.csv` in each day directory, and the
//! analysis tables (`statistics.csv`, `speedup.csv`, `best_performers.csv`)
//! are written back as CSV. This crate covers both directions.
//!
//! # Examples
//!
//! ```
//! use mmbench_csv::{from_csv, to_csv};
//!
//! let ds = from_csv("impl,n,time_s\nnaive,256,0.5\n").unwrap();
//! assert_eq!(ds.len(), 1);
//! assert_eq!(to_csv(&ds).unwrap(), "impl,n,time_s\nnaive,256,0.5\n");
//! ```

mod error;
mod from_csv;
mod to_csv;

pub use error::{CsvError, Result};
pub use from_csv::{
    from_csv, from_csv_path, from_csv_reader, from_csv_reader_with_config, from_csv_with_config,
    parse_csv_value, FromCsvConfig, DEFAULT_MAX_ROWS, NULL_TOKENS,
};
pub use to_csv::{to_csv, to_csv_path, to_csv_with_config, to_csv_writer_with_config, ToCsvConfig};
