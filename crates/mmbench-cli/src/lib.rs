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

//! mmbench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Validation
//!
//! - **validate**: Check a raw measurement CSV against the schema
//!
//! ## Data
//!
//! - **ingest**: Validate and enrich one day folder, write Parquet
//! - **store**: Append day folders to the runs and env tables
//!
//! ## Analysis
//!
//! - **compare**: Statistics, speedups, best performers and a Markdown report
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Validation errors or a failed pipeline step |
//! | 2 | Missing input, or no rows could be loaded |
//!
//! # Examples
//!
//! ```no_run
//! use mmbench_cli::commands::validate;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), mmbench_cli::error::CliError> {
//! validate(Path::new("results/2024-03-01/raw.csv"), "text", false)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
