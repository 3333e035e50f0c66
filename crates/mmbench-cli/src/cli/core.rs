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

//! Validation and comparison commands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::commands::{self, CompareArgs};
use crate::error::CliError;

#[derive(Subcommand)]
pub enum CoreCommands {
    /// Validate a raw measurement CSV
    ///
    /// Checks required columns, numeric types and ranges, throughput
    /// consistency and trial numbering. Exits 1 when any error is found and
    /// 2 when the file does not exist.
    Validate {
        /// Path to raw.csv
        #[arg(long, value_name = "FILE")]
        raw: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Treat warnings as errors
        #[arg(short = 'W', long)]
        warn_error: bool,
    },

    /// Compare implementations: statistics, speedups and best performers
    ///
    /// Loads every input (files or directories of CSV/Parquet), then writes
    /// statistics.csv, speedup.csv, best_performers.csv and
    /// comparison_report.md into the output directory.
    Compare {
        /// Input files or directories
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Baseline implementation for speedups
        #[arg(short, long, default_value = "naive")]
        baseline: String,

        /// Directory for tables and the report
        #[arg(short, long, default_value = "results/reports")]
        output_dir: PathBuf,

        /// Only include this implementation
        #[arg(long)]
        implementation: Option<String>,

        /// Smallest matrix size to include
        #[arg(long)]
        min_size: Option<i64>,

        /// Largest matrix size to include
        #[arg(long)]
        max_size: Option<i64>,

        /// Descend into subdirectories of input directories
        #[arg(short, long)]
        recursive: bool,

        /// Drop time outliers beyond this many standard deviations
        #[arg(long, value_name = "Z")]
        outliers: Option<f64>,
    },
}

impl CoreCommands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Validate {
                raw,
                format,
                warn_error,
            } => commands::validate(&raw, &format, warn_error),
            CoreCommands::Compare {
                inputs,
                baseline,
                output_dir,
                implementation,
                min_size,
                max_size,
                recursive,
                outliers,
            } => commands::compare(CompareArgs {
                inputs,
                baseline,
                output_dir,
                implementation,
                min_size,
                max_size,
                recursive,
                outlier_threshold: outliers,
            }),
        }
    }
}
