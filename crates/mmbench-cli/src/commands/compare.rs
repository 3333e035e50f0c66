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

//! Compare command - implementation statistics, speedups and report

use std::path::PathBuf;

use colored::Colorize;
use mmbench::pipeline::sizes_tested;
use mmbench::stats::SpeedupConfig;
use mmbench::{compare as run_compare, CompareConfig, LoadFilters, LoaderConfig};
use tracing::warn;

use super::{check_input_file, log_findings};
use crate::error::CliError;

/// Arguments of the compare command.
#[derive(Debug, Clone)]
pub struct CompareArgs {
    pub inputs: Vec<PathBuf>,
    pub baseline: String,
    pub output_dir: PathBuf,
    pub implementation: Option<String>,
    pub min_size: Option<i64>,
    pub max_size: Option<i64>,
    pub recursive: bool,
    pub outlier_threshold: Option<f64>,
}

/// Compare implementations across the given sources.
///
/// # Errors
///
/// [`CliError::MissingInput`] when an input does not exist, and a pipeline
/// error of kind `NoData` when none of the inputs could be read.
pub fn compare(args: CompareArgs) -> Result<(), CliError> {
    for input in &args.inputs {
        check_input_file(input)?;
    }

    let config = CompareConfig {
        loader: LoaderConfig {
            recursive: args.recursive,
            filters: LoadFilters {
                implementation: args.implementation,
                min_size: args.min_size,
                max_size: args.max_size,
            },
            ..Default::default()
        },
        speedup: SpeedupConfig::default().with_baseline(args.baseline),
        outlier_threshold: args.outlier_threshold,
        ..Default::default()
    };

    let outcome = run_compare(&args.inputs, &args.output_dir, &config)?;

    for loaded in &outcome.load.loaded {
        println!("  Loaded: {} ({} rows)", loaded.path.display(), loaded.rows);
    }
    for skipped in &outcome.load.skipped {
        println!(
            "  {} {}: {}",
            "Error loading".red(),
            skipped.path.display(),
            skipped.error
        );
    }
    println!("\nTotal rows: {}", outcome.load.dataset.len());
    log_findings(&outcome.validation);
    if outcome.validation.fatal_errors > 0 {
        warn!(
            "validation reported {} error(s); results include the offending rows",
            outcome.validation.fatal_errors
        );
    }
    if outcome.outliers_removed > 0 {
        println!("Removed {} outlier(s)", outcome.outliers_removed);
    }

    println!("\nImplementations found:");
    for summary in &outcome.report.implementations {
        println!("  - {}: {} measurements", summary.implementation, summary.measurements);
    }
    println!("\nMatrix sizes tested:");
    for size in sizes_tested(&outcome.load.dataset) {
        println!("  - {}x{}", size, size);
    }
    if outcome.report.speedups.is_empty() {
        println!(
            "\n{} no speedups against baseline '{}'",
            "!".yellow().bold(),
            config.speedup.baseline
        );
    }

    println!();
    for path in &outcome.written {
        println!("{} wrote {}", "✓".green().bold(), path.display());
    }
    Ok(())
}
