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

//! mmbench Command Line Interface

use std::process::ExitCode;

use clap::Parser;
use mmbench_cli::cli::Commands;
use tracing_subscriber::EnvFilter;

/// mmbench - matrix multiplication benchmark pipeline
///
/// Validates raw measurement files, enriches them with environment
/// metadata, stores them as Parquet and compares implementations.
///
/// # Examples
///
/// ```bash
/// # Validate a day's raw measurements
/// mmbench validate --raw results/2024-03-01/raw.csv
///
/// # Ingest the day folder into raw.parquet
/// mmbench ingest --day results/2024-03-01
///
/// # Compare all implementations against the naive baseline
/// mmbench compare results/ --recursive --output-dir results/reports
/// ```
#[derive(Parser)]
#[command(name = "mmbench")]
#[command(author, version, about = "mmbench - matrix multiplication benchmark pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mmbench=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
