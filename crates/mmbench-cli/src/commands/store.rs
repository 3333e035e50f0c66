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

//! Store command - append day directories to the durable tables

use std::path::{Path, PathBuf};

use colored::Colorize;
use mmbench::parquet::ToParquetConfig;
use mmbench::store_days;
use tracing::warn;

use super::check_input_dir;
use crate::error::CliError;

/// Append each day's measurements and environment to `runs.parquet` and
/// `env.parquet` under `out`.
pub fn store(days: &[PathBuf], out: &Path) -> Result<(), CliError> {
    if days.is_empty() {
        return Err(CliError::invalid_input("at least one day directory is required"));
    }
    for day in days {
        check_input_dir(day)?;
    }

    let outcome = store_days(days, out, &ToParquetConfig::default())?;

    for day in &outcome.days {
        if day.fatal_errors > 0 {
            warn!(
                "{}: validation had {} error(s); stored for audit",
                day.day, day.fatal_errors
            );
            println!("{} {}: {} rows", "!".yellow().bold(), day.day, day.rows);
        } else {
            println!("{} {}: {} rows", "✓".green().bold(), day.day, day.rows);
        }
    }
    for path in &outcome.written {
        println!("  wrote {}", path.display());
    }
    Ok(())
}
