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

//! Ingest command - validate, enrich and persist one day directory

use std::path::Path;

use colored::Colorize;
use mmbench::pipeline::RAW_CSV;
use mmbench::ingest_day;
use tracing::warn;

use super::{check_input_dir, check_input_file, log_findings};
use crate::error::CliError;

/// Ingest a day directory.
///
/// Validation errors are reported but do not fail the command; the data is
/// written for inspection either way.
pub fn ingest(day: &Path, out: Option<&Path>) -> Result<(), CliError> {
    check_input_dir(day)?;
    check_input_file(&day.join(RAW_CSV))?;

    let outcome = ingest_day(day, out)?;

    log_findings(&outcome.validation);
    if outcome.validation.fatal_errors > 0 {
        warn!(
            "validation reported {} error(s); continuing to write for inspection",
            outcome.validation.fatal_errors
        );
    }
    if !outcome.added_columns.is_empty() {
        println!(
            "{} enriched with {}",
            "[ingest]".cyan(),
            outcome.added_columns.join(", ")
        );
    }
    if outcome.fell_back {
        println!(
            "{} wrote fallback CSV -> {}",
            "[ingest]".yellow(),
            outcome.output.display()
        );
    } else {
        println!(
            "{} {} wrote Parquet -> {} ({} rows)",
            "✓".green().bold(),
            "[ingest]".cyan(),
            outcome.output.display(),
            outcome.rows
        );
    }
    Ok(())
}
