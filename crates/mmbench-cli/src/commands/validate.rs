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

//! Validate command - raw measurement file checks

use std::path::Path;

use colored::Colorize;
use mmbench::lint::{Severity, ValidationConfig, ValidationReport};
use mmbench::validate_file;

use super::check_input_file;
use crate::error::CliError;

/// Rules that report warnings by default.
const WARNING_RULES: &[&str] = &["type-coercion", "gflops-consistency", "trial-continuity"];

/// Validate a raw measurement file.
///
/// Prints findings in `text` or `json` form. With `warn_error`, warning
/// rules are escalated to errors.
///
/// # Errors
///
/// [`CliError::MissingInput`] for a missing file, and
/// [`CliError::ValidationFailed`] when any fatal finding was reported.
pub fn validate(raw: &Path, format: &str, warn_error: bool) -> Result<(), CliError> {
    check_input_file(raw)?;

    let mut config = ValidationConfig::default();
    if warn_error {
        for rule in WARNING_RULES {
            config.set_rule_error(rule);
        }
    }
    let report = validate_file(raw, config)?;

    match format {
        "json" => print_json(raw, &report)?,
        "text" => print_text(&report),
        other => {
            return Err(CliError::invalid_input(format!(
                "unknown format '{}' (expected text or json)",
                other
            )))
        }
    }

    if report.fatal_errors > 0 {
        return Err(CliError::ValidationFailed(report.fatal_errors));
    }
    Ok(())
}

fn print_json(raw: &Path, report: &ValidationReport) -> Result<(), CliError> {
    let json = serde_json::json!({
        "file": raw.display().to_string(),
        "fatal_errors": report.fatal_errors,
        "diagnostics": report.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_text(report: &ValidationReport) {
    for diag in &report.diagnostics {
        let label = match diag.severity() {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warning => "WARN".yellow().bold(),
            Severity::Hint => "HINT".blue(),
        };
        println!("{} {}", label, diag.message());
        if !diag.rows().is_empty() {
            let rows: Vec<String> = diag.rows().iter().map(usize::to_string).collect();
            println!("  rows: {}", rows.join(", "));
        }
        if let Some(suggestion) = diag.suggestion() {
            println!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
    if report.is_ok() {
        println!("{} Validation OK", "✓".green().bold());
    }
}
