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

//! Command implementations.

mod compare;
mod ingest;
mod store;
mod validate;

pub use compare::{compare, CompareArgs};
pub use ingest::ingest;
pub use store::store;
pub use validate::validate;

use std::fs;
use std::path::Path;

use mmbench::lint::{Severity, ValidationReport};
use tracing::{info, warn};

use crate::error::CliError;

/// Default input file size limit (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`], in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "MMBENCH_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Check that an input file exists and is within the size limit.
///
/// # Errors
///
/// [`CliError::MissingInput`] when the path does not exist, and
/// [`CliError::FileTooLarge`] when it exceeds `MMBENCH_MAX_FILE_SIZE`.
pub fn check_input_file(path: &Path) -> Result<(), CliError> {
    let metadata = fs::metadata(path).map_err(|_| CliError::missing_input(path))?;
    let max = get_max_file_size();
    if metadata.is_file() && metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }
    Ok(())
}

/// Check that an input directory exists.
pub fn check_input_dir(path: &Path) -> Result<(), CliError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CliError::missing_input(path))
    }
}

/// Log each validation finding, errors and warnings at warn level.
fn log_findings(report: &ValidationReport) {
    for diagnostic in &report.diagnostics {
        match diagnostic.severity() {
            Severity::Error | Severity::Warning => warn!("{}", diagnostic),
            Severity::Hint => info!("{}", diagnostic),
        }
    }
}
