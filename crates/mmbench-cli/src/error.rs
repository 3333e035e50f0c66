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

//! Structured error types for the mmbench CLI.

use std::path::PathBuf;

use mmbench::MmbenchError;
use thiserror::Error;

/// Exit code for a run whose validation found fatal errors.
pub const EXIT_VALIDATION_FAILED: u8 = 1;
/// Exit code for a missing input file or directory.
pub const EXIT_MISSING_INPUT: u8 = 2;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// An input path does not exist.
    #[error("no such file: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// Input file exceeds `MMBENCH_MAX_FILE_SIZE`.
    #[error("File '{}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)", .path.display())]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// Validation completed with fatal findings.
    #[error("Validation completed with {0} error group(s)")]
    ValidationFailed(usize),

    /// A pipeline operation failed.
    #[error(transparent)]
    Pipeline(#[from] MmbenchError),

    #[error("JSON format error: {message}")]
    JsonFormat { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingInput { .. } => EXIT_MISSING_INPUT,
            CliError::Pipeline(e) if e.is_no_data() => EXIT_MISSING_INPUT,
            _ => EXIT_VALIDATION_FAILED,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}
