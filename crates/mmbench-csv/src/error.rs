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

//! Error types for CSV conversion operations.

use mmbench_core::{MmbenchError, MmbenchErrorKind};
use thiserror::Error;

/// CSV conversion error types.
///
/// # Examples
///
/// ```
/// use mmbench_csv::CsvError;
///
/// let err = CsvError::WidthMismatch {
///     expected: 10,
///     actual: 9,
///     row: 4,
/// };
/// assert_eq!(
///     err.to_string(),
///     "Row width mismatch: expected 10 columns, got 9 in row 4"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV parsing error at a specific line.
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// Invalid header format or content.
    #[error("Invalid header at position {position}: {reason}")]
    InvalidHeader {
        /// Position of the invalid header (0-based).
        position: usize,
        /// Reason the header is invalid.
        reason: String,
    },

    /// Row has wrong number of columns.
    #[error("Row width mismatch: expected {expected} columns, got {actual} in row {row}")]
    WidthMismatch {
        /// Expected number of columns.
        expected: usize,
        /// Actual number of columns in the row.
        actual: usize,
        /// Row number where the mismatch occurred (1-based).
        row: usize,
    },

    /// Row count exceeded the configured limit.
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Actual row count encountered.
        actual: usize,
    },

    /// I/O error during CSV reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// Failure while writing a table.
    #[error("CSV write error: {0}")]
    Write(String),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    /// Add context to an error message.
    pub fn with_context(self, context: String) -> Self {
        match self {
            CsvError::ParseError { line, message } => CsvError::ParseError {
                line,
                message: format!("{} ({})", message, context),
            },
            CsvError::Write(msg) => CsvError::Write(format!("{} ({})", msg, context)),
            CsvError::Other(msg) => CsvError::Other(format!("{} ({})", msg, context)),
            other => CsvError::Other(format!("{} ({})", other, context)),
        }
    }
}

impl From<CsvError> for MmbenchError {
    fn from(err: CsvError) -> Self {
        let kind = match &err {
            CsvError::Io(_) => MmbenchErrorKind::Io,
            CsvError::Write(_) => MmbenchErrorKind::Encoding,
            _ => MmbenchErrorKind::Parse,
        };
        MmbenchError::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = CsvError::ParseError {
            line: 42,
            message: "unterminated quote".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CSV parse error at line 42: unterminated quote"
        );
    }

    #[test]
    fn test_invalid_header_display() {
        let err = CsvError::InvalidHeader {
            position: 3,
            reason: "Empty column name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid header at position 3: Empty column name"
        );
    }

    #[test]
    fn test_security_limit_display() {
        let err = CsvError::SecurityLimit {
            limit: 10,
            actual: 11,
        };
        assert_eq!(
            err.to_string(),
            "Security limit exceeded: row count 11 exceeds maximum 10"
        );
    }

    #[test]
    fn test_with_context_parse_error() {
        let err = CsvError::ParseError {
            line: 5,
            message: "bad field".to_string(),
        }
        .with_context("in raw.csv".to_string());
        assert_eq!(
            err.to_string(),
            "CSV parse error at line 5: bad field (in raw.csv)"
        );
    }

    #[test]
    fn test_with_context_wraps_other_variants() {
        let err = CsvError::WidthMismatch {
            expected: 2,
            actual: 1,
            row: 3,
        }
        .with_context("day 2025-01-14".to_string());
        assert!(matches!(err, CsvError::Other(_)));
        assert!(err.to_string().ends_with("(day 2025-01-14)"));
    }

    #[test]
    fn test_into_mmbench_error_kinds() {
        let io = CsvError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(MmbenchError::from(io).kind, MmbenchErrorKind::Io);

        let write = CsvError::Write("disk full".to_string());
        assert_eq!(MmbenchError::from(write).kind, MmbenchErrorKind::Encoding);

        let parse = CsvError::Other("x".to_string());
        assert_eq!(MmbenchError::from(parse).kind, MmbenchErrorKind::Parse);
    }
}
