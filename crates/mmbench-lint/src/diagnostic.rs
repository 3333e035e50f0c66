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

//! Validation diagnostic types

use serde::Serialize;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational hint
    Hint,
    /// Warning - reported, never counted as fatal
    Warning,
    /// Error - counted toward the fatal error total
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hint => write!(f, "hint"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// One or more required columns are absent
    MissingColumns,
    /// Cells that could not be coerced to the column's numeric type
    Unparsable,
    /// Values outside the accepted range of a column
    OutOfRange,
    /// Stored throughput disagrees with size and time
    ThroughputMismatch,
    /// A trial group does not start at trial 1
    TrialStart,
    /// Custom rule violation
    Custom(String),
}

/// A validation diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
    /// Column the finding is about, if it concerns a single column
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<String>,
    /// Number of rows affected
    #[serde(skip_serializing_if = "Option::is_none")]
    row_count: Option<usize>,
    /// First offending row positions (0-based)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rows: Vec<usize>,
    rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            column: None,
            row_count: None,
            rows: Vec::new(),
            rule_id: rule_id.into(),
            suggestion: None,
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, kind, message, rule_id)
    }

    pub fn error(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, kind, message, rule_id)
    }

    pub fn hint(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Hint, kind, message, rule_id)
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_row_count(mut self, count: usize) -> Self {
        self.row_count = Some(count);
        self
    }

    pub fn with_rows(mut self, rows: Vec<usize>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // Public getters
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn row_count(&self) -> Option<usize> {
        self.row_count
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Escalate the severity to error level (used by the validator).
    pub fn escalate_to_error(&mut self) {
        self.severity = Severity::Error;
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.rule_id, self.severity, self.message)?;

        if !self.rows.is_empty() {
            let rows: Vec<String> = self.rows.iter().map(|r| r.to_string()).collect();
            write!(f, " (rows {})", rows.join(", "))?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }

        Ok(())
    }
}
