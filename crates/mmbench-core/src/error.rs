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

//! Error types for benchmark ingestion and analysis.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MmbenchErrorKind {
    /// I/O error (file operations).
    Io,
    /// A source or document could not be parsed.
    Parse,
    /// Column layout does not match what an operation needs.
    Schema,
    /// A single measurement source failed to load.
    Source,
    /// None of the requested sources produced any rows.
    NoData,
    /// Error while converting between table representations.
    Conversion,
    /// Error while encoding an output table (CSV, Parquet, JSON).
    Encoding,
}

impl fmt::Display for MmbenchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "IOError"),
            Self::Parse => write!(f, "ParseError"),
            Self::Schema => write!(f, "SchemaError"),
            Self::Source => write!(f, "SourceLoadError"),
            Self::NoData => write!(f, "NoDataError"),
            Self::Conversion => write!(f, "ConversionError"),
            Self::Encoding => write!(f, "EncodingError"),
        }
    }
}

/// An error raised by the ingestion pipeline.
///
/// Validation findings are never reported through this type; they are
/// returned as data by the validator. This error is reserved for conditions
/// that stop an operation outright.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}{}", location_suffix(.path, .context))]
pub struct MmbenchError {
    /// The kind of error.
    pub kind: MmbenchErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// File or directory the error relates to, if any.
    pub path: Option<PathBuf>,
    /// Additional context (e.g., "while reading day 2025-01-14").
    pub context: Option<String>,
}

impl MmbenchError {
    /// Create a new error.
    pub fn new(kind: MmbenchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Attach the path the error relates to.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::Io, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::Parse, message)
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::Schema, message)
    }

    pub fn source_load(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::Source, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::NoData, message)
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::Conversion, message)
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(MmbenchErrorKind::Encoding, message)
    }

    /// Returns true when no source could be loaded at all.
    pub fn is_no_data(&self) -> bool {
        self.kind == MmbenchErrorKind::NoData
    }
}

impl From<std::io::Error> for MmbenchError {
    fn from(err: std::io::Error) -> Self {
        MmbenchError::io(err.to_string())
    }
}

impl From<serde_json::Error> for MmbenchError {
    fn from(err: serde_json::Error) -> Self {
        MmbenchError::parse(format!("invalid JSON: {}", err))
    }
}

fn location_suffix(path: &Option<PathBuf>, context: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(path) = path {
        out.push_str(&format!(" ({})", path.display()));
    }
    if let Some(context) = context {
        out.push_str(&format!(" [{}]", context));
    }
    out
}

/// Result type for pipeline operations.
pub type MmbenchResult<T> = Result<T, MmbenchError>;
