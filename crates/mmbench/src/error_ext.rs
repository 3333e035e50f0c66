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

//! Error context helpers.
//!
//! ```rust
//! use mmbench::{MmbenchError, MmbenchResultExt};
//!
//! fn read_raw(path: &str) -> Result<String, MmbenchError> {
//!     std::fs::read_to_string(path).with_context(|| format!("while reading {}", path))
//! }
//!
//! let err = read_raw("/definitely/not/here/raw.csv").unwrap_err();
//! assert!(err.context.unwrap().contains("raw.csv"));
//! ```

use std::fmt;

use mmbench_core::MmbenchError;

/// Extension trait for attaching context to fallible results.
///
/// Context accumulates: an error that already carries context keeps it,
/// and the new context is appended after a `; `.
pub trait MmbenchResultExt<T> {
    fn context<C>(self, context: C) -> Result<T, MmbenchError>
    where
        C: fmt::Display;

    /// Like [`context`](MmbenchResultExt::context), evaluated only on error.
    fn with_context<C, F>(self, f: F) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

fn add_context(mut err: MmbenchError, context: String) -> MmbenchError {
    err.context = Some(match err.context.take() {
        Some(existing) => format!("{}; {}", existing, context),
        None => context,
    });
    err
}

impl<T> MmbenchResultExt<T> for Result<T, MmbenchError> {
    fn context<C>(self, context: C) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e, f().to_string()))
    }
}

impl<T> MmbenchResultExt<T> for Result<T, std::io::Error> {
    fn context<C>(self, context: C) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e.into(), f().to_string()))
    }
}

impl<T> MmbenchResultExt<T> for Result<T, mmbench_csv::CsvError> {
    fn context<C>(self, context: C) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, MmbenchError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e.into(), f().to_string()))
    }
}
