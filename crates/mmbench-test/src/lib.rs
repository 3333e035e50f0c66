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

//! Shared test fixtures for the mmbench pipeline crates.
//!
//! # Quick Start
//!
//! ```rust
//! use mmbench_test::fixtures;
//!
//! let ds = fixtures::clean_run();          // valid, consistent measurements
//! let ds = fixtures::legacy_run();         // implementation/matrix_size vocabulary
//! let csv = fixtures::CLEAN_RAW_CSV;       // raw.csv text
//!
//! use mmbench_test::fixtures::builders::RunBuilder;
//!
//! let ds = RunBuilder::new("r7")
//!     .measure("naive", 512, &[0.1, 0.12])
//!     .build();
//! assert_eq!(ds.len(), 2);
//! ```

use mmbench_core::Dataset;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> Dataset)>;

/// Canonical measurement fixtures.
pub mod fixtures;

pub use fixtures::*;
