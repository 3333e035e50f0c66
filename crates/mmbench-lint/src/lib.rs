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

//! Measurement table validation
//!
//! Checks a [`Dataset`] for required columns, parsable numbers, sane value
//! ranges, throughput consistency and trial numbering. Findings are returned
//! as data; rows are never removed or repaired.
//!
//! ## Quick Start
//!
//! ```rust
//! use mmbench_core::Dataset;
//! use mmbench_lint::{validate, Severity};
//!
//! let ds = Dataset::new(["impl", "n"]);
//! let report = validate(&ds);
//!
//! assert_eq!(report.fatal_errors, 1);
//! for diag in &report.diagnostics {
//!     if diag.severity() == Severity::Error {
//!         eprintln!("{}", diag);
//!     }
//! }
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use mmbench_core::Dataset;
//! use mmbench_lint::{validate_with_config, Severity, ValidationConfig};
//!
//! let mut config = ValidationConfig::default();
//! config.disable_rule("required-columns");
//! config.set_rule_error("gflops-consistency");
//! config.set_range("n", 16.0, 8192.0);
//! config.min_severity = Severity::Warning;
//!
//! let report = validate_with_config(&Dataset::new(["n"]), config);
//! assert!(report.is_ok());
//! ```

mod diagnostic;
mod rules;
mod runner;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use rules::{
    default_ranges, ColumnRange, GflopsConsistencyRule, NumericKind, RequiredColumnsRule,
    RuleConfig, TrialContinuityRule, TypeCoercionRule, ValidationRule, ValueRangeRule,
    NUMERIC_COLUMNS,
};
pub use runner::{ValidationConfig, ValidationReport, Validator};

use mmbench_core::Dataset;

/// Run all default rules on a dataset
pub fn validate(dataset: &Dataset) -> ValidationReport {
    Validator::new(ValidationConfig::default()).run(dataset)
}

/// Run validation with custom configuration
pub fn validate_with_config(dataset: &Dataset, config: ValidationConfig) -> ValidationReport {
    Validator::new(config).run(dataset)
}
