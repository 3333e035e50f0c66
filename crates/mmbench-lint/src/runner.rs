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

//! Validation runner

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::rules::{default_ranges, default_rules, ColumnRange, RuleConfig, ValidationRule};
use mmbench_core::{Dataset, REQUIRED_COLUMNS};
use serde::Serialize;
use std::collections::HashMap;

/// Maximum number of diagnostics to collect before stopping.
const MAX_DIAGNOSTICS: usize = 10_000;

/// Number of offending row positions kept per diagnostic.
const MAX_REPORTED_ROWS: usize = 5;

/// Configuration for the validator
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Rule configurations by rule ID
    pub rules: HashMap<String, RuleConfig>,
    /// Minimum severity to report
    pub min_severity: Severity,
    /// Maximum number of diagnostics to collect (default: 10,000)
    pub max_diagnostics: usize,
    /// Columns that must be present
    pub required_columns: Vec<String>,
    /// Accepted ranges for numeric columns
    pub ranges: Vec<ColumnRange>,
    /// Relative tolerance for the throughput check (default: 0.01)
    pub gflops_tolerance: f64,
    /// Offending row positions listed per diagnostic (default: 5)
    pub max_reported_rows: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            min_severity: Severity::Hint,
            max_diagnostics: MAX_DIAGNOSTICS,
            required_columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            ranges: default_ranges(),
            gflops_tolerance: 0.01,
            max_reported_rows: MAX_REPORTED_ROWS,
        }
    }
}

impl ValidationConfig {
    /// Disable a specific rule
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: false,
                error: false,
            },
        );
    }

    /// Enable a specific rule
    pub fn enable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: false,
            },
        );
    }

    /// Set a rule to error level
    pub fn set_rule_error(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: true,
            },
        );
    }

    /// Replace the accepted range of a column, adding it if absent.
    pub fn set_range(&mut self, column: &str, min: f64, max: f64) {
        self.ranges.retain(|r| r.column != column);
        self.ranges.push(ColumnRange::new(column, min, max));
    }
}

/// Result of validating one dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of error-severity finding categories (not rows).
    pub fatal_errors: usize,
    /// All findings, errors first.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Returns true when no fatal finding was reported.
    pub fn is_ok(&self) -> bool {
        self.fatal_errors == 0
    }

    /// Findings of error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    /// Findings of warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Findings of one kind.
    pub fn of_kind<'a>(&'a self, kind: &'a DiagnosticKind) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind() == kind)
    }
}

/// Validator
pub struct Validator {
    config: ValidationConfig,
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator with default rules
    pub fn new(config: ValidationConfig) -> Self {
        let rules = default_rules(
            &config.required_columns,
            &config.ranges,
            config.gflops_tolerance,
            config.max_reported_rows,
        );
        Self { config, rules }
    }

    /// Create a validator with custom rules
    pub fn with_rules(config: ValidationConfig, rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { config, rules }
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Identifiers and descriptions of the rules this validator runs.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|r| (r.id(), r.description()))
    }

    /// Run all enabled rules on a dataset.
    ///
    /// Rows are never removed or repaired. The fatal count is taken after
    /// escalation and before the severity filter, so hiding errors from the
    /// output does not hide them from the count.
    pub fn run(&self, dataset: &Dataset) -> ValidationReport {
        let mut diagnostics = Vec::new();
        let mut fatal_errors = 0;
        let mut limit_exceeded = false;

        for rule in &self.rules {
            let rule_config = self
                .config
                .rules
                .get(rule.id())
                .cloned()
                .unwrap_or_default();

            if !rule_config.enabled {
                continue;
            }

            let mut rule_diagnostics = rule.check(dataset);

            for diag in &mut rule_diagnostics {
                if rule_config.error && diag.severity() == Severity::Warning {
                    diag.escalate_to_error();
                }
            }
            fatal_errors += rule_diagnostics
                .iter()
                .filter(|d| d.severity() == Severity::Error)
                .count();

            for diag in rule_diagnostics
                .into_iter()
                .filter(|d| d.severity() >= self.config.min_severity)
            {
                if diagnostics.len() >= self.config.max_diagnostics {
                    limit_exceeded = true;
                    break;
                }
                diagnostics.push(diag);
            }
        }

        if limit_exceeded {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::Custom("diagnostic-limit-exceeded".to_string()),
                format!(
                    "Diagnostic limit of {} exceeded. Further diagnostics have been suppressed.",
                    self.config.max_diagnostics
                ),
                "validator",
            ));
        }

        // Stable sort keeps rule order within a severity.
        diagnostics.sort_by(|a, b| b.severity().cmp(&a.severity()));

        ValidationReport {
            fatal_errors,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ValidationRule;
    use mmbench_core::Value;

    struct AlwaysWarn;

    impl ValidationRule for AlwaysWarn {
        fn id(&self) -> &str {
            "always-warn"
        }
        fn description(&self) -> &str {
            "Emits two warnings"
        }
        fn check(&self, _dataset: &Dataset) -> Vec<Diagnostic> {
            vec![
                Diagnostic::warning(DiagnosticKind::Custom("a".into()), "first", self.id()),
                Diagnostic::warning(DiagnosticKind::Custom("b".into()), "second", self.id()),
            ]
        }
    }

    fn missing_everything() -> Dataset {
        let mut ds = Dataset::new(["n"]);
        ds.push_row(vec![Value::Int(-1)]).unwrap();
        ds
    }

    #[test]
    fn test_validation_config_default() {
        let config = ValidationConfig::default();
        assert_eq!(config.min_severity, Severity::Hint);
        assert!(config.rules.is_empty());
        assert_eq!(config.required_columns.len(), 10);
        assert_eq!(config.ranges.len(), 3);
        assert_eq!(config.gflops_tolerance, 0.01);
    }

    #[test]
    fn test_set_range_replaces() {
        let mut config = ValidationConfig::default();
        config.set_range("n", 16.0, 4096.0);
        assert_eq!(config.ranges.len(), 3);
        let n = config.ranges.iter().find(|r| r.column == "n").unwrap();
        assert_eq!(n.max, 4096.0);
    }

    #[test]
    fn test_fatal_count_is_categories() {
        let report = Validator::new(ValidationConfig::default()).run(&missing_everything());
        // missing columns + out-of-range n
        assert_eq!(report.fatal_errors, 2);
        assert!(!report.is_ok());
    }

    #[test]
    fn test_disable_rule() {
        let mut config = ValidationConfig::default();
        config.disable_rule("required-columns");
        let report = Validator::new(config).run(&missing_everything());
        assert_eq!(report.fatal_errors, 1);
        assert!(report.of_kind(&DiagnosticKind::MissingColumns).next().is_none());
    }

    #[test]
    fn test_escalation_counts_as_fatal() {
        let mut config = ValidationConfig::default();
        config.set_rule_error("always-warn");
        let runner = Validator::with_rules(config, vec![Box::new(AlwaysWarn)]);
        let report = runner.run(&Dataset::default());
        assert_eq!(report.fatal_errors, 2);
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_min_severity_hides_but_still_counts() {
        let config = ValidationConfig {
            min_severity: Severity::Error,
            ..Default::default()
        };
        let mut runner = Validator::with_rules(config, vec![]);
        runner.add_rule(Box::new(AlwaysWarn));
        let report = runner.run(&Dataset::default());
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.fatal_errors, 0);
    }

    #[test]
    fn test_max_diagnostics_limit() {
        let config = ValidationConfig {
            max_diagnostics: 1,
            ..Default::default()
        };
        let runner = Validator::with_rules(config, vec![Box::new(AlwaysWarn)]);
        let report = runner.run(&Dataset::default());
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[1].rule_id(), "validator");
    }

    #[test]
    fn test_errors_sorted_first() {
        let mut runner = Validator::new(ValidationConfig::default());
        runner.add_rule(Box::new(AlwaysWarn));
        let report = runner.run(&missing_everything());
        assert_eq!(report.diagnostics[0].severity(), Severity::Error);
        assert_eq!(
            report.diagnostics.last().unwrap().severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_rules_listing() {
        let runner = Validator::new(ValidationConfig::default());
        assert_eq!(runner.rules().count(), 5);
    }
}
