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

//! Markdown comparison report.
//!
//! Rendering is driven by an explicit [`ReportConfig`] passed per call; no
//! state is shared between reports.

use std::fs;
use std::io;
use std::path::Path;

use mmbench_core::{Dataset, Value};
use serde::Serialize;

use crate::aggregate::{aggregate, AggregationSpec};
use crate::speedup::{
    best_performers, best_performers_table, speedup, speedup_pivot, speedup_table,
    summarize_implementations, BestPerformer, ImplementationSummary, SpeedupConfig,
    SpeedupRecord,
};

/// A section of the comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportSection {
    Implementations,
    Statistics,
    Speedup,
    BestPerformers,
}

impl ReportSection {
    pub const ALL: [ReportSection; 4] = [
        ReportSection::Implementations,
        ReportSection::Statistics,
        ReportSection::Speedup,
        ReportSection::BestPerformers,
    ];
}

/// Presentation settings for one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub title: String,
    /// Digits after the decimal point for float cells.
    pub float_precision: usize,
    /// Display name of the baseline; defaults to the analyzed baseline.
    pub baseline_label: Option<String>,
    /// Sections to render, in order.
    pub sections: Vec<ReportSection>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Matrix Multiplication Performance Comparison".to_string(),
            float_precision: 4,
            baseline_label: None,
            sections: ReportSection::ALL.to_vec(),
        }
    }
}

/// Everything a comparison report shows, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub timestamp: String,
    pub baseline: String,
    pub implementations: Vec<ImplementationSummary>,
    pub statistics: Dataset,
    pub speedups: Vec<SpeedupRecord>,
    pub best_performers: Vec<BestPerformer>,
}

impl ComparisonReport {
    /// Run the aggregator and speedup analyzer over `dataset`.
    pub fn build(
        dataset: &Dataset,
        keys: &[String],
        spec: &AggregationSpec,
        config: &SpeedupConfig,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            baseline: config.baseline.clone(),
            implementations: summarize_implementations(dataset, config),
            statistics: aggregate(dataset, keys, spec),
            speedups: speedup(dataset, config),
            best_performers: best_performers(dataset, config),
        }
    }

    pub fn speedup_table(&self) -> Dataset {
        speedup_table(&self.speedups)
    }

    pub fn best_performers_table(&self) -> Dataset {
        best_performers_table(&self.best_performers)
    }
}

fn format_cell(value: &Value, precision: usize) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Float(f) => format!("{:.*}", precision, f),
        other => other.to_string(),
    }
}

/// Render a dataset as a Markdown table.
pub fn markdown_table(dataset: &Dataset, precision: usize) -> String {
    let mut md = String::new();
    md.push_str(&format!("| {} |\n", dataset.columns().join(" | ")));
    md.push_str(&format!(
        "|{}\n",
        dataset.columns().iter().map(|_| "---|").collect::<String>()
    ));
    for row in dataset.rows() {
        let cells: Vec<String> = row.iter().map(|v| format_cell(v, precision)).collect();
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    md
}

/// Render the report as Markdown.
pub fn render_markdown(report: &ComparisonReport, config: &ReportConfig) -> String {
    let baseline = config.baseline_label.as_deref().unwrap_or(&report.baseline);
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", config.title));
    md.push_str(&format!("**Generated:** {}\n\n", report.timestamp));
    md.push_str(&format!("**Baseline:** {}\n\n", baseline));

    for section in &config.sections {
        match section {
            ReportSection::Implementations => {
                md.push_str("## Implementations\n\n");
                md.push_str("| Implementation | Measurements | Sizes Tested |\n");
                md.push_str("|---|---|---|\n");
                for s in &report.implementations {
                    let sizes: Vec<String> = s.sizes.iter().map(i64::to_string).collect();
                    md.push_str(&format!(
                        "| {} | {} | {} |\n",
                        s.implementation,
                        s.measurements,
                        sizes.join(", ")
                    ));
                }
                md.push('\n');
            }
            ReportSection::Statistics => {
                md.push_str("## Summary Statistics\n\n");
                md.push_str(&markdown_table(&report.statistics, config.float_precision));
                md.push('\n');
            }
            ReportSection::Speedup => {
                md.push_str(&format!("## Speedup vs {}\n\n", baseline));
                if report.speedups.is_empty() {
                    md.push_str(&format!("No speedups: baseline `{}` has no shared sizes.\n\n", baseline));
                } else {
                    let pivot = speedup_pivot(&report.speedups);
                    md.push_str(&markdown_table(&pivot, config.float_precision));
                    md.push('\n');
                }
            }
            ReportSection::BestPerformers => {
                md.push_str("## Best Performers\n\n");
                md.push_str("| Matrix Size | Implementation | GFLOPS |\n");
                md.push_str("|---|---|---|\n");
                for b in &report.best_performers {
                    md.push_str(&format!(
                        "| {} | {} | {:.*} |\n",
                        b.matrix_size, b.implementation, config.float_precision, b.gflops
                    ));
                }
                md.push('\n');
            }
        }
    }

    md
}

/// Write the rendered report to `path`.
pub fn export_markdown(
    report: &ComparisonReport,
    config: &ReportConfig,
    path: &Path,
) -> io::Result<()> {
    fs::write(path, render_markdown(report, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::GroupKeys;
    use mmbench_test::fixtures;
    use tempfile::NamedTempFile;

    fn clean_report() -> ComparisonReport {
        ComparisonReport::build(
            &fixtures::clean_run(),
            GroupKeys::default().as_slice(),
            &AggregationSpec::default(),
            &SpeedupConfig::default(),
        )
    }

    #[test]
    fn test_build() {
        let report = clean_report();
        assert_eq!(report.statistics.len(), 4);
        assert_eq!(report.speedups.len(), 2);
        assert_eq!(report.best_performers.len(), 2);
        assert_eq!(report.implementations.len(), 2);
    }

    #[test]
    fn test_render_all_sections() {
        let md = render_markdown(&clean_report(), &ReportConfig::default());
        assert!(md.starts_with("# Matrix Multiplication Performance Comparison"));
        assert!(md.contains("## Implementations"));
        assert!(md.contains("| openmp | 4 | 256, 512 |"));
        assert!(md.contains("## Summary Statistics"));
        assert!(md.contains("## Speedup vs naive"));
        assert!(md.contains("| 256 | 2.0000 |"));
        assert!(md.contains("## Best Performers"));
    }

    #[test]
    fn test_sections_and_label_are_configurable() {
        let config = ReportConfig {
            title: "Nightly".into(),
            float_precision: 1,
            baseline_label: Some("serial".into()),
            sections: vec![ReportSection::Speedup],
        };
        let md = render_markdown(&clean_report(), &config);
        assert!(md.starts_with("# Nightly"));
        assert!(md.contains("## Speedup vs serial"));
        assert!(md.contains("| 512 | 4.0 |"));
        assert!(!md.contains("## Best Performers"));
    }

    #[test]
    fn test_markdown_table_nulls() {
        let mut ds = Dataset::new(["a", "b"]);
        ds.push_row(vec![Value::Null, Value::Float(0.5)]).unwrap();
        let md = markdown_table(&ds, 2);
        assert_eq!(md, "| a | b |\n|---|---|\n| - | 0.50 |\n");
    }

    #[test]
    fn test_export_markdown() {
        let temp = NamedTempFile::new().unwrap();
        export_markdown(&clean_report(), &ReportConfig::default(), temp.path()).unwrap();
        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.contains("**Baseline:** naive"));
    }
}
