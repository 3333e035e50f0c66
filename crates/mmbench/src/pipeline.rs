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

//! End-to-end operations over day directories and result sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use mmbench_core::schema::columns;
use mmbench_core::{enrich_with_env, Dataset, EnvironmentRecord, MmbenchError, MmbenchResult};
use mmbench_csv::{to_csv_path, FromCsvConfig, ToCsvConfig};
use mmbench_lint::{validate_with_config, ValidationConfig, ValidationReport};
use mmbench_parquet::{from_parquet, to_parquet, Store, ToParquetConfig};
use mmbench_stats::{
    export_markdown, filter_outliers, AggregationSpec, ComparisonReport, GroupKeys,
    ReportConfig, SpeedupConfig,
};

use crate::error_ext::MmbenchResultExt;
use crate::loader::{load_file, load_sources, LoadReport, LoaderConfig};

/// Raw measurements inside a day directory.
pub const RAW_CSV: &str = "raw.csv";
/// Validated, enriched measurements written by ingest.
pub const RAW_PARQUET: &str = "raw.parquet";
/// Environment descriptor inside a day directory.
pub const ENV_JSON: &str = "env.json";
/// Ingest output when Parquet cannot be written.
pub const FALLBACK_CSV: &str = "raw_validated.csv";

pub const STATISTICS_CSV: &str = "statistics.csv";
pub const SPEEDUP_CSV: &str = "speedup.csv";
pub const BEST_PERFORMERS_CSV: &str = "best_performers.csv";
pub const REPORT_MD: &str = "comparison_report.md";

/// The day label of a day directory: its final path component.
pub fn day_name(day_dir: &Path) -> String {
    day_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| day_dir.display().to_string())
}

/// Validate a single raw measurement file as written, without renaming
/// legacy columns.
pub fn validate_file(path: &Path, config: ValidationConfig) -> MmbenchResult<ValidationReport> {
    let loader = LoaderConfig {
        normalize_aliases: false,
        ..Default::default()
    };
    let dataset = load_file(path, &loader)?;
    Ok(validate_with_config(&dataset, config))
}

/// Result of [`ingest_day`].
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub day: String,
    pub rows: usize,
    pub validation: ValidationReport,
    /// Environment columns added to the measurements.
    pub added_columns: Vec<String>,
    /// File actually written.
    pub output: PathBuf,
    /// True when Parquet failed and the CSV fallback was written instead.
    pub fell_back: bool,
}

/// Validate, enrich and persist one day directory.
///
/// Reads `raw.csv` (required) and `env.json` (optional). Validation findings
/// are reported but never stop the write. The output defaults to
/// `<day>/raw.parquet`; if Parquet cannot be written, `<day>/raw_validated.csv`
/// is written instead.
pub fn ingest_day(day_dir: &Path, out: Option<&Path>) -> MmbenchResult<IngestOutcome> {
    let raw_csv = day_dir.join(RAW_CSV);
    if !raw_csv.is_file() {
        return Err(MmbenchError::io(format!("missing {}", RAW_CSV)).with_path(day_dir));
    }
    let mut dataset = mmbench_csv::from_csv_path(&raw_csv, FromCsvConfig::for_path(&raw_csv))
        .map_err(|e| MmbenchError::from(e).with_path(&raw_csv))?;

    let validation = validate_with_config(&dataset, ValidationConfig::default());
    if validation.fatal_errors > 0 {
        warn!(
            day = %day_dir.display(),
            errors = validation.fatal_errors,
            "validation reported errors; continuing to write for inspection"
        );
    }

    let env = EnvironmentRecord::load(day_dir.join(ENV_JSON))?;
    let added_columns = enrich_with_env(&mut dataset, env.as_ref());

    let target = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| day_dir.join(RAW_PARQUET));
    let (output, fell_back) = match to_parquet(&dataset, &target) {
        Ok(()) => {
            info!(path = %target.display(), rows = dataset.len(), "wrote parquet");
            (target, false)
        }
        Err(error) => {
            warn!(%error, "parquet write failed; falling back to CSV copy");
            let fallback = day_dir.join(FALLBACK_CSV);
            to_csv_path(&dataset, &fallback, ToCsvConfig::default())
                .with_context(|| format!("while writing fallback {}", fallback.display()))?;
            info!(path = %fallback.display(), "wrote fallback CSV");
            (fallback, true)
        }
    };

    Ok(IngestOutcome {
        day: day_name(day_dir),
        rows: dataset.len(),
        validation,
        added_columns,
        output,
        fell_back,
    })
}

/// Measurements of one day: `raw.parquet` when present, else `raw.csv`.
pub fn load_day(day_dir: &Path) -> MmbenchResult<Dataset> {
    let parquet = day_dir.join(RAW_PARQUET);
    if parquet.is_file() {
        return from_parquet(&parquet);
    }
    let csv = day_dir.join(RAW_CSV);
    if csv.is_file() {
        return mmbench_csv::from_csv_path(&csv, FromCsvConfig::for_path(&csv))
            .map_err(|e| MmbenchError::from(e).with_path(&csv));
    }
    Err(MmbenchError::io(format!("no {} or {}", RAW_CSV, RAW_PARQUET)).with_path(day_dir))
}

/// Per-day summary from [`store_days`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDay {
    pub day: String,
    pub rows: usize,
    pub fatal_errors: usize,
    pub has_env: bool,
}

/// Result of [`store_days`].
#[derive(Debug, Clone)]
pub struct StoreOutcome {
    pub days: Vec<StoredDay>,
    pub written: Vec<PathBuf>,
}

/// Append day directories to the durable `runs` and `env` tables in
/// `out_dir`.
///
/// Days are validated for the record but stored even with errors. The
/// tables are rewritten after each day, so a day without measurements stops
/// the run with an error while earlier days stay stored.
pub fn store_days(
    days: &[PathBuf],
    out_dir: &Path,
    config: &ToParquetConfig,
) -> MmbenchResult<StoreOutcome> {
    let mut store = Store::open(out_dir)?;
    let mut summaries = Vec::with_capacity(days.len());
    let mut written = Vec::new();

    for day_dir in days {
        let day = day_name(day_dir);
        info!(%day, "processing day");
        let dataset = load_day(day_dir)?;

        let validation = validate_with_config(&dataset, ValidationConfig::default());
        if validation.fatal_errors > 0 {
            warn!(
                %day,
                errors = validation.fatal_errors,
                "validation had errors; storing anyway for audit"
            );
        }

        let env = EnvironmentRecord::load(day_dir.join(ENV_JSON))
            .with_context(|| format!("while reading environment of {}", day))?;
        if let Some(env) = &env {
            store.append_env(&day, env)?;
        }

        summaries.push(StoredDay {
            day: day.clone(),
            rows: dataset.len(),
            fatal_errors: validation.fatal_errors,
            has_env: env.is_some(),
        });
        store.append_runs(&day, dataset);
        written = store.write(out_dir, config)?;
    }

    Ok(StoreOutcome {
        days: summaries,
        written,
    })
}

/// Settings for [`compare`].
#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    pub loader: LoaderConfig,
    pub keys: GroupKeys,
    pub aggregation: AggregationSpec,
    pub speedup: SpeedupConfig,
    pub report: ReportConfig,
    /// Drop time outliers beyond this z-score before analysis.
    pub outlier_threshold: Option<f64>,
}

/// Result of [`compare`].
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    pub load: LoadReport,
    /// Findings on the loaded rows. Errors are reported, not fatal.
    pub validation: ValidationReport,
    pub report: ComparisonReport,
    pub outliers_removed: usize,
    pub written: Vec<PathBuf>,
}

/// Load and validate sources, compute statistics, speedups and best
/// performers, and write the tables and Markdown report into `output_dir`.
pub fn compare(
    sources: &[PathBuf],
    output_dir: &Path,
    config: &CompareConfig,
) -> MmbenchResult<CompareOutcome> {
    let mut load = load_sources(sources, &config.loader)?;

    let validation = validate_with_config(&load.dataset, ValidationConfig::default());
    if validation.fatal_errors > 0 {
        warn!(
            errors = validation.fatal_errors,
            "validation reported errors; comparing anyway"
        );
    }

    let outliers_removed = match config.outlier_threshold {
        Some(threshold) => filter_outliers(&mut load.dataset, &config.speedup.time_column, threshold),
        None => 0,
    };

    let report = ComparisonReport::build(
        &load.dataset,
        config.keys.as_slice(),
        &config.aggregation,
        &config.speedup,
    );

    fs::create_dir_all(output_dir).with_context(|| format!("creating {}", output_dir.display()))?;

    let tables = [
        (STATISTICS_CSV, report.statistics.clone()),
        (SPEEDUP_CSV, report.speedup_table()),
        (BEST_PERFORMERS_CSV, report.best_performers_table()),
    ];
    let mut written = Vec::with_capacity(tables.len() + 1);
    for (name, table) in tables {
        let path = output_dir.join(name);
        to_csv_path(&table, &path, ToCsvConfig::default())
            .with_context(|| format!("while writing {}", path.display()))?;
        written.push(path);
    }

    let report_path = output_dir.join(REPORT_MD);
    export_markdown(&report, &config.report, &report_path)
        .with_context(|| format!("while writing {}", report_path.display()))?;
    written.push(report_path);

    info!(
        rows = load.dataset.len(),
        sources = load.loaded.len(),
        skipped = load.skip_count(),
        dir = %output_dir.display(),
        "comparison complete"
    );

    Ok(CompareOutcome {
        load,
        validation,
        report,
        outliers_removed,
        written,
    })
}

/// Distinct known matrix sizes in `dataset`, ascending.
pub fn sizes_tested(dataset: &Dataset) -> Vec<i64> {
    let mut sizes: Vec<i64> = dataset
        .column(columns::N)
        .map(|values| values.filter_map(|v| v.coerce_int()).collect())
        .unwrap_or_default();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}
