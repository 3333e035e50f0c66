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

//! Multi-source record loading.
//!
//! Each source is read on its own; a source that fails is recorded and
//! skipped, and loading only fails when nothing at all could be read.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use mmbench_core::schema::columns;
use mmbench_core::{
    apply_duplicate_policy, Dataset, DuplicatePolicy, MmbenchError, MmbenchResult, Value,
    COLUMN_ALIASES,
};
use mmbench_csv::{from_csv_path, FromCsvConfig};
use mmbench_parquet::from_parquet;

/// Readable source formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.csv`, or `.tsv` with tab delimiters.
    Csv,
    Parquet,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" => Some(SourceFormat::Csv),
            "parquet" => Some(SourceFormat::Parquet),
            _ => None,
        }
    }
}

/// Row filters applied after all sources are concatenated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadFilters {
    pub implementation: Option<String>,
    /// Inclusive lower bound on matrix size.
    pub min_size: Option<i64>,
    /// Inclusive upper bound on matrix size.
    pub max_size: Option<i64>,
}

impl LoadFilters {
    pub fn is_empty(&self) -> bool {
        self.implementation.is_none() && self.min_size.is_none() && self.max_size.is_none()
    }

    /// Keep only matching rows. Rows with an unknown size fail any size bound.
    pub fn apply(&self, dataset: &mut Dataset) {
        if self.is_empty() {
            return;
        }
        dataset.retain(|row| {
            if let Some(name) = &self.implementation {
                if row.get(columns::IMPL).as_str() != Some(name.as_str()) {
                    return false;
                }
            }
            if self.min_size.is_none() && self.max_size.is_none() {
                return true;
            }
            match row.get(columns::N).coerce_int() {
                Some(n) => {
                    self.min_size.map_or(true, |min| n >= min)
                        && self.max_size.map_or(true, |max| n <= max)
                }
                None => false,
            }
        });
    }
}

/// Loader settings.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Descend into subdirectories when a source is a directory.
    pub recursive: bool,
    /// Rename legacy column names to their canonical form.
    pub normalize_aliases: bool,
    /// Base CSV settings; `.tsv` sources switch to tab delimiters.
    pub csv: FromCsvConfig,
    pub filters: LoadFilters,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            normalize_aliases: true,
            csv: FromCsvConfig::default(),
            filters: LoadFilters::default(),
            duplicate_policy: DuplicatePolicy::KeepAll,
        }
    }
}

/// A source that was read, with its row count.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub rows: usize,
}

/// A source that was skipped, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub error: MmbenchError,
}

/// Result of [`load_sources`].
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub loaded: Vec<LoadedSource>,
    pub skipped: Vec<SkippedSource>,
}

impl LoadReport {
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Rename alias columns to canonical names and derive `time_s` from
/// `execution_time_ms` when a source has no `time_s`.
///
/// A canonical column already present wins; the alias is then left as is.
/// Returns the canonical columns that were introduced.
pub fn normalize_columns(dataset: &mut Dataset) -> Vec<String> {
    let mut introduced = Vec::new();
    for (alias, canonical) in COLUMN_ALIASES {
        if dataset.rename_column(alias, canonical) {
            introduced.push(canonical.to_string());
        }
    }

    if !dataset.has_column(columns::TIME_S) {
        let derived: Option<Vec<Value>> = dataset.column(columns::EXECUTION_TIME_MS).map(|values| {
            values
                .map(|v| v.coerce_float().map(|ms| ms / 1000.0).into())
                .collect()
        });
        if let Some(seconds) = derived {
            dataset.add_column(columns::TIME_S, Value::Null);
            for (idx, value) in seconds.into_iter().enumerate() {
                dataset.set(idx, columns::TIME_S, value);
            }
            introduced.push(columns::TIME_S.to_string());
        }
    }

    introduced
}

/// Read one file according to its extension.
pub fn load_file(path: &Path, config: &LoaderConfig) -> MmbenchResult<Dataset> {
    match SourceFormat::from_path(path) {
        Some(SourceFormat::Csv) => {
            let csv_config = FromCsvConfig {
                delimiter: FromCsvConfig::for_path(path).delimiter,
                ..config.csv.clone()
            };
            from_csv_path(path, csv_config).map_err(|e| MmbenchError::from(e).with_path(path))
        }
        Some(SourceFormat::Parquet) => from_parquet(path),
        None => Err(MmbenchError::source_load("unsupported source format").with_path(path)),
    }
}

/// Expand sources into the files to read.
///
/// Files are taken as given. Directories contribute their CSV, TSV and
/// Parquet files in lexicographic order. A path that does not exist is
/// reported as skipped.
fn expand_sources(
    sources: &[PathBuf],
    recursive: bool,
    skipped: &mut Vec<SkippedSource>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for source in sources {
        if source.is_dir() {
            let walker = if recursive {
                WalkDir::new(source)
            } else {
                WalkDir::new(source).max_depth(1)
            };
            let mut found: Vec<PathBuf> = walker
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|entry| {
                    entry.file_type().is_file() && SourceFormat::from_path(entry.path()).is_some()
                })
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            debug!(dir = %source.display(), files = found.len(), "expanded source directory");
            files.extend(found);
        } else if source.exists() {
            files.push(source.clone());
        } else {
            skipped.push(SkippedSource {
                path: source.clone(),
                error: MmbenchError::source_load("no such file or directory").with_path(source),
            });
        }
    }
    files
}

/// Load and concatenate all sources.
///
/// # Errors
///
/// Returns an error of kind [`NoData`](mmbench_core::MmbenchErrorKind::NoData)
/// when no source could be loaded, or the duplicate-policy error when the
/// policy is [`DuplicatePolicy::Reject`] and duplicates exist.
pub fn load_sources(sources: &[PathBuf], config: &LoaderConfig) -> MmbenchResult<LoadReport> {
    let mut skipped = Vec::new();
    let files = expand_sources(sources, config.recursive, &mut skipped);

    let mut loaded = Vec::new();
    let mut parts = Vec::new();
    for path in files {
        match load_file(&path, config) {
            Ok(mut dataset) => {
                if config.normalize_aliases {
                    normalize_columns(&mut dataset);
                }
                info!(source = %path.display(), rows = dataset.len(), "loaded source");
                loaded.push(LoadedSource {
                    path,
                    rows: dataset.len(),
                });
                parts.push(dataset);
            }
            Err(error) => {
                let error = if error.path.is_none() {
                    error.with_path(&path)
                } else {
                    error
                };
                warn!(source = %path.display(), %error, "skipping source");
                skipped.push(SkippedSource { path, error });
            }
        }
    }

    if loaded.is_empty() {
        return Err(MmbenchError::no_data(format!(
            "no data could be loaded from {} source(s)",
            sources.len()
        )));
    }

    let mut dataset = Dataset::concat(parts);
    config.filters.apply(&mut dataset);
    if dataset.is_empty() && !config.filters.is_empty() {
        return Err(MmbenchError::no_data(
            "no rows left after applying implementation and size filters",
        ));
    }
    let removed = apply_duplicate_policy(&mut dataset, config.duplicate_policy)?;
    if removed > 0 {
        info!(removed, policy = ?config.duplicate_policy, "dropped duplicate trials");
    }

    Ok(LoadReport {
        dataset,
        loaded,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmbench_test::fixtures;
    use std::fs;

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("a/raw.csv")), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path(Path::new("a/raw.TSV")), Some(SourceFormat::Csv));
        assert_eq!(
            SourceFormat::from_path(Path::new("raw.parquet")),
            Some(SourceFormat::Parquet)
        );
        assert_eq!(SourceFormat::from_path(Path::new("env.json")), None);
        assert_eq!(SourceFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_normalize_legacy_columns() {
        let mut ds = fixtures::legacy_run();
        let introduced = normalize_columns(&mut ds);
        assert_eq!(introduced, vec!["impl", "n", "time_s"]);
        assert_eq!(ds.get(0, "impl"), Some(&Value::from("naive")));
        assert_eq!(ds.get(0, "time_s"), Some(&Value::Float(0.02)));
        assert_eq!(ds.get(1, "time_s"), Some(&Value::Float(0.005)));
        assert!(ds.has_column("execution_time_ms"));
    }

    #[test]
    fn test_normalize_keeps_existing_canonical() {
        let mut ds = Dataset::new(["impl", "implementation", "time_s", "execution_time_ms"]);
        ds.push_row(vec!["mpi".into(), "other".into(), Value::Float(1.0), Value::Float(5.0)])
            .unwrap();
        let introduced = normalize_columns(&mut ds);
        assert!(introduced.is_empty());
        assert_eq!(ds.get(0, "impl"), Some(&Value::from("mpi")));
        assert_eq!(ds.get(0, "implementation"), Some(&Value::from("other")));
        assert_eq!(ds.get(0, "time_s"), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_filters() {
        let mut ds = fixtures::clean_run();
        LoadFilters {
            implementation: Some("openmp".into()),
            min_size: Some(300),
            max_size: None,
        }
        .apply(&mut ds);
        assert_eq!(ds.len(), 2);
        assert!(ds.iter().all(|r| r.get("n") == &Value::Int(512)));
    }

    #[test]
    fn test_one_corrupt_one_valid() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        fs::write(&good, fixtures::CLEAN_RAW_CSV).unwrap();
        fs::write(&bad, fixtures::CORRUPT_CSV).unwrap();

        let report = load_sources(&[bad.clone(), good.clone()], &LoaderConfig::default()).unwrap();
        assert_eq!(report.dataset.len(), 4);
        assert_eq!(report.skip_count(), 1);
        assert_eq!(report.skipped[0].path, bad);
        assert_eq!(report.loaded, vec![LoadedSource { path: good, rows: 4 }]);
    }

    #[test]
    fn test_nothing_loads_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.csv");
        fs::write(&bad, fixtures::CORRUPT_CSV).unwrap();
        let missing = dir.path().join("missing.csv");

        let err = load_sources(&[bad, missing], &LoaderConfig::default()).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_filters_removing_everything_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, fixtures::CLEAN_RAW_CSV).unwrap();

        let config = LoaderConfig {
            filters: LoadFilters {
                min_size: Some(4096),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = load_sources(&[good], &config).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_unknown_extension_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        let good = dir.path().join("good.csv");
        fs::write(&notes, "hello").unwrap();
        fs::write(&good, fixtures::CLEAN_RAW_CSV).unwrap();

        let report = load_sources(&[notes, good], &LoaderConfig::default()).unwrap();
        assert_eq!(report.skip_count(), 1);
        assert_eq!(report.dataset.len(), 4);
    }

    #[test]
    fn test_directory_expansion_sorted_and_shallow() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "impl,n\nmpi,64\n").unwrap();
        fs::write(dir.path().join("a.csv"), "impl,n\nnaive,64\n").unwrap();
        fs::write(dir.path().join("env.json"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.csv"), "impl,n\ncuda,64\n").unwrap();

        let report = load_sources(&[dir.path().to_path_buf()], &LoaderConfig::default()).unwrap();
        let impls: Vec<String> = report.dataset.iter().map(|r| r.get("impl").to_string()).collect();
        assert_eq!(impls, vec!["naive", "mpi"]);
        assert_eq!(report.skip_count(), 0);

        let config = LoaderConfig {
            recursive: true,
            ..Default::default()
        };
        let report = load_sources(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(report.dataset.len(), 3);
    }

    #[test]
    fn test_heterogeneous_sources_union() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.csv");
        let legacy = dir.path().join("legacy.csv");
        fs::write(&raw, fixtures::CLEAN_RAW_CSV).unwrap();
        fs::write(&legacy, fixtures::LEGACY_CSV).unwrap();

        let report = load_sources(&[raw, legacy], &LoaderConfig::default()).unwrap();
        let ds = &report.dataset;
        assert_eq!(ds.len(), 6);
        assert!(ds.get(4, "run_id").unwrap().is_null());
        assert_eq!(ds.get(5, "impl"), Some(&Value::from("mpi")));
        assert_eq!(ds.get(5, "time_s"), Some(&Value::Float(0.005)));
        assert!(ds.get(0, "execution_time_ms").unwrap().is_null());
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, fixtures::CLEAN_RAW_CSV).unwrap();
        fs::write(&b, fixtures::CLEAN_RAW_CSV).unwrap();

        let report = load_sources(&[a.clone(), b.clone()], &LoaderConfig::default()).unwrap();
        assert_eq!(report.dataset.len(), 8);

        let config = LoaderConfig {
            duplicate_policy: DuplicatePolicy::KeepFirst,
            ..Default::default()
        };
        let report = load_sources(&[a, b], &config).unwrap();
        assert_eq!(report.dataset.len(), 4);
    }
}
