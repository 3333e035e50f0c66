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

//! Handling of repeated `(run_id, impl, n, trial)` tuples.

use std::collections::HashMap;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::error::{MmbenchError, MmbenchResult};
use crate::schema::columns;
use crate::value::ValueKey;

/// Columns identifying one trial.
pub const TRIAL_IDENTITY: &[&str] = &[columns::RUN_ID, columns::IMPL, columns::N, columns::TRIAL];

/// What to do with rows that share a trial identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every row.
    #[default]
    KeepAll,
    /// Keep the first row of each identity.
    KeepFirst,
    /// Keep the last row of each identity.
    KeepLast,
    /// Fail if any identity repeats.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = MmbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep-all" => Ok(Self::KeepAll),
            "keep-first" => Ok(Self::KeepFirst),
            "keep-last" => Ok(Self::KeepLast),
            "reject" => Ok(Self::Reject),
            other => Err(MmbenchError::parse(format!(
                "unknown duplicate policy '{}' (expected keep-all, keep-first, keep-last or reject)",
                other
            ))),
        }
    }
}

/// Apply a duplicate policy in place and return the number of rows removed.
///
/// Datasets lacking any identity column are left untouched.
pub fn apply_duplicate_policy(dataset: &mut Dataset, policy: DuplicatePolicy) -> MmbenchResult<usize> {
    if policy == DuplicatePolicy::KeepAll
        || !TRIAL_IDENTITY.iter().all(|c| dataset.has_column(c))
    {
        return Ok(0);
    }

    let keys: Vec<Vec<ValueKey>> = dataset
        .iter()
        .map(|row| TRIAL_IDENTITY.iter().map(|c| row.get(c).key()).collect())
        .collect();

    let mut first: HashMap<&[ValueKey], usize> = HashMap::new();
    let mut last: HashMap<&[ValueKey], usize> = HashMap::new();
    for (idx, key) in keys.iter().enumerate() {
        first.entry(key.as_slice()).or_insert(idx);
        last.insert(key.as_slice(), idx);
    }

    let keep: Vec<bool> = keys
        .iter()
        .enumerate()
        .map(|(idx, key)| match policy {
            DuplicatePolicy::KeepLast => last[key.as_slice()] == idx,
            _ => first[key.as_slice()] == idx,
        })
        .collect();
    let removed = keep.iter().filter(|k| !**k).count();

    if policy == DuplicatePolicy::Reject && removed > 0 {
        let first_dup = keep.iter().position(|k| !k).unwrap_or(0);
        return Err(MmbenchError::schema(format!(
            "{} duplicate trial row(s), first at row {}",
            removed, first_dup
        )));
    }

    dataset.retain(|row| keep[row.index()]);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn with_duplicates() -> Dataset {
        let mut ds = Dataset::new(["run_id", "impl", "n", "trial", "time_s"]);
        for (trial, time) in [(1, 1.0), (2, 2.0), (1, 3.0)] {
            ds.push_row(vec![
                "r1".into(),
                "naive".into(),
                Value::Int(64),
                Value::Int(trial),
                Value::Float(time),
            ])
            .unwrap();
        }
        ds
    }

    fn times(ds: &Dataset) -> Vec<f64> {
        ds.column("time_s")
            .unwrap()
            .filter_map(|v| v.as_float())
            .collect()
    }

    #[test]
    fn test_keep_all_is_default_and_noop() {
        let mut ds = with_duplicates();
        assert_eq!(apply_duplicate_policy(&mut ds, DuplicatePolicy::default()).unwrap(), 0);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_keep_first() {
        let mut ds = with_duplicates();
        assert_eq!(apply_duplicate_policy(&mut ds, DuplicatePolicy::KeepFirst).unwrap(), 1);
        assert_eq!(times(&ds), vec![1.0, 2.0]);
    }

    #[test]
    fn test_keep_last() {
        let mut ds = with_duplicates();
        assert_eq!(apply_duplicate_policy(&mut ds, DuplicatePolicy::KeepLast).unwrap(), 1);
        assert_eq!(times(&ds), vec![2.0, 3.0]);
    }

    #[test]
    fn test_reject() {
        let mut ds = with_duplicates();
        let err = apply_duplicate_policy(&mut ds, DuplicatePolicy::Reject).unwrap_err();
        assert!(err.message.contains("first at row 2"));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_missing_identity_column_is_noop() {
        let mut ds = Dataset::new(["impl", "n"]);
        ds.push_row(vec!["a".into(), Value::Int(1)]).unwrap();
        ds.push_row(vec!["a".into(), Value::Int(1)]).unwrap();
        assert_eq!(apply_duplicate_policy(&mut ds, DuplicatePolicy::Reject).unwrap(), 0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("keep-last".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::KeepLast);
        assert!("sometimes".parse::<DuplicatePolicy>().is_err());
    }
}
