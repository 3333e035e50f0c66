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

//! Property tests for datasets, duplicate handling and enrichment.

use mmbench_core::{
    apply_duplicate_policy, enrich_with_env, Dataset, DuplicatePolicy, EnvironmentRecord, Value,
    TRIAL_IDENTITY,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn trial_rows() -> impl Strategy<Value = Vec<(u8, u8, u8)>> {
    prop::collection::vec((0u8..3, 0u8..3, 1u8..4), 0..40)
}

fn trial_dataset(rows: &[(u8, u8, u8)]) -> Dataset {
    let mut ds = Dataset::new(["run_id", "impl", "n", "trial", "time_s"]);
    for (idx, (imp, n, trial)) in rows.iter().enumerate() {
        ds.push_row(vec![
            Value::from("r1"),
            Value::from(format!("impl{}", imp)),
            Value::Int(64i64 << *n),
            Value::Int(i64::from(*trial)),
            Value::Float(idx as f64),
        ])
        .unwrap();
    }
    ds
}

fn identity(ds: &Dataset, row: usize) -> Vec<String> {
    TRIAL_IDENTITY
        .iter()
        .map(|c| ds.get(row, c).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

proptest! {
    #[test]
    fn concat_keeps_every_row(
        a in prop::collection::vec(any::<i64>(), 0..20),
        b in prop::collection::vec(any::<i64>(), 0..20),
    ) {
        let mut left = Dataset::new(["impl", "n"]);
        for n in &a {
            left.push_row(vec![Value::from("naive"), Value::Int(*n)]).unwrap();
        }
        let mut right = Dataset::new(["n", "gflops"]);
        for n in &b {
            right.push_row(vec![Value::Int(*n), Value::Float(1.0)]).unwrap();
        }

        let all = Dataset::concat([left, right]);
        prop_assert_eq!(all.len(), a.len() + b.len());
        prop_assert_eq!(all.columns(), &["impl", "n", "gflops"]);
        for (idx, n) in a.iter().chain(b.iter()).enumerate() {
            prop_assert_eq!(all.get(idx, "n"), Some(&Value::Int(*n)));
        }
        for idx in a.len()..all.len() {
            prop_assert!(all.get(idx, "impl").unwrap().is_null());
        }
    }

    #[test]
    fn keep_all_is_a_no_op(rows in trial_rows()) {
        let mut ds = trial_dataset(&rows);
        let before = ds.clone();
        prop_assert_eq!(apply_duplicate_policy(&mut ds, DuplicatePolicy::KeepAll).unwrap(), 0);
        prop_assert_eq!(ds, before);
    }

    #[test]
    fn keep_first_leaves_unique_identities(rows in trial_rows()) {
        let mut ds = trial_dataset(&rows);
        let removed = apply_duplicate_policy(&mut ds, DuplicatePolicy::KeepFirst).unwrap();
        prop_assert_eq!(ds.len() + removed, rows.len());

        let mut seen = HashSet::new();
        for row in 0..ds.len() {
            prop_assert!(seen.insert(identity(&ds, row)));
        }
        prop_assert_eq!(seen.len(), rows.iter().collect::<HashSet<_>>().len());
    }

    #[test]
    fn keep_first_and_keep_last_remove_the_same_count(rows in trial_rows()) {
        let mut first = trial_dataset(&rows);
        let mut last = trial_dataset(&rows);
        let a = apply_duplicate_policy(&mut first, DuplicatePolicy::KeepFirst).unwrap();
        let b = apply_duplicate_policy(&mut last, DuplicatePolicy::KeepLast).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn reject_fails_exactly_when_duplicated(rows in trial_rows()) {
        let mut ds = trial_dataset(&rows);
        let unique = rows.iter().collect::<HashSet<_>>().len() == rows.len();
        prop_assert_eq!(apply_duplicate_policy(&mut ds, DuplicatePolicy::Reject).is_ok(), unique);
    }

    #[test]
    fn enrichment_is_idempotent(
        host in "[a-z]{1,8}[0-9]{0,2}",
        rows in trial_rows(),
    ) {
        let env = EnvironmentRecord::from_json(&format!(
            r#"{{"hostname": "{}", "cuda": {{"version": "12.2"}}}}"#,
            host
        ))
        .unwrap();

        let mut once = trial_dataset(&rows);
        enrich_with_env(&mut once, Some(&env));
        let mut twice = once.clone();
        prop_assert!(enrich_with_env(&mut twice, Some(&env)).is_empty());
        prop_assert_eq!(&once, &twice);

        for row in 0..once.len() {
            prop_assert_eq!(once.get(row, "env_hostname"), Some(&Value::from(host.as_str())));
            prop_assert_eq!(once.get(row, "env_cuda_version"), Some(&Value::from("12.2")));
        }
    }

    #[test]
    fn integer_text_coerces(n in any::<i64>()) {
        prop_assert_eq!(Value::from(n.to_string()).coerce_int(), Some(n));
        prop_assert_eq!(Value::Int(n).coerce_int(), Some(n));
    }
}
