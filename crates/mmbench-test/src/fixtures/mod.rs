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

//! Canonical fixtures for pipeline tests.

pub mod builders;
pub mod dirs;
pub mod measurements;
pub mod text;

pub use dirs::{clean_day_dir, write_day_dir};
pub use measurements::{
    best_performer_case, clean_run, legacy_run, speedup_case, with_range_violations,
    with_trial_gap,
};
pub use text::{CLEAN_RAW_CSV, CORRUPT_CSV, ENV_JSON, INVALID_RAW_CSV, LEGACY_CSV, SPARSE_ENV_JSON};

use crate::FixtureList;

/// Every dataset fixture with its name.
pub fn all() -> FixtureList {
    vec![
        ("clean_run", clean_run),
        ("speedup_case", speedup_case),
        ("best_performer_case", best_performer_case),
        ("with_range_violations", with_range_violations),
        ("with_trial_gap", with_trial_gap),
        ("legacy_run", legacy_run),
    ]
}
