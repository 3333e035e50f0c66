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

//! On-disk day directories for filesystem tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::text::{CLEAN_RAW_CSV, ENV_JSON};

/// Create `root/<day>/raw.csv` and, when given, `root/<day>/env.json`.
///
/// Returns the day directory.
pub fn write_day_dir(
    root: &Path,
    day: &str,
    raw_csv: &str,
    env_json: Option<&str>,
) -> io::Result<PathBuf> {
    let dir = root.join(day);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("raw.csv"), raw_csv)?;
    if let Some(env) = env_json {
        fs::write(dir.join("env.json"), env)?;
    }
    Ok(dir)
}

/// A day directory holding [`CLEAN_RAW_CSV`] and [`ENV_JSON`].
pub fn clean_day_dir(root: &Path, day: &str) -> io::Result<PathBuf> {
    write_day_dir(root, day, CLEAN_RAW_CSV, Some(ENV_JSON))
}
