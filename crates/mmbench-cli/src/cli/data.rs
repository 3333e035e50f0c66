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

//! Day-directory persistence commands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::commands;
use crate::error::CliError;

#[derive(Subcommand)]
pub enum DataCommands {
    /// Ingest a day folder: validate, enrich, write Parquet
    ///
    /// Reads raw.csv and the optional env.json from the day directory. Falls
    /// back to raw_validated.csv when Parquet cannot be written.
    Ingest {
        /// Path to a results/YYYY-MM-DD folder containing raw.csv and env.json
        #[arg(long, value_name = "DIR")]
        day: PathBuf,

        /// Output Parquet path (default: <day>/raw.parquet)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Append day folders to the runs and env tables
    Store {
        /// results/YYYY-MM-DD directories
        #[arg(long, value_name = "DIR", num_args = 1.., required = true)]
        days: Vec<PathBuf>,

        /// Directory holding runs.parquet and env.parquet
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
    },
}

impl DataCommands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            DataCommands::Ingest { day, out } => commands::ingest(&day, out.as_deref()),
            DataCommands::Store { days, out } => commands::store(&days, &out),
        }
    }
}
