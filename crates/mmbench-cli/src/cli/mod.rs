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

//! CLI command definitions and argument parsing.
//!
//! - [`core`]: validation and comparison (validate, compare)
//! - [`data`]: day-directory persistence (ingest, store)

mod core;
mod data;

use clap::Subcommand;

pub use self::core::CoreCommands;
pub use data::DataCommands;

use crate::error::CliError;

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Core (validate, compare)
/// └── Data (ingest, store)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Core commands - flattened to appear at top level
    #[command(flatten)]
    Core(CoreCommands),

    // Data commands - flattened to appear at top level
    #[command(flatten)]
    Data(DataCommands),
}

impl Commands {
    /// Execute the command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Data(cmd) => cmd.execute(),
        }
    }
}
