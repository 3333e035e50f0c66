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

//! Parquet persistence for benchmark measurement and environment tables.
//!
//! - [`from_parquet`] reads any flat Parquet table into a [`Dataset`](mmbench_core::Dataset)
//! - [`to_parquet`] writes a dataset, inferring one Arrow type per column
//! - [`Store`] accumulates the `runs` and `env` tables across day directories

mod from_parquet;
mod store;
mod to_parquet;

pub use from_parquet::{from_parquet, from_parquet_bytes, MAX_DECOMPRESSED_SIZE};
pub use store::{tag_day, Store, ENV_TABLE, RUNS_TABLE};
pub use to_parquet::{
    to_parquet, to_parquet_bytes, to_parquet_bytes_with_config, to_parquet_with_config,
    ToParquetConfig, TABLE_NAME_KEY,
};
