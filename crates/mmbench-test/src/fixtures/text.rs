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

//! Raw file contents: CSV sources and environment descriptors.

/// A complete, valid `raw.csv` with two implementations at n = 256.
pub const CLEAN_RAW_CSV: &str = "\
run_id,datetime_iso,hostname,algo,impl,precision,n,trial,time_s,gflops,threads
r1,2025-01-14T09:00:00Z,node01,gemm,naive,fp64,256,1,0.02,1.6777216,1
r1,2025-01-14T09:00:00Z,node01,gemm,naive,fp64,256,2,0.02,1.6777216,1
r1,2025-01-14T09:00:00Z,node01,gemm,openmp,fp64,256,1,0.01,3.3554432,8
r1,2025-01-14T09:00:00Z,node01,gemm,openmp,fp64,256,2,0.01,3.3554432,8
";

/// A `raw.csv` missing `precision` and with a negative time.
pub const INVALID_RAW_CSV: &str = "\
run_id,datetime_iso,hostname,algo,impl,n,trial,time_s,gflops
r1,2025-01-14T09:00:00Z,node01,gemm,naive,256,1,-0.02,1.6777216
";

/// Output of the older benchmark driver, in the legacy column vocabulary.
pub const LEGACY_CSV: &str = "\
implementation,matrix_size,execution_time_ms,gflops
naive,256,20.0,1.6777216
mpi,256,5.0,6.7108864
";

/// A CSV whose first data row is short a field.
pub const CORRUPT_CSV: &str = "\
run_id,impl,n
r1,naive
r1,naive,64
";

/// A complete environment descriptor with an extra unknown key.
pub const ENV_JSON: &str = r#"{
  "datetime_iso": "2025-01-14T08:55:00Z",
  "hostname": "node01",
  "slurm_job_id": "98765",
  "cpu": {"model": "AMD EPYC 7763"},
  "gpu": {"model": "NVIDIA A100", "count": 4},
  "memory_gb": 512,
  "compiler": {"name": "gcc", "version": "13.2"},
  "blas": {"vendor": "OpenBLAS", "version": "0.3.26"},
  "cuda": {"version": "12.2"},
  "mpi": {"vendor": "OpenMPI", "version": "4.1.5"},
  "os": {"name": "Linux", "version": "6.1"},
  "git_commit": "3f2a9c1",
  "notes": "kept in env_json"
}"#;

/// A descriptor where most nested objects are missing or null.
pub const SPARSE_ENV_JSON: &str = r#"{"hostname": "node02", "gpu": null}"#;
