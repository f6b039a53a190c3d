// SPDX-License-Identifier: Apache-2.0

//! Wall-clock comparison of JSON implementations.
//!
//! Every input file is handed to every [`Backend`] for a fixed number of
//! trials; the first trials warm caches and are dropped, the rest are
//! written to a [`Report`] one line each.

pub mod backend;
pub use backend::{build_all, Backend, BackendKind};

mod driver;
pub use driver::{BackendFailure, BenchConfig, Driver, Operation, RunSummary, TrialSample};

mod error;
pub use error::{BackendError, BenchError};

mod input;
pub use input::{load_files, InputFile};

mod report;
pub use report::Report;
