// SPDX-License-Identifier: Apache-2.0

use std::convert::Infallible;
use std::io;
use std::path::PathBuf;

use stackjson::PushParseError;
use thiserror::Error;

use crate::Operation;

/// Failures that stop a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to load {}: {source}", path.display())]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

/// A backend failed to process a document.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("bounded parser: {0}")]
    Bounded(#[from] PushParseError<Infallible>),
    #[error("serde_json: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{backend} does not support {operation}")]
    Unsupported {
        backend: &'static str,
        operation: Operation,
    },
}
