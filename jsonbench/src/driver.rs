// SPDX-License-Identifier: Apache-2.0

//! Timing loop: every file, every backend, a fixed number of trials.

use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::{debug, warn};

use crate::{Backend, BackendError, BenchError, InputFile, Report};

/// What a backend is asked to do with a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Parse,
    Serialize,
}

impl Operation {
    /// Capitalised label used in report headers.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Parse => "Parse",
            Operation::Serialize => "Serialize",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Parse => f.write_str("parse"),
            Operation::Serialize => f.write_str("serialize"),
        }
    }
}

/// Trial counts and per-trial repetitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Timed calls per backend per file
    pub trials: usize,
    /// Leading trials that are run but not reported
    pub warmup: usize,
    /// Parses per parse trial
    pub parse_repeat: usize,
    /// Serializations per serialize trial
    pub serialize_repeat: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: 10,
            warmup: 5,
            parse_repeat: 250,
            serialize_repeat: 1000,
        }
    }
}

impl BenchConfig {
    pub fn repeat(&self, operation: Operation) -> usize {
        match operation {
            Operation::Parse => self.parse_repeat,
            Operation::Serialize => self.serialize_repeat,
        }
    }
}

/// One reported trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSample {
    pub file: String,
    pub backend: &'static str,
    pub operation: Operation,
    /// 1-based trial number
    pub trial: usize,
    pub elapsed: Duration,
}

/// A backend that gave up on a file.
#[derive(Debug)]
pub struct BackendFailure {
    pub file: String,
    pub backend: &'static str,
    pub operation: Operation,
    pub trial: usize,
    pub error: BackendError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub samples: Vec<TrialSample>,
    pub failures: Vec<BackendFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Driver {
    config: BenchConfig,
    backends: Vec<Box<dyn Backend>>,
}

impl Driver {
    pub fn new(config: BenchConfig, backends: Vec<Box<dyn Backend>>) -> Self {
        Self { config, backends }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Runs `operation` over every file, writing results to `report` as they
    /// are measured.
    ///
    /// A backend error ends that backend's trials for the current file only;
    /// it is reported and collected in the summary. Only report write errors
    /// stop the run.
    pub fn run<W: Write>(
        &self,
        operation: Operation,
        files: &[InputFile],
        report: &mut Report<W>,
    ) -> Result<RunSummary, BenchError> {
        if self.config.warmup >= self.config.trials {
            warn!(
                "warm-up of {} covers all {} trials; nothing will be reported",
                self.config.warmup, self.config.trials
            );
        }

        let mut summary = RunSummary::default();
        for (index, file) in files.iter().enumerate() {
            report.file_header(operation, index + 1, file)?;
            for backend in &self.backends {
                if !backend.supports(operation) {
                    warn!("{} does not support {operation}, skipping", backend.name());
                    continue;
                }
                self.bench_backend(operation, file, backend.as_ref(), report, &mut summary)?;
            }
            report.file_end()?;
        }
        Ok(summary)
    }

    fn bench_backend<W: Write>(
        &self,
        operation: Operation,
        file: &InputFile,
        backend: &dyn Backend,
        report: &mut Report<W>,
        summary: &mut RunSummary,
    ) -> Result<(), BenchError> {
        let repeat = self.config.repeat(operation);
        debug!(
            "{operation} {} with {}: {} trials x {repeat}",
            file.name,
            backend.name(),
            self.config.trials
        );
        for trial in 1..=self.config.trials {
            let start = Instant::now();
            let result = backend.run(operation, &file.bytes, repeat);
            let elapsed = start.elapsed();

            if let Err(error) = result {
                warn!("{} failed on {} in trial {trial}: {error}", backend.name(), file.name);
                report.failure(backend.name(), &error)?;
                summary.failures.push(BackendFailure {
                    file: file.name.clone(),
                    backend: backend.name(),
                    operation,
                    trial,
                    error,
                });
                break;
            }

            if trial > self.config.warmup {
                report.sample(backend.name(), elapsed)?;
                summary.samples.push(TrialSample {
                    file: file.name.clone(),
                    backend: backend.name(),
                    operation,
                    trial,
                    elapsed,
                });
            }
        }
        Ok(())
    }
}
