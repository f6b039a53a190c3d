// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};

use jsonbench::{build_all, load_files, BackendKind, BenchConfig, Driver, Operation, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Parse,
    Serialize,
    /// Parse pass over every file, then serialize pass
    All,
}

impl Mode {
    fn operations(self) -> &'static [Operation] {
        match self {
            Mode::Parse => &[Operation::Parse],
            Mode::Serialize => &[Operation::Serialize],
            Mode::All => &[Operation::Parse, Operation::Serialize],
        }
    }
}

/// Time JSON parsers and serializers over a set of documents
#[derive(Debug, Parser)]
#[command(name = "jsonbench")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON documents to benchmark
    files: Vec<PathBuf>,

    /// Which operations to time
    #[arg(long, value_enum, default_value = "parse")]
    mode: Mode,

    /// Backends to run, in report order (default: all)
    #[arg(long = "backend", value_enum)]
    backends: Vec<BackendKind>,

    /// Timed calls per backend per file
    #[arg(long, default_value_t = BenchConfig::default().trials)]
    trials: usize,

    /// Leading trials that are not reported
    #[arg(long, default_value_t = BenchConfig::default().warmup)]
    warmup: usize,

    /// Parses per parse trial
    #[arg(long, default_value_t = BenchConfig::default().parse_repeat)]
    parse_repeat: usize,

    /// Serializations per serialize trial
    #[arg(long, default_value_t = BenchConfig::default().serialize_repeat)]
    serialize_repeat: usize,
}

impl Cli {
    fn config(&self) -> BenchConfig {
        BenchConfig {
            trials: self.trials,
            warmup: self.warmup,
            parse_repeat: self.parse_repeat,
            serialize_repeat: self.serialize_repeat,
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let files = load_files(&cli.files).context("loading input documents")?;
    let kinds = if cli.backends.is_empty() {
        BackendKind::ALL.to_vec()
    } else {
        cli.backends.clone()
    };
    info!("{} files, backends {kinds:?}", files.len());

    let driver = Driver::new(cli.config(), build_all(&kinds));
    let mut report = Report::new(io::stdout().lock());
    let mut failures = 0;
    for &operation in cli.mode.operations() {
        let summary = driver
            .run(operation, &files, &mut report)
            .with_context(|| format!("running {operation} benchmark"))?;
        failures += summary.failures.len();
    }

    if failures > 0 {
        error!("{failures} backend runs failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
