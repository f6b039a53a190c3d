// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;

use crate::{InputFile, Operation};

/// Line-oriented results, written as they are measured.
///
/// ```text
/// Parse File 1 twitter.json (631515 bytes)
///  serde_json(value): 412ms
///
/// ```
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `number` is 1-based.
    pub fn file_header(&mut self, operation: Operation, number: usize, file: &InputFile) -> io::Result<()> {
        writeln!(
            self.out,
            "{} File {} {} ({} bytes)",
            operation.label(),
            number,
            file.name,
            file.bytes.len()
        )
    }

    /// Elapsed time in whole milliseconds, truncated.
    pub fn sample(&mut self, backend: &str, elapsed: Duration) -> io::Result<()> {
        writeln!(self.out, " {}: {}ms", backend, elapsed.as_millis())
    }

    pub fn failure(&mut self, backend: &str, error: &dyn Display) -> io::Result<()> {
        writeln!(self.out, " {backend}: failed: {error}")
    }

    pub fn file_end(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
