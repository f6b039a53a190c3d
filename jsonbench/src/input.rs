// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use log::debug;

use crate::BenchError;

/// One benchmark document, held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFile {
    /// Name as given on the command line
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads the whole file at `path`.
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let bytes = std::fs::read(path).map_err(|source| BenchError::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::new(path.display().to_string(), bytes))
    }
}

/// Loads every file up front; the first failure aborts the whole load.
pub fn load_files(paths: &[PathBuf]) -> Result<Vec<InputFile>, BenchError> {
    paths.iter().map(|path| InputFile::load(path)).collect()
}
