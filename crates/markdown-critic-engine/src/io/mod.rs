use std::fs::{self, File};
use std::io::{self as stdio, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::critic::{CriticError, TransduceOptions, transduce_with};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] stdio::Error),
    #[error(transparent)]
    Critic(#[from] CriticError),
}

/// Opens `path` for reading, or stdin when `None`.
pub fn read_source(path: Option<&Path>) -> Result<Box<dyn Read>, IoError> {
    match path {
        None => Ok(Box::new(stdio::stdin().lock())),
        Some(path) => {
            if !path.exists() {
                return Err(IoError::NotFound(path.to_path_buf()));
            }
            Ok(Box::new(File::open(path)?))
        }
    }
}

/// Opens `path` for writing (creating parent directories), or stdout when
/// `None`. The sink is buffered.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>, IoError> {
    match path {
        None => Ok(Box::new(BufWriter::new(stdio::stdout().lock()))),
        Some(path) => {
            // Create parent directories if they don't exist
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
    }
}

/// Streams `input` (or stdin) through the transducer into `output` (or
/// stdout), returning the number of bytes read.
pub fn transduce_file(
    input: Option<&Path>,
    output: Option<&Path>,
    options: &TransduceOptions,
) -> Result<usize, IoError> {
    let reader = read_source(input)?;
    let writer = open_sink(output)?;
    Ok(transduce_with(reader, writer, options)?)
}
