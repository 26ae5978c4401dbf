use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to convert {}: {source}", path.display())]
    Convert { path: PathBuf, source: spmap::Error },
    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),
    #[error("no map file given before end of input")]
    Eof,
}
