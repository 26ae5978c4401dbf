use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use spmap::{ByteBuffer, DecoderOptions};
use tracing::{debug, info};

use crate::error::CliError;

/// Decodes `input` and writes its document to `output`.
///
/// The output file is only created once decoding has succeeded, and is
/// flushed before this returns `Ok`.
pub(crate) fn convert(
    input: &Path,
    output: &Path,
    options: &DecoderOptions,
) -> Result<(), CliError> {
    let buffer = ByteBuffer::from(fs::read(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?);
    debug!(path = %input.display(), bytes = buffer.len(), "loaded map");

    let doc = spmap::map_to_document(&buffer, options).map_err(|source| CliError::Convert {
        path: input.to_path_buf(),
        source,
    })?;
    // Filenames are written in the code page they were stored in.
    let rendered = doc.to_bytes();

    let write_err = |source| CliError::Write {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(write_err)?);
    writer.write_all(&rendered).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        nodes = doc.len(),
        "wrote document"
    );
    Ok(())
}
