use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use crate::error::CliError;

/// Asks for a map file name until one that `exists` accepts is given.
///
/// Each line of `input` is one attempt; blank lines just re-prompt.
pub(crate) fn prompt_for_map<R, W>(
    input: &mut R,
    out: &mut W,
    exists: impl Fn(&Path) -> bool,
) -> Result<PathBuf, CliError>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "> Type map file name (e.g. forest1_2.map)\n> ").map_err(CliError::Prompt)?;
        out.flush().map_err(CliError::Prompt)?;

        line.clear();
        if input.read_line(&mut line).map_err(CliError::Prompt)? == 0 {
            return Err(CliError::Eof);
        }
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let path = PathBuf::from(name);
        if exists(&path) {
            return Ok(path);
        }
        writeln!(out, "> Couldn't find the map named \"{name}\"").map_err(CliError::Prompt)?;
    }
}
