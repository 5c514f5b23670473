// dartnml/src/cli/extract.rs

use super::log_diagnostics;
use crate::config::Config;
use anyhow::Context;
use f90defaults::{extract_file, write_defaults};
use log::info;
use std::io::Write;
use std::path::Path;

/// Write the namelist defaults of one Fortran file to `out`.
///
/// Problems inside the file are logged and never fail the command; only an
/// unreadable file or a failed write does.
pub fn extract_source<W: Write>(path: &Path, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let extraction = extract_file(path, &config.extract)
        .context(format!("Error processing file {}", path.display()))?;

    log_diagnostics(path, &extraction.diagnostics);

    if extraction.is_empty() {
        info!("No namelists found in {}", path.display());
        return Ok(());
    }

    write_defaults(out, &extraction.defaults, &config.write)
        .context("Error writing namelist output")?;
    out.flush().context("Error writing namelist output")?;
    Ok(())
}
