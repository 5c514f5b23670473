// dartnml/src/cli/mod.rs

pub mod collect;
pub mod extract;
pub mod yaml;

pub use collect::{collect_sources, CollectReport};
pub use extract::extract_source;
pub use yaml::{convert_from_yaml, convert_to_yaml};

use anyhow::Context;
use f90defaults::Diagnostic;
use log::warn;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open `--output` for writing, or stdout when it is not given.
pub fn open_output(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = fs_err::File::create(path)
                .context(format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Report extraction diagnostics for one file on stderr.
pub(crate) fn log_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!("{}: {}", path.display(), diagnostic);
    }
}
