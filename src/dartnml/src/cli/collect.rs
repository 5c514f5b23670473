// dartnml/src/cli/collect.rs

use super::log_diagnostics;
use crate::config::Config;
use anyhow::Context;
use f90defaults::{discover_sources_in, extract_file, write_defaults};
use log::{error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of processing every source listed in a Makefile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Files whose namelists were extracted
    pub processed: Vec<PathBuf>,
    /// Files listed in the Makefile that do not exist
    pub missing: Vec<PathBuf>,
    /// Files that exist but could not be read
    pub failed: Vec<PathBuf>,
}

/// Extract the namelist defaults of every `.f90` file the Makefile lists,
/// in sorted path order, and concatenate them into `out`.
///
/// Missing or unreadable sources are reported and skipped. The command
/// fails only when the Makefile cannot be read or the output cannot be
/// written.
pub fn collect_sources<W: Write>(
    makefile: &Path,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<CollectReport> {
    let sources = discover_sources_in(makefile)
        .context(format!("Error reading Makefile {}", makefile.display()))?;
    info!("{} Fortran sources listed in {}", sources.len(), makefile.display());

    let mut report = CollectReport::default();
    for path in sources {
        if !path.exists() {
            warn!("{}: file not found, skipping", path.display());
            report.missing.push(path);
            continue;
        }

        let extraction = match extract_file(&path, &config.extract) {
            Ok(extraction) => extraction,
            Err(e) => {
                error!("Error processing file {}: {}", path.display(), e);
                report.failed.push(path);
                continue;
            }
        };

        info!("Processing {}", path.display());
        log_diagnostics(&path, &extraction.diagnostics);
        write_defaults(out, &extraction.defaults, &config.write)
            .context("Error writing namelist output")?;
        report.processed.push(path);
    }
    out.flush().context("Error writing namelist output")?;

    info!(
        "{} processed, {} missing, {} failed",
        report.processed.len(),
        report.missing.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_sources_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("a_mod.f90");
        fs_err::write(&present, "integer :: n = 1\nnamelist /a_nml/ n\n").unwrap();
        let absent = temp_dir.path().join("b_mod.f90");

        let makefile = temp_dir.path().join("Makefile");
        fs_err::write(
            &makefile,
            format!("SRC = {} {}\n", absent.display(), present.display()),
        )
        .unwrap();

        let mut out = Vec::new();
        let report = collect_sources(&makefile, &Config::default(), &mut out).unwrap();
        assert_eq!(report.processed, vec![present]);
        assert_eq!(report.missing, vec![absent]);
        assert!(report.failed.is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "&a_nml\n  n = 1\n/\n\n");
    }

    #[test]
    fn test_unreadable_makefile_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let makefile = temp_dir.path().join("Makefile");
        let result = collect_sources(&makefile, &Config::default(), &mut out);
        assert!(result.is_err());
    }
}
