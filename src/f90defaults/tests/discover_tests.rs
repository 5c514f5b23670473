// f90defaults/tests/discover_tests.rs

use f90defaults::error::Result;
use f90defaults::{discover_sources_in, extract_file, ExtractOptions};
use tempfile::TempDir;

#[test]
fn makefile_with_existing_and_missing_sources() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("model_mod.f90");
    fs_err::write(
        &source,
        "module m\n  integer :: ens_size = 20\n  namelist /filter_nml/ ens_size\nend module m\n",
    )?;
    let missing = temp_dir.path().join("gone_mod.f90");

    let makefile = temp_dir.path().join("Makefile");
    fs_err::write(
        &makefile,
        format!(
            "SRC = {} \\\n      {}\nfilter.o: {}\n",
            missing.display(),
            source.display(),
            source.display()
        ),
    )?;

    let paths = discover_sources_in(&makefile)?;
    assert_eq!(paths.len(), 2);

    let mut processed = Vec::new();
    let mut skipped = Vec::new();
    for path in &paths {
        if path.exists() {
            processed.push(extract_file(path, &ExtractOptions::default())?);
        } else {
            skipped.push(path.clone());
        }
    }

    assert_eq!(skipped, vec![missing]);
    assert_eq!(processed.len(), 1);
    assert!(processed[0].defaults.get("filter_nml").is_some());
    Ok(())
}

#[test]
fn unreadable_makefile_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(discover_sources_in(temp_dir.path().join("Makefile")).is_err());
}
