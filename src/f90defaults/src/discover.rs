// f90defaults/src/discover.rs

//! Discovery of Fortran sources referenced by a generated Makefile.

use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// An absolute path begins at line start or after whitespace, '=' or ':'
static SOURCE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)(?:^|[\s=:])(/[^\s:;=\\'"]*\.f90)"#).unwrap());

/// Unique absolute `.f90` paths mentioned in Makefile text, sorted by their
/// bytes the way `sort -u` orders them.
pub fn discover_sources(makefile: &str) -> Vec<PathBuf> {
    let unique: BTreeSet<&str> = SOURCE_PATH_RE
        .captures_iter(makefile)
        .filter_map(|caps| caps.get(1))
        .filter(|m| ends_path(&makefile[m.end()..]))
        .map(|m| m.as_str())
        .collect();
    unique.into_iter().map(PathBuf::from).collect()
}

/// A path ends at line end or before whitespace, ':', ';' or ')'.
fn ends_path(rest: &str) -> bool {
    rest.chars()
        .next()
        .map_or(true, |c| c.is_whitespace() || matches!(c, ':' | ';' | ')'))
}

/// Read a Makefile and return the `.f90` paths it references.
pub fn discover_sources_in<P: AsRef<Path>>(makefile: P) -> Result<Vec<PathBuf>> {
    let text = fs_err::read_to_string(makefile.as_ref())?;
    Ok(discover_sources(&text))
}
