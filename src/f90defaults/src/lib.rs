// f90defaults/src/lib.rs

//! Extraction of namelist groups and their default values from Fortran 90
//! source files.
//!
//! The library provides:
//! - a free-form source reader (comments, `&` continuations, `;` splitting)
//! - a declaration parser for the intrinsic types namelist variables use
//! - resolution of each namelist member to its declared initializer,
//!   including `parameter` constants and scalar-to-array expansion
//! - namelist text output of the resolved defaults
//! - discovery of `.f90` sources listed in a generated Makefile
//! - a namelist reader and, with the `yaml` feature, conversion to and from
//!   the `values`-wrapped YAML parameter template
//!
//! ```
//! use f90defaults::{extract_str, defaults_to_string, ExtractOptions, WriteOptions};
//!
//! let source = "integer :: a = 10\nnamelist /my_nml/ a\n";
//! let extraction = extract_str(source, &ExtractOptions::default());
//! let text = defaults_to_string(&extraction.defaults, &WriteOptions::default());
//! assert_eq!(text, "&my_nml\n  a = 10\n/\n\n");
//! ```

pub mod declaration;
pub mod diagnostic;
pub mod discover;
pub mod error;
pub mod extract;
pub mod literal;
pub mod namelist;
pub mod options;
pub mod resolve;
pub mod source;
pub mod statement;
pub mod table;
pub mod writer;

use std::path::Path;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use discover::{discover_sources, discover_sources_in};
pub use error::{F90DefaultsError, Result};
pub use extract::{extract_file, extract_str, Extraction};
pub use namelist::{Namelist, NamelistGroup, NamelistReader, NamelistValue};
pub use options::{ExtractOptions, MemberOrder, MissingDefaults, WriteOptions};
pub use resolve::{DefaultEntry, DefaultValue, DefaultsTable};
pub use writer::{defaults_to_string, write_defaults, write_namelist, MISSING_DEFAULT_MARKER};

/// Parse a Fortran namelist file.
///
/// ```no_run
/// fn main() -> Result<(), f90defaults::F90DefaultsError> {
///     let nml = f90defaults::read_namelist("input.nml")?;
///     println!("{}", nml);
///     Ok(())
/// }
/// ```
pub fn read_namelist<P: AsRef<Path>>(path: P) -> Result<Namelist> {
    let contents = extract::read_source(path.as_ref())?;
    reads_namelist(&contents)
}

/// Parse Fortran namelist text.
///
/// ```
/// let nml = f90defaults::reads_namelist("&data_nml x=1 y=2.0 z=.true. /").unwrap();
/// assert_eq!(nml.len(), 1);
/// ```
pub fn reads_namelist(content: &str) -> Result<Namelist> {
    NamelistReader::new(content)?.parse()
}

