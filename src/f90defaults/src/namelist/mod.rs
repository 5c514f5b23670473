// f90defaults/src/namelist/mod.rs

//! Fortran namelist data model, reader and YAML template conversion.
//!
//! The reader exists so extracted defaults can be read back and checked, and
//! so a generated `input.nml` can be turned into a parameter template. The
//! template can be turned back into namelist text.

pub mod group;
pub mod reader;
pub mod value;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use group::{Namelist, NamelistGroup};
pub use reader::NamelistReader;
pub use value::NamelistValue;
