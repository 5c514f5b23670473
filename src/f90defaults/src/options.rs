// f90defaults/src/options.rs

//! Options controlling extraction and output.

use serde::{Deserialize, Serialize};

/// What to do with a namelist member whose default cannot be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDefaults {
    /// Emit `member = ! no default value found`
    #[default]
    Placeholder,
    /// Leave the member out of the output
    Omit,
}

/// Order of members inside an emitted group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberOrder {
    /// Order of the declarations in the file; undeclared members go last
    #[default]
    Declaration,
    /// Order of the names in the `namelist` statements
    Namelist,
}

/// Options for turning a Fortran file into a defaults table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub missing_defaults: MissingDefaults,
    pub member_order: MemberOrder,
    /// Stop reading at the first `contains` statement
    pub stop_at_contains: bool,
    /// Resolve bare-name initializers through `parameter` constants
    pub resolve_parameters: bool,
    /// Print a scalar initializer on an array of known extent as `n*value`
    pub expand_scalar_arrays: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            missing_defaults: MissingDefaults::Placeholder,
            member_order: MemberOrder::Declaration,
            stop_at_contains: true,
            resolve_parameters: true,
            expand_scalar_arrays: true,
        }
    }
}

/// Options for writing namelist text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Indentation string for member lines
    pub indent: String,
    /// Whether to add a comma after each value
    pub end_comma: bool,
    /// Whether to use uppercase for group and member names
    pub uppercase: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(), // 2 spaces
            end_comma: false,
            uppercase: false,
        }
    }
}
