// f90defaults/src/error.rs

//! Error types for reading Fortran sources and namelist files.

use thiserror::Error;

/// Result type alias for f90defaults operations.
pub type Result<T> = std::result::Result<T, F90DefaultsError>;

/// Fatal errors. Recoverable problems inside a source file are reported as
/// [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Error, Debug)]
pub enum F90DefaultsError {
    /// I/O error when reading or writing files
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error with position and message
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// A literal that could not be converted to a typed value
    #[error("Invalid {expected_type} literal '{value}'")]
    InvalidLiteral {
        value: String,
        expected_type: &'static str,
    },

    /// YAML serialization error
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl F90DefaultsError {
    /// Create a new parse error.
    pub fn parse_error<S: Into<String>>(message: S, line: usize, column: usize) -> Self {
        F90DefaultsError::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a new invalid literal error.
    pub fn invalid_literal<S: Into<String>>(value: S, expected_type: &'static str) -> Self {
        F90DefaultsError::InvalidLiteral {
            value: value.into(),
            expected_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = F90DefaultsError::parse_error("Expected '=' after variable name", 3, 7);
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 7: Expected '=' after variable name"
        );

        let err = F90DefaultsError::invalid_literal("1.2.3", "real");
        assert_eq!(err.to_string(), "Invalid real literal '1.2.3'");
    }
}
