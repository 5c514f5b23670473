// f90defaults/src/namelist/value.rs

//! Typed namelist values and the string parsers that produce them.

use crate::error::{F90DefaultsError, Result};
use serde::Deserialize;
use std::fmt;

/// A value read from a Fortran namelist.
/// Deserializes from plain YAML scalars and sequences.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NamelistValue {
    Integer(i64),
    Real(f64),
    Logical(bool),
    Character(String),
    Array(Vec<NamelistValue>),
    /// Null value (`x = ,` or `x =` followed by the next assignment)
    Null,
}

impl NamelistValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, NamelistValue::Null)
    }
}

impl fmt::Display for NamelistValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamelistValue::Integer(i) => write!(f, "{i}"),
            NamelistValue::Real(x) => {
                // Keep a decimal point so the value reads back as real
                let s = x.to_string();
                if s.contains(['.', 'e', 'E']) || !x.is_finite() {
                    write!(f, "{s}")
                } else {
                    write!(f, "{s}.0")
                }
            }
            NamelistValue::Logical(true) => write!(f, ".true."),
            NamelistValue::Logical(false) => write!(f, ".false."),
            NamelistValue::Character(s) => write!(f, "'{}'", s.replace('\'', "''")),
            NamelistValue::Array(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
            NamelistValue::Null => Ok(()),
        }
    }
}

/// Parse an integer literal, ignoring any kind suffix.
pub fn parse_integer(value: &str) -> Result<NamelistValue> {
    let clean = value.trim().split('_').next().unwrap_or_default();
    clean
        .parse::<i64>()
        .map(NamelistValue::Integer)
        .map_err(|_| F90DefaultsError::invalid_literal(value, "integer"))
}

/// Parse a real literal with `d`/`D` exponent support, ignoring any kind
/// suffix.
pub fn parse_real(value: &str) -> Result<NamelistValue> {
    let clean = value.trim().split('_').next().unwrap_or_default();
    let normalized: String = clean
        .chars()
        .map(|c| if matches!(c, 'd' | 'D') { 'e' } else { c })
        .collect();

    match normalized.to_ascii_lowercase().as_str() {
        "+inf" | "inf" | "+infinity" | "infinity" => return Ok(NamelistValue::Real(f64::INFINITY)),
        "-inf" | "-infinity" => return Ok(NamelistValue::Real(f64::NEG_INFINITY)),
        "nan" | "+nan" | "-nan" => return Ok(NamelistValue::Real(f64::NAN)),
        _ => {}
    }

    normalized
        .parse::<f64>()
        .map(NamelistValue::Real)
        .map_err(|_| F90DefaultsError::invalid_literal(value, "real"))
}

/// Parse a logical in any spelling namelist input accepts: `.true.`, `.t.`,
/// `t`, `true`, `.TRUE._lk`, ...
pub fn parse_logical(value: &str) -> Result<NamelistValue> {
    let lower = value.trim().to_ascii_lowercase();
    let word = lower.trim_start_matches('.');
    if word.starts_with('t') {
        Ok(NamelistValue::Logical(true))
    } else if word.starts_with('f') {
        Ok(NamelistValue::Logical(false))
    } else {
        Err(F90DefaultsError::invalid_literal(value, "logical"))
    }
}

/// Remove the delimiters of a quoted literal and collapse doubled quotes.
/// Unquoted text is returned as is.
pub fn parse_character(value: &str) -> NamelistValue {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    let quote = chars.next();
    match quote {
        Some(q @ ('\'' | '"')) if trimmed.len() >= 2 && trimmed.ends_with(q) => {
            let inner = &trimmed[1..trimmed.len() - 1];
            let doubled: String = [q, q].iter().collect();
            NamelistValue::Character(inner.replace(&doubled, &q.to_string()))
        }
        _ => NamelistValue::Character(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_parsing() {
        assert_eq!(parse_integer("42").unwrap(), NamelistValue::Integer(42));
        assert_eq!(parse_integer("-123").unwrap(), NamelistValue::Integer(-123));
        assert_eq!(parse_integer("+7").unwrap(), NamelistValue::Integer(7));
        assert_eq!(parse_integer("42_i8").unwrap(), NamelistValue::Integer(42));
        assert!(parse_integer("3.14").is_err());
    }

    #[test]
    fn test_real_parsing() {
        assert_eq!(parse_real("3.14").unwrap(), NamelistValue::Real(3.14));
        assert_eq!(parse_real("1.23e4").unwrap(), NamelistValue::Real(1.23e4));
        assert_eq!(parse_real("1.23D4").unwrap(), NamelistValue::Real(1.23e4));
        assert_eq!(parse_real("-2.5d-3").unwrap(), NamelistValue::Real(-2.5e-3));
        assert_eq!(parse_real("1.0_r8").unwrap(), NamelistValue::Real(1.0));
        assert_eq!(parse_real("5.").unwrap(), NamelistValue::Real(5.0));
        assert_eq!(parse_real(".5").unwrap(), NamelistValue::Real(0.5));
        assert_eq!(parse_real("-inf").unwrap(), NamelistValue::Real(f64::NEG_INFINITY));
        assert!(parse_real("abc").is_err());
    }

    #[test]
    fn test_logical_parsing() {
        assert_eq!(parse_logical(".true.").unwrap(), NamelistValue::Logical(true));
        assert_eq!(parse_logical(".F.").unwrap(), NamelistValue::Logical(false));
        assert_eq!(parse_logical("T").unwrap(), NamelistValue::Logical(true));
        assert!(parse_logical("maybe").is_err());
    }

    #[test]
    fn test_character_parsing() {
        assert_eq!(
            parse_character("'don''t'"),
            NamelistValue::Character("don't".to_string())
        );
        assert_eq!(
            parse_character("\"say \"\"hi\"\"\""),
            NamelistValue::Character("say \"hi\"".to_string())
        );
        assert_eq!(parse_character("''"), NamelistValue::Character(String::new()));
    }

    #[test]
    fn test_display_reads_back() {
        assert_eq!(NamelistValue::Real(2.0).to_string(), "2.0");
        assert_eq!(NamelistValue::Character("it's".into()).to_string(), "'it''s'");
        assert_eq!(
            NamelistValue::Array(vec![NamelistValue::Integer(-1), NamelistValue::Integer(2)])
                .to_string(),
            "-1, 2"
        );
    }
}
