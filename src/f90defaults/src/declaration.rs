// f90defaults/src/declaration.rs

//! Parsing of type declaration statements.
//!
//! Handles the subset of declaration syntax that namelist variables use in
//! practice:
//!
//! ```fortran
//! integer :: a = 10, b = -20
//! real(r8), parameter :: tiny = 1.0e-5_r8
//! character(len=256) :: name = "hello", other*32
//! real(kind=r8), dimension(3) :: weights = (/ 0.25_r8, 0.5_r8, 0.25_r8 /)
//! double precision x(n)
//! ```

use crate::error::{F90DefaultsError, Result};
use crate::literal::{raw_text, split_top_level, Initializer};
use crate::source::{Token, TokenType};
use crate::statement::matching_paren;
use std::fmt;

/// Intrinsic types recognised in declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortranType {
    Integer,
    Real,
    DoublePrecision,
    Logical,
    Character,
}

impl FortranType {
    fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "integer" => Some(FortranType::Integer),
            "real" => Some(FortranType::Real),
            "doubleprecision" => Some(FortranType::DoublePrecision),
            "logical" => Some(FortranType::Logical),
            "character" => Some(FortranType::Character),
            _ => None,
        }
    }
}

impl fmt::Display for FortranType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FortranType::Integer => "integer",
            FortranType::Real => "real",
            FortranType::DoublePrecision => "double precision",
            FortranType::Logical => "logical",
            FortranType::Character => "character",
        };
        f.write_str(name)
    }
}

/// Declared type with its kind or length selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub base: FortranType,
    /// Selector text as written, without parentheses or `*`
    /// (`r8`, `kind=r8`, `len=20`, `8`, `*`)
    pub selector: Option<String>,
}

/// One declared entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased variable name
    pub name: String,
    pub type_spec: TypeSpec,
    /// Whether the `parameter` attribute is present
    pub parameter: bool,
    /// Array dimensions as lowercased text, one entry per rank (`3`, `n`,
    /// `0:n`, `:`)
    pub dimensions: Option<Vec<String>>,
    pub initializer: Option<Initializer>,
    /// Physical line of the statement
    pub line: usize,
}

/// Parse a declaration statement into its entities.
///
/// `tokens` must not include the Eof token; `source` is the statement text
/// the tokens were scanned from.
pub fn parse_declaration(tokens: &[Token], source: &str) -> Result<Vec<Declaration>> {
    let first = tokens
        .first()
        .ok_or_else(|| F90DefaultsError::parse_error("empty declaration", 0, 0))?;
    let line = first.line;

    let double_precision =
        first.is_word("double") && tokens.get(1).map_or(false, |t| t.is_word("precision"));
    let (base, rest) = if double_precision {
        (FortranType::DoublePrecision, &tokens[2..])
    } else {
        let base = FortranType::from_keyword(&first.lexeme)
            .ok_or_else(|| error_at(first, "not a supported type keyword"))?;
        (base, &tokens[1..])
    };

    let (selector, rest) = parse_selector(rest, source)?;
    let type_spec = TypeSpec { base, selector };

    let double_colon = rest.iter().position(|t| t.token_type == TokenType::DoubleColon);
    let (attributes, entities) = match double_colon {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => {
            if let Some(comma) = rest.first().filter(|t| t.token_type == TokenType::Comma) {
                return Err(error_at(comma, "attributes require '::'"));
            }
            (&rest[..0], rest)
        }
    };

    let (parameter, shared_dimensions) = parse_attributes(attributes, source)?;

    if entities.is_empty() {
        return Err(F90DefaultsError::parse_error("no entities declared", line, 1));
    }

    split_top_level(entities)
        .into_iter()
        .map(|entity| {
            parse_entity(entity, source).map(|e| Declaration {
                name: e.name,
                type_spec: type_spec.clone(),
                parameter,
                dimensions: e.dimensions.or_else(|| shared_dimensions.clone()),
                initializer: e.initializer,
                line,
            })
        })
        .collect()
}

/// Parse the optional selector after the type keyword.
fn parse_selector<'t>(tokens: &'t [Token], source: &str) -> Result<(Option<String>, &'t [Token])> {
    match tokens.first().map(|t| t.token_type) {
        Some(TokenType::LeftParen) => {
            let close = matching_paren(tokens)
                .ok_or_else(|| error_at(&tokens[0], "unclosed type selector"))?;
            let text = raw_text(&tokens[1..close], source);
            Ok((Some(text), &tokens[close + 1..]))
        }
        Some(TokenType::Star) => match tokens.get(1) {
            Some(len) if len.token_type == TokenType::Integer => {
                Ok((Some(len.lexeme.clone()), &tokens[2..]))
            }
            Some(open) if open.token_type == TokenType::LeftParen => {
                let inner = &tokens[1..];
                let close = matching_paren(inner)
                    .ok_or_else(|| error_at(open, "unclosed length selector"))?;
                Ok((Some(raw_text(&inner[1..close], source)), &inner[close + 1..]))
            }
            _ => Err(error_at(&tokens[0], "expected length after '*'")),
        },
        _ => Ok((None, tokens)),
    }
}

/// Read the attribute list between the type spec and `::`. Returns the
/// `parameter` flag and the `dimension(...)` shape.
fn parse_attributes(tokens: &[Token], source: &str) -> Result<(bool, Option<Vec<String>>)> {
    let mut parameter = false;
    let mut dimensions = None;

    // Leading comma separates the type spec from the first attribute
    let tokens = match tokens.first() {
        Some(t) if t.token_type == TokenType::Comma => &tokens[1..],
        Some(t) => return Err(error_at(t, "expected ',' or '::' after type")),
        None => return Ok((parameter, dimensions)),
    };

    for attribute in split_top_level(tokens) {
        let Some(name) = attribute.first() else {
            continue;
        };
        if name.is_word("parameter") {
            parameter = true;
        } else if name.is_word("dimension") {
            dimensions = Some(parse_dimensions(&attribute[1..], source)?);
        }
    }

    Ok((parameter, dimensions))
}

/// Parse `( d1, d2, ... )` into one text entry per dimension.
fn parse_dimensions(tokens: &[Token], source: &str) -> Result<Vec<String>> {
    let open = tokens
        .first()
        .filter(|t| t.token_type == TokenType::LeftParen)
        .ok_or_else(|| F90DefaultsError::parse_error("expected '(' for dimensions", 0, 0))?;
    let close = matching_paren(tokens).ok_or_else(|| error_at(open, "unclosed dimension list"))?;
    Ok(split_top_level(&tokens[1..close])
        .into_iter()
        .map(|dim| raw_text(dim, source).to_ascii_lowercase())
        .collect())
}

struct Entity {
    name: String,
    dimensions: Option<Vec<String>>,
    initializer: Option<Initializer>,
}

/// Parse `name [(dims)] [*len] [= init | => init]`.
fn parse_entity(tokens: &[Token], source: &str) -> Result<Entity> {
    let name = tokens
        .first()
        .filter(|t| t.token_type == TokenType::Identifier)
        .ok_or_else(|| match tokens.first() {
            Some(t) => error_at(t, "expected variable name"),
            None => F90DefaultsError::parse_error("empty entity in declaration", 0, 0),
        })?;

    let mut rest = &tokens[1..];
    let mut dimensions = None;

    if rest.first().map_or(false, |t| t.token_type == TokenType::LeftParen) {
        let close = matching_paren(rest)
            .ok_or_else(|| error_at(&rest[0], "unclosed dimension list"))?;
        dimensions = Some(parse_dimensions(&rest[..=close], source)?);
        rest = &rest[close + 1..];
    }

    // Per-entity character length, `s*32` or `s*(*)`; only the length is skipped
    if rest.first().map_or(false, |t| t.token_type == TokenType::Star) {
        let (_, after) = parse_selector(rest, source)?;
        rest = after;
    }

    let initializer = match rest.first() {
        None => None,
        Some(t) if matches!(t.token_type, TokenType::Assign | TokenType::Arrow) => {
            let value = &rest[1..];
            if value.is_empty() {
                return Err(error_at(t, "missing initializer"));
            }
            Some(Initializer::parse(value, source))
        }
        Some(t) => return Err(error_at(t, "unexpected token after variable name")),
    };

    Ok(Entity {
        name: name.lexeme.to_ascii_lowercase(),
        dimensions,
        initializer,
    })
}

fn error_at(token: &Token, message: &str) -> F90DefaultsError {
    F90DefaultsError::parse_error(
        format!("{} near '{}'", message, token.lexeme),
        token.line,
        token.column,
    )
}

#[cfg(test)]
mod tests;
