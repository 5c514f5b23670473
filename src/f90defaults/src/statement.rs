// f90defaults/src/statement.rs

//! Classification of logical lines and parsing of `namelist` statements.

use crate::error::{F90DefaultsError, Result};
use crate::source::{Token, TokenType};

/// What a logical line is, as far as default extraction is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Type declaration statement for one of the supported intrinsic types
    Declaration,
    /// `namelist /group/ ...`
    Namelist,
    /// `contains`, the end of the specification part of a module
    Contains,
    Other,
}

/// Intrinsic type keywords that can start a declaration.
pub(crate) const TYPE_KEYWORDS: [&str; 5] =
    ["integer", "real", "logical", "character", "doubleprecision"];

/// Classify a statement from its tokens (Eof excluded).
pub fn classify(tokens: &[Token]) -> StatementKind {
    let Some(first) = tokens.first() else {
        return StatementKind::Other;
    };
    if first.token_type != TokenType::Identifier {
        return StatementKind::Other;
    }

    let keyword = first.lexeme.to_ascii_lowercase();
    match keyword.as_str() {
        "namelist" if tokens.get(1).map_or(false, |t| t.token_type == TokenType::Slash) => {
            StatementKind::Namelist
        }
        "contains" if tokens.len() == 1 => StatementKind::Contains,
        "double" if tokens.get(1).map_or(false, |t| t.is_word("precision")) => {
            classify_after_type(&tokens[2..])
        }
        k if TYPE_KEYWORDS.contains(&k) => classify_after_type(&tokens[1..]),
        _ => StatementKind::Other,
    }
}

/// Decide between a declaration and a statement that merely starts with a
/// type keyword: `real = 5`, `real(2) = 1.0`, `integer function f(x)`.
fn classify_after_type(rest: &[Token]) -> StatementKind {
    let after_selector = skip_selector(rest);
    let Some(next) = after_selector.first() else {
        return StatementKind::Other;
    };

    match next.token_type {
        TokenType::Assign | TokenType::Percent | TokenType::Arrow => return StatementKind::Other,
        TokenType::DoubleColon | TokenType::Comma | TokenType::Identifier => {}
        _ => return StatementKind::Other,
    }

    let has_double_colon = rest.iter().any(|t| t.token_type == TokenType::DoubleColon);
    if !has_double_colon
        && after_selector
            .iter()
            .take_while(|t| t.token_type == TokenType::Identifier)
            .any(|t| t.is_word("function") || t.is_word("subroutine"))
    {
        return StatementKind::Other;
    }

    StatementKind::Declaration
}

/// Skip a kind/length selector directly after a type keyword: `(...)`,
/// `*8` or `*(*)`.
pub(crate) fn skip_selector(tokens: &[Token]) -> &[Token] {
    match tokens.first().map(|t| t.token_type) {
        Some(TokenType::LeftParen) => {
            &tokens[matching_paren(tokens).map_or(tokens.len(), |i| i + 1)..]
        }
        Some(TokenType::Star) => match tokens.get(1).map(|t| t.token_type) {
            Some(TokenType::Integer) => &tokens[2..],
            Some(TokenType::LeftParen) => {
                let inner = &tokens[1..];
                &inner[matching_paren(inner).map_or(inner.len(), |i| i + 1)..]
            }
            _ => &tokens[1..],
        },
        _ => tokens,
    }
}

/// Index of the `)` that closes the `(` at `tokens[0]`.
pub(crate) fn matching_paren(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.token_type {
            TokenType::LeftParen | TokenType::LeftBracket => depth += 1,
            TokenType::RightParen | TokenType::RightBracket => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// One `/group/ members` clause of a namelist statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamelistClause {
    /// Lowercased group name
    pub group: String,
    /// Lowercased member names in statement order
    pub members: Vec<String>,
}

/// Parse `namelist /g/ a, b [,] /h/ c` into its clauses.
pub fn parse_namelist_statement(tokens: &[Token]) -> Result<Vec<NamelistClause>> {
    let mut clauses: Vec<NamelistClause> = Vec::new();
    let mut i = 1; // past 'namelist'

    while i < tokens.len() {
        let token = &tokens[i];
        match token.token_type {
            TokenType::Slash => {
                let name = tokens
                    .get(i + 1)
                    .filter(|t| t.token_type == TokenType::Identifier)
                    .ok_or_else(|| expected(token, "group name after '/'"))?;
                tokens
                    .get(i + 2)
                    .filter(|t| t.token_type == TokenType::Slash)
                    .ok_or_else(|| expected(name, "'/' after group name"))?;
                clauses.push(NamelistClause {
                    group: name.lexeme.to_ascii_lowercase(),
                    members: Vec::new(),
                });
                i += 3;
            }
            TokenType::Identifier => {
                let clause = clauses
                    .last_mut()
                    .ok_or_else(|| expected(token, "'/group/' before member names"))?;
                clause.members.push(token.lexeme.to_ascii_lowercase());
                i += 1;
                match tokens.get(i).map(|t| t.token_type) {
                    Some(TokenType::Comma) => i += 1,
                    Some(TokenType::Slash) | None => {}
                    Some(_) => return Err(expected(&tokens[i], "',' between member names")),
                }
            }
            _ => return Err(expected(token, "member name or '/group/'")),
        }
    }

    match clauses.first() {
        None => Err(F90DefaultsError::parse_error(
            "namelist statement names no group",
            tokens.first().map_or(0, |t| t.line),
            1,
        )),
        Some(_) => {
            if let Some(empty) = clauses.iter().find(|c| c.members.is_empty()) {
                return Err(F90DefaultsError::parse_error(
                    format!("group '{}' has no members", empty.group),
                    tokens[0].line,
                    1,
                ));
            }
            Ok(clauses)
        }
    }
}

fn expected(token: &Token, what: &str) -> F90DefaultsError {
    F90DefaultsError::parse_error(
        format!("expected {}, found '{}'", what, token.lexeme),
        token.line,
        token.column,
    )
}
