// f90defaults/src/literal.rs

//! Literal constants and initializer expressions found in declarations.

use crate::error::Result;
use crate::namelist::value::{parse_character, parse_integer, parse_real, NamelistValue};
use crate::source::{Token, TokenType};
use std::fmt;

/// A literal constant as written in the source.
///
/// Numeric literals keep their source spelling (sign, decimal point,
/// exponent letter and exponent sign) with the kind suffix removed, since
/// namelist input does not accept kind parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(String),
    Real(String),
    Logical(bool),
    /// Quoted text including its delimiters, e.g. `"hello"` or `'it''s'`
    Character(String),
}

impl Literal {
    /// Build a literal from a single literal token.
    pub fn from_token(token: &Token) -> Option<Literal> {
        match token.token_type {
            TokenType::Integer => Some(Literal::Integer(strip_kind(&token.lexeme).to_string())),
            TokenType::Real => Some(Literal::Real(strip_kind(&token.lexeme).to_string())),
            TokenType::Logical => Some(Literal::Logical(
                token.lexeme.to_ascii_lowercase().starts_with(".t"),
            )),
            TokenType::String => Some(Literal::Character(token.lexeme.clone())),
            _ => None,
        }
    }

    /// Build a numeric literal from a detached sign and an unsigned number,
    /// as in `x = - 1.5`.
    pub fn from_signed(sign: &Token, number: &Token) -> Option<Literal> {
        let sign = match sign.token_type {
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            _ => return None,
        };
        if number.lexeme.starts_with(['+', '-']) {
            return None;
        }
        match Literal::from_token(number)? {
            Literal::Integer(text) => Some(Literal::Integer(format!("{sign}{text}"))),
            Literal::Real(text) => Some(Literal::Real(format!("{sign}{text}"))),
            _ => None,
        }
    }

    /// Namelist spelling of this literal.
    pub fn to_namelist_string(&self) -> String {
        match self {
            Literal::Integer(text) | Literal::Real(text) | Literal::Character(text) => {
                text.clone()
            }
            Literal::Logical(true) => ".true.".to_string(),
            Literal::Logical(false) => ".false.".to_string(),
        }
    }

    /// Convert to the typed value a namelist reader would produce.
    pub fn to_value(&self) -> Result<NamelistValue> {
        match self {
            Literal::Integer(text) => parse_integer(text),
            Literal::Real(text) => parse_real(text),
            Literal::Logical(b) => Ok(NamelistValue::Logical(*b)),
            Literal::Character(text) => Ok(parse_character(text)),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_namelist_string())
    }
}

fn strip_kind(lexeme: &str) -> &str {
    lexeme.split('_').next().unwrap_or(lexeme)
}

/// One element of an initializer: a literal or a reference to a named
/// constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Literal(Literal),
    /// Lowercased name of a (presumed) named constant
    Name(String),
}

/// The right-hand side of `= ...` in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    Scalar(Element),
    /// Array constructor `(/ ... /)` or `[ ... ]`
    Array(Vec<Element>),
    /// Anything else, kept as source text
    Expression(String),
}

impl Initializer {
    /// Classify the tokens of an initializer. `source` is the statement text
    /// the tokens were scanned from.
    pub fn parse(tokens: &[Token], source: &str) -> Initializer {
        if let Some(items) = array_constructor_items(tokens) {
            let elements: Option<Vec<Element>> = split_top_level(items)
                .into_iter()
                .map(parse_element)
                .collect();
            if let Some(elements) = elements.filter(|e| !e.is_empty()) {
                return Initializer::Array(elements);
            }
        } else if let Some(element) = parse_element(tokens) {
            return Initializer::Scalar(element);
        }

        Initializer::Expression(raw_text(tokens, source))
    }
}

/// Source text spanned by `tokens`.
pub(crate) fn raw_text(tokens: &[Token], source: &str) -> String {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => source
            .get(first.offset..last.end())
            .unwrap_or_default()
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

fn parse_element(tokens: &[Token]) -> Option<Element> {
    match tokens {
        [token] if token.token_type == TokenType::Identifier => {
            Some(Element::Name(token.lexeme.to_ascii_lowercase()))
        }
        [token] => Literal::from_token(token).map(Element::Literal),
        [sign, number] => Literal::from_signed(sign, number).map(Element::Literal),
        _ => None,
    }
}

/// Inner tokens of `(/ ... /)` or `[ ... ]`, if `tokens` is exactly one
/// array constructor.
fn array_constructor_items(tokens: &[Token]) -> Option<&[Token]> {
    use TokenType::*;
    let n = tokens.len();
    if n >= 4
        && tokens[0].token_type == LeftParen
        && tokens[1].token_type == Slash
        && tokens[n - 2].token_type == Slash
        && tokens[n - 1].token_type == RightParen
    {
        return Some(&tokens[2..n - 2]);
    }
    if n >= 2 && tokens[0].token_type == LeftBracket && tokens[n - 1].token_type == RightBracket {
        return Some(&tokens[1..n - 1]);
    }
    None
}

/// Split on commas that are not nested inside parentheses or brackets.
pub(crate) fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.token_type {
            TokenType::LeftParen | TokenType::LeftBracket => depth += 1,
            TokenType::RightParen | TokenType::RightBracket => depth = depth.saturating_sub(1),
            TokenType::Comma if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() || !parts.is_empty() {
        parts.push(&tokens[start..]);
    }
    parts
}
