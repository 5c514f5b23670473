// f90defaults/src/source/mod.rs

//! Lexical layer for Fortran source files.
//!
//! [`LineStream`] turns physical lines into logical statements and
//! [`Lexer`] tokenizes a statement. The namelist reader reuses the lexer on
//! whole namelist files.

pub mod lexer;
pub mod stream;
pub mod token;

pub use lexer::Lexer;
pub use stream::{LineStream, LogicalLine};
pub use token::{Token, TokenType};

use crate::error::Result;

/// Scan a string into tokens, dropping whitespace.
pub fn scan(input: &str) -> Result<Vec<Token>> {
    scan_from_line(input, 1, false)
}

/// Scan one logical line, dropping whitespace and comments. Token line
/// numbers start at `line`.
pub fn scan_statement(line: &LogicalLine) -> Result<Vec<Token>> {
    scan_from_line(&line.text, line.line, true)
}

fn scan_from_line(input: &str, line: usize, drop_comments: bool) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input).starting_at_line(line);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.scan_token()?;
        match token.token_type {
            TokenType::Eof => {
                tokens.push(token);
                break;
            }
            TokenType::Whitespace => {}
            TokenType::Comment if drop_comments => {}
            _ => tokens.push(token),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_namelist() {
        let tokens = scan("&my_nml a=10, b=3.14 /").unwrap();
        let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            types,
            vec![
                TokenType::Ampersand,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Integer,
                TokenType::Comma,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::Real,
                TokenType::Slash,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_statement_uses_physical_line() {
        let line = LogicalLine {
            text: "integer :: a = 1".to_string(),
            line: 42,
        };
        let tokens = scan_statement(&line).unwrap();
        assert!(tokens.iter().all(|t| t.line == 42));
        assert_eq!(tokens[1].token_type, TokenType::DoubleColon);
    }
}
