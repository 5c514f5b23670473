// f90defaults/src/source/lexer.rs

//! Low-level lexical analysis for Fortran statements and namelist text.

use super::token::{Token, TokenType};
use crate::error::{F90DefaultsError, Result};

/// Low-level lexer over a borrowed source string.
///
/// Signs directly in front of a digit are folded into the numeric literal,
/// so `b = -20` scans as `b`, `=`, `-20`. Whether such a sign is really a
/// binary operator is left to the statement parsers.
pub struct Lexer<'a> {
    source: &'a str,
    input: Vec<(usize, char)>,
    current: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.char_indices().collect(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Report line numbers relative to `line` instead of 1.
    pub fn starting_at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token> {
        let start = self.current;
        let line = self.line;
        let column = self.column;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenType::Eof, start, line, column));
        };

        if c.is_whitespace() {
            while self.peek().map_or(false, char::is_whitespace) {
                self.advance();
            }
            return Ok(self.make_token(TokenType::Whitespace, start, line, column));
        }

        self.advance();
        let token_type = match c {
            '=' => {
                if self.match_char('>') {
                    TokenType::Arrow
                } else if self.match_char('=') {
                    TokenType::Operator
                } else {
                    TokenType::Assign
                }
            }
            ',' => TokenType::Comma,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '[' => TokenType::LeftBracket,
            ']' => TokenType::RightBracket,
            '/' => {
                if self.match_char('=') {
                    TokenType::Operator
                } else {
                    TokenType::Slash
                }
            }
            ':' => {
                if self.match_char(':') {
                    TokenType::DoubleColon
                } else {
                    TokenType::Colon
                }
            }
            '%' => TokenType::Percent,
            '*' => TokenType::Star,
            '&' => TokenType::Ampersand,
            '<' | '>' => {
                self.match_char('=');
                TokenType::Operator
            }
            '+' | '-' => self.scan_sign_or_number(c),
            '.' => self.scan_decimal_or_dot_operator(),
            '\'' | '"' => self.scan_string(c, line, column)?,
            '!' => {
                while self.peek().map_or(false, |c| c != '\n') {
                    self.advance();
                }
                TokenType::Comment
            }
            _ if c.is_ascii_alphabetic() || c == '_' => {
                while self
                    .peek()
                    .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
                {
                    self.advance();
                }
                TokenType::Identifier
            }
            _ if c.is_ascii_digit() => self.scan_number_tail(),
            _ => TokenType::Operator,
        };

        Ok(self.make_token(token_type, start, line, column))
    }

    fn scan_sign_or_number(&mut self, sign: char) -> TokenType {
        let starts_number = match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_ahead(1).map_or(false, |c| c.is_ascii_digit()),
            _ => false,
        };

        if starts_number {
            if self.peek() == Some('.') {
                self.advance();
                self.scan_digits();
                self.scan_exponent_and_kind(true)
            } else {
                self.scan_number_tail()
            }
        } else if sign == '+' {
            TokenType::Plus
        } else {
            TokenType::Minus
        }
    }

    /// Continue a number whose first digit has been consumed.
    fn scan_number_tail(&mut self) -> TokenType {
        self.scan_digits();

        let mut is_real = false;
        if self.peek() == Some('.') && self.dot_starts_fraction() {
            is_real = true;
            self.advance();
            self.scan_digits();
        }

        self.scan_exponent_and_kind(is_real)
    }

    fn scan_exponent_and_kind(&mut self, mut is_real: bool) -> TokenType {
        if matches!(self.peek(), Some('e' | 'E' | 'd' | 'D')) && self.exponent_follows() {
            is_real = true;
            self.advance(); // exponent marker
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.scan_digits();
        }

        // Kind suffix: 1.0_r8, 42_i8, 3_8
        if self.peek() == Some('_')
            && self
                .peek_ahead(1)
                .map_or(false, |c| c.is_ascii_alphanumeric())
        {
            self.advance();
            while self
                .peek()
                .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.advance();
            }
        }

        if is_real {
            TokenType::Real
        } else {
            TokenType::Integer
        }
    }

    /// Decide whether the '.' under the cursor belongs to the number before
    /// it (`5.`, `5.0`, `5.e3`) or opens a dot operator (`5.eq.x`).
    fn dot_starts_fraction(&self) -> bool {
        match self.peek_ahead(1) {
            None => true,
            Some(c) if c.is_ascii_digit() => true,
            Some('e' | 'E' | 'd' | 'D') => match self.peek_ahead(2) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_ahead(3).map_or(false, |c| c.is_ascii_digit()),
                Some(c) => !c.is_ascii_alphabetic(),
                None => true,
            },
            Some(c) => !c.is_ascii_alphabetic(),
        }
    }

    fn exponent_follows(&self) -> bool {
        match self.peek_ahead(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self.peek_ahead(2).map_or(false, |c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn scan_decimal_or_dot_operator(&mut self) -> TokenType {
        if self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.scan_digits();
            return self.scan_exponent_and_kind(true);
        }

        if !self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            return TokenType::Operator;
        }

        let word_start = self.current;
        while self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let word: String = self.input[word_start..self.current]
            .iter()
            .map(|(_, c)| c.to_ascii_lowercase())
            .collect();
        self.match_char('.');

        if matches!(word.as_str(), "true" | "false" | "t" | "f") {
            // .true._lk
            if self.peek() == Some('_') {
                while self
                    .peek()
                    .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
                {
                    self.advance();
                }
            }
            TokenType::Logical
        } else {
            TokenType::Operator
        }
    }

    fn scan_string(&mut self, quote: char, line: usize, column: usize) -> Result<TokenType> {
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(F90DefaultsError::parse_error(
                        "Unterminated string literal",
                        line,
                        column,
                    ));
                }
                Some(c) if c == quote => {
                    self.advance();
                    // A doubled quote is an escaped quote character
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return Ok(TokenType::String);
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn make_token(&self, token_type: TokenType, start: usize, line: usize, column: usize) -> Token {
        let from = self.byte_offset(start);
        let to = self.byte_offset(self.current);
        Token::new(
            token_type,
            self.source[from..to].to_string(),
            from,
            line,
            column,
        )
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.input
            .get(index)
            .map_or(self.source.len(), |(offset, _)| *offset)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = *self.input.get(self.current)?;
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.peek_ahead(0)
    }

    fn peek_ahead(&self, distance: usize) -> Option<char> {
        self.input.get(self.current + distance).map(|(_, c)| *c)
    }
}
