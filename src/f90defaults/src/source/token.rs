// f90defaults/src/source/token.rs

//! Token types shared by the Fortran source lexer and the namelist reader.

use std::fmt;

/// A token scanned from Fortran source or namelist text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// The raw text of the token
    pub lexeme: String,
    /// Byte offset of the first character in the scanned text
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        lexeme: String,
        offset: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            token_type,
            lexeme,
            offset,
            line,
            column,
        }
    }

    /// Byte offset one past the last character of the token.
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }

    /// Whether this token is the identifier `word`, ignoring case.
    pub fn is_word(&self, word: &str) -> bool {
        self.token_type == TokenType::Identifier && self.lexeme.eq_ignore_ascii_case(word)
    }

    /// Whether this token is a literal constant.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Integer | TokenType::Real | TokenType::Logical | TokenType::String
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.lexeme)
    }
}

/// Types of tokens that can appear in a Fortran statement or namelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Identifier (keywords, variable names, group names)
    Identifier,
    /// Integer literal, sign and kind suffix included
    Integer,
    /// Real literal, sign and kind suffix included
    Real,
    /// Logical literal (.true., .false.)
    Logical,
    /// Quoted character literal
    String,
    /// Assignment (=)
    Assign,
    /// Pointer initialization (=>)
    Arrow,
    /// Comma separator (,)
    Comma,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left bracket [
    LeftBracket,
    /// Right bracket ]
    RightBracket,
    /// Slash (/), closes a namelist group or delimits a group name
    Slash,
    /// Attribute separator (::)
    DoubleColon,
    /// Colon (:)
    Colon,
    /// Percent sign (%)
    Percent,
    /// Multiplication or repeat count (*)
    Star,
    /// Unary or binary plus (+)
    Plus,
    /// Unary or binary minus (-)
    Minus,
    /// Namelist group start or continuation marker (&)
    Ampersand,
    /// Any other operator or punctuation (.eq., ==, <=, ...)
    Operator,
    /// Comment
    Comment,
    /// Whitespace
    Whitespace,
    /// End of input
    Eof,
}
