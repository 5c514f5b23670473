// f90defaults/src/namelist/reader.rs

//! Parser for Fortran namelist text.

use super::group::{Namelist, NamelistGroup};
use super::value::{parse_character, parse_integer, parse_logical, parse_real, NamelistValue};
use crate::error::{F90DefaultsError, Result};
use crate::source::{scan, Token, TokenType};

/// Token-level namelist parser.
pub struct NamelistReader {
    tokens: Vec<Token>,
    current: usize,
}

impl NamelistReader {
    /// Create a new reader for the given input.
    pub fn new(input: &str) -> Result<Self> {
        let mut tokens = scan(input)?;
        tokens.retain(|t| t.token_type != TokenType::Comment);
        Ok(Self { tokens, current: 0 })
    }

    /// Parse the input and return a namelist.
    pub fn parse(&mut self) -> Result<Namelist> {
        let mut namelist = Namelist::new();

        // Text outside of groups is ignored
        while !self.is_at_end() {
            if self.check(TokenType::Ampersand) {
                let (name, group) = self.parse_group()?;
                let target = namelist.insert_group(&name);
                for (var, value) in group.variables() {
                    target.insert(var, value.clone());
                }
            } else {
                self.advance();
            }
        }

        Ok(namelist)
    }

    fn parse_group(&mut self) -> Result<(String, NamelistGroup)> {
        self.advance(); // '&'

        let name = match self.advance() {
            Some(token) if token.token_type == TokenType::Identifier => token.lexeme.to_lowercase(),
            Some(token) => {
                return Err(F90DefaultsError::parse_error(
                    "Expected group name after &",
                    token.line,
                    token.column,
                ))
            }
            None => return Err(self.unexpected_end("Expected group name after &")),
        };

        let mut group = NamelistGroup::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(self.unexpected_end(&format!("Group '{name}' is not terminated")));
            };
            match token.token_type {
                TokenType::Slash => {
                    self.advance();
                    break;
                }
                TokenType::Ampersand if self.peek_ahead(1).map_or(false, |t| t.is_word("end")) => {
                    self.advance();
                    self.advance();
                    break;
                }
                TokenType::Identifier => {
                    let (var, value) = self.parse_assignment()?;
                    group.insert(&var, value);
                }
                TokenType::Comma => {
                    self.advance();
                }
                _ => {
                    return Err(F90DefaultsError::parse_error(
                        format!("Unexpected '{}' in group '{}'", token.lexeme, name),
                        token.line,
                        token.column,
                    ))
                }
            }
        }

        Ok((name, group))
    }

    fn parse_assignment(&mut self) -> Result<(String, NamelistValue)> {
        let mut name = match self.advance() {
            Some(token) => token.lexeme.to_lowercase(),
            None => return Err(self.unexpected_end("Expected variable name")),
        };

        // Array element indices are not tracked; x(2) is stored under x
        if self.check(TokenType::LeftParen) {
            self.skip_parenthesized();
        }
        while self.check(TokenType::Percent) {
            self.advance();
            if let Some(field) = self.advance() {
                name.push('%');
                name.push_str(&field.lexeme.to_lowercase());
            }
        }

        match self.advance() {
            Some(token) if token.token_type == TokenType::Assign => {}
            Some(token) => {
                return Err(F90DefaultsError::parse_error(
                    format!("Expected '=' after variable name '{name}'"),
                    token.line,
                    token.column,
                ))
            }
            None => return Err(self.unexpected_end("Expected '='")),
        }

        let value = self.parse_values()?;
        Ok((name, value))
    }

    /// Parse a value list up to the next assignment or the group end.
    fn parse_values(&mut self) -> Result<NamelistValue> {
        let mut values = Vec::new();
        let mut expect_value = true;

        while let Some(token) = self.peek() {
            if self.starts_assignment() {
                break;
            }
            match token.token_type {
                TokenType::Slash | TokenType::Ampersand => break,
                TokenType::Comma => {
                    if expect_value {
                        values.push(NamelistValue::Null);
                    }
                    expect_value = true;
                    self.advance();
                }
                TokenType::Integer
                    if self
                        .peek_ahead(1)
                        .map_or(false, |t| t.token_type == TokenType::Star) =>
                {
                    let count_token = token.clone();
                    let count: usize = count_token.lexeme.parse().map_err(|_| {
                        F90DefaultsError::parse_error(
                            format!("Invalid repeat count '{}'", count_token.lexeme),
                            count_token.line,
                            count_token.column,
                        )
                    })?;
                    self.advance();
                    self.advance();
                    let value = match self.peek() {
                        Some(next) if is_value_token(next) => {
                            let next = next.clone();
                            self.advance();
                            parse_value_token(&next)?
                        }
                        _ => NamelistValue::Null,
                    };
                    values.extend(std::iter::repeat(value).take(count));
                    expect_value = false;
                }
                _ if is_value_token(token) => {
                    let token = token.clone();
                    self.advance();
                    values.push(parse_value_token(&token)?);
                    expect_value = false;
                }
                _ => {
                    return Err(F90DefaultsError::parse_error(
                        format!("Unexpected '{}' in value list", token.lexeme),
                        token.line,
                        token.column,
                    ))
                }
            }
        }

        Ok(match values.len() {
            0 => NamelistValue::Null,
            1 => values.remove(0),
            _ => NamelistValue::Array(values),
        })
    }

    /// An identifier followed by `=`, `(` or `%` begins the next assignment.
    fn starts_assignment(&self) -> bool {
        self.peek().map_or(false, |t| t.token_type == TokenType::Identifier)
            && self.peek_ahead(1).map_or(false, |t| {
                matches!(
                    t.token_type,
                    TokenType::Assign | TokenType::LeftParen | TokenType::Percent
                )
            })
    }

    fn skip_parenthesized(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::LeftParen => depth += 1,
                TokenType::RightParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    fn unexpected_end(&self, message: &str) -> F90DefaultsError {
        let (line, column) = self
            .tokens
            .last()
            .map_or((0, 0), |t| (t.line, t.column));
        F90DefaultsError::parse_error(format!("{message} (unexpected end of input)"), line, column)
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().map_or(false, |t| t.token_type == token_type)
    }

    fn advance(&mut self) -> Option<&Token> {
        if self.is_at_end() {
            return None;
        }
        self.current += 1;
        self.tokens.get(self.current - 1)
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_ahead(0)
    }

    fn peek_ahead(&self, distance: usize) -> Option<&Token> {
        self.tokens
            .get(self.current + distance)
            .filter(|t| t.token_type != TokenType::Eof)
    }
}

fn is_value_token(token: &Token) -> bool {
    token.is_literal()
        || (token.token_type == TokenType::Identifier
            && matches!(
                token.lexeme.to_ascii_lowercase().as_str(),
                "t" | "f" | "true" | "false"
            ))
}

fn parse_value_token(token: &Token) -> Result<NamelistValue> {
    match token.token_type {
        TokenType::Integer => parse_integer(&token.lexeme),
        TokenType::Real => parse_real(&token.lexeme),
        TokenType::String => Ok(parse_character(&token.lexeme)),
        _ => parse_logical(&token.lexeme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Namelist {
        NamelistReader::new(input).unwrap().parse().unwrap()
    }

    #[test]
    fn test_simple_group() {
        let nml = read("&data_nml x=1 y=2.0 z=.true. name='abc' /");
        let group = nml.get_group("data_nml").unwrap();
        assert_eq!(group.get("x"), Some(&NamelistValue::Integer(1)));
        assert_eq!(group.get("y"), Some(&NamelistValue::Real(2.0)));
        assert_eq!(group.get("z"), Some(&NamelistValue::Logical(true)));
        assert_eq!(group.get("name"), Some(&NamelistValue::Character("abc".into())));
    }

    #[test]
    fn test_lists_repeats_and_nulls() {
        let nml = read(
            "\
&arrays
  a = -1, 2, -3
  b = 3*0.5
  c = 1, , 3
  d = ! no default
  e = T, F
/
",
        );
        let group = nml.get_group("arrays").unwrap();
        assert_eq!(
            group.get("a"),
            Some(&NamelistValue::Array(vec![
                NamelistValue::Integer(-1),
                NamelistValue::Integer(2),
                NamelistValue::Integer(-3),
            ]))
        );
        assert_eq!(
            group.get("b"),
            Some(&NamelistValue::Array(vec![NamelistValue::Real(0.5); 3]))
        );
        assert_eq!(
            group.get("c"),
            Some(&NamelistValue::Array(vec![
                NamelistValue::Integer(1),
                NamelistValue::Null,
                NamelistValue::Integer(3),
            ]))
        );
        assert_eq!(group.get("d"), Some(&NamelistValue::Null));
        assert_eq!(
            group.get("e"),
            Some(&NamelistValue::Array(vec![
                NamelistValue::Logical(true),
                NamelistValue::Logical(false),
            ]))
        );
    }

    #[test]
    fn test_multiple_groups_and_end_marker() {
        let nml = read("&first a=1 &end\n&second b='x', c=2 /\n");
        let names: Vec<&str> = nml.group_names().collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(
            nml.get_group("second").unwrap().get("c"),
            Some(&NamelistValue::Integer(2))
        );
    }

    #[test]
    fn test_indexed_assignment_uses_base_name() {
        let nml = read("&g x(2) = 5 /");
        assert_eq!(
            nml.get_group("g").unwrap().get("x"),
            Some(&NamelistValue::Integer(5))
        );
    }

    #[test]
    fn test_unterminated_group_is_an_error() {
        let result = NamelistReader::new("&g x = 1").unwrap().parse();
        assert!(matches!(result, Err(F90DefaultsError::Parse { .. })));
    }

    #[test]
    fn test_missing_equals_is_an_error() {
        let result = NamelistReader::new("&g x 1 /").unwrap().parse();
        assert!(result.is_err());
    }
}
