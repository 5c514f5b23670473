// f90defaults/src/source/stream.rs

//! Converts physical Fortran source lines into logical statements.
//!
//! Free-form rules handled here:
//! - `!` starts a comment unless it sits inside a character literal
//! - a trailing `&` continues the statement on the next non-comment line,
//!   which may itself start with an optional `&`
//! - character literals may be continued across lines
//! - `;` separates statements on one line

use std::collections::VecDeque;
use std::str::Lines;

/// One complete Fortran statement with comments removed and continuations
/// joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Statement text
    pub text: String,
    /// Physical line (1-based) the statement starts on
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// Next physical line starts a new statement
    Fresh,
    /// Previous line ended with `&`; `in_string` holds the open quote when the
    /// continuation splits a character literal
    Continuing { in_string: Option<char> },
}

/// Iterator over the logical lines of a Fortran source text.
pub struct LineStream<'a> {
    lines: std::iter::Enumerate<Lines<'a>>,
    pending: VecDeque<LogicalLine>,
    dangling_continuation: Option<usize>,
}

impl<'a> LineStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            pending: VecDeque::new(),
            dangling_continuation: None,
        }
    }

    /// Line number of a statement whose last line still ended with `&` when
    /// the input ran out.
    pub fn dangling_continuation(&self) -> Option<usize> {
        self.dangling_continuation
    }

    /// Read physical lines until one full statement has been assembled.
    fn read_statement(&mut self) -> Option<LogicalLine> {
        let mut state = StreamState::Fresh;
        let mut text = String::new();
        let mut start_line = 0;

        for (index, raw) in self.lines.by_ref() {
            let line_number = index + 1;

            let (body, in_string) = match state {
                StreamState::Fresh => (raw.trim_start(), None),
                StreamState::Continuing { in_string } => {
                    let trimmed = raw.trim_start();
                    if trimmed.is_empty() || (in_string.is_none() && trimmed.starts_with('!')) {
                        // Comment lines may sit between continued lines
                        continue;
                    }
                    match trimmed.strip_prefix('&') {
                        Some(rest) => (rest, in_string),
                        None => {
                            if in_string.is_none() {
                                text.push(' ');
                            }
                            (trimmed, in_string)
                        }
                    }
                }
            };

            let code = split_code(body, in_string);
            if state == StreamState::Fresh {
                if code.text.trim().is_empty() && !code.continues {
                    continue;
                }
                start_line = line_number;
            }
            text.push_str(&code.text);

            if code.continues {
                state = StreamState::Continuing {
                    in_string: code.open_quote,
                };
            } else {
                return Some(LogicalLine {
                    text,
                    line: start_line,
                });
            }
        }

        if let StreamState::Continuing { .. } = state {
            self.dangling_continuation = Some(start_line);
            return Some(LogicalLine {
                text,
                line: start_line,
            });
        }
        None
    }
}

impl Iterator for LineStream<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            let statement = self.read_statement()?;
            for text in split_statements(&statement.text) {
                self.pending.push_back(LogicalLine {
                    text,
                    line: statement.line,
                });
            }
        }
    }
}

struct CodePart {
    text: String,
    continues: bool,
    open_quote: Option<char>,
}

/// Strip the comment from one physical line and detect a trailing `&`.
fn split_code(line: &str, mut in_string: Option<char>) -> CodePart {
    let mut chars = line.char_indices().peekable();
    let mut end = line.len();

    while let Some((i, c)) = chars.next() {
        match in_string {
            Some(quote) if c == quote => {
                if chars.peek().map(|(_, next)| *next) == Some(quote) {
                    chars.next();
                } else {
                    in_string = None;
                }
            }
            Some(_) => {}
            None if c == '!' => {
                end = i;
                break;
            }
            None if c == '\'' || c == '"' => in_string = Some(c),
            None => {}
        }
    }

    let code = line[..end].trim_end();
    match code.strip_suffix('&') {
        Some(rest) => CodePart {
            text: if in_string.is_some() {
                rest.to_string()
            } else {
                rest.trim_end().to_string()
            },
            continues: true,
            open_quote: in_string,
        },
        None => CodePart {
            text: code.to_string(),
            continues: false,
            open_quote: None,
        },
    }
}

/// Split a joined statement on `;` separators outside character literals.
fn split_statements(text: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string: Option<char> = None;

    for c in text.chars() {
        match in_string {
            Some(quote) if c == quote => in_string = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => in_string = Some(c),
            None if c == ';' => {
                statements.push(std::mem::take(&mut current));
                continue;
            }
            None => {}
        }
        current.push(c);
    }
    statements.push(current);

    statements
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        LineStream::new(source).map(|l| l.text).collect()
    }

    #[test]
    fn test_comments_and_blank_lines_are_dropped() {
        let source = "! header\n\ninteger :: a = 1 ! trailing\n   \n";
        assert_eq!(texts(source), vec!["integer :: a = 1"]);
    }

    #[test]
    fn test_continuations_are_joined() {
        let source = "namelist /my_nml/ a, &\n   b, &  ! note\n   & c\n";
        let lines: Vec<LogicalLine> = LineStream::new(source).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "namelist /my_nml/ a, b, c");
        assert_eq!(lines[0].line, 1);
    }

    #[test]
    fn test_comment_lines_inside_continuation() {
        let source = "integer :: a = 1, &\n! explain b\n\n  b = 2\nlogical :: c\n";
        let lines: Vec<LogicalLine> = LineStream::new(source).collect();
        assert_eq!(lines[0].text, "integer :: a = 1, b = 2");
        assert_eq!(lines[1].text, "logical :: c");
        assert_eq!(lines[1].line, 5);
    }

    #[test]
    fn test_leading_ampersand_joins_tokens() {
        assert_eq!(texts("x = 12&\n&34\n"), vec!["x = 1234"]);
    }

    #[test]
    fn test_string_continuation_and_bang_in_string() {
        let source = "character(len=32) :: s = 'hello &\n    &world! not a comment'\n";
        assert_eq!(
            texts(source),
            vec!["character(len=32) :: s = 'hello world! not a comment'"]
        );
    }

    #[test]
    fn test_semicolon_splits_statements() {
        let source = "integer :: a = 1; real :: b = 2.0 ; character :: c = ';'\n";
        assert_eq!(
            texts(source),
            vec!["integer :: a = 1", "real :: b = 2.0", "character :: c = ';'"]
        );
    }

    #[test]
    fn test_dangling_continuation_is_reported() {
        let mut stream = LineStream::new("integer :: a = 1, &\n");
        assert_eq!(stream.next().map(|l| l.text), Some("integer :: a = 1,".to_string()));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.dangling_continuation(), Some(1));
    }
}
