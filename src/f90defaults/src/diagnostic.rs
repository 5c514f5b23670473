// f90defaults/src/diagnostic.rs

//! Non-fatal problems found while extracting defaults from one file.

use std::fmt;

/// A recoverable problem tied to a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Physical line (1-based) of the statement involved; 0 when the
    /// problem is not tied to one statement
    pub line: usize,
    pub kind: DiagnosticKind,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A statement the lexer rejected, such as an unterminated string; it is
    /// skipped
    UntokenizableStatement { statement: String, reason: String },
    /// A declaration statement that could not be parsed; it is skipped
    UnparseableDeclaration { statement: String, reason: String },
    /// A namelist statement that could not be parsed; it is skipped
    UnparseableNamelist { statement: String, reason: String },
    /// A namelist member with no declaration in the file
    UndeclaredMember { group: String, member: String },
    /// A namelist member declared without an initializer
    MissingDefault { group: String, member: String },
    /// A namelist member whose initializer is not a constant
    UnresolvedDefault {
        group: String,
        member: String,
        expression: String,
    },
    /// A name declared more than once; the first declaration is used
    DuplicateDeclaration { name: String, first_line: usize },
    /// The file ended in the middle of a continued statement
    DanglingContinuation,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }

    /// Whether the diagnostic concerns a namelist member's default.
    pub fn is_unresolved_member(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::UndeclaredMember { .. }
                | DiagnosticKind::MissingDefault { .. }
                | DiagnosticKind::UnresolvedDefault { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        match &self.kind {
            DiagnosticKind::UntokenizableStatement { statement, reason } => {
                write!(f, "skipping statement '{}': {}", statement, reason)
            }
            DiagnosticKind::UnparseableDeclaration { statement, reason } => {
                write!(f, "skipping declaration '{}': {}", statement, reason)
            }
            DiagnosticKind::UnparseableNamelist { statement, reason } => {
                write!(f, "skipping namelist statement '{}': {}", statement, reason)
            }
            DiagnosticKind::UndeclaredMember { group, member } => {
                write!(f, "'{}' in namelist /{}/ is not declared in this file", member, group)
            }
            DiagnosticKind::MissingDefault { group, member } => {
                write!(f, "'{}' in namelist /{}/ has no default value", member, group)
            }
            DiagnosticKind::UnresolvedDefault {
                group,
                member,
                expression,
            } => write!(
                f,
                "'{}' in namelist /{}/ has a non-constant default '{}'",
                member, group, expression
            ),
            DiagnosticKind::DuplicateDeclaration { name, first_line } => write!(
                f,
                "'{}' is declared again; keeping the declaration from line {}",
                name, first_line
            ),
            DiagnosticKind::DanglingContinuation => {
                write!(f, "file ends inside a continued statement")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::new(
            12,
            DiagnosticKind::UndeclaredMember {
                group: "my_nml".into(),
                member: "ghost".into(),
            },
        );
        assert_eq!(
            d.to_string(),
            "line 12: 'ghost' in namelist /my_nml/ is not declared in this file"
        );
        assert!(d.is_unresolved_member());
    }
}
