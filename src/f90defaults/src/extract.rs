// f90defaults/src/extract.rs

//! The per-file extraction pass: scan statements, build the declaration and
//! group tables, then resolve defaults.

use crate::declaration::parse_declaration;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{F90DefaultsError, Result};
use crate::options::ExtractOptions;
use crate::resolve::{resolve, DefaultsTable};
use crate::source::{scan_statement, LineStream, LogicalLine, Token};
use crate::statement::{classify, parse_namelist_statement, StatementKind};
use crate::table::{DeclarationTable, GroupTable};
use log::debug;
use std::path::Path;

/// Result of extracting one file.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub defaults: DefaultsTable,
    /// Problems found, in the order they were detected
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Whether the file declared no namelist groups.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Reading the specification part
    Specification,
    /// Past `contains`; remaining statements are ignored
    Done,
}

/// Extract namelist defaults from Fortran source text.
pub fn extract_str(source: &str, options: &ExtractOptions) -> Extraction {
    let mut declarations = DeclarationTable::new();
    let mut groups = GroupTable::new();
    let mut diagnostics = Vec::new();
    let mut state = ScanState::Specification;

    let mut lines = LineStream::new(source);
    for line in lines.by_ref() {
        if state == ScanState::Done {
            continue;
        }

        let tokens = match scan_statement(&line) {
            Ok(mut tokens) => {
                tokens.pop(); // Eof
                tokens
            }
            Err(e) => {
                diagnostics.push(Diagnostic::new(
                    line.line,
                    DiagnosticKind::UntokenizableStatement {
                        statement: line.text.clone(),
                        reason: reason(&e),
                    },
                ));
                continue;
            }
        };

        match classify(&tokens) {
            StatementKind::Declaration => {
                add_declarations(&line, &tokens, &mut declarations, &mut diagnostics)
            }
            StatementKind::Namelist => match parse_namelist_statement(&tokens) {
                Ok(clauses) => {
                    for clause in clauses {
                        groups.add_clause(clause, line.line);
                    }
                }
                Err(e) => diagnostics.push(Diagnostic::new(
                    line.line,
                    DiagnosticKind::UnparseableNamelist {
                        statement: line.text.clone(),
                        reason: reason(&e),
                    },
                )),
            },
            StatementKind::Contains if options.stop_at_contains => {
                debug!("line {}: stopping at 'contains'", line.line);
                state = ScanState::Done;
            }
            StatementKind::Contains | StatementKind::Other => {}
        }
    }

    if let Some(start) = lines.dangling_continuation() {
        diagnostics.push(Diagnostic::new(start, DiagnosticKind::DanglingContinuation));
    }

    debug!(
        "{} declarations, {} namelist groups",
        declarations.len(),
        groups.iter().count()
    );

    let (defaults, unresolved) = resolve(&declarations, &groups, options);
    diagnostics.extend(unresolved);

    Extraction {
        defaults,
        diagnostics,
    }
}

/// Read a Fortran file and extract its namelist defaults.
pub fn extract_file<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Extraction> {
    let source = read_source(path.as_ref())?;
    Ok(extract_str(&source, options))
}

/// Read a source file as text, replacing invalid UTF-8.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    let bytes = fs_err::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

fn add_declarations(
    line: &LogicalLine,
    tokens: &[Token],
    declarations: &mut DeclarationTable,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let parsed = match parse_declaration(tokens, &line.text) {
        Ok(parsed) => parsed,
        Err(e) => {
            diagnostics.push(Diagnostic::new(
                line.line,
                DiagnosticKind::UnparseableDeclaration {
                    statement: line.text.clone(),
                    reason: reason(&e),
                },
            ));
            return;
        }
    };

    for mut declaration in parsed {
        declaration.line = line.line;
        let name = declaration.name.clone();
        if let Some(first) = declarations.insert(declaration) {
            diagnostics.push(Diagnostic::new(
                line.line,
                DiagnosticKind::DuplicateDeclaration {
                    name,
                    first_line: first.line,
                },
            ));
        }
    }
}

/// Error message without the position, which the diagnostic carries.
fn reason(error: &F90DefaultsError) -> String {
    match error {
        F90DefaultsError::Parse { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
