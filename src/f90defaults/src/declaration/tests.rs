// f90defaults/src/declaration/tests.rs

use super::*;
use crate::literal::{Element, Literal};
use crate::source::scan;

fn declare(text: &str) -> Vec<Declaration> {
    let mut tokens = scan(text).unwrap();
    tokens.pop();
    parse_declaration(&tokens, text).unwrap()
}

fn declare_err(text: &str) -> F90DefaultsError {
    let mut tokens = scan(text).unwrap();
    tokens.pop();
    parse_declaration(&tokens, text).unwrap_err()
}

fn int(text: &str) -> Option<Initializer> {
    Some(Initializer::Scalar(Element::Literal(Literal::Integer(text.to_string()))))
}

fn real(text: &str) -> Option<Initializer> {
    Some(Initializer::Scalar(Element::Literal(Literal::Real(text.to_string()))))
}

#[test]
fn test_simple_declaration() {
    let decls = declare("integer :: a = 10");
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].name, "a");
    assert_eq!(decls[0].type_spec.base, FortranType::Integer);
    assert_eq!(decls[0].type_spec.selector, None);
    assert!(!decls[0].parameter);
    assert_eq!(decls[0].initializer, int("10"));
}

#[test]
fn test_multiple_entities_keep_their_own_signs() {
    let decls = declare("integer :: pos_val = 10, neg_val = -20, zero = -0, plain");
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["pos_val", "neg_val", "zero", "plain"]);
    assert_eq!(decls[0].initializer, int("10"));
    assert_eq!(decls[1].initializer, int("-20"));
    assert_eq!(decls[2].initializer, int("-0"));
    assert_eq!(decls[3].initializer, None);
}

#[test]
fn test_scientific_notation() {
    let decls = declare("real(r8) :: tiny = 1.0e-5_r8, big = -2.5D+10, x = .5");
    assert_eq!(decls[0].initializer, real("1.0e-5"));
    assert_eq!(decls[1].initializer, real("-2.5D+10"));
    assert_eq!(decls[2].initializer, real(".5"));
}

#[test]
fn test_selectors() {
    assert_eq!(declare("real(kind=r8) :: x")[0].type_spec.selector.as_deref(), Some("kind=r8"));
    assert_eq!(declare("character(len=20) :: s")[0].type_spec.selector.as_deref(), Some("len=20"));
    assert_eq!(
        declare("character(len=*), parameter :: s = 'a'")[0].type_spec.selector.as_deref(),
        Some("len=*")
    );
    assert_eq!(declare("real*8 x")[0].type_spec.selector.as_deref(), Some("8"));
    assert_eq!(declare("character*(*) s")[0].type_spec.selector.as_deref(), Some("*"));

    let d = &declare("double precision :: d = 1.0d0")[0];
    assert_eq!(d.type_spec.base, FortranType::DoublePrecision);
    assert_eq!(d.initializer, real("1.0d0"));
}

#[test]
fn test_attributes() {
    let decls = declare("real(r8), parameter, public :: pi = 3.14159_r8");
    assert!(decls[0].parameter);
    assert_eq!(decls[0].initializer, real("3.14159"));

    let decls = declare("integer, dimension(3) :: a = (/-1, 2, -3/), b");
    assert_eq!(decls[0].dimensions, Some(vec!["3".to_string()]));
    assert_eq!(decls[1].dimensions, Some(vec!["3".to_string()]));
    assert_eq!(
        decls[0].initializer,
        Some(Initializer::Array(vec![
            Element::Literal(Literal::Integer("-1".into())),
            Element::Literal(Literal::Integer("2".into())),
            Element::Literal(Literal::Integer("-3".into())),
        ]))
    );
}

#[test]
fn test_entity_dimensions_override_attribute() {
    let decls = declare("integer, dimension(2) :: a, b(0:N, 4)");
    assert_eq!(decls[0].dimensions, Some(vec!["2".to_string()]));
    assert_eq!(decls[1].dimensions, Some(vec!["0:n".to_string(), "4".to_string()]));
}

#[test]
fn test_without_double_colon_and_entity_length() {
    let decls = declare("character name*32, other");
    assert_eq!(decls[0].name, "name");
    assert_eq!(decls[1].name, "other");

    let decls = declare("logical x, y");
    assert_eq!(decls.len(), 2);
}

#[test]
fn test_pointer_initializer() {
    let decls = declare("real, pointer :: p => null()");
    assert_eq!(decls[0].initializer, Some(Initializer::Expression("null()".to_string())));
}

#[test]
fn test_expression_initializers_are_kept_as_text() {
    let decls = declare("integer :: n2 = 2*n + 1");
    assert_eq!(decls[0].initializer, Some(Initializer::Expression("2*n + 1".to_string())));
}

#[test]
fn test_names_are_lowercased() {
    let decls = declare("LOGICAL :: Do_Output = .TRUE.");
    assert_eq!(decls[0].name, "do_output");
    assert_eq!(
        decls[0].initializer,
        Some(Initializer::Scalar(Element::Literal(Literal::Logical(true))))
    );
}

#[test]
fn test_malformed_declarations() {
    assert!(matches!(declare_err("integer :: "), F90DefaultsError::Parse { .. }));
    assert!(matches!(declare_err("integer, parameter x = 1"), F90DefaultsError::Parse { .. }));
    assert!(matches!(declare_err("integer :: a = "), F90DefaultsError::Parse { .. }));
    assert!(matches!(declare_err("integer :: a b"), F90DefaultsError::Parse { .. }));
    assert!(matches!(declare_err("real(r8 :: x"), F90DefaultsError::Parse { .. }));
}
