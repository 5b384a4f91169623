//! Reader tests: grammar, rendering, error reporting.

use symex::{Error, SExpr, read};

#[test]
fn test_empty_input_yields_no_expressions() {
    assert!(read("").unwrap().is_empty());
    assert!(read("   \t \n  ").unwrap().is_empty());
}

#[test]
fn test_single_atom() {
    let exprs = read("hello").unwrap();
    assert_eq!(exprs.len(), 1);
    assert_eq!(format!("{}", exprs[0]), "hello");
}

#[test]
fn test_empty_list() {
    let exprs = read("()").unwrap();
    assert_eq!(exprs.len(), 1);
    assert!(matches!(exprs[0], SExpr::List(_)));
    assert_eq!(format!("{}", exprs[0]), "()");
}

#[test]
fn test_nested_lists() {
    let exprs = read("(a (b c) (d (e)))").unwrap();
    assert_eq!(exprs.len(), 1);
    assert_eq!(format!("{}", exprs[0]), "(a (b c) (d (e)))");
}

#[test]
fn test_whitespace_is_insignificant() {
    let exprs = read("  ( a\t\tb\n   c )  ").unwrap();
    assert_eq!(exprs.len(), 1);
    assert_eq!(format!("{}", exprs[0]), "(a b c)");
}

#[test]
fn test_multiple_top_level_expressions_in_order() {
    let exprs = read("a (b c) d").unwrap();
    let rendered: Vec<String> = exprs.iter().map(|e| e.to_string()).collect();
    assert_eq!(rendered, ["a", "(b c)", "d"]);
}

#[test]
fn test_atoms_are_undifferentiated_strings() {
    // numbers and punctuation are not special, just atom characters
    let exprs = read("42 foo-bar? + 'x").unwrap();
    let rendered: Vec<String> = exprs.iter().map(|e| e.to_string()).collect();
    assert_eq!(rendered, ["42", "foo-bar?", "+", "'x"]);
    assert!(exprs.iter().all(|e| matches!(e, SExpr::Atom(_))));
}

#[test]
fn test_unexpected_close_paren() {
    assert!(matches!(read(")"), Err(Error::Parse { .. })));
    assert!(matches!(read("a b)"), Err(Error::Parse { .. })));
}

#[test]
fn test_unclosed_list() {
    assert!(matches!(read("("), Err(Error::Parse { .. })));
    assert!(matches!(read("(a (b c)"), Err(Error::Parse { .. })));
}

#[test]
fn test_parse_error_reports_text_and_offset() {
    let err = read("(a b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error parsing \"(a b\" at 4: Unclosed expression"
    );
}

#[test]
fn test_error_aborts_whole_read() {
    // a bad tail discards the good prefix, no partial results
    assert!(read("(a b) )").is_err());
}

#[test]
fn test_rendering_round_trips() {
    let source = "(cons (quote x) (quote (y z)))";
    let exprs = read(source).unwrap();
    assert_eq!(format!("{}", exprs[0]), source);
}
