use algex_parser::{parse, parser::error::*};

/// Renders the report of a failed parse as plain text.
fn report(source: &str) -> String {
    let err = parse(source).unwrap_err();
    let rendered = err.render();
    String::from_utf8(strip_ansi_escapes::strip(rendered.as_bytes())).unwrap()
}

#[test]
fn unclosed_paren() {
    let err = parse("2*(a+b").unwrap_err();
    assert_eq!(err.to_string(), "unclosed parenthesis");
    assert_eq!(err.fragment(), "(");

    let report = report("2*(a+b");
    assert!(report.contains("this delimiter is not closed"));
    assert!(report.contains("add a closing parenthesis"));
}

#[test]
fn stray_closing_bracket() {
    let err = parse("a+b]").unwrap_err();
    assert_eq!(
        err.error.downcast_ref::<UnclosedGroup>(),
        Some(&UnclosedGroup { opening: false, bracket: true }),
    );
    assert_eq!(err.fragment(), "]");
}

#[test]
fn groups_inside_calls_are_checked() {
    let err = parse("f([a)]").unwrap_err();
    assert!(err.error.is::<MismatchedGroup>());
    assert_eq!(err.fragment(), "([a)");
}

#[test]
fn empty_operand_report() {
    let report = report("a*(b/)");
    assert!(report.contains("missing operand for `/`"));
}

#[test]
fn decimal_suggests_fraction() {
    let err = parse("2.5*x").unwrap_err();
    assert_eq!(err.to_string(), "decimal literal `2.5` is not supported");
    assert!(report("2.5*x").contains("25/10"));
}

#[test]
fn implicit_multiplication_is_rejected() {
    let err = parse("2x").unwrap_err();
    assert!(err.error.is::<MissingOperator>(), "{}", err);
    assert_eq!(err.error.spans, vec![0..1, 1..2]);
}

#[test]
fn brackets_after_a_name_are_not_a_call() {
    let err = parse("f[x]").unwrap_err();
    assert_eq!(
        err.error.downcast_ref::<MissingOperator>(),
        Some(&MissingOperator { lhs: "f".to_string(), rhs: "[x]".to_string() }),
    );
    assert_eq!(err.error.spans, vec![0..1, 1..4]);
    assert_eq!(parse("f*[x]").unwrap().to_string(), "f*[x]");
}

#[test]
fn error_in_nested_group() {
    let err = parse("[(1+(2 3))]").unwrap_err();
    assert_eq!(
        err.error.downcast_ref::<MissingOperator>(),
        Some(&MissingOperator { lhs: "2".to_string(), rhs: "3".to_string() }),
    );
    assert_eq!(err.fragment(), "2");
}

#[test]
fn parse_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(parse("").unwrap_err());
    assert_eq!(err.to_string(), "nothing to parse");
}
