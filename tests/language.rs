use indoc::indoc;
use skarn::{interpreter::Interpreter, Result};
use std::io;

fn eval(source: &str) -> Result<String> {
    Interpreter::new().interpret("test", source)
}

#[test]
fn evaluates_arithmetic() -> io::Result<()> {
    for (source, expected) in [
        ("12", "12"),
        ("12 + 34", "46"),
        ("1 + 2 * 3", "7"),
        ("1 + 2 / 3", "1"),
        ("(1 + 2) * 3", "9"),
        ("1 - 2 - 3", "-4"),
        ("1 - (2 - 3)", "2"),
        ("----1", "1"),
        ("-1 + -+4", "-5"),
        ("2^3^2", "512"),
        ("2^4 + 2 * (3^2 - 1)", "32"),
    ] {
        assert_eq!(expected, eval(source)?, "source: {}", source);
    }
    Ok(())
}

#[test]
fn evaluates_string_concatenation() -> io::Result<()> {
    for (source, expected) in [
        (r#""foo""#, "foo"),
        (r#""foo" ++ "bar" ++ "baz""#, "foobarbaz"),
        ("12 ++ 34", "1234"),
        (r#""n: " ++ 12"#, "n: 12"),
        (r#"true ++ "!""#, "true!"),
    ] {
        assert_eq!(expected, eval(source)?, "source: {}", source);
    }
    Ok(())
}

#[test]
fn evaluates_boolean_operators() -> io::Result<()> {
    for (source, expected) in [
        ("!true", "false"),
        ("!!true", "true"),
        ("true && false", "false"),
        ("true || false", "true"),
        ("true && (false || true)", "true"),
        ("true && false || false", "false"),
    ] {
        assert_eq!(expected, eval(source)?, "source: {}", source);
    }
    Ok(())
}

#[test]
fn boolean_operators_evaluate_both_operands() {
    let e = eval("false && (1 / 0 == 0)").unwrap_err();
    assert_eq!("[test:1:13] Error at /: Division by zero.", e.to_string());

    let e = eval("true || missing_var").unwrap_err();
    assert_eq!(
        "[test:1:9] Error at missing_var: Undefined variable: missing_var",
        e.to_string()
    );
}

#[test]
fn equality_compares_rendered_forms() -> io::Result<()> {
    for (source, expected) in [
        ("2 == 2", "true"),
        ("1 != 2", "true"),
        (r#""foo" == "fOO""#, "false"),
        (r#"12 == "12""#, "true"),
        ("true == 1", "false"),
        ("2*2 == 2^2 && true == (2 == 2)", "true"),
    ] {
        assert_eq!(expected, eval(source)?, "source: {}", source);
    }
    Ok(())
}

#[test]
fn assignment_evaluates_to_its_value() -> io::Result<()> {
    assert_eq!("12", eval("foo := 3 * 4")?);
    Ok(())
}

#[test]
fn variables_persist_across_interpretations() -> io::Result<()> {
    let mut interpreter = Interpreter::new();
    interpreter.interpret("test", "foo := 12")?;
    interpreter.interpret("test", "bar := 34")?;
    assert_eq!("46", interpreter.interpret("test", "foo + bar")?);
    Ok(())
}

#[test]
fn a_source_evaluates_to_its_last_statement() -> io::Result<()> {
    let source = indoc! {"
        foo := 12

        bar := 34
        foo + bar
    "};
    assert_eq!("46", eval(source)?);
    Ok(())
}

#[test]
fn an_indented_block_is_a_single_statement() -> io::Result<()> {
    assert_eq!("6", eval("foo := 2\n\tbar := foo + 1\n\tbar * 2")?);
    Ok(())
}

#[test]
fn function_declarations_produce_no_output() -> io::Result<()> {
    assert_eq!("13", eval("func add(a: int, b: int): int\n\ta + b\n12 + 1")?);
    Ok(())
}

#[test]
fn empty_source_evaluates_to_the_empty_string() -> io::Result<()> {
    assert_eq!("", eval("")?);
    assert_eq!("", eval("\n\n")?);
    Ok(())
}

#[test]
fn undefined_variable_is_a_runtime_error() {
    let e = eval("foo").unwrap_err();
    assert!(e.is_runtime_error());
    assert_eq!("[test:1:1] Error at foo: Undefined variable: foo", e.to_string());
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let e = eval("12 / 0").unwrap_err();
    assert!(e.is_runtime_error());
    assert_eq!("[test:1:4] Error at /: Division by zero.", e.to_string());
}

#[test]
fn unterminated_string_is_a_lexical_error() {
    let e = eval("\"abc").unwrap_err();
    assert!(!e.is_runtime_error());
    assert_eq!("[test:1:1] Error: Unterminated string literal.", e.to_string());
}

#[test]
fn single_equals_is_a_lexical_error() {
    let e = eval("foo = 1").unwrap_err();
    assert_eq!(
        "[test:1:5] Error: Unexpected character '=', expected '=='",
        e.to_string()
    );
}

#[test]
fn operand_type_mismatches_are_runtime_errors() {
    for source in ["1 + true", "true && 2", "-\"foo\"", "!1"] {
        let e = eval(source).unwrap_err();
        assert!(e.is_runtime_error(), "source: {}", source);
    }
}

#[test]
fn bindings_survive_a_failing_statement() -> io::Result<()> {
    let mut interpreter = Interpreter::new();
    assert!(interpreter.interpret("test", "foo := 7\nfoo / 0").is_err());
    assert_eq!("7", interpreter.interpret("test", "foo")?);
    Ok(())
}

#[test]
fn oversized_integer_literal_is_a_runtime_error() {
    let e = eval("99999999999999999999").unwrap_err();
    assert!(e.is_runtime_error());
    assert_eq!(
        "[test:1:1] Error at 99999999999999999999: Could not convert 99999999999999999999 into an integer",
        e.to_string()
    );
}
