//! Tests for the structured literal parser.

use catparam::parser::{LiteralError, parse_literal};
use catparam::{Value, kwargs};

#[test]
fn scalars() {
    assert_eq!(parse_literal("1").unwrap(), Value::Int(1));
    assert_eq!(parse_literal("-2.5").unwrap(), Value::Float(-2.5));
    assert_eq!(parse_literal("'a'").unwrap(), Value::from("a"));
    assert_eq!(parse_literal("\"b\"").unwrap(), Value::from("b"));
    assert_eq!(parse_literal("True").unwrap(), Value::Bool(true));
    assert_eq!(parse_literal("false").unwrap(), Value::Bool(false));
    assert_eq!(parse_literal("None").unwrap(), Value::Null);
    assert_eq!(parse_literal("null").unwrap(), Value::Null);
}

#[test]
fn mixed_list() {
    assert_eq!(
        parse_literal("[1, 2.5, 'a', \"b\", True, None]").unwrap(),
        Value::List(vec![
            1.into(),
            2.5.into(),
            "a".into(),
            "b".into(),
            true.into(),
            Value::Null,
        ])
    );
}

#[test]
fn empty_containers() {
    assert_eq!(parse_literal("[]").unwrap(), Value::List(vec![]));
    assert_eq!(parse_literal("[ ]").unwrap(), Value::List(vec![]));
    assert_eq!(parse_literal("{}").unwrap(), Value::Dict(kwargs! {}));
    assert_eq!(parse_literal("()").unwrap(), Value::List(vec![]));
}

#[test]
fn trailing_commas_and_whitespace() {
    assert_eq!(
        parse_literal("  [1, 2, ]\n").unwrap(),
        Value::List(vec![1.into(), 2.into()])
    );
    assert_eq!(
        parse_literal("{ 'a' : 1 , }").unwrap(),
        Value::Dict(kwargs! { "a" => 1 })
    );
}

#[test]
fn nested_containers() {
    assert_eq!(
        parse_literal("{'a': [1, {'b': (2, 3)}]}").unwrap(),
        Value::Dict(kwargs! {
            "a" => Value::List(vec![
                1.into(),
                Value::Dict(kwargs! { "b" => Value::List(vec![2.into(), 3.into()]) }),
            ])
        })
    );
}

#[test]
fn non_string_keys_use_textual_form() {
    assert_eq!(
        parse_literal("{1: 'one', True: 'yes'}").unwrap(),
        Value::Dict(kwargs! { "1" => "one", "True" => "yes" })
    );
}

#[test]
fn escapes_in_strings() {
    assert_eq!(parse_literal(r"'it\'s'").unwrap(), Value::from("it's"));
    assert_eq!(parse_literal(r#""a\"b""#).unwrap(), Value::from("a\"b"));
    assert_eq!(parse_literal(r"'a\nb'").unwrap(), Value::from("a\nb"));
    assert_eq!(parse_literal(r"'a\\b'").unwrap(), Value::from("a\\b"));
}

#[test]
fn trailing_garbage_reports_position() {
    assert_eq!(
        parse_literal("[1] x").unwrap_err(),
        LiteralError::Syntax {
            line: 1,
            column: 5,
            message: "unexpected character: 'x'".into(),
        }
    );
}

#[test]
fn malformed_input_is_a_syntax_error() {
    for text in ["[1, 2", "{'a' 1}", "'open", "[1,,2]", "tru"] {
        assert!(
            matches!(parse_literal(text), Err(LiteralError::Syntax { .. })),
            "{text}"
        );
    }
}

#[test]
fn empty_input() {
    assert_eq!(parse_literal("").unwrap_err(), LiteralError::Empty);
    assert_eq!(parse_literal("   ").unwrap_err(), LiteralError::Empty);
}

#[test]
fn nesting_limit() {
    let nested = format!("{}1{}", "[".repeat(64), "]".repeat(64));
    assert!(parse_literal(&nested).unwrap().as_list().is_some());

    assert_eq!(
        parse_literal(&"[".repeat(5_000)).unwrap_err(),
        LiteralError::Syntax {
            line: 1,
            column: 65,
            message: "nesting too deep".into(),
        }
    );

    let mixed = "{'a': (".repeat(200);
    assert!(matches!(
        parse_literal(&mixed),
        Err(LiteralError::Syntax { message, .. }) if message == "nesting too deep"
    ));
}
