//! Tests for error types and error message formatting.

use catparam::{
    CatalogEntry, DeclarationError, MapEnv, ParamType, UserParameter, ValidationError, Value,
    ValueOrigin, coerce, compute_suggestions, kwargs,
};
use insta::assert_snapshot;

#[test]
fn compute_suggestions_finds_similar_keys() {
    let available = vec![
        "fast".to_string(),
        "slow".to_string(),
        "medium".to_string(),
    ];

    let suggestions = compute_suggestions("slwo", &available);
    assert_eq!(suggestions, vec!["slow"]);

    let suggestions = compute_suggestions("medum", &available);
    assert_eq!(suggestions, vec!["medium"]);

    let suggestions = compute_suggestions("xyz", &available);
    assert!(suggestions.is_empty());
}

#[test]
fn compute_suggestions_short_keys_allow_one_edit() {
    let available = vec!["int".to_string(), "str".to_string()];
    assert_eq!(compute_suggestions("in", &available), vec!["int"]);
    assert!(compute_suggestions("ab", &available).is_empty());
}

#[test]
fn compute_suggestions_limits_to_three() {
    let available: Vec<String> = (0..10).map(|i| format!("item{}", i)).collect();
    let suggestions = compute_suggestions("item", &available);
    assert!(suggestions.len() <= 3);
}

#[test]
fn coerce_error_message() {
    let err = coerce(ParamType::Int, &Value::from("oi")).unwrap_err();
    assert_snapshot!(err.to_string(), @"cannot interpret 'oi' as int: not a valid number");
}

#[test]
fn coercion_failure_names_parameter_and_origin() {
    let up = UserParameter::builder("arg1")
        .param_type(ParamType::Int)
        .build()
        .unwrap();
    let err = up
        .resolve(Some(&"oi".into()), &MapEnv::new(), true)
        .unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"invalid override for parameter 'arg1': cannot interpret 'oi' as int: not a valid number"
    );
}

#[test]
fn bad_default_message_says_default() {
    let up = UserParameter::builder("when")
        .param_type(ParamType::Datetime)
        .default("someday")
        .build()
        .unwrap();
    let err = up.resolve(None, &MapEnv::new(), true).unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"invalid default for parameter 'when': cannot interpret 'someday' as datetime: not a recognized date/time format"
    );
}

#[test]
fn template_result_message_says_argument_value() {
    let up = UserParameter::builder("arg1")
        .param_type(ParamType::Bool)
        .build()
        .unwrap();
    let e = CatalogEntry::builder("e")
        .driver("d")
        .args(kwargs! { "arg1" => "perhaps" })
        .parameters(vec![up])
        .build()
        .unwrap();
    let err = e.resolve(&kwargs! {}, &MapEnv::new()).unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"invalid argument value for parameter 'arg1': cannot interpret 'perhaps' as bool: not a recognized boolean"
    );
}

#[test]
fn not_allowed_message_lists_allowed_and_suggests() {
    let err = ValidationError::NotAllowed {
        parameter: "mode".into(),
        origin: ValueOrigin::Override,
        value: "slwo".into(),
        allowed: vec!["fast".into(), "slow".into()],
        suggestions: vec!["slow".into()],
    };
    assert_snapshot!(
        err.to_string(),
        @"invalid override for parameter 'mode': 'slwo' is not one of ['fast', 'slow'], did you mean 'slow'?"
    );
}

#[test]
fn not_allowed_message_without_suggestions() {
    let err = ValidationError::NotAllowed {
        parameter: "level".into(),
        origin: ValueOrigin::Default,
        value: 5.into(),
        allowed: vec![1.into(), 2.into()],
        suggestions: vec![],
    };
    assert_snapshot!(
        err.to_string(),
        @"invalid default for parameter 'level': 5 is not one of [1, 2]"
    );
}

#[test]
fn unknown_type_message() {
    let err = "flaot".parse::<ParamType>().unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown parameter type 'flaot', did you mean 'float'?");

    let err = "integer".parse::<ParamType>().unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown parameter type 'integer'");
}

#[test]
fn declaration_error_messages() {
    let err = DeclarationError::DuplicateParameter { name: "a".into() };
    assert_snapshot!(err.to_string(), @"parameter 'a' is declared more than once");

    let err = UserParameter::builder("level")
        .param_type(ParamType::Int)
        .allowed(vec!["high".into()])
        .build()
        .unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"allowed value for parameter 'level' is invalid: cannot interpret 'high' as int: not a valid number"
    );
}

#[test]
fn validation_error_exposes_source() {
    use std::error::Error;

    let up = UserParameter::builder("n")
        .param_type(ParamType::Float)
        .build()
        .unwrap();
    let err = up
        .resolve(Some(&"x".into()), &MapEnv::new(), true)
        .unwrap_err();
    let source = err.source().expect("coercion errors carry a source");
    assert_eq!(source.to_string(), "cannot interpret 'x' as float: not a valid number");
}
