//! Tests for template expansion against parameters and the environment.

use std::collections::BTreeMap;

use catparam::{MapEnv, Value, expand};

fn params() -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("name".to_string(), Value::from("oi")),
        ("count".to_string(), Value::from(3)),
        ("ratio".to_string(), Value::from(0.5)),
        ("flag".to_string(), Value::from(true)),
        ("nested".to_string(), Value::from("{{count}}")),
    ])
}

#[test]
fn parameters_render_in_textual_form() {
    let env = MapEnv::new();
    assert_eq!(
        expand("{{name}}-{{count}}-{{ratio}}-{{flag}}", &params(), &env, true),
        "oi-3-0.5-True"
    );
}

#[test]
fn undeclared_parameter_is_left_verbatim() {
    let env = MapEnv::new();
    assert_eq!(
        expand("a {{ missing }} b", &params(), &env, true),
        "a {{ missing }} b"
    );
}

#[test]
fn expansion_is_single_pass() {
    let env = MapEnv::new().with("VAR", "{{name}}");
    assert_eq!(expand("{{nested}}", &params(), &env, true), "{{count}}");
    assert_eq!(expand("{{env(VAR)}}", &params(), &env, true), "{{name}}");
}

#[test]
fn repeated_tokens_all_expand() {
    let env = MapEnv::new();
    assert_eq!(
        expand("{{name}}{{name}}/{{count}}", &params(), &env, true),
        "oioi/3"
    );
}

#[test]
fn env_token_reads_variable_when_enabled() {
    let env = MapEnv::new().with("INTAKE_TEST_VAR", "oi");
    assert_eq!(
        expand("x={{env(INTAKE_TEST_VAR)}}", &BTreeMap::new(), &env, true),
        "x=oi"
    );
}

#[test]
fn unset_env_token_becomes_empty() {
    let env = MapEnv::new();
    assert_eq!(
        expand("x={{env(INTAKE_TEST_VAR)}}", &BTreeMap::new(), &env, true),
        "x="
    );
}

#[test]
fn disabled_env_token_is_left_verbatim() {
    let env = MapEnv::new().with("INTAKE_TEST_VAR", "oi");
    assert_eq!(
        expand("x={{ env(INTAKE_TEST_VAR) }}", &BTreeMap::new(), &env, false),
        "x={{ env(INTAKE_TEST_VAR) }}"
    );
}

#[test]
fn bare_env_in_argument_text_is_not_expanded() {
    let env = MapEnv::new().with("HOME", "/root");
    assert_eq!(
        expand("env(HOME)", &BTreeMap::new(), &env, true),
        "env(HOME)"
    );
}

#[test]
fn non_ascii_literals_survive() {
    let env = MapEnv::new();
    assert_eq!(
        expand("données/{{name}}/ß", &params(), &env, true),
        "données/oi/ß"
    );
}
