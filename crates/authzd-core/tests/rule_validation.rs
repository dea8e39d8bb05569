// crates/authzd-core/tests/rule_validation.rs
// ============================================================================
// Module: Rule Validation Tests
// Description: Tests for mapping-rule compilation and validation errors.
// Purpose: Ensure rule sets fail closed on malformed templates.
// Dependencies: authzd-core
// ============================================================================
//! ## Overview
//! Exercises `MappingRules::validate` error taxonomy and the compiled
//! token shapes for valid templates.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use authzd_core::MappingRules;
use authzd_core::RawRule;
use authzd_core::RawRuleSet;
use authzd_core::RouteToken;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a single-domain raw rule set around one path template.
fn rule_set(path: &str) -> RawRuleSet {
    rule_set_with(RawRule {
        method: "get".to_string(),
        path: path.to_string(),
        action: "read".to_string(),
        resource: "resource".to_string(),
    })
}

/// Builds a single-domain raw rule set around one raw rule.
fn rule_set_with(rule: RawRule) -> RawRuleSet {
    let mut raw = BTreeMap::new();
    raw.insert("domain".to_string(), Some(vec![rule]));
    raw
}

/// Returns the error string produced by validating the given set.
fn validate_err(raw: &RawRuleSet) -> String {
    MappingRules::validate(raw).expect_err("validation should fail").to_string()
}

/// Shorthand for a literal token.
fn lit(value: &str) -> RouteToken {
    RouteToken::Literal(value.to_string())
}

/// Shorthand for a placeholder token carrying the braced form.
fn ph(name: &str) -> RouteToken {
    RouteToken::Placeholder(name.to_string())
}

// ============================================================================
// SECTION: Successful Compilation
// ============================================================================

/// Tests a path-only template compiles into ordered literal tokens.
#[test]
fn test_compile_path_only() {
    let rules = MappingRules::validate(&rule_set("/path1/path2/path3")).unwrap();
    assert_eq!(rules.domain_count(), 1);
    let compiled = &rules.domain_rules("domain").unwrap()[0];

    assert_eq!(
        compiled.path_tokens,
        vec![lit(""), lit("path1"), lit("path2"), lit("path3")]
    );
    assert!(compiled.query_tokens.is_empty());
}

/// Tests continuous and trailing slashes produce empty literal segments.
#[test]
fn test_compile_continuous_slashes() {
    let rules = MappingRules::validate(&rule_set("/path1//path2/")).unwrap();
    let compiled = &rules.domain_rules("domain").unwrap()[0];

    assert_eq!(
        compiled.path_tokens,
        vec![lit(""), lit("path1"), lit(""), lit("path2"), lit("")]
    );
}

/// Tests path placeholders keep their braced form as the token name.
#[test]
fn test_compile_path_placeholders() {
    let rules =
        MappingRules::validate(&rule_set("/path1/{placeholder1}/path2/{placeholder2}")).unwrap();
    let compiled = &rules.domain_rules("domain").unwrap()[0];

    assert_eq!(
        compiled.path_tokens,
        vec![
            lit(""),
            lit("path1"),
            ph("{placeholder1}"),
            lit("path2"),
            ph("{placeholder2}"),
        ]
    );
    assert!(compiled.query_tokens.is_empty());
    assert!(compiled.path_tokens[2].is_placeholder());
    assert_eq!(compiled.path_tokens[2].placeholder_name(), Some("{placeholder1}"));
    assert_eq!(compiled.path_tokens[1].placeholder_name(), None);
}

/// Tests path and query both compile, with literal query values.
#[test]
fn test_compile_path_and_query() {
    let rules =
        MappingRules::validate(&rule_set("/path1/path2?param1=value1&param2=value2")).unwrap();
    let compiled = &rules.domain_rules("domain").unwrap()[0];

    assert_eq!(compiled.path_tokens, vec![lit(""), lit("path1"), lit("path2")]);
    assert_eq!(compiled.query_tokens.get("param1"), Some(&lit("value1")));
    assert_eq!(compiled.query_tokens.get("param2"), Some(&lit("value2")));
    assert_eq!(compiled.query_tokens.len(), 2);
}

/// Tests a question mark after the first one stays literal query content.
#[test]
fn test_compile_question_mark_in_query_value() {
    let rules =
        MappingRules::validate(&rule_set("/path1?param1=value1?&param2=value2")).unwrap();
    let compiled = &rules.domain_rules("domain").unwrap()[0];

    assert_eq!(compiled.path_tokens, vec![lit(""), lit("path1")]);
    assert_eq!(compiled.query_tokens.get("param1"), Some(&lit("value1?")));
    assert_eq!(compiled.query_tokens.get("param2"), Some(&lit("value2")));
}

/// Tests placeholders compile in both path and query positions.
#[test]
fn test_compile_placeholders_in_path_and_query() {
    let rules =
        MappingRules::validate(&rule_set("/path1/{path2}?param1=value1&param2={value2}")).unwrap();
    let compiled = &rules.domain_rules("domain").unwrap()[0];

    assert_eq!(compiled.path_tokens, vec![lit(""), lit("path1"), ph("{path2}")]);
    assert_eq!(compiled.query_tokens.get("param1"), Some(&lit("value1")));
    assert_eq!(compiled.query_tokens.get("param2"), Some(&ph("{value2}")));
}

/// Tests an empty-but-present rule list is accepted.
#[test]
fn test_compile_empty_rule_list() {
    let mut raw = RawRuleSet::new();
    raw.insert("domain".to_string(), Some(Vec::new()));

    let rules = MappingRules::validate(&raw).unwrap();
    let compiled = rules.domain_rules("domain").unwrap();
    assert!(compiled.is_empty());
}

// ============================================================================
// SECTION: Structural Errors
// ============================================================================

/// Tests an empty domain key is rejected.
#[test]
fn test_error_empty_domain() {
    let mut raw = RawRuleSet::new();
    raw.insert(
        String::new(),
        Some(vec![RawRule {
            method: "method".to_string(),
            path: "/path".to_string(),
            action: "read".to_string(),
            resource: "resource".to_string(),
        }]),
    );

    assert_eq!(validate_err(&raw), "domain is empty");
}

/// Tests an absent rule list is rejected while empty lists are not.
#[test]
fn test_error_nil_rules() {
    let mut raw = RawRuleSet::new();
    raw.insert("domain".to_string(), None);

    assert_eq!(validate_err(&raw), "rules is nil");
}

/// Tests every empty field is reported with all four values verbatim.
#[test]
fn test_error_empty_rule_fields() {
    let cases = [
        ("", "/path", "read", "resource"),
        ("get", "", "read", "resource"),
        ("get", "/path", "", "resource"),
        ("get", "/path", "read", ""),
    ];
    for (method, path, action, resource) in cases {
        let raw = rule_set_with(RawRule {
            method: method.to_string(),
            path: path.to_string(),
            action: action.to_string(),
            resource: resource.to_string(),
        });
        assert_eq!(
            validate_err(&raw),
            format!("rule is empty, method:{method}, path:{path}, action:{action}, resource:{resource}")
        );
    }
}

/// Tests a path without a leading slash is rejected with the path named.
#[test]
fn test_error_no_leading_slash() {
    assert_eq!(validate_err(&rule_set("path")), "path(path) doesn't start with slash");
}

/// Tests the lone-slash path is rejected.
#[test]
fn test_error_slash_only() {
    assert_eq!(validate_err(&rule_set("/")), "path is slash only");
}

// ============================================================================
// SECTION: Placeholder Errors
// ============================================================================

/// Tests the empty placeholder is rejected in a path segment.
#[test]
fn test_error_empty_placeholder_in_path() {
    assert_eq!(validate_err(&rule_set("/path1/{}")), "placeholder is empty");
}

/// Tests the empty placeholder is rejected in a query value.
#[test]
fn test_error_empty_placeholder_in_query() {
    assert_eq!(
        validate_err(&rule_set("/path1?param1=value1&param2={}")),
        "placeholder is empty"
    );
}

/// Tests a placeholder repeated within the path is rejected.
#[test]
fn test_error_duplicate_placeholder_in_path() {
    assert_eq!(
        validate_err(&rule_set("/path1/{placeholder1}/{placeholder1}")),
        "placeholder({placeholder1}) is duplicated"
    );
}

/// Tests path and query placeholders share one namespace.
#[test]
fn test_error_duplicate_placeholder_across_path_and_query() {
    assert_eq!(
        validate_err(&rule_set("/path1/{placeholder1}?param1={placeholder1}")),
        "placeholder({placeholder1}) is duplicated"
    );
}

/// Tests two query values sharing one placeholder name are rejected.
#[test]
fn test_error_duplicate_placeholder_across_query_values() {
    assert_eq!(
        validate_err(&rule_set("/path1?param1={placeholder1}&param2={placeholder1}")),
        "placeholder({placeholder1}) is duplicated"
    );
}

/// Tests a query key used twice in one template is rejected.
#[test]
fn test_error_query_multiple_values() {
    assert_eq!(
        validate_err(&rule_set("/path1?param1=value1&param1=value2")),
        "query multiple values is not allowed"
    );
}
