// crates/authzd-core/src/runtime/translator.rs
// ============================================================================
// Module: Mapping Rule Engine
// Description: Compiled per-domain rule sets and request translation.
// Purpose: Turn (domain, method, path, query) into (action, resource).
// Dependencies: crate::core::{rule, token}
// ============================================================================

//! ## Overview
//! `MappingRules` is built once from authored source rules and is read-only
//! for its lifetime; concurrent translate calls need no coordination. The
//! translate scan is an ordered first-match-wins pass over the domain's
//! compiled rules: no scoring, no indexing, original authored order is the
//! tie-break. When nothing matches, the request is returned as itself so
//! the downstream authorization evaluator makes the final call on the
//! literal method and path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::rule::RawRuleSet;
use crate::core::rule::Rule;
use crate::core::rule::RuleError;
use crate::core::token::RouteToken;

// ============================================================================
// SECTION: Mapping Rules
// ============================================================================

/// Compiled per-domain mapping rules.
///
/// # Invariants
/// - Domain keys are non-empty; a present domain always has a (possibly
///   empty) compiled rule list.
/// - Immutable after construction; safe to share across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRules {
    /// Domain name to compiled rules in authored order.
    rules: BTreeMap<String, Vec<Rule>>,
}

impl MappingRules {
    /// Validates and compiles an authored rule set.
    ///
    /// Validation stops at the first error; a rule set is activated whole
    /// or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when a domain key is empty, a rule list is
    /// absent, or any rule fails to compile.
    pub fn validate(raw: &RawRuleSet) -> Result<Self, RuleError> {
        let mut rules = BTreeMap::new();
        for (domain, raw_rules) in raw {
            if domain.is_empty() {
                return Err(RuleError::EmptyDomain);
            }
            let Some(raw_rules) = raw_rules else {
                return Err(RuleError::NilRules);
            };
            let compiled = raw_rules.iter().map(Rule::compile).collect::<Result<Vec<_>, _>>()?;
            rules.insert(domain.clone(), compiled);
        }
        Ok(Self {
            rules,
        })
    }

    /// Returns the number of domains with compiled rules.
    #[must_use]
    pub fn domain_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the compiled rules for a domain, if present.
    #[must_use]
    pub fn domain_rules(&self, domain: &str) -> Option<&[Rule]> {
        self.rules.get(domain).map(Vec::as_slice)
    }

    /// Translates a request into an (action, resource) pair.
    ///
    /// A missing domain, an empty rule list, or no matching rule falls
    /// back to the identity mapping `(method, path)`; translation never
    /// fails.
    #[must_use]
    pub fn translate(&self, domain: &str, method: &str, path: &str, query: &str) -> (String, String) {
        let segments: Vec<&str> = path.split('/').collect();
        let query_values = parse_request_query(query);

        if let Some(rules) = self.rules.get(domain) {
            for rule in rules {
                if let Some(captures) = match_rule(rule, method, &segments, &query_values) {
                    return (rule.action.clone(), render_resource(&rule.resource, &captures));
                }
            }
        }
        (method.to_string(), path.to_string())
    }
}

// ============================================================================
// SECTION: Request Query Parsing
// ============================================================================

/// One request query value with a repeated-key marker.
///
/// A key supplied more than once is ambiguous and unusable for matching;
/// the marker is kept instead of a value list because no rule can ever
/// match such a key.
#[derive(Debug)]
struct QueryValue {
    /// First value seen for the key.
    value: String,
    /// Whether the key appeared more than once in the request.
    duplicated: bool,
}

/// Parses a raw request query string into per-key values.
fn parse_request_query(query: &str) -> BTreeMap<String, QueryValue> {
    let mut values: BTreeMap<String, QueryValue> = BTreeMap::new();
    if query.is_empty() {
        return values;
    }
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if let Some(existing) = values.get_mut(key) {
            existing.duplicated = true;
        } else {
            values.insert(
                key.to_string(),
                QueryValue {
                    value: value.to_string(),
                    duplicated: false,
                },
            );
        }
    }
    values
}

// ============================================================================
// SECTION: Rule Matching
// ============================================================================

/// Matches one rule against the request, returning captures on success.
///
/// Captures pair the braced placeholder name with the request value it
/// bound to, across both path segments and query values.
fn match_rule<'req>(
    rule: &'req Rule,
    method: &str,
    segments: &[&'req str],
    query_values: &'req BTreeMap<String, QueryValue>,
) -> Option<Vec<(&'req str, &'req str)>> {
    if rule.method != method {
        return None;
    }
    if rule.path_tokens.len() != segments.len() {
        return None;
    }
    if rule.query_tokens.len() != query_values.len() {
        return None;
    }

    let mut captures = Vec::new();
    for (token, segment) in rule.path_tokens.iter().zip(segments) {
        match token {
            RouteToken::Literal(value) => {
                if value != segment {
                    return None;
                }
            }
            RouteToken::Placeholder(name) => captures.push((name.as_str(), *segment)),
        }
    }
    for (key, token) in &rule.query_tokens {
        let entry = query_values.get(key)?;
        if entry.duplicated {
            return None;
        }
        match token {
            RouteToken::Literal(value) => {
                if *value != entry.value {
                    return None;
                }
            }
            RouteToken::Placeholder(name) => captures.push((name.as_str(), entry.value.as_str())),
        }
    }
    Some(captures)
}

// ============================================================================
// SECTION: Resource Rendering
// ============================================================================

/// Substitutes every captured placeholder occurrence in the template.
///
/// A name used multiple times in the template receives the same captured
/// value at every occurrence; names without a capture stay verbatim.
fn render_resource(template: &str, captures: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in captures {
        rendered = rendered.replace(name, value);
    }
    rendered
}
