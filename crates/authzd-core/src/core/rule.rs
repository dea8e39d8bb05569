// crates/authzd-core/src/core/rule.rs
// ============================================================================
// Module: Mapping Rules
// Description: Authored mapping-rule entries and their compiled form.
// Purpose: Compile (method, path-template, action, resource-template) rules
//          into ordered, placeholder-aware token sequences.
// Dependencies: crate::core::token, serde, thiserror
// ============================================================================

//! ## Overview
//! A raw rule maps one HTTP route template to an (action, resource) pair.
//! Compilation splits the template into path tokens and query tokens,
//! rejecting malformed templates at load time so the translate path never
//! has to re-validate. Validation stops at the first error; a rule set is
//! accepted whole or not at all.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::token::RouteToken;

// ============================================================================
// SECTION: Raw Rule Source
// ============================================================================

/// Raw rule set as authored: domain name to an optional rule list.
///
/// The option distinguishes an explicitly absent (`null`) rule list, which
/// is rejected, from an empty-but-present list, which is accepted. The
/// ordered map keeps the first validation error deterministic.
pub type RawRuleSet = BTreeMap<String, Option<Vec<RawRule>>>;

/// One authored mapping entry before compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    /// HTTP method, matched exactly as written.
    pub method: String,
    /// Route template: `/`-rooted path, optionally `?`-separated query.
    pub path: String,
    /// Action returned verbatim on a match.
    pub action: String,
    /// Resource template; may embed `{placeholder}` tokens.
    pub resource: String,
}

// ============================================================================
// SECTION: Compiled Rule
// ============================================================================

/// One compiled mapping entry.
///
/// # Invariants
/// - `path_tokens` is ordered, one token per `/`-delimited template
///   segment (including empty segments from leading or doubled slashes).
/// - Placeholder names are unique across `path_tokens` and
///   `query_tokens` within one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// HTTP method, matched exactly.
    pub method: String,
    /// Action returned verbatim on a match.
    pub action: String,
    /// Resource template rendered with captured values.
    pub resource: String,
    /// Ordered path tokens defining positional matching.
    pub path_tokens: Vec<RouteToken>,
    /// Query-parameter name to expected value token.
    pub query_tokens: BTreeMap<String, RouteToken>,
}

impl Rule {
    /// Compiles an authored rule into its token form.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when any rule field is empty, the path does
    /// not start with a slash or is a lone slash, a placeholder is empty
    /// or duplicated, or a query key repeats.
    pub fn compile(raw: &RawRule) -> Result<Self, RuleError> {
        if raw.method.is_empty()
            || raw.path.is_empty()
            || raw.action.is_empty()
            || raw.resource.is_empty()
        {
            return Err(RuleError::EmptyRuleField {
                method: raw.method.clone(),
                path: raw.path.clone(),
                action: raw.action.clone(),
                resource: raw.resource.clone(),
            });
        }
        if !raw.path.starts_with('/') {
            return Err(RuleError::NoLeadingSlash(raw.path.clone()));
        }
        if raw.path == "/" {
            return Err(RuleError::SlashOnly);
        }

        // Everything after the first '?' is query, verbatim; later '?'
        // characters are ordinary query content.
        let (path_part, query_part) = match raw.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw.path.as_str(), None),
        };

        let mut seen = BTreeSet::new();
        let path_tokens = path_part
            .split('/')
            .map(|segment| compile_token(segment, &mut seen))
            .collect::<Result<Vec<_>, _>>()?;

        let mut query_tokens = BTreeMap::new();
        if let Some(query) = query_part {
            for pair in query.split('&') {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                if query_tokens.contains_key(key) {
                    return Err(RuleError::QueryMultipleValues);
                }
                let token = compile_token(value, &mut seen)?;
                query_tokens.insert(key.to_string(), token);
            }
        }

        Ok(Self {
            method: raw.method.clone(),
            action: raw.action.clone(),
            resource: raw.resource.clone(),
            path_tokens,
            query_tokens,
        })
    }
}

// ============================================================================
// SECTION: Token Compilation
// ============================================================================

/// Classifies one template segment or query value as literal or placeholder.
///
/// The placeholder seen-set spans the whole rule: path and query share one
/// namespace, and the braced form is what gets reported on duplication.
fn compile_token(raw: &str, seen: &mut BTreeSet<String>) -> Result<RouteToken, RuleError> {
    if raw == "{}" {
        return Err(RuleError::EmptyPlaceholder);
    }
    if raw.len() > 2 && raw.starts_with('{') && raw.ends_with('}') {
        if !seen.insert(raw.to_string()) {
            return Err(RuleError::DuplicatePlaceholder(raw.to_string()));
        }
        return Ok(RouteToken::Placeholder(raw.to_string()));
    }
    Ok(RouteToken::Literal(raw.to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Mapping-rule validation errors.
///
/// # Invariants
/// - Message texts are stable; hosts log them verbatim when refusing to
///   activate a rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Domain key is the empty string.
    #[error("domain is empty")]
    EmptyDomain,
    /// Rule list for a domain is absent (`null`) rather than empty.
    #[error("rules is nil")]
    NilRules,
    /// One or more of the four rule fields is empty.
    #[error("rule is empty, method:{method}, path:{path}, action:{action}, resource:{resource}")]
    EmptyRuleField {
        /// Authored method, possibly empty.
        method: String,
        /// Authored path, possibly empty.
        path: String,
        /// Authored action, possibly empty.
        action: String,
        /// Authored resource, possibly empty.
        resource: String,
    },
    /// Template path does not begin with a slash.
    #[error("path({0}) doesn't start with slash")]
    NoLeadingSlash(String),
    /// Template path is exactly `/`.
    #[error("path is slash only")]
    SlashOnly,
    /// Template contains the empty placeholder `{}`.
    #[error("placeholder is empty")]
    EmptyPlaceholder,
    /// Placeholder name repeats within one rule.
    #[error("placeholder({0}) is duplicated")]
    DuplicatePlaceholder(String),
    /// Query key repeats within one rule template.
    #[error("query multiple values is not allowed")]
    QueryMultipleValues,
}
