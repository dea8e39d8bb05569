// crates/authzd-core/src/core/token.rs
// ============================================================================
// Module: Route Tokens
// Description: Compiled path-segment and query-value tokens.
// Purpose: Represent literal-vs-placeholder template positions as a sum type.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A mapping-rule template position is either a literal string that must
//! equal the request's value exactly, or a named placeholder that captures
//! whatever the request supplies. The two cases are mutually exclusive, so
//! they are modeled as a tagged variant rather than a pair of optionally
//! empty strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Route Token
// ============================================================================

/// One compiled template position: a path segment or a query value.
///
/// # Invariants
/// - `Placeholder` carries the original braced form (for example `{id}`),
///   which doubles as the substitution key in resource templates.
/// - `Literal` may carry the empty string (produced by a leading or
///   doubled slash in the template path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteToken {
    /// Literal value matched verbatim against the request.
    Literal(String),
    /// Named capture slot; matches any request value.
    Placeholder(String),
}

impl RouteToken {
    /// Returns `true` when the token is a placeholder.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Returns the braced placeholder name, if any.
    #[must_use]
    pub fn placeholder_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Placeholder(name) => Some(name),
        }
    }
}
