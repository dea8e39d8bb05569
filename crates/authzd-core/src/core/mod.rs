// crates/authzd-core/src/core/mod.rs
// ============================================================================
// Module: authzd Core Types
// Description: Canonical data model for mapping rules and signed policy documents.
// Purpose: Provide stable, serializable types shared by the runtime and hosts.
// Dependencies: serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! Core types define the compiled mapping-rule model (route tokens, raw and
//! compiled rules) and the doubly-signed policy document. They carry no
//! behavior beyond compilation and canonicalization; matching and
//! verification live in the runtime module.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod policy;
pub mod rule;
pub mod token;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use policy::Assertion;
pub use policy::CanonicalError;
pub use policy::DomainSignedPolicyData;
pub use policy::Policy;
pub use policy::PolicyData;
pub use policy::SignedPolicyData;
pub use policy::canonical_json_text;
pub use rule::RawRule;
pub use rule::RawRuleSet;
pub use rule::Rule;
pub use rule::RuleError;
pub use token::RouteToken;
