// crates/authzd-core/src/lib.rs
// ============================================================================
// Module: authzd Core Library
// Description: Public API surface for the authzd authorization core.
// Purpose: Expose core types, interfaces, and runtime operations.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! authzd-core is the authorization core of a policy-distribution client:
//! it authenticates a fetched, doubly-signed policy document before its
//! contents are trusted, and translates an inbound request's
//! (domain, method, path, query) into an (action, resource) pair for an
//! external authorization decision point. Cryptography, key distribution,
//! HTTP retrieval, and the decision evaluation itself are host concerns
//! integrated through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::KeyEnvironment;
pub use interfaces::KeyProvider;
pub use interfaces::SignatureError;
pub use interfaces::SignatureVerifier;
pub use runtime::MappingRules;
pub use runtime::PolicyVerifyError;
pub use runtime::SignedPolicy;
