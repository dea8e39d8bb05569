// crates/authzd-core/src/runtime/mod.rs
// ============================================================================
// Module: authzd Runtime
// Description: Rule-set compilation, request translation, and chain verification.
// Purpose: Execute the two core operations over the canonical data model.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the two independent components: the mapping
//! rule engine (validate once, translate many) and the signed-policy
//! verifier (one linear pipeline per fetched document). Both are
//! synchronous, pure functions over their inputs with no internal
//! concurrency or I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod translator;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use translator::MappingRules;
pub use verifier::PolicyVerifyError;
pub use verifier::SignedPolicy;
