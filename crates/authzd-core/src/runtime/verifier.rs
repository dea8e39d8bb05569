// crates/authzd-core/src/runtime/verifier.rs
// ============================================================================
// Module: Signed Policy Verifier
// Description: Two-tier signature-chain verification for policy documents.
// Purpose: Authenticate a fetched policy document before trusting its contents.
// Dependencies: crate::core::policy, crate::interfaces
// ============================================================================

//! ## Overview
//! Verification is a short linear pipeline over exactly two contractual
//! tiers: the ZTS envelope signature over the inner payload, then the ZMS
//! payload signature over the policy data. The outer envelope must verify
//! before the inner signature is considered trustworthy context, and the
//! first failure ends the pipeline. An unresolvable key identifier is a
//! distinct, diagnosable failure from a cryptographic mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::policy::CanonicalError;
use crate::core::policy::DomainSignedPolicyData;
use crate::interfaces::KeyEnvironment;
use crate::interfaces::KeyProvider;
use crate::interfaces::SignatureError;

// ============================================================================
// SECTION: Signed Policy
// ============================================================================

/// A fetched, doubly-signed policy document pending verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedPolicy {
    /// The signed envelope and payload as fetched.
    pub document: DomainSignedPolicyData,
}

impl SignedPolicy {
    /// Wraps a fetched document for verification.
    #[must_use]
    pub const fn new(document: DomainSignedPolicyData) -> Self {
        Self {
            document,
        }
    }

    /// Verifies the two-tier signature chain.
    ///
    /// Steps run in order and short-circuit on the first failure:
    /// ZTS key resolution, envelope signature, ZMS key resolution,
    /// payload signature. The input is never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyVerifyError`] naming the step that failed; key
    /// resolution and signature mismatch surface as distinct variants.
    pub fn verify(&self, keys: &dyn KeyProvider) -> Result<(), PolicyVerifyError> {
        let zts = keys
            .resolve(KeyEnvironment::Zts, &self.document.key_id)
            .ok_or(PolicyVerifyError::ZtsKeyNotFound)?;
        let payload = &self.document.signed_policy_data;
        let envelope_data = payload
            .canonical_text()
            .map_err(PolicyVerifyError::CanonicalizeSignedPolicyData)?;
        zts.verify(&envelope_data, &self.document.signature)
            .map_err(PolicyVerifyError::EnvelopeSignature)?;

        let zms = keys
            .resolve(KeyEnvironment::Zms, &payload.zms_key_id)
            .ok_or(PolicyVerifyError::ZmsKeyNotFound)?;
        let policy_data = payload
            .policy_data
            .canonical_text()
            .map_err(PolicyVerifyError::CanonicalizePolicyData)?;
        zms.verify(&policy_data, &payload.zms_signature)
            .map_err(PolicyVerifyError::PayloadSignature)?;

        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Signed-policy verification errors, one per pipeline step.
///
/// # Invariants
/// - Message texts are stable; hosts log them verbatim and reject the
///   document, keeping the previous good policy.
#[derive(Debug, Error)]
pub enum PolicyVerifyError {
    /// No verifier registered for the envelope's ZTS key identifier.
    #[error("zts key not found")]
    ZtsKeyNotFound,
    /// Canonicalization of the inner payload failed.
    #[error("error canonicalize signed policy data: {0}")]
    CanonicalizeSignedPolicyData(#[source] CanonicalError),
    /// The ZTS envelope signature did not verify.
    #[error("error verify signature: {0}")]
    EnvelopeSignature(#[source] SignatureError),
    /// No verifier registered for the payload's ZMS key identifier.
    #[error("zms key not found")]
    ZmsKeyNotFound,
    /// Canonicalization of the policy data failed.
    #[error("error canonicalize policy data: {0}")]
    CanonicalizePolicyData(#[source] CanonicalError),
    /// The ZMS payload signature did not verify.
    #[error("error verify zms signature: {0}")]
    PayloadSignature(#[source] SignatureError),
}
