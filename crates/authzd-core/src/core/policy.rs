// crates/authzd-core/src/core/policy.rs
// ============================================================================
// Module: Signed Policy Document
// Description: Doubly-signed policy envelope, payload, and assertions.
// Purpose: Model the fetched policy document and its canonical signed form.
// Dependencies: serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! A fetched policy document carries two signatures: the distribution
//! authority (ZTS) signs the envelope over the inner payload, and the
//! policy-serving authority (ZMS) signs the payload over the policy data.
//! The "data to be signed" for each tier is the RFC 8785 canonical JSON of
//! the signed object, so verification is deterministic across signer and
//! verifier implementations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Signed Envelope
// ============================================================================

/// Outer signed envelope for one domain's policy document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSignedPolicyData {
    /// ZTS key identifier used to sign the envelope.
    pub key_id: String,
    /// ZTS signature over the canonical form of `signed_policy_data`.
    pub signature: String,
    /// Inner payload signed by the ZMS authority.
    pub signed_policy_data: SignedPolicyData,
}

/// Inner payload: policy data plus its ZMS signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPolicyData {
    /// ZMS key identifier used to sign the policy data.
    pub zms_key_id: String,
    /// ZMS signature over the canonical form of `policy_data`.
    pub zms_signature: String,
    /// The policy content both authorities vouch for.
    pub policy_data: PolicyData,
}

impl SignedPolicyData {
    /// Returns the canonical signed representation of this payload.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalError`] when JSON canonicalization fails.
    pub fn canonical_text(&self) -> Result<String, CanonicalError> {
        canonical_json_text(self)
    }
}

// ============================================================================
// SECTION: Policy Data
// ============================================================================

/// Policy content for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyData {
    /// Domain the policies belong to.
    pub domain: String,
    /// Optional expiry timestamp in the authority's wire format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    /// Policies granted for the domain.
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl PolicyData {
    /// Returns the canonical signed representation of the policy data.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalError`] when JSON canonicalization fails.
    pub fn canonical_text(&self) -> Result<String, CanonicalError> {
        canonical_json_text(self)
    }
}

/// One named policy and its assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Fully qualified policy name.
    pub name: String,
    /// Optional last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Assertions granted by this policy.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

/// One access assertion within a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assertion {
    /// Role the assertion applies to.
    pub role: String,
    /// Resource pattern the assertion covers.
    pub resource: String,
    /// Action pattern the assertion covers.
    pub action: String,
    /// Optional effect (`ALLOW` or `DENY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when producing the canonical signed representation.
#[derive(Debug, Error)]
pub enum CanonicalError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Canonicalization
// ============================================================================

/// Returns canonical JSON text for a serializable value using RFC 8785.
///
/// # Errors
///
/// Returns [`CanonicalError::Canonicalization`] when serialization fails.
pub fn canonical_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String, CanonicalError> {
    serde_jcs::to_string(value).map_err(|err| CanonicalError::Canonicalization(err.to_string()))
}
