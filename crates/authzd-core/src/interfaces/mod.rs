// crates/authzd-core/src/interfaces/mod.rs
// ============================================================================
// Module: authzd Interfaces
// Description: Boundary capabilities for key resolution and signature checks.
// Purpose: Define the contract surfaces the verifier consumes from the host.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The signed-policy verifier never touches cryptography or key material
//! directly. The host supplies a [`KeyProvider`] that resolves a trust
//! environment and key identifier to a [`SignatureVerifier`] capability;
//! the verifier only decides which data, signature, and key are compared.
//! Implementations must be safe for concurrent use if verification runs
//! concurrently for multiple fetched documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Key Environment
// ============================================================================

/// Trust environment a signing key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEnvironment {
    /// Distribution authority signing the policy envelope.
    Zts,
    /// Policy-serving authority signing the policy data.
    Zms,
}

// ============================================================================
// SECTION: Signature Verifier
// ============================================================================

/// Signature verification errors.
///
/// The message is surfaced verbatim inside the verifier's wrapped error
/// strings, so implementations should keep it short and descriptive.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The signature did not verify against the data.
    #[error("{0}")]
    Verification(String),
}

/// Abstract capability checking a signature over canonical signed data.
pub trait SignatureVerifier {
    /// Verifies `signature` over `data`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] when the signature is malformed or does
    /// not match the data.
    fn verify(&self, data: &str, signature: &str) -> Result<(), SignatureError>;
}

// ============================================================================
// SECTION: Key Provider
// ============================================================================

/// Resolves a trust environment and key identifier to a verifier.
///
/// Absence (a stale or rotated key identifier) is an expected condition
/// and is reported as `None` rather than an error; the caller turns it
/// into its own key-not-found failure.
pub trait KeyProvider {
    /// Returns the verifier registered for `environment` and `key_id`.
    fn resolve(
        &self,
        environment: KeyEnvironment,
        key_id: &str,
    ) -> Option<&dyn SignatureVerifier>;
}
