// crates/authzd-crypto/src/lib.rs
// ============================================================================
// Module: authzd Crypto Adapter
// Description: Ed25519 signature verification and in-memory key resolution.
// Purpose: Provide concrete SignatureVerifier and KeyProvider implementations.
// Dependencies: authzd-core, base64, ed25519-dalek
// ============================================================================

//! ## Overview
//! The core verifier consumes abstract capabilities; this crate supplies
//! the ed25519 implementations a host typically wires in. Signatures are
//! base64 text over the UTF-8 bytes of the canonical signed data, checked
//! with strict verification. The [`KeyRing`] is a publish-once map from
//! (environment, key id) to verifier, matching the core's read-many
//! discipline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use authzd_core::KeyEnvironment;
use authzd_core::KeyProvider;
use authzd_core::SignatureError;
use authzd_core::SignatureVerifier;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use ed25519_dalek::Signature;
use ed25519_dalek::VerifyingKey;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Key-material loading errors.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Public key text was not valid base64.
    #[error("invalid base64 public key")]
    InvalidBase64,
    /// Public key bytes were not a valid ed25519 key.
    #[error("invalid ed25519 public key")]
    InvalidKey,
}

// ============================================================================
// SECTION: Ed25519 Verifier
// ============================================================================

/// Ed25519 verifier over canonical signed text.
#[derive(Debug, Clone)]
pub struct Ed25519Verifier {
    /// Public verifying key.
    key: VerifyingKey,
}

impl Ed25519Verifier {
    /// Builds a verifier from raw 32-byte key material.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKey`] when the bytes are not a valid
    /// ed25519 public key.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let key = VerifyingKey::from_bytes(bytes).map_err(|_| KeyError::InvalidKey)?;
        Ok(Self {
            key,
        })
    }

    /// Builds a verifier from a base64-encoded public key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] when the text is not base64 or the decoded
    /// bytes are not a valid ed25519 public key.
    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        let bytes = Base64.decode(text.trim()).map_err(|_| KeyError::InvalidBase64)?;
        let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| KeyError::InvalidKey)?;
        Self::from_bytes(&bytes)
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, data: &str, signature: &str) -> Result<(), SignatureError> {
        let signature_bytes = Base64
            .decode(signature)
            .map_err(|_| SignatureError::Verification("invalid base64 signature".to_string()))?;
        let signature = Signature::try_from(signature_bytes.as_slice())
            .map_err(|_| SignatureError::Verification("invalid signature bytes".to_string()))?;
        self.key
            .verify_strict(data.as_bytes(), &signature)
            .map_err(|_| SignatureError::Verification("signature verification failed".to_string()))
    }
}

// ============================================================================
// SECTION: Key Ring
// ============================================================================

/// In-memory key provider keyed by trust environment and key identifier.
///
/// # Invariants
/// - Built once by the host's trust-store subsystem, then shared
///   read-only; a key refresh publishes a new ring.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    /// Registered verifiers.
    keys: BTreeMap<(KeyEnvironment, String), Ed25519Verifier>,
}

impl KeyRing {
    /// Creates an empty key ring.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Registers a verifier for an environment and key identifier.
    ///
    /// A later insert for the same pair replaces the earlier verifier.
    pub fn insert(
        &mut self,
        environment: KeyEnvironment,
        key_id: impl Into<String>,
        verifier: Ed25519Verifier,
    ) {
        self.keys.insert((environment, key_id.into()), verifier);
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` when no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyProvider for KeyRing {
    fn resolve(
        &self,
        environment: KeyEnvironment,
        key_id: &str,
    ) -> Option<&dyn SignatureVerifier> {
        self.keys
            .get(&(environment, key_id.to_string()))
            .map(|verifier| verifier as &dyn SignatureVerifier)
    }
}
