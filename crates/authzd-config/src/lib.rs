// crates/authzd-config/src/lib.rs
// ============================================================================
// Module: authzd Configuration
// Description: Mapping-rule files and trust-store key entries.
// Purpose: Load and validate host configuration into core structures.
// Dependencies: authzd-core, authzd-crypto, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! Hosts author mapping rules and trust-store keys in JSON or TOML files.
//! This crate parses those files into the core's raw shapes and hands off
//! to the core validators, so a malformed file is rejected before any rule
//! set or key ring is published. Loading is all-or-nothing: the first
//! error aborts activation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use authzd_core::KeyEnvironment;
use authzd_core::MappingRules;
use authzd_core::RawRuleSet;
use authzd_core::RuleError;
use authzd_crypto::Ed25519Verifier;
use authzd_crypto::KeyError;
use authzd_crypto::KeyRing;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config file: {0}")]
    Io(#[source] std::io::Error),
    /// Parsing the config file failed.
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// A trust-store entry has an empty key identifier.
    #[error("key id is empty")]
    EmptyKeyId,
    /// A trust-store entry carries unusable key material.
    #[error("invalid public key for key id {key_id}: {source}")]
    InvalidKey {
        /// Key identifier of the offending entry.
        key_id: String,
        /// Underlying key-material error.
        #[source]
        source: KeyError,
    },
    /// The mapping rules failed core validation.
    #[error("invalid mapping rules: {0}")]
    Rules(#[from] RuleError),
}

// ============================================================================
// SECTION: Mapping Config
// ============================================================================

/// Mapping-rule file contents: domain name to authored rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Authored rules per domain; `null` marks an absent rule list.
    #[serde(default)]
    pub domains: RawRuleSet,
}

impl MappingConfig {
    /// Loads a mapping config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads a mapping config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates and compiles the authored rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rules`] when core validation rejects the
    /// rule set; nothing is activated on failure.
    pub fn compile(&self) -> Result<MappingRules, ConfigError> {
        Ok(MappingRules::validate(&self.domains)?)
    }
}

// ============================================================================
// SECTION: Trust Store Config
// ============================================================================

/// Trust-store file contents: one entry per registered public key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustStoreConfig {
    /// Registered key entries.
    #[serde(default)]
    pub keys: Vec<KeyEntry>,
}

/// One trust-store key entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Trust environment the key belongs to.
    pub environment: KeyEnvironment,
    /// Key identifier referenced by signed documents.
    pub key_id: String,
    /// Base64-encoded ed25519 public key.
    pub public_key: String,
}

impl TrustStoreConfig {
    /// Loads a trust-store config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads a trust-store config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds a key ring from the configured entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a key identifier is empty or key
    /// material is invalid; no partial ring is returned.
    pub fn build_key_ring(&self) -> Result<KeyRing, ConfigError> {
        let mut ring = KeyRing::new();
        for entry in &self.keys {
            if entry.key_id.is_empty() {
                return Err(ConfigError::EmptyKeyId);
            }
            let verifier = Ed25519Verifier::from_base64(&entry.public_key).map_err(|source| {
                ConfigError::InvalidKey {
                    key_id: entry.key_id.clone(),
                    source,
                }
            })?;
            ring.insert(entry.environment, entry.key_id.clone(), verifier);
        }
        Ok(ring)
    }
}
