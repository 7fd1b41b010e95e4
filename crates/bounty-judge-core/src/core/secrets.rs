// crates/bounty-judge-core/src/core/secrets.rs
// ============================================================================
// Module: Secret Material
// Description: Provider credentials handed in by the host environment.
// Purpose: Keep bearer secrets out of logs, debug output, and serialized state.
// Dependencies: crate::core::request
// ============================================================================

//! ## Overview
//! Hosts inject provider credentials out of band; the unit never reads them
//! from source or embeds them in output. [`ApiCredential`] wraps the bearer
//! value with a redacting `Debug` rendering and deliberately implements no
//! serialization. [`SecretBundle`] is the named lookup the host populates,
//! keyed by stable secret names such as [`SECRET_KEY_NAME`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use crate::core::request::MissingArgumentError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name under which hosts supply the chat-completion provider credential.
pub const SECRET_KEY_NAME: &str = "openaiKey";

// ============================================================================
// SECTION: Credential
// ============================================================================

/// Bearer credential for the completion provider.
///
/// # Invariants
/// - Never rendered by `Debug`; [`ApiCredential::reveal`] is the only read.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wraps a raw credential value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential for constructing an authorization header.
    ///
    /// Callers must not write the returned value to logs or diagnostics.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(redacted)")
    }
}

// ============================================================================
// SECTION: Secret Bundle
// ============================================================================

/// Named credentials supplied by the host for one invocation.
#[derive(Debug, Clone, Default)]
pub struct SecretBundle {
    /// Credentials keyed by stable secret name.
    entries: BTreeMap<String, ApiCredential>,
}

impl SecretBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a credential under the given name, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, credential: ApiCredential) {
        self.entries.insert(name.into(), credential);
    }

    /// Looks up a credential by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ApiCredential> {
        self.entries.get(name)
    }

    /// Looks up a mandatory credential by name.
    ///
    /// # Errors
    ///
    /// Returns [`MissingArgumentError`] naming the absent secret.
    pub fn require(&self, name: &str) -> Result<&ApiCredential, MissingArgumentError> {
        self.entries.get(name).ok_or_else(|| MissingArgumentError::new(name))
    }

    /// Returns `true` when the bundle holds no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
