// crates/bounty-judge-sim/src/artifact.rs
// ============================================================================
// Module: Unit Source Artifact
// Description: Loads the adjudication unit source as an opaque text artifact.
// Purpose: Pin which unit source revision a simulation run exercises.
// Dependencies: bounty-judge-core, sha2, thiserror
// ============================================================================

//! ## Overview
//! Production deployments ship the unit's implementation source to the oracle
//! network as opaque text. The harness reads that same file before executing
//! and reports its byte length and SHA-256 digest, tying a simulation run to
//! an exact source revision. Reads are size-capped and must be valid utf-8.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use bounty_judge_core::hex_encode;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted unit source size in bytes.
pub const MAX_SOURCE_ARTIFACT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading the unit source artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// I/O failure while reading the source file.
    #[error("artifact io error: {0}")]
    Io(String),
    /// Source file exceeded the size cap.
    #[error("artifact exceeds size limit: {actual} bytes")]
    TooLarge {
        /// Observed file size in bytes.
        actual: usize,
    },
    /// Source file was not valid utf-8.
    #[error("artifact must be utf-8")]
    InvalidEncoding,
}

// ============================================================================
// SECTION: Source Artifact
// ============================================================================

/// Unit source text pinned by path, length, and digest.
///
/// # Invariants
/// - `text` is valid utf-8 of at most [`MAX_SOURCE_ARTIFACT_BYTES`] bytes.
/// - `digest` is the lowercase-hex SHA-256 of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    /// Path the artifact was read from.
    path: PathBuf,
    /// Full source text.
    text: String,
    /// Lowercase-hex SHA-256 digest of the source bytes.
    digest: String,
}

impl SourceArtifact {
    /// Reads the unit source from the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] when the file cannot be read, exceeds the
    /// size cap, or is not valid utf-8.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = fs::read(path).map_err(|err| ArtifactError::Io(err.to_string()))?;
        if bytes.len() > MAX_SOURCE_ARTIFACT_BYTES {
            return Err(ArtifactError::TooLarge {
                actual: bytes.len(),
            });
        }
        let text = String::from_utf8(bytes).map_err(|_| ArtifactError::InvalidEncoding)?;
        let digest = sha256_hex(text.as_bytes());
        Ok(Self {
            path: path.to_path_buf(),
            text,
            digest,
        })
    }

    /// Returns the path the artifact was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the source length in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Returns the lowercase-hex SHA-256 digest of the source bytes.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Hashes raw bytes and renders the digest as lowercase hex.
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex_encode(&digest)
}
