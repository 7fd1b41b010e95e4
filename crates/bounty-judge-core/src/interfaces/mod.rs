// crates/bounty-judge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Bounty Judge Interfaces
// Description: Host-agnostic interfaces for invocation, completion, and diagnostics.
// Purpose: Define the contract surfaces between the unit and its host.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the adjudication unit integrates with its host
//! environment without embedding host-specific details: the positional
//! invocation shape the host passes in, the completion client seam the unit
//! calls out through, and the diagnostic sink the host captures. All seams
//! fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::prompt::ModelQuery;
use crate::core::secrets::ApiCredential;

// ============================================================================
// SECTION: Invocation
// ============================================================================

/// Positional invocation payload the host passes to the unit.
///
/// The first argument carries the bounty criteria, the second the contestant
/// submission. Binary arguments are accepted for host-ABI compatibility and
/// are ignored by adjudication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Positional string arguments.
    pub args: Vec<String>,
    /// Positional binary arguments, unused by adjudication.
    pub bytes_args: Vec<Vec<u8>>,
}

// ============================================================================
// SECTION: Completion Client
// ============================================================================

/// Decoded response envelope returned by a completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    /// Full response body as decoded JSON.
    pub body: serde_json::Value,
}

/// Errors raised by completion clients.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Request could not be sent or the response could not be read.
    #[error("completion transport error: {0}")]
    Transport(String),
    /// Endpoint answered with a non-success status.
    #[error("completion endpoint returned status {status}: {body}")]
    RejectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body text as returned.
        body: String,
    },
    /// Response body was not decodable JSON.
    #[error("completion response was not valid json: {0}")]
    MalformedPayload(String),
}

/// Host-agnostic chat-completion client.
///
/// Implementations perform exactly one provider request per call and place
/// the credential in transport headers only, never in bodies or logs.
pub trait CompletionClient {
    /// Sends one judging query and returns the decoded response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the request cannot be completed or
    /// the response cannot be decoded.
    fn complete(
        &self,
        query: &ModelQuery,
        credential: &ApiCredential,
    ) -> Result<ProviderReply, CompletionError>;
}

impl<C: CompletionClient + ?Sized> CompletionClient for &C {
    fn complete(
        &self,
        query: &ModelQuery,
        credential: &ApiCredential,
    ) -> Result<ProviderReply, CompletionError> {
        (**self).complete(query, credential)
    }
}

// ============================================================================
// SECTION: Diagnostic Sink
// ============================================================================

/// Receiver for the unit's diagnostic output.
///
/// Hosts capture recorded lines verbatim; implementations must not reorder
/// or rewrite them.
pub trait DiagnosticSink {
    /// Records one diagnostic line.
    fn record(&mut self, line: &str);
}
