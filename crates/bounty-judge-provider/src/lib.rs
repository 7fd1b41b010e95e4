// crates/bounty-judge-provider/src/lib.rs
// ============================================================================
// Module: Bounty Judge Provider
// Description: Blocking chat-completion client for the adjudication unit.
// Purpose: Implement the completion seam against OpenAI-compatible endpoints.
// Dependencies: bounty-judge-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the production implementation of the completion client
//! seam: a blocking HTTP client that posts the fixed judging prompts to an
//! OpenAI-compatible chat-completion endpoint and returns the decoded
//! response envelope. Requests carry the bearer credential in transport
//! headers only, never in bodies or logs, and responses are read under a
//! hard size limit so a misbehaving endpoint cannot exhaust the host.
//!
//! Security posture: response bodies are untrusted input and are decoded
//! under strict limits before the core pipeline sees them.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod chat;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use chat::ChatMessage;
pub use chat::ChatRequestBody;
pub use chat::CompletionClientConfig;
pub use chat::OpenAiCompletionClient;
