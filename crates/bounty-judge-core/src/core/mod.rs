// crates/bounty-judge-core/src/core/mod.rs
// ============================================================================
// Module: Bounty Judge Core Types
// Description: Canonical adjudication inputs, prompts, verdicts, and encodings.
// Purpose: Provide stable types for the evaluation pipeline and its wire form.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types define the adjudication data model: the validated evaluation
//! request, the fixed prompt pair sent to the completion provider, the parsed
//! verdict with its bounded score, the 32-byte score word returned to the
//! settlement layer, and the secret material handed in by the host.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod encoding;
pub mod prompt;
pub mod request;
pub mod secrets;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use encoding::SCORE_WORD_BYTES;
pub use encoding::ScoreDecodeError;
pub use encoding::ScoreWord;
pub use encoding::hex_encode;
pub use prompt::DEFAULT_COMPLETION_ENDPOINT;
pub use prompt::DEFAULT_MODEL;
pub use prompt::ModelQuery;
pub use prompt::SAMPLING_TEMPERATURE;
pub use prompt::SYSTEM_INSTRUCTION;
pub use request::EvaluationRequest;
pub use request::MissingArgumentError;
pub use secrets::ApiCredential;
pub use secrets::SECRET_KEY_NAME;
pub use secrets::SecretBundle;
pub use verdict::MAX_SCORE;
pub use verdict::Score;
pub use verdict::Verdict;
pub use verdict::VerdictError;
pub use verdict::parse_verdict;
