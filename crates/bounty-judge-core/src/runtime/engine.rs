// crates/bounty-judge-core/src/runtime/engine.rs
// ============================================================================
// Module: Adjudication Engine
// Description: Canonical judging pipeline from invocation to score word.
// Purpose: Validate inputs, query the provider once, and encode the verdict.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! The adjudication unit executes the full judging pipeline: validate the
//! criteria/submission pair, build the fixed prompt pair, perform exactly one
//! completion request, validate the response envelope, parse and range-check
//! the verdict, record the diagnostic line, and encode the score word.
//! Failures reject the invocation; the unit never substitutes a default
//! score, because a fabricated verdict would settle real money.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::encoding::ScoreWord;
use crate::core::prompt::ModelQuery;
use crate::core::request::EvaluationRequest;
use crate::core::request::MissingArgumentError;
use crate::core::secrets::SECRET_KEY_NAME;
use crate::core::secrets::SecretBundle;
use crate::core::verdict::VerdictError;
use crate::core::verdict::parse_verdict;
use crate::interfaces::CompletionClient;
use crate::interfaces::CompletionError;
use crate::interfaces::DiagnosticSink;
use crate::interfaces::Invocation;
use crate::interfaces::ProviderReply;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Adjudication pipeline errors.
#[derive(Debug, Error)]
pub enum AdjudicationError {
    /// A mandatory input or secret was absent or empty.
    #[error(transparent)]
    MissingArgument(#[from] MissingArgumentError),
    /// Provider interaction failed or returned an unusable envelope.
    #[error("provider error: {envelope}")]
    Provider {
        /// Raw response envelope or transport failure description.
        envelope: String,
    },
    /// Completion text did not decode as a verdict object.
    #[error("malformed verdict: {raw}")]
    MalformedVerdict {
        /// Completion text exactly as the provider returned it.
        raw: String,
    },
    /// Rounded score fell outside the inclusive 0..=100 range.
    #[error("score out of range: {value}")]
    ScoreOutOfRange {
        /// Rounded score that failed the range check.
        value: f64,
    },
}

impl From<VerdictError> for AdjudicationError {
    fn from(err: VerdictError) -> Self {
        match err {
            VerdictError::Malformed {
                raw,
            } => Self::MalformedVerdict {
                raw,
            },
            VerdictError::OutOfRange {
                value,
            } => Self::ScoreOutOfRange {
                value,
            },
        }
    }
}

impl From<CompletionError> for AdjudicationError {
    fn from(err: CompletionError) -> Self {
        Self::Provider {
            envelope: err.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Adjudication Unit
// ============================================================================

/// Canonical adjudication pipeline over an injected completion client.
///
/// Every host adapter must evaluate through this type so identical inputs
/// produce identical prompts, verdicts, and score words.
#[derive(Debug)]
pub struct AdjudicationUnit<C> {
    /// Completion client performing the single provider request.
    client: C,
}

impl<C: CompletionClient> AdjudicationUnit<C> {
    /// Creates a unit over the given completion client.
    pub const fn new(client: C) -> Self {
        Self {
            client,
        }
    }

    /// Adjudicates one invocation and returns the encoded score word.
    ///
    /// The first positional argument is the bounty criteria, the second the
    /// contestant submission. The provider credential is read from `secrets`
    /// under [`SECRET_KEY_NAME`]; validation failures reject the invocation
    /// before any provider traffic. On success exactly one diagnostic line
    /// is recorded to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`AdjudicationError`] when inputs are missing, the provider
    /// interaction fails, or the completion is not a valid in-range verdict.
    pub fn evaluate<S>(
        &self,
        invocation: &Invocation,
        secrets: &SecretBundle,
        sink: &mut S,
    ) -> Result<ScoreWord, AdjudicationError>
    where
        S: DiagnosticSink,
    {
        let criteria = invocation.args.first().cloned().unwrap_or_default();
        let submission = invocation.args.get(1).cloned().unwrap_or_default();
        let request = EvaluationRequest::new(criteria, submission)?;
        let query = ModelQuery::build(&request);
        let credential = secrets.require(SECRET_KEY_NAME)?;
        let reply = self.client.complete(&query, credential)?;
        let completion = completion_text(&reply)?;
        let verdict = parse_verdict(completion)?;
        sink.record(&format!(
            "AI Verdict: Score {}. Reasoning: {}",
            verdict.score, verdict.reasoning
        ));
        Ok(ScoreWord::from_score(verdict.score))
    }
}

// ============================================================================
// SECTION: Envelope Validation
// ============================================================================

/// Extracts the completion text from a provider response envelope.
///
/// An envelope carrying an `error` member or lacking a string completion at
/// `choices[0].message.content` is rejected with the full envelope attached
/// for diagnosis.
fn completion_text(reply: &ProviderReply) -> Result<&str, AdjudicationError> {
    if reply.body.get("error").is_some() {
        return Err(AdjudicationError::Provider {
            envelope: reply.body.to_string(),
        });
    }
    reply
        .body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| AdjudicationError::Provider {
            envelope: reply.body.to_string(),
        })
}
