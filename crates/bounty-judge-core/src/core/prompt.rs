// crates/bounty-judge-core/src/core/prompt.rs
// ============================================================================
// Module: Judging Prompts
// Description: Fixed prompt pair and provider defaults for adjudication.
// Purpose: Keep the judging wording stable across every host environment.
// Dependencies: crate::core::request
// ============================================================================

//! ## Overview
//! The judging prompt wording is part of the oracle contract: identical
//! inputs must produce identical provider requests on every host. This module
//! owns the fixed system instruction, the user-message template, and the
//! provider defaults (model, endpoint, sampling temperature) shared by the
//! provider and configuration crates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::request::EvaluationRequest;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed system instruction framing the judge role and the reply format.
///
/// The wording, including the trailing space on the first line, is part of
/// the oracle contract and must not drift between releases.
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "You are an AI Judge for a bounty platform. \n",
    "Your job is to evaluate a user submission based on specific criteria.\n",
    "You must return a strict JSON object with no markdown formatting.\n",
    "Format: { \"score\": <integer_0_to_100>, \"reasoning\": \"<string_explanation>\" }",
);

/// Sampling temperature for every judging request.
pub const SAMPLING_TEMPERATURE: f64 = 0.2;

/// Default chat-completion model used when configuration does not override it.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default chat-completion endpoint.
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

// ============================================================================
// SECTION: Model Query
// ============================================================================

/// Prompt pair for one judging request.
///
/// # Invariants
/// - Built only from a validated [`EvaluationRequest`]; immutable afterwards.
/// - The system instruction always equals [`SYSTEM_INSTRUCTION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelQuery {
    /// System instruction establishing the judge role.
    system_instruction: String,
    /// User message embedding the criteria and submission verbatim.
    user_message: String,
}

impl ModelQuery {
    /// Builds the prompt pair for the given request.
    #[must_use]
    pub fn build(request: &EvaluationRequest) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_message: render_user_message(request.criteria(), request.submission()),
        }
    }

    /// Returns the system instruction.
    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Returns the rendered user message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        &self.user_message
    }
}

/// Renders the user message with the criteria and submission embedded verbatim.
fn render_user_message(criteria: &str, submission: &str) -> String {
    format!(
        "\nCRITERIA (The Rule): \n{criteria}\n\nUSER SUBMISSION:\n{submission}\n\nEvaluate the submission against the criteria. Give a score from 0 to 100.\n"
    )
}
