// crates/bounty-judge-core/src/core/request.rs
// ============================================================================
// Module: Evaluation Request
// Description: Validated criteria/submission pair for one adjudication.
// Purpose: Reject empty inputs before any prompt is built or provider called.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! An [`EvaluationRequest`] carries the bounty criteria and the contestant
//! submission for a single adjudication. Construction enforces the non-empty
//! invariant, so downstream stages never see a blank input. Validation failures
//! surface as [`MissingArgumentError`] and never trigger provider traffic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when a mandatory adjudication input is absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing argument: {name}")]
pub struct MissingArgumentError {
    /// Name of the absent input.
    pub name: String,
}

impl MissingArgumentError {
    /// Creates a missing-argument error for the named input.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }
}

// ============================================================================
// SECTION: Evaluation Request
// ============================================================================

/// Criteria/submission pair accepted for adjudication.
///
/// # Invariants
/// - `criteria` is non-empty.
/// - `submission` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// Natural-language acceptance criteria for the bounty.
    criteria: String,
    /// Contestant submission text under evaluation.
    submission: String,
}

impl EvaluationRequest {
    /// Builds a request from raw inputs, rejecting empty fields.
    ///
    /// # Errors
    ///
    /// Returns [`MissingArgumentError`] naming the first empty input.
    pub fn new(
        criteria: impl Into<String>,
        submission: impl Into<String>,
    ) -> Result<Self, MissingArgumentError> {
        let criteria = criteria.into();
        let submission = submission.into();
        if criteria.is_empty() {
            return Err(MissingArgumentError::new("criteria"));
        }
        if submission.is_empty() {
            return Err(MissingArgumentError::new("submission"));
        }
        Ok(Self {
            criteria,
            submission,
        })
    }

    /// Returns the bounty criteria text.
    #[must_use]
    pub fn criteria(&self) -> &str {
        &self.criteria
    }

    /// Returns the submission text under evaluation.
    #[must_use]
    pub fn submission(&self) -> &str {
        &self.submission
    }
}
