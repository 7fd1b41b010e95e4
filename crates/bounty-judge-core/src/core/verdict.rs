// crates/bounty-judge-core/src/core/verdict.rs
// ============================================================================
// Module: Verdict Parsing
// Description: Parses model completions into bounded verdict scores.
// Purpose: Tolerate cosmetic code fences while rejecting out-of-contract output.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A completion is expected to be a strict JSON object with an integer
//! `score` and a string `reasoning`. Models occasionally wrap that object in
//! Markdown code fences despite instructions, so parsing strips one leading
//! and one trailing fence before decoding. Scores are rounded to the nearest
//! integer and then range-checked against `0..=100`; anything outside the
//! range is rejected rather than clamped, because a clamped verdict would
//! silently move settlement money.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Highest score a verdict may carry.
pub const MAX_SCORE: u8 = 100;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised while decoding a model completion into a verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerdictError {
    /// Completion was not the required JSON verdict object.
    #[error("malformed verdict: {raw}")]
    Malformed {
        /// Completion text exactly as the provider returned it.
        raw: String,
    },
    /// Rounded score fell outside the inclusive 0..=100 range.
    #[error("score out of range: {value}")]
    OutOfRange {
        /// Rounded score that failed the range check.
        value: f64,
    },
}

// ============================================================================
// SECTION: Score
// ============================================================================

/// Verdict score bounded to the inclusive range `0..=MAX_SCORE`.
///
/// # Invariants
/// - The wrapped value never exceeds [`MAX_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Wraps a raw value, returning `None` when it exceeds [`MAX_SCORE`].
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_SCORE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the numeric score value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Parsed and validated model verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Bounded score awarded to the submission.
    pub score: Score,
    /// Model-provided explanation for the score.
    pub reasoning: String,
}

/// Verdict object as deserialized from the completion text.
///
/// Extra fields are tolerated; a missing field or a non-numeric score is a
/// malformed verdict.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    /// Score as the model emitted it, possibly fractional.
    score: f64,
    /// Explanation string accompanying the score.
    reasoning: String,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a completion into a validated [`Verdict`].
///
/// # Errors
///
/// Returns [`VerdictError::Malformed`] carrying the unstripped completion
/// when the text does not decode as a verdict object, and
/// [`VerdictError::OutOfRange`] when the rounded score escapes `0..=100`.
pub fn parse_verdict(completion: &str) -> Result<Verdict, VerdictError> {
    let stripped = strip_code_fences(completion);
    let raw: RawVerdict = serde_json::from_str(stripped).map_err(|_| VerdictError::Malformed {
        raw: completion.to_string(),
    })?;
    let rounded = raw.score.round();
    if !(0.0..=f64::from(MAX_SCORE)).contains(&rounded) {
        return Err(VerdictError::OutOfRange {
            value: rounded,
        });
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Rounded value is integral and range-checked to 0..=100 above."
    )]
    let value = rounded as u8;
    Ok(Verdict {
        score: Score(value),
        reasoning: raw.reasoning,
    })
}

/// Removes one leading and one trailing Markdown code fence, if present.
///
/// A leading fence may carry a language tag (for example ```` ```json ````),
/// which is dropped along with surrounding whitespace. Interior fences are
/// left untouched.
fn strip_code_fences(completion: &str) -> &str {
    let mut text = completion.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.trim_start_matches(|ch: char| ch.is_ascii_alphanumeric());
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}
