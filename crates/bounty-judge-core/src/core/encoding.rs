// crates/bounty-judge-core/src/core/encoding.rs
// ============================================================================
// Module: Score Word Encoding
// Description: Fixed-width unsigned encoding of verdict scores.
// Purpose: Produce the 32-byte big-endian word the settlement layer consumes.
// Dependencies: crate::core::verdict, thiserror
// ============================================================================

//! ## Overview
//! The host returns verdicts to the settlement layer as a 32-byte big-endian
//! unsigned word, the fixed-width integer form used on-chain. A score of 95
//! therefore travels as 31 zero bytes followed by `0x5f`. The wire form is
//! the `0x`-prefixed lowercase hex rendering of those bytes. Decoding is
//! strict: wrong width, stray characters, or a value above the score bound
//! are all rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::verdict::Score;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Width in bytes of the encoded score word.
pub const SCORE_WORD_BYTES: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised while decoding a wire-form score word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreDecodeError {
    /// Hex text was not exactly one 32-byte word wide.
    #[error("score word must be {expected} hex digits, got {actual}")]
    InvalidLength {
        /// Digit count a full word requires.
        expected: usize,
        /// Digit count actually present.
        actual: usize,
    },
    /// Text contained a character outside `[0-9a-fA-F]`.
    #[error("score word contains a non-hex character")]
    InvalidHex,
    /// Word encoded a value wider than a single score byte.
    #[error("score word exceeds the representable score range")]
    Overflow,
    /// Decoded value was above the maximum score.
    #[error("decoded score out of range: {value}")]
    OutOfRange {
        /// Low byte of the decoded word.
        value: u8,
    },
}

// ============================================================================
// SECTION: Score Word
// ============================================================================

/// 32-byte big-endian unsigned word carrying one verdict score.
///
/// # Invariants
/// - The first 31 bytes are zero; the score fits the final byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWord([u8; SCORE_WORD_BYTES]);

impl ScoreWord {
    /// Encodes a validated score as a big-endian word.
    #[must_use]
    pub const fn from_score(score: Score) -> Self {
        let mut bytes = [0_u8; SCORE_WORD_BYTES];
        bytes[SCORE_WORD_BYTES - 1] = score.value();
        Self(bytes)
    }

    /// Returns the raw big-endian bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SCORE_WORD_BYTES] {
        &self.0
    }

    /// Renders the word in wire form: `0x` followed by 64 lowercase hex digits.
    #[must_use]
    pub fn wire_hex(&self) -> String {
        format!("0x{}", hex_encode(&self.0))
    }

    /// Recovers the score carried by this word.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreDecodeError`] when the word violates the single-byte
    /// score invariant. Words built by [`ScoreWord::from_score`] always decode.
    pub fn decode_score(&self) -> Result<Score, ScoreDecodeError> {
        if self.0[..SCORE_WORD_BYTES - 1].iter().any(|byte| *byte != 0) {
            return Err(ScoreDecodeError::Overflow);
        }
        let value = self.0[SCORE_WORD_BYTES - 1];
        Score::new(value).ok_or(ScoreDecodeError::OutOfRange {
            value,
        })
    }

    /// Parses a wire-form word and recovers its score.
    ///
    /// Accepts an optional `0x`/`0X` prefix and mixed-case digits; everything
    /// else about the width and value is enforced strictly.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreDecodeError`] when the text is not a well-formed word
    /// or the decoded value exceeds the maximum score.
    pub fn decode_wire_hex(text: &str) -> Result<Score, ScoreDecodeError> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.len() != SCORE_WORD_BYTES * 2 {
            return Err(ScoreDecodeError::InvalidLength {
                expected: SCORE_WORD_BYTES * 2,
                actual: digits.len(),
            });
        }
        let mut bytes = [0_u8; SCORE_WORD_BYTES];
        for (index, pair) in digits.as_bytes().chunks_exact(2).enumerate() {
            let high = hex_nibble(pair[0]).ok_or(ScoreDecodeError::InvalidHex)?;
            let low = hex_nibble(pair[1]).ok_or(ScoreDecodeError::InvalidHex)?;
            bytes[index] = (high << 4) | low;
        }
        Self(bytes).decode_score()
    }
}

// ============================================================================
// SECTION: Hex Helpers
// ============================================================================

/// Encodes bytes as a lowercase hex string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

/// Decodes one hex digit, returning `None` for non-hex bytes.
const fn hex_nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
