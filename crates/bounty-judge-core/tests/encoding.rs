// crates/bounty-judge-core/tests/encoding.rs
// ============================================================================
// Module: Score Word Encoding Tests
// Description: Tests for the 32-byte score word and its wire hex form.
// ============================================================================
//! ## Overview
//! Validates big-endian placement, the `0x`-prefixed lowercase wire form,
//! and strict decoding of malformed or out-of-range words.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use bounty_judge_core::SCORE_WORD_BYTES;
use bounty_judge_core::Score;
use bounty_judge_core::ScoreDecodeError;
use bounty_judge_core::ScoreWord;
use bounty_judge_core::hex_encode;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

fn score(value: u8) -> Score {
    Score::new(value).expect("test scores are in range")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms the score lands in the final byte with all others zero.
#[test]
fn word_is_big_endian_low_byte() {
    let word = ScoreWord::from_score(score(95));
    let bytes = word.as_bytes();
    assert_eq!(bytes.len(), SCORE_WORD_BYTES);
    assert!(bytes[..SCORE_WORD_BYTES - 1].iter().all(|byte| *byte == 0));
    assert_eq!(bytes[SCORE_WORD_BYTES - 1], 0x5f);
}

/// Confirms the wire form is 0x plus 64 lowercase hex digits.
#[test]
fn wire_hex_is_prefixed_lowercase() {
    let rendered = ScoreWord::from_score(score(95)).wire_hex();
    assert_eq!(rendered.len(), 2 + SCORE_WORD_BYTES * 2);
    assert!(rendered.starts_with("0x"));
    assert_eq!(rendered, format!("0x{}5f", "0".repeat(62)));
    assert!(rendered[2..].chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
}

/// Confirms every encoded word decodes back to its score.
#[test]
fn wire_hex_round_trips() {
    for value in [0_u8, 1, 50, 99, 100] {
        let word = ScoreWord::from_score(score(value));
        let decoded = ScoreWord::decode_wire_hex(&word.wire_hex()).expect("wire form must decode");
        assert_eq!(decoded.value(), value);
    }
}

/// Confirms the prefix is optional and digits are case-insensitive on decode.
#[test]
fn decode_accepts_prefixless_and_uppercase() {
    let bare = format!("{}5f", "0".repeat(62));
    assert_eq!(ScoreWord::decode_wire_hex(&bare).expect("bare word must decode").value(), 95);

    let upper = format!("0X{}5F", "0".repeat(62));
    assert_eq!(ScoreWord::decode_wire_hex(&upper).expect("upper word must decode").value(), 95);
}

/// Confirms short or long words are rejected with the observed width.
#[test]
fn decode_rejects_wrong_width() {
    let err = ScoreWord::decode_wire_hex("0x5f").expect_err("short word must be rejected");
    match err {
        ScoreDecodeError::InvalidLength {
            expected,
            actual,
        } => {
            assert_eq!(expected, 64);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms non-hex characters are rejected.
#[test]
fn decode_rejects_non_hex_characters() {
    let tainted = format!("0x{}zz", "0".repeat(62));
    let err = ScoreWord::decode_wire_hex(&tainted).expect_err("non-hex word must be rejected");
    assert!(matches!(err, ScoreDecodeError::InvalidHex));
}

/// Confirms words wider than one score byte are rejected as overflow.
#[test]
fn decode_rejects_wide_values() {
    let wide = format!("0x{}0100", "0".repeat(60));
    let err = ScoreWord::decode_wire_hex(&wide).expect_err("wide word must be rejected");
    assert!(matches!(err, ScoreDecodeError::Overflow));
}

/// Confirms in-width values above the score bound are rejected.
#[test]
fn decode_rejects_scores_above_bound() {
    let over = format!("0x{}{:02x}", "0".repeat(62), 101);
    let err = ScoreWord::decode_wire_hex(&over).expect_err("101 must be rejected");
    match err {
        ScoreDecodeError::OutOfRange {
            value,
        } => assert_eq!(value, 101),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms the hex helper renders lowercase pairs in order.
#[test]
fn hex_encode_renders_lowercase_pairs() {
    assert_eq!(hex_encode(&[]), "");
    assert_eq!(hex_encode(&[0x00, 0xff, 0x5f]), "00ff5f");
}
