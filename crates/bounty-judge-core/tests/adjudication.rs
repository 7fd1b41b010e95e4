// crates/bounty-judge-core/tests/adjudication.rs
// ============================================================================
// Module: Adjudication Engine Tests
// Description: Tests for the invocation-to-score-word judging pipeline.
// ============================================================================
//! ## Overview
//! Validates input rejection, provider-call discipline, envelope validation,
//! verdict decoding, and diagnostic output of the adjudication unit.

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

use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use bounty_judge_core::AdjudicationError;
use bounty_judge_core::AdjudicationUnit;
use bounty_judge_core::ApiCredential;
use bounty_judge_core::CompletionClient;
use bounty_judge_core::CompletionError;
use bounty_judge_core::DiagnosticSink;
use bounty_judge_core::Invocation;
use bounty_judge_core::ModelQuery;
use bounty_judge_core::ProviderReply;
use bounty_judge_core::SECRET_KEY_NAME;
use bounty_judge_core::SYSTEM_INSTRUCTION;
use bounty_judge_core::SecretBundle;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

enum Script {
    Reply(Value),
    Transport(String),
    Rejected { status: u16, body: String },
}

struct ScriptedClient {
    script: Script,
    calls: AtomicU64,
    last_query: Mutex<Option<ModelQuery>>,
}

impl ScriptedClient {
    fn replying(body: Value) -> Self {
        Self {
            script: Script::Reply(body),
            calls: AtomicU64::new(0),
            last_query: Mutex::new(None),
        }
    }

    fn failing_transport(message: &str) -> Self {
        Self {
            script: Script::Transport(message.to_string()),
            calls: AtomicU64::new(0),
            last_query: Mutex::new(None),
        }
    }

    fn rejecting(status: u16, body: &str) -> Self {
        Self {
            script: Script::Rejected {
                status,
                body: body.to_string(),
            },
            calls: AtomicU64::new(0),
            last_query: Mutex::new(None),
        }
    }

    fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> Option<ModelQuery> {
        self.last_query.lock().expect("query mutex poisoned").clone()
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(
        &self,
        query: &ModelQuery,
        _credential: &ApiCredential,
    ) -> Result<ProviderReply, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().expect("query mutex poisoned") = Some(query.clone());
        match &self.script {
            Script::Reply(body) => Ok(ProviderReply {
                body: body.clone(),
            }),
            Script::Transport(message) => Err(CompletionError::Transport(message.clone())),
            Script::Rejected {
                status,
                body,
            } => Err(CompletionError::RejectedStatus {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    lines: Vec<String>,
}

impl DiagnosticSink for RecordingSink {
    fn record(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

fn chat_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}}
        ]
    })
}

fn judge_invocation(criteria: &str, submission: &str) -> Invocation {
    Invocation {
        args: vec![criteria.to_string(), submission.to_string()],
        bytes_args: Vec::new(),
    }
}

fn judge_secrets() -> SecretBundle {
    let mut secrets = SecretBundle::new();
    secrets.insert(SECRET_KEY_NAME, ApiCredential::new("sk-unit-test"));
    secrets
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms a valid verdict produces a low-byte big-endian score word.
#[test]
fn adjudication_returns_low_byte_score_word() {
    let client =
        ScriptedClient::replying(chat_reply(r#"{"score": 95, "reasoning": "Mentions DeFi."}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let word = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect("valid verdict must adjudicate");

    let bytes = word.as_bytes();
    assert!(bytes[..31].iter().all(|byte| *byte == 0));
    assert_eq!(bytes[31], 95);
    assert_eq!(word.wire_hex(), format!("0x{}{:02x}", "0".repeat(62), 95));
}

/// Confirms exactly one diagnostic line is recorded with the fixed wording.
#[test]
fn adjudication_records_single_diagnostic_line() {
    let client =
        ScriptedClient::replying(chat_reply(r#"{"score": 95, "reasoning": "Mentions DeFi."}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    unit.evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect("valid verdict must adjudicate");

    assert_eq!(sink.lines, vec!["AI Verdict: Score 95. Reasoning: Mentions DeFi.".to_string()]);
}

/// Confirms the provider receives the fixed prompt pair verbatim.
#[test]
fn adjudication_sends_fixed_prompts() {
    let client = ScriptedClient::replying(chat_reply(r#"{"score": 10, "reasoning": "ok"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    unit.evaluate(&judge_invocation("Rule text", "Entry text"), &judge_secrets(), &mut sink)
        .expect("valid verdict must adjudicate");

    let query = client.last_query().expect("provider must be called");
    assert_eq!(query.system_instruction(), SYSTEM_INSTRUCTION);
    assert_eq!(
        query.user_message(),
        "\nCRITERIA (The Rule): \nRule text\n\nUSER SUBMISSION:\nEntry text\n\nEvaluate the submission against the criteria. Give a score from 0 to 100.\n"
    );
}

/// Confirms a successful adjudication performs exactly one provider call.
#[test]
fn adjudication_performs_exactly_one_provider_call() {
    let client = ScriptedClient::replying(chat_reply(r#"{"score": 50, "reasoning": "half"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    unit.evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect("valid verdict must adjudicate");

    assert_eq!(client.call_count(), 1);
}

/// Confirms an empty criteria argument is rejected before any provider call.
#[test]
fn empty_criteria_rejected_without_provider_call() {
    let client = ScriptedClient::replying(chat_reply(r#"{"score": 50, "reasoning": "half"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("", "submission"), &judge_secrets(), &mut sink)
        .expect_err("empty criteria must be rejected");

    match err {
        AdjudicationError::MissingArgument(inner) => assert_eq!(inner.name, "criteria"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.call_count(), 0);
    assert!(sink.lines.is_empty());
}

/// Confirms an absent submission argument is rejected before any provider call.
#[test]
fn missing_submission_rejected_without_provider_call() {
    let client = ScriptedClient::replying(chat_reply(r#"{"score": 50, "reasoning": "half"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();
    let invocation = Invocation {
        args: vec!["criteria".to_string()],
        bytes_args: Vec::new(),
    };

    let err = unit
        .evaluate(&invocation, &judge_secrets(), &mut sink)
        .expect_err("absent submission must be rejected");

    match err {
        AdjudicationError::MissingArgument(inner) => assert_eq!(inner.name, "submission"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.call_count(), 0);
}

/// Confirms a missing provider credential is rejected before any provider call.
#[test]
fn missing_secret_rejected_without_provider_call() {
    let client = ScriptedClient::replying(chat_reply(r#"{"score": 50, "reasoning": "half"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &SecretBundle::new(), &mut sink)
        .expect_err("missing credential must be rejected");

    match err {
        AdjudicationError::MissingArgument(inner) => assert_eq!(inner.name, SECRET_KEY_NAME),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.call_count(), 0);
}

/// Confirms transport failures surface as provider errors.
#[test]
fn transport_failure_surfaces_as_provider_error() {
    let client = ScriptedClient::failing_transport("connection refused");
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect_err("transport failure must be rejected");

    match err {
        AdjudicationError::Provider {
            envelope,
        } => assert!(envelope.contains("connection refused")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms a rejected HTTP status surfaces as a provider error with the body.
#[test]
fn rejected_status_surfaces_as_provider_error() {
    let client = ScriptedClient::rejecting(401, r#"{"error": {"message": "bad key"}}"#);
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect_err("rejected status must surface");

    match err {
        AdjudicationError::Provider {
            envelope,
        } => {
            assert!(envelope.contains("401"));
            assert!(envelope.contains("bad key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms a 2xx envelope carrying an error member is rejected with the body.
#[test]
fn error_envelope_rejected_with_full_body() {
    let client = ScriptedClient::replying(json!({
        "error": {"message": "invalid api key", "type": "invalid_request_error"}
    }));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect_err("error envelope must be rejected");

    match err {
        AdjudicationError::Provider {
            envelope,
        } => assert!(envelope.contains("invalid api key")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms an envelope without a completion string is rejected.
#[test]
fn envelope_without_completion_rejected() {
    let client = ScriptedClient::replying(json!({"choices": []}));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect_err("empty choices must be rejected");

    match err {
        AdjudicationError::Provider {
            envelope,
        } => assert!(envelope.contains("choices")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms a fenced verdict is stripped and accepted.
#[test]
fn fenced_verdict_accepted() {
    let content = "```json\n{\"score\": 88, \"reasoning\": \"fits\"}\n```";
    let client = ScriptedClient::replying(chat_reply(content));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let word = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect("fenced verdict must adjudicate");

    assert_eq!(word.as_bytes()[31], 88);
}

/// Confirms malformed verdicts carry the unstripped completion text.
#[test]
fn malformed_verdict_error_carries_raw_text() {
    let content = "```\nI would give this a 95.\n```";
    let client = ScriptedClient::replying(chat_reply(content));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect_err("prose verdict must be rejected");

    match err {
        AdjudicationError::MalformedVerdict {
            raw,
        } => assert_eq!(raw, content),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Confirms out-of-range scores are rejected and record no diagnostic.
#[test]
fn out_of_range_score_rejected_without_diagnostic() {
    let client =
        ScriptedClient::replying(chat_reply(r#"{"score": 150, "reasoning": "too generous"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let err = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect_err("overflowing score must be rejected");

    match err {
        AdjudicationError::ScoreOutOfRange {
            value,
        } => assert!((value - 150.0).abs() < f64::EPSILON),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(sink.lines.is_empty());
}

/// Confirms fractional scores round to the nearest integer before encoding.
#[test]
fn fractional_score_rounds_to_nearest() {
    let client =
        ScriptedClient::replying(chat_reply(r#"{"score": 89.6, "reasoning": "close call"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();

    let word = unit
        .evaluate(&judge_invocation("criteria", "submission"), &judge_secrets(), &mut sink)
        .expect("fractional score must round");

    assert_eq!(word.as_bytes()[31], 90);
    assert_eq!(sink.lines, vec!["AI Verdict: Score 90. Reasoning: close call".to_string()]);
}

/// Confirms binary arguments are carried without affecting adjudication.
#[test]
fn bytes_args_do_not_affect_adjudication() {
    let client = ScriptedClient::replying(chat_reply(r#"{"score": 42, "reasoning": "ok"}"#));
    let unit = AdjudicationUnit::new(&client);
    let mut sink = RecordingSink::default();
    let invocation = Invocation {
        args: vec!["criteria".to_string(), "submission".to_string()],
        bytes_args: vec![vec![0xde, 0xad]],
    };

    let word = unit
        .evaluate(&invocation, &judge_secrets(), &mut sink)
        .expect("bytes args must not affect adjudication");

    assert_eq!(word.as_bytes()[31], 42);
}
