// crates/bounty-judge-sim/tests/sandbox_unit.rs
// ============================================================================
// Module: Sandbox Unit Tests
// Description: Tests for sandbox execution, fixtures, and artifact loading.
// Purpose: Verify the emulated host honors the production injection contract.
// ============================================================================

//! ## Overview
//! Drives the sandbox with a scripted completion client:
//! - Successful runs report the decoded score, wire hex, and captured lines.
//! - Input failures reject before any provider call.
//! - Fixture arguments and secret binding match the host contract.
//! - Artifact loading enforces the size cap and utf-8 and reports the digest.

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

use std::io::Write;
use std::path::Path;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use bounty_judge_core::AdjudicationError;
use bounty_judge_core::ApiCredential;
use bounty_judge_core::CompletionClient;
use bounty_judge_core::CompletionError;
use bounty_judge_core::DiagnosticSink;
use bounty_judge_core::ModelQuery;
use bounty_judge_core::ProviderReply;
use bounty_judge_core::SECRET_KEY_NAME;
use bounty_judge_core::SecretBundle;
use bounty_judge_sim::ArtifactError;
use bounty_judge_sim::CaptureSink;
use bounty_judge_sim::FIXTURE_CRITERIA;
use bounty_judge_sim::FIXTURE_SUBMISSION;
use bounty_judge_sim::Sandbox;
use bounty_judge_sim::SandboxError;
use bounty_judge_sim::SourceArtifact;
use bounty_judge_sim::fixture_invocation;
use bounty_judge_sim::fixture_secrets;
use serde_json::Value;
use serde_json::json;
use tempfile::NamedTempFile;

enum Script {
    Reply(Value),
    Transport(String),
}

struct StubClient {
    script: Script,
    calls: AtomicU64,
}

impl StubClient {
    fn replying(body: Value) -> Self {
        Self {
            script: Script::Reply(body),
            calls: AtomicU64::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            script: Script::Transport(message.to_string()),
            calls: AtomicU64::new(0),
        }
    }

    fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionClient for StubClient {
    fn complete(
        &self,
        _query: &ModelQuery,
        _credential: &ApiCredential,
    ) -> Result<ProviderReply, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(body) => Ok(ProviderReply {
                body: body.clone(),
            }),
            Script::Transport(message) => Err(CompletionError::Transport(message.clone())),
        }
    }
}

fn chat_reply(content: &str) -> Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[test]
fn sandbox_reports_score_output_and_wire_hex() {
    let client = StubClient::replying(chat_reply(r#"{"score": 95, "reasoning": "mentions DeFi"}"#));
    let sandbox = Sandbox::new(fixture_invocation(), fixture_secrets(ApiCredential::new("sk-test")));

    let report = sandbox.execute(&client).expect("execution should succeed");

    assert_eq!(report.score.value(), 95);
    assert_eq!(report.wire_hex.len(), 66);
    assert!(report.wire_hex.starts_with("0x"));
    assert!(report.wire_hex.ends_with("5f"));
    assert_eq!(
        report.captured_output,
        vec!["AI Verdict: Score 95. Reasoning: mentions DeFi".to_string()]
    );
    assert_eq!(client.call_count(), 1);
}

#[test]
fn sandbox_rejects_missing_secret_without_provider_call() {
    let client = StubClient::replying(chat_reply(r#"{"score": 95, "reasoning": "ok"}"#));
    let sandbox = Sandbox::new(fixture_invocation(), SecretBundle::new());

    let result = sandbox.execute(&client);

    match result {
        Err(SandboxError::Execution(AdjudicationError::MissingArgument(err))) => {
            assert!(err.to_string().contains("openaiKey"));
        }
        other => panic!("expected missing argument failure, got {other:?}"),
    }
    assert_eq!(client.call_count(), 0);
}

#[test]
fn sandbox_propagates_provider_failure() {
    let client = StubClient::failing("connection refused");
    let sandbox = Sandbox::new(fixture_invocation(), fixture_secrets(ApiCredential::new("sk-test")));

    let err = sandbox.execute(&client).expect_err("transport failure should reject");

    assert!(matches!(err, SandboxError::Execution(AdjudicationError::Provider { .. })));
    assert!(err.to_string().contains("adjudication failed"));
}

#[test]
fn fixture_invocation_matches_host_contract() {
    let invocation = fixture_invocation();

    assert_eq!(invocation.args.len(), 2);
    assert_eq!(
        invocation.args[0],
        "Check if the submission discusses 'DeFi' or 'Finance'. If yes, score 90-100. If no, \
         score 0."
    );
    assert_eq!(
        invocation.args[1],
        "This article explains how Decentralized Finance (DeFi) is revolutionizing banking."
    );
    assert_eq!(invocation.args[0], FIXTURE_CRITERIA);
    assert_eq!(invocation.args[1], FIXTURE_SUBMISSION);
    assert!(invocation.bytes_args.is_empty());
}

#[test]
fn fixture_secrets_bind_unit_secret_name() {
    let bundle = fixture_secrets(ApiCredential::new("sk-local"));

    let credential = bundle.get(SECRET_KEY_NAME).expect("secret should be bound");
    assert_eq!(credential.reveal(), "sk-local");
    assert!(bundle.get("otherKey").is_none());
}

#[test]
fn capture_sink_preserves_emission_order() {
    let mut sink = CaptureSink::new();
    sink.record("first");
    sink.record("second");

    assert_eq!(sink.lines(), ["first".to_string(), "second".to_string()]);
    assert_eq!(sink.into_lines(), vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn artifact_load_reports_length_and_digest() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"fn judge() {}\n").expect("write source");

    let artifact = SourceArtifact::load(file.path()).expect("load should succeed");

    assert_eq!(artifact.byte_len(), 14);
    assert_eq!(artifact.text(), "fn judge() {}\n");
    assert_eq!(artifact.path(), file.path());
    assert_eq!(artifact.digest().len(), 64);
    assert!(artifact.digest().chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
}

#[test]
fn artifact_digest_matches_known_empty_input_value() {
    let file = NamedTempFile::new().expect("temp file");

    let artifact = SourceArtifact::load(file.path()).expect("load should succeed");

    assert_eq!(artifact.byte_len(), 0);
    assert_eq!(
        artifact.digest(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn artifact_load_rejects_oversized_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).expect("write payload");

    let err = SourceArtifact::load(file.path()).expect_err("oversized source should reject");

    assert!(matches!(err, ArtifactError::TooLarge { .. }));
    assert!(err.to_string().contains("exceeds size limit"));
}

#[test]
fn artifact_load_rejects_non_utf8_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&[0xFF, 0xFE, 0xFF]).expect("write payload");

    let err = SourceArtifact::load(file.path()).expect_err("non-utf8 source should reject");

    assert!(matches!(err, ArtifactError::InvalidEncoding));
    assert_eq!(err.to_string(), "artifact must be utf-8");
}

#[test]
fn artifact_load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.rs");

    let err = SourceArtifact::load(Path::new(&path)).expect_err("missing source should reject");

    assert!(matches!(err, ArtifactError::Io(_)));
    assert!(err.to_string().contains("artifact io error"));
}
