// crates/bounty-judge-provider/src/chat.rs
// ============================================================================
// Module: Chat Completion Client
// Description: Blocking client for OpenAI-compatible chat completions.
// Purpose: Perform the single judging request with strict limits.
// Dependencies: bounty-judge-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! The chat client posts one judging request per adjudication: the fixed
//! system instruction and rendered user message, the configured model, and
//! the contract sampling temperature. Redirects are never followed, the
//! endpoint scheme is validated up front, and response bodies are read under
//! a hard byte limit. The client decodes the envelope to JSON and leaves all
//! verdict interpretation to the core pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use bounty_judge_core::ApiCredential;
use bounty_judge_core::CompletionClient;
use bounty_judge_core::CompletionError;
use bounty_judge_core::DEFAULT_COMPLETION_ENDPOINT;
use bounty_judge_core::DEFAULT_MODEL;
use bounty_judge_core::ModelQuery;
use bounty_judge_core::ProviderReply;
use bounty_judge_core::SAMPLING_TEMPERATURE;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout in milliseconds.
///
/// Chat completions routinely take tens of seconds for long submissions, so
/// the ceiling is far above interactive-HTTP norms.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Default maximum response size in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// User agent string for outbound requests.
const USER_AGENT: &str = "bounty-judge/0.1";

/// Configuration for the chat completion client.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` endpoints.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionClientConfig {
    /// Chat-completion endpoint URL.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
}

impl Default for CompletionClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            allow_http: false,
        }
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// One message in the chat-completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Message role, `system` or `user`.
    pub role: String,
    /// Message content text.
    pub content: String,
}

/// Chat-completion request body.
///
/// The member layout matches the OpenAI chat-completion wire contract:
/// `model`, a system/user message pair, and `temperature`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequestBody {
    /// Model identifier.
    pub model: String,
    /// System instruction followed by the user message.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature, fixed by the oracle contract.
    pub temperature: f64,
}

impl ChatRequestBody {
    /// Builds the request body for one judging query.
    #[must_use]
    pub fn new(model: &str, query: &ModelQuery) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: query.system_instruction().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: query.user_message().to_string(),
                },
            ],
            temperature: SAMPLING_TEMPERATURE,
        }
    }
}

// ============================================================================
// SECTION: Client Implementation
// ============================================================================

/// Blocking chat-completion client for OpenAI-compatible endpoints.
///
/// # Invariants
/// - Exactly one HTTP request per [`CompletionClient::complete`] call.
/// - Redirects are not followed.
/// - The credential travels only in the `Authorization` header.
#[derive(Debug)]
pub struct OpenAiCompletionClient {
    /// Client configuration, including limits and endpoint policy.
    config: CompletionClientConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl OpenAiCompletionClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the endpoint is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: CompletionClientConfig) -> Result<Self, CompletionError> {
        validate_endpoint(&config)?;
        let client = build_http_client(&config)?;
        Ok(Self {
            config,
            client,
        })
    }
}

impl CompletionClient for OpenAiCompletionClient {
    fn complete(
        &self,
        query: &ModelQuery,
        credential: &ApiCredential,
    ) -> Result<ProviderReply, CompletionError> {
        let body = ChatRequestBody::new(&self.config.model, query);
        let mut response = self
            .client
            .post(self.config.endpoint.as_str())
            .bearer_auth(credential.reveal())
            .json(&body)
            .send()
            .map_err(|err| CompletionError::Transport(err.to_string()))?;
        let status = response.status();
        let bytes = read_response_limited(&mut response, self.config.max_response_bytes)?;
        if !status.is_success() {
            return Err(CompletionError::RejectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        let envelope: Value = serde_json::from_slice(&bytes)
            .map_err(|err| CompletionError::MalformedPayload(err.to_string()))?;
        Ok(ProviderReply {
            body: envelope,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the endpoint URL scheme and shape.
fn validate_endpoint(config: &CompletionClientConfig) -> Result<(), CompletionError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|_| CompletionError::Transport("invalid endpoint url".to_string()))?;
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        _ => {
            return Err(CompletionError::Transport("unsupported endpoint scheme".to_string()));
        }
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(CompletionError::Transport(
            "endpoint credentials are not allowed".to_string(),
        ));
    }
    if url.host_str().is_none() {
        return Err(CompletionError::Transport("endpoint host required".to_string()));
    }
    Ok(())
}

/// Builds the blocking HTTP client with limits applied.
fn build_http_client(config: &CompletionClientConfig) -> Result<Client, CompletionError> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(USER_AGENT)
        .redirect(Policy::none())
        .build()
        .map_err(|_| CompletionError::Transport("http client build failed".to_string()))
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, CompletionError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| CompletionError::Transport("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(CompletionError::Transport(
            "completion response exceeds size limit".to_string(),
        ));
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| CompletionError::Transport("failed to read response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(CompletionError::Transport(
            "completion response exceeds size limit".to_string(),
        ));
    }
    if let Some(expected) = expected_len {
        let expected = usize::try_from(expected)
            .map_err(|_| CompletionError::Transport("invalid response length".to_string()))?;
        if buf.len() < expected {
            return Err(CompletionError::Transport("completion response truncated".to_string()));
        }
    }
    Ok(buf)
}
