// crates/bounty-judge-sim/src/sandbox.rs
// ============================================================================
// Module: Emulated Sandbox
// Description: Runs the adjudication unit under the production host contract.
// Purpose: Inject arguments and secrets, capture output, report the result.
// Dependencies: bounty-judge-core, thiserror
// ============================================================================

//! ## Overview
//! [`Sandbox`] holds one invocation's arguments and secrets exactly as the
//! production host would inject them, runs the unit against a caller-supplied
//! completion client, and reports the decoded score together with the wire
//! hex and every captured diagnostic line. Unit failures propagate unchanged
//! inside [`SandboxError`]; the sandbox never retries or rewrites a result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bounty_judge_core::AdjudicationError;
use bounty_judge_core::AdjudicationUnit;
use bounty_judge_core::CompletionClient;
use bounty_judge_core::DiagnosticSink;
use bounty_judge_core::Invocation;
use bounty_judge_core::Score;
use bounty_judge_core::ScoreDecodeError;
use bounty_judge_core::SecretBundle;
use thiserror::Error;

use crate::artifact::ArtifactError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Simulation sandbox errors.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Unit source artifact could not be loaded.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    /// The unit rejected the invocation.
    #[error("adjudication failed: {0}")]
    Execution(#[from] AdjudicationError),
    /// The returned word did not decode back to a score.
    #[error("result decode failed: {0}")]
    Decode(#[from] ScoreDecodeError),
}

// ============================================================================
// SECTION: Capture Sink
// ============================================================================

/// Diagnostic sink that buffers lines the way the host captures output.
#[derive(Debug, Default)]
pub struct CaptureSink {
    /// Captured lines in emission order.
    lines: Vec<String>,
}

impl CaptureSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured lines in emission order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the sink and returns the captured lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl DiagnosticSink for CaptureSink {
    fn record(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

// ============================================================================
// SECTION: Sandbox
// ============================================================================

/// Outcome of one successful sandbox execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxReport {
    /// Diagnostic lines the unit emitted, in order.
    pub captured_output: Vec<String>,
    /// Score decoded from the returned word.
    pub score: Score,
    /// Wire form of the returned word.
    pub wire_hex: String,
}

/// Emulated oracle host for one unit invocation.
///
/// # Invariants
/// - Arguments and secrets are fixed at construction; the sandbox adds or
///   rewrites nothing during execution.
#[derive(Debug)]
pub struct Sandbox {
    /// Positional and byte arguments injected into the unit.
    invocation: Invocation,
    /// Named secrets injected into the unit.
    secrets: SecretBundle,
}

impl Sandbox {
    /// Creates a sandbox over the given injected inputs.
    #[must_use]
    pub const fn new(invocation: Invocation, secrets: SecretBundle) -> Self {
        Self {
            invocation,
            secrets,
        }
    }

    /// Runs the unit once and reports the decoded result.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError`] when the unit rejects the invocation or the
    /// returned word does not decode.
    pub fn execute<C>(&self, client: &C) -> Result<SandboxReport, SandboxError>
    where
        C: CompletionClient,
    {
        let mut sink = CaptureSink::new();
        let unit = AdjudicationUnit::new(client);
        let word = unit.evaluate(&self.invocation, &self.secrets, &mut sink)?;
        let score = word.decode_score()?;
        Ok(SandboxReport {
            captured_output: sink.into_lines(),
            score,
            wire_hex: word.wire_hex(),
        })
    }
}
