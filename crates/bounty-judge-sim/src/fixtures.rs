// crates/bounty-judge-sim/src/fixtures.rs
// ============================================================================
// Module: Simulation Fixtures
// Description: Canonical dry-run arguments and secret binding.
// Purpose: Drive the unit with a representative passing submission.
// Dependencies: bounty-judge-core
// ============================================================================

//! ## Overview
//! Every simulation run uses one fixed criteria/submission pair chosen so a
//! well-behaved model scores in the 90–100 band. Holding the inputs constant
//! lets operators compare runs across source revisions and models.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bounty_judge_core::ApiCredential;
use bounty_judge_core::Invocation;
use bounty_judge_core::SECRET_KEY_NAME;
use bounty_judge_core::SecretBundle;

// ============================================================================
// SECTION: Fixture Arguments
// ============================================================================

/// Canonical bounty criteria for dry runs.
pub const FIXTURE_CRITERIA: &str =
    "Check if the submission discusses 'DeFi' or 'Finance'. If yes, score 90-100. If no, score 0.";

/// Canonical contestant submission for dry runs.
pub const FIXTURE_SUBMISSION: &str =
    "This article explains how Decentralized Finance (DeFi) is revolutionizing banking.";

/// Builds the canonical dry-run invocation.
///
/// Positional arguments carry the fixture pair; the byte-argument list is
/// empty, matching what the production host injects for this unit.
#[must_use]
pub fn fixture_invocation() -> Invocation {
    Invocation {
        args: vec![FIXTURE_CRITERIA.to_string(), FIXTURE_SUBMISSION.to_string()],
        bytes_args: Vec::new(),
    }
}

/// Binds a local credential under the secret name the unit expects.
#[must_use]
pub fn fixture_secrets(credential: ApiCredential) -> SecretBundle {
    let mut bundle = SecretBundle::new();
    bundle.insert(SECRET_KEY_NAME, credential);
    bundle
}
