// crates/bounty-judge-sim/src/lib.rs
// ============================================================================
// Module: Bounty Judge Simulation
// Description: Emulated sandbox for exercising the adjudication unit locally.
// Purpose: Reproduce the production argument/secret injection contract.
// Dependencies: bounty-judge-core, sha2, thiserror
// ============================================================================

//! ## Overview
//! The oracle network runs the adjudication unit inside a restricted host
//! that injects positional arguments, byte arguments, and named secrets,
//! captures terminal output, and relays the returned word on-chain. This
//! crate emulates that host so operators can exercise the unit end to end
//! before deploying: [`Sandbox`] reproduces the injection contract and
//! captures diagnostics, [`SourceArtifact`] pins which unit source revision
//! a run exercises, and [`fixtures`] supplies the canonical dry-run inputs.
//!
//! Passing a simulation run is designed to predict passing in production;
//! the sandbox deliberately adds no behavior the production host lacks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifact;
pub mod fixtures;
pub mod sandbox;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use artifact::ArtifactError;
pub use artifact::MAX_SOURCE_ARTIFACT_BYTES;
pub use artifact::SourceArtifact;
pub use fixtures::FIXTURE_CRITERIA;
pub use fixtures::FIXTURE_SUBMISSION;
pub use fixtures::fixture_invocation;
pub use fixtures::fixture_secrets;
pub use sandbox::CaptureSink;
pub use sandbox::Sandbox;
pub use sandbox::SandboxError;
pub use sandbox::SandboxReport;
