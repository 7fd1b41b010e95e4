// crates/bounty-judge-core/src/runtime/mod.rs
// ============================================================================
// Module: Bounty Judge Runtime
// Description: Adjudication engine executing the judging pipeline.
// Purpose: Turn one invocation into one validated, encoded verdict.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime implements the single canonical adjudication path. Every host
//! adapter must call into [`engine::AdjudicationUnit`] so identical inputs
//! yield identical prompts, verdicts, and score words everywhere.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::AdjudicationError;
pub use engine::AdjudicationUnit;
