// crates/bounty-judge-core/src/lib.rs
// ============================================================================
// Module: Bounty Judge Core Library
// Description: Public API surface for the Bounty Judge adjudication core.
// Purpose: Expose core types, host interfaces, and the adjudication runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Bounty Judge core implements the adjudication unit for the bounty
//! marketplace oracle: it turns a criteria/submission pair into a model
//! verdict and a fixed-width score word suitable for on-chain settlement.
//! The unit is host-agnostic and integrates through explicit interfaces
//! rather than embedding into any particular execution environment.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CompletionClient;
pub use interfaces::CompletionError;
pub use interfaces::DiagnosticSink;
pub use interfaces::Invocation;
pub use interfaces::ProviderReply;
pub use runtime::AdjudicationError;
pub use runtime::AdjudicationUnit;
